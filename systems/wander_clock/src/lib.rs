#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure clock system that turns elapsed time into adversary tick commands.

use std::time::Duration;

use tile_chase_core::{Command, Event, GameState};

/// Cadence used when the shell does not configure one.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Configuration parameters required to construct the wander clock.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    tick_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided tick cadence.
    #[must_use]
    pub const fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

/// Emits one [`Command::TickAdversaries`] per elapsed interval of play.
#[derive(Debug)]
pub struct WanderClock {
    tick_interval: Duration,
    accumulator: Duration,
}

impl WanderClock {
    /// Creates a new clock using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes the latest world events and elapsed time to emit tick commands.
    ///
    /// Time only accumulates while `state` is [`GameState::Playing`]. Any
    /// other state drops the partial interval, and so does a
    /// [`Event::StateChanged`] back into play, so a resumed session always
    /// waits a full interval before adversaries move again.
    pub fn handle(
        &mut self,
        events: &[Event],
        state: GameState,
        elapsed: Duration,
        out: &mut Vec<Command>,
    ) {
        if state != GameState::Playing {
            self.accumulator = Duration::ZERO;
            return;
        }

        let resumed = events.iter().any(|event| {
            matches!(
                event,
                Event::StateChanged {
                    state: GameState::Playing
                }
            )
        });
        if resumed {
            self.accumulator = Duration::ZERO;
        }

        if elapsed.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        for _ in 0..self.resolve_ticks() {
            out.push(Command::TickAdversaries);
        }
    }

    /// Time left until the next tick would be emitted.
    #[must_use]
    pub fn until_next_tick(&self) -> Duration {
        self.tick_interval.saturating_sub(self.accumulator)
    }

    /// A zero interval never ticks.
    fn resolve_ticks(&mut self) -> usize {
        if self.tick_interval.is_zero() {
            return 0;
        }

        let mut ticks = 0;
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_no_ticks_without_interval() {
        let mut clock = WanderClock::new(Config::new(Duration::ZERO));
        clock.accumulator = Duration::from_secs(10);
        assert_eq!(clock.resolve_ticks(), 0);
    }

    #[test]
    fn zero_interval_emits_nothing_while_playing() {
        let mut clock = WanderClock::new(Config::new(Duration::ZERO));
        let mut commands = Vec::new();
        clock.handle(&[], GameState::Playing, Duration::from_secs(3), &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn remainder_carries_over() {
        let mut clock = WanderClock::new(Config::new(Duration::from_millis(300)));
        clock.accumulator = Duration::from_millis(700);
        assert_eq!(clock.resolve_ticks(), 2);
        assert_eq!(clock.until_next_tick(), Duration::from_millis(200));
    }
}
