//! Playing / paused / won / lost lifecycle.

use tile_chase_core::GameState;

/// Tracks the session state and rejects transitions out of terminal states.
///
/// Every trigger returns the newly entered state, or `None` when the trigger
/// did not apply.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GameStateMachine {
    state: GameState,
}

impl GameStateMachine {
    pub(crate) fn new(start_paused: bool) -> Self {
        let state = if start_paused {
            GameState::Paused
        } else {
            GameState::Playing
        };
        Self { state }
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    /// Movement commands and adversary ticks are only accepted while playing.
    pub(crate) fn accepts_moves(&self) -> bool {
        self.state == GameState::Playing
    }

    pub(crate) fn pause(&mut self) -> Option<GameState> {
        self.enter_from(GameState::Playing, GameState::Paused)
    }

    pub(crate) fn resume(&mut self) -> Option<GameState> {
        self.enter_from(GameState::Paused, GameState::Playing)
    }

    pub(crate) fn toggle_pause(&mut self) -> Option<GameState> {
        match self.state {
            GameState::Playing => self.pause(),
            GameState::Paused => self.resume(),
            GameState::Won | GameState::Lost => None,
        }
    }

    pub(crate) fn win(&mut self) -> Option<GameState> {
        self.enter_from(GameState::Playing, GameState::Won)
    }

    pub(crate) fn lose(&mut self) -> Option<GameState> {
        self.enter_from(GameState::Playing, GameState::Lost)
    }

    fn enter_from(&mut self, expected: GameState, next: GameState) -> Option<GameState> {
        if self.state != expected {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_and_resume_round_trip() {
        let mut machine = GameStateMachine::new(false);
        assert_eq!(machine.pause(), Some(GameState::Paused));
        assert!(!machine.accepts_moves());
        assert_eq!(machine.pause(), None);
        assert_eq!(machine.resume(), Some(GameState::Playing));
        assert_eq!(machine.resume(), None);
        assert!(machine.accepts_moves());
    }

    #[test]
    fn toggle_flips_between_playing_and_paused() {
        let mut machine = GameStateMachine::new(true);
        assert_eq!(machine.state(), GameState::Paused);
        assert_eq!(machine.toggle_pause(), Some(GameState::Playing));
        assert_eq!(machine.toggle_pause(), Some(GameState::Paused));
    }

    #[test]
    fn terminal_states_accept_nothing() {
        let mut won = GameStateMachine::new(false);
        assert_eq!(won.win(), Some(GameState::Won));
        assert_eq!(won.resume(), None);
        assert_eq!(won.pause(), None);
        assert_eq!(won.toggle_pause(), None);
        assert_eq!(won.lose(), None);
        assert_eq!(won.state(), GameState::Won);

        let mut lost = GameStateMachine::new(false);
        assert_eq!(lost.lose(), Some(GameState::Lost));
        assert_eq!(lost.win(), None);
        assert!(!lost.accepts_moves());
    }

    #[test]
    fn outcome_requires_playing() {
        let mut machine = GameStateMachine::new(true);
        assert_eq!(machine.win(), None);
        assert_eq!(machine.lose(), None);
        assert_eq!(machine.state(), GameState::Paused);
    }
}
