#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Tile Chase session on stdin and stdout.

mod render;
mod settings;

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tile_chase_core::{Command, ContactModel, Direction, EncounterRule, WELCOME_BANNER};
use tile_chase_system_wander_clock::{self as wander_clock, WanderClock};
use tile_chase_world::{self as world, query};

use settings::{FileConfig, Settings};

const HELP: &str = "\
commands: w/a/s/d or up/left/down/right move, t tick adversaries, \
p toggle pause, empty line waits, h help, q quit";

/// Chase down every wandering adversary on a tile map.
#[derive(Debug, Parser)]
#[command(name = "tile-chase", version)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Text file with one map row per line; replaces the configured map.
    #[arg(short, long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Number of adversaries to place.
    #[arg(short, long)]
    adversaries: Option<usize>,

    /// Seed for placement and wandering.
    #[arg(long)]
    seed: Option<u64>,

    /// Attempts per placement and per wander tick.
    #[arg(long, value_name = "ATTEMPTS")]
    retry_limit: Option<u32>,

    /// Who is captured when the player and an adversary meet.
    #[arg(long, value_enum)]
    encounter: Option<EncounterArg>,

    /// When two entities count as meeting.
    #[arg(long, value_enum)]
    contact: Option<ContactArg>,

    /// Start the session paused.
    #[arg(long)]
    start_paused: bool,

    /// Milliseconds between adversary ticks.
    #[arg(long, value_name = "MS")]
    tick_ms: Option<u64>,

    /// Milliseconds of game time that pass with every entered line.
    #[arg(long, value_name = "MS")]
    step_ms: Option<u64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum EncounterArg {
    /// The adversary is always captured.
    PlayerPrevails,
    /// Whoever moves captures.
    AggressorPrevails,
}

impl From<EncounterArg> for EncounterRule {
    fn from(value: EncounterArg) -> Self {
        match value {
            EncounterArg::PlayerPrevails => Self::PlayerPrevails,
            EncounterArg::AggressorPrevails => Self::AggressorPrevails,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ContactArg {
    /// Only stepping onto the other entity counts.
    ExactCell,
    /// Ending a move next to an opponent also counts.
    Touching,
}

impl From<ContactArg> for ContactModel {
    fn from(value: ContactArg) -> Self {
        match value {
            ContactArg::ExactCell => Self::ExactCell,
            ContactArg::Touching => Self::Touching,
        }
    }
}

/// A single line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Input {
    Command(Command),
    Wait,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let input = match line.trim().to_ascii_lowercase().as_str() {
        "" => Input::Wait,
        "w" | "up" => move_player(Direction::Up),
        "s" | "down" => move_player(Direction::Down),
        "a" | "left" => move_player(Direction::Left),
        "d" | "right" => move_player(Direction::Right),
        "t" | "tick" => Input::Command(Command::TickAdversaries),
        "p" | "pause" => Input::Command(Command::TogglePause),
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

fn move_player(direction: Direction) -> Input {
    Input::Command(Command::MovePlayer { direction })
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    if let Some(path) = &args.map {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read map file at {}", path.display()))?;
        file.map = Some(text.lines().map(str::to_owned).collect());
    }
    file.adversaries = args.adversaries.or(file.adversaries);
    file.seed = args.seed.or(file.seed);
    file.retry_limit = args.retry_limit.or(file.retry_limit);
    file.encounter = args.encounter.map(EncounterRule::from).or(file.encounter);
    file.contact = args.contact.map(ContactModel::from).or(file.contact);
    if args.start_paused {
        file.start_paused = Some(true);
    }
    file.tick_ms = args.tick_ms.or(file.tick_ms);
    file.step_ms = args.step_ms.or(file.step_ms);

    Settings::resolve(file)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Entry point for the Tile Chase command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let settings = load_settings(&args)?;
    let mut world = world::build_game(&settings.instructions, settings.adversaries, &settings.world)
        .context("failed to construct the game session")?;
    let mut clock = WanderClock::new(wander_clock::Config::new(settings.tick_interval));
    tracing::info!(
        tick = ?settings.tick_interval,
        step = ?settings.step,
        "command loop starting"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{WELCOME_BANNER}")?;
    writeln!(out, "{HELP}")?;
    write!(out, "{}", render::board(&world))?;
    out.flush()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let Some(input) = parse_input(&line) else {
            writeln!(out, "unknown command `{}`; {HELP}", line.trim())?;
            continue;
        };

        let mut events = Vec::new();
        match input {
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Input::Command(command) => world::apply(&mut world, command, &mut events),
            Input::Wait => {}
        }

        let mut ticks = Vec::new();
        clock.handle(&events, query::game_state(&world), settings.step, &mut ticks);
        for tick in ticks {
            world::apply(&mut world, tick, &mut events);
        }

        for line in events.iter().filter_map(render::describe) {
            writeln!(out, "{line}")?;
        }
        write!(out, "{}", render::board(&world))?;
        out.flush()?;

        if query::game_state(&world).is_terminal() {
            break;
        }
    }

    Ok(())
}
