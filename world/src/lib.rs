#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game session state for Tile Chase.
//!
//! A [`World`] owns the terrain grid, the live entities, the game state
//! machine and the random source used for wandering. Shells construct one
//! with [`build_game`] and drive it exclusively through [`apply`] (or the thin
//! wrappers around it), reading it back through the [`query`] module.

mod encounter;
mod grid;
mod movement;
mod registry;
mod state;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tile_chase_core::{
    CellCoord, Command, ConfigurationError, ContactModel, Direction, Displacement,
    EncounterRule, EntityId, Event, GameState, MoveOutcome, RetryLimit, Role, TerrainCatalog,
};

pub use grid::{Cell, Grid, MapInstructions};

use registry::EntityRegistry;
use state::GameStateMachine;

/// Seed used when the shell does not pick one.
pub const DEFAULT_RNG_SEED: u64 = 0x42f0_e1eb_d4a5_3c21;

/// Construction parameters for a game session.
#[derive(Clone, Debug)]
pub struct Config {
    /// Symbol table used to resolve the map instructions.
    pub catalog: TerrainCatalog,
    /// Attempts allowed for each random placement and each wander tick.
    pub retry_limit: RetryLimit,
    /// Who is captured when the player and an adversary meet.
    pub encounter: EncounterRule,
    /// When two entities count as meeting.
    pub contact: ContactModel,
    /// Seed for placement and wandering.
    pub rng_seed: u64,
    /// Start in [`GameState::Paused`] instead of [`GameState::Playing`].
    pub start_paused: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: TerrainCatalog::standard(),
            retry_limit: RetryLimit::DEFAULT,
            encounter: EncounterRule::default(),
            contact: ContactModel::default(),
            rng_seed: DEFAULT_RNG_SEED,
            start_paused: false,
        }
    }
}

/// Represents one authoritative Tile Chase session.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    registry: EntityRegistry,
    machine: GameStateMachine,
    rng: ChaCha8Rng,
    retry_limit: RetryLimit,
    encounter: EncounterRule,
    contact: ContactModel,
}

impl World {
    fn empty(instructions: &MapInstructions, config: &Config) -> Result<Self, ConfigurationError> {
        Ok(Self {
            grid: Grid::build(instructions, &config.catalog)?,
            registry: EntityRegistry::new(),
            machine: GameStateMachine::new(config.start_paused),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            retry_limit: config.retry_limit,
            encounter: config.encounter,
            contact: config.contact,
        })
    }

    fn announce(&self, entered: Option<GameState>, out_events: &mut Vec<Event>) {
        if let Some(state) = entered {
            tracing::info!(?state, "game state changed");
            out_events.push(Event::StateChanged { state });
        }
    }
}

/// Builds a session, placing the player and then `adversary_count`
/// adversaries on random passable cells.
pub fn build_game(
    instructions: &MapInstructions,
    adversary_count: usize,
    config: &Config,
) -> Result<World, ConfigurationError> {
    let mut world = World::empty(instructions, config)?;
    let _ = world.place_randomly(Role::Player)?;
    for _ in 0..adversary_count {
        let _ = world.place_randomly(Role::Adversary)?;
    }
    log_constructed(&world);
    Ok(world)
}

/// Builds a session with every entity at a chosen cell.
///
/// Each cell must be passable and not already taken by an earlier placement.
pub fn build_game_with_placements(
    instructions: &MapInstructions,
    player: CellCoord,
    adversaries: &[CellCoord],
    config: &Config,
) -> Result<World, ConfigurationError> {
    let mut world = World::empty(instructions, config)?;
    let _ = world.place_at(Role::Player, player)?;
    for &cell in adversaries {
        let _ = world.place_at(Role::Adversary, cell)?;
    }
    log_constructed(&world);
    Ok(world)
}

fn log_constructed(world: &World) {
    tracing::info!(
        rows = world.grid.rows(),
        columns = world.grid.columns(),
        adversaries = world.registry.adversary_count(),
        state = ?world.machine.state(),
        "game session constructed"
    );
}

/// Applies the provided command to the world, appending resulting events.
///
/// Commands that do not apply in the current state are ignored silently.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => {
            let _ = submit_player_move(world, direction, out_events);
        }
        Command::TickAdversaries => world.tick_adversaries(out_events),
        Command::Pause => {
            let entered = world.machine.pause();
            world.announce(entered, out_events);
        }
        Command::Resume => {
            let entered = world.machine.resume();
            world.announce(entered, out_events);
        }
        Command::TogglePause => {
            let entered = world.machine.toggle_pause();
            world.announce(entered, out_events);
        }
    }
}

/// Moves the player one orthogonal step.
pub fn submit_player_move(
    world: &mut World,
    direction: Direction,
    out_events: &mut Vec<Event>,
) -> MoveOutcome {
    match world.registry.player() {
        Some(player) => world.displace(player.id, direction.displacement(), out_events),
        None => MoveOutcome::Ignored,
    }
}

/// Validates and applies a single displacement for any live entity.
pub fn move_entity(
    world: &mut World,
    entity: EntityId,
    displacement: Displacement,
    out_events: &mut Vec<Event>,
) -> MoveOutcome {
    world.displace(entity, displacement, out_events)
}

/// Moves every live adversary once with the bounded-retry random walk.
pub fn tick_adversaries(world: &mut World, out_events: &mut Vec<Event>) {
    apply(world, Command::TickAdversaries, out_events);
}

/// Suspends play.
pub fn pause(world: &mut World, out_events: &mut Vec<Event>) {
    apply(world, Command::Pause, out_events);
}

/// Resumes a paused session.
pub fn resume(world: &mut World, out_events: &mut Vec<Event>) {
    apply(world, Command::Resume, out_events);
}

/// Flips between playing and paused.
pub fn toggle_pause(world: &mut World, out_events: &mut Vec<Event>) {
    apply(world, Command::TogglePause, out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use tile_chase_core::{
        CellCoord, EntityId, EntitySnapshot, EntityView, GameState, TerrainKind,
    };

    /// Current lifecycle state.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.machine.state()
    }

    /// Grid dimensions as `(rows, columns)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.grid.rows(), world.grid.columns())
    }

    /// Terrain kind at the cell, if inside the grid.
    #[must_use]
    pub fn terrain_at(world: &World, cell: CellCoord) -> Option<TerrainKind> {
        world.grid.kind_at(cell)
    }

    /// In bounds, passable terrain and unoccupied.
    #[must_use]
    pub fn is_passable(world: &World, cell: CellCoord) -> bool {
        world.grid.is_passable(cell)
    }

    /// Entity standing on the cell, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Option<EntityId> {
        world.grid.occupant(cell)
    }

    /// Snapshot of the player while it is alive.
    #[must_use]
    pub fn player(world: &World) -> Option<EntitySnapshot> {
        world.registry.player().map(|player| player.snapshot())
    }

    /// Snapshot of a live entity.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<EntitySnapshot> {
        world.registry.get(id).map(|entity| entity.snapshot())
    }

    /// Reports whether the entity is still on the grid.
    #[must_use]
    pub fn is_alive(world: &World, id: EntityId) -> bool {
        world.registry.contains(id)
    }

    /// Number of adversaries still alive.
    #[must_use]
    pub fn adversary_count(world: &World) -> usize {
        world.registry.adversary_count()
    }

    /// Captures a read-only view of every live entity.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(world.registry.iter().map(|entity| entity.snapshot()).collect())
    }

    /// Exposes a read-only view of the occupancy grid.
    #[must_use]
    pub fn occupancy_view(world: &World) -> OccupancyView<'_> {
        OccupancyView { grid: &world.grid }
    }

    /// Read-only view into cell occupancy.
    #[derive(Clone, Copy, Debug)]
    pub struct OccupancyView<'a> {
        grid: &'a Grid,
    }

    impl<'a> OccupancyView<'a> {
        /// Returns the entity occupying the provided cell, if any.
        #[must_use]
        pub fn occupant(&self, cell: CellCoord) -> Option<EntityId> {
            self.grid.occupant(cell)
        }

        /// Reports whether an entity could step onto the cell right now.
        #[must_use]
        pub fn is_free(&self, cell: CellCoord) -> bool {
            self.grid.is_passable(cell)
        }

        /// Occupants of every cell in row-major order.
        pub fn iter(&self) -> impl Iterator<Item = Option<EntityId>> + 'a {
            self.grid.cells().map(|cell| cell.occupant())
        }

        /// Provides the dimensions of the grid as `(rows, columns)`.
        #[must_use]
        pub fn dimensions(&self) -> (u32, u32) {
            (self.grid.rows(), self.grid.columns())
        }
    }
}
