#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Chase engine.
//!
//! This crate defines the message surface that connects shells, the
//! authoritative world, and pure systems. Shells submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to. Systems consume event streams and respond
//! exclusively with new command batches.

use std::fmt;

use serde::{Deserialize, Serialize};

mod error;
mod terrain;

pub use error::{ConfigurationError, OccupancyConflict, OccupancyError};
pub use terrain::{OccupyEffect, Terrain, TerrainCatalog, TerrainKind};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tile Chase. Catch every wanderer.";

/// Lifecycle state of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Commands and adversary ticks are accepted.
    Playing,
    /// Movement is suspended until the session is resumed.
    Paused,
    /// Every adversary was captured. Terminal.
    Won,
    /// The player was captured. Terminal.
    Lost,
}

impl GameState {
    /// Reports whether the state accepts no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player take a single orthogonal step.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Moves every live adversary once using the bounded-retry random walk.
    TickAdversaries,
    /// Suspends play.
    Pause,
    /// Resumes a paused session.
    Resume,
    /// Flips between playing and paused.
    TogglePause,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an entity moved between two cells.
    EntityMoved {
        /// Identifier of the entity that moved.
        entity: EntityId,
        /// Cell the entity occupied before moving.
        from: CellCoord,
        /// Cell the entity occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that a move landed on a cell whose terrain carries an effect.
    TerrainEffectTriggered {
        /// Entity that entered the cell.
        entity: EntityId,
        /// Cell that was entered.
        cell: CellCoord,
        /// Effect attached to the cell's terrain.
        effect: OccupyEffect,
    },
    /// Reports that an entity was defeated and removed from the grid.
    EntityCaptured {
        /// Entity that was removed.
        entity: EntityId,
        /// Entity responsible for the capture.
        by: EntityId,
    },
    /// Announces that the last adversary was captured.
    GameWon,
    /// Announces that the player was captured.
    GameLost,
    /// Announces that the session entered a new state.
    StateChanged {
        /// State that became active.
        state: GameState,
    },
}

/// Orthogonal directions accepted from player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Unit displacement travelled by a step in this direction.
    #[must_use]
    pub const fn displacement(self) -> Displacement {
        match self {
            Self::Up => Displacement::raw(-1, 0),
            Self::Down => Displacement::raw(1, 0),
            Self::Left => Displacement::raw(0, -1),
            Self::Right => Displacement::raw(0, 1),
        }
    }
}

/// Single-cell step expressed as row and column deltas.
///
/// Only the eight unit vectors around a cell can be constructed; the
/// zero vector is excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Displacement {
    row: i8,
    column: i8,
}

impl Displacement {
    /// The eight unit vectors sampled by the random walk, clockwise from north.
    pub const UNIT_VECTORS: [Displacement; 8] = [
        Displacement::raw(-1, 0),
        Displacement::raw(-1, 1),
        Displacement::raw(0, 1),
        Displacement::raw(1, 1),
        Displacement::raw(1, 0),
        Displacement::raw(1, -1),
        Displacement::raw(0, -1),
        Displacement::raw(-1, -1),
    ];

    /// Creates a displacement, returning `None` unless it is a unit vector.
    #[must_use]
    pub const fn new(row: i8, column: i8) -> Option<Self> {
        let in_range = row >= -1 && row <= 1 && column >= -1 && column <= 1;
        if in_range && !(row == 0 && column == 0) {
            Some(Self::raw(row, column))
        } else {
            None
        }
    }

    const fn raw(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    /// Row delta.
    #[must_use]
    pub const fn row(&self) -> i8 {
        self.row
    }

    /// Column delta.
    #[must_use]
    pub const fn column(&self) -> i8 {
        self.column
    }
}

/// Unique identifier assigned to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side an entity plays on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The singleton entity steered by the shell.
    Player,
    /// A wandering entity the player hunts.
    Adversary,
}

impl Role {
    /// Reports whether two roles meet as opponents.
    #[must_use]
    pub const fn opposes(self, other: Role) -> bool {
        !matches!(
            (self, other),
            (Role::Player, Role::Player) | (Role::Adversary, Role::Adversary)
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => f.write_str("player"),
            Self::Adversary => f.write_str("adversary"),
        }
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Applies a displacement, returning `None` when it leaves the
    /// non-negative quadrant. Upper bounds are the grid's concern.
    #[must_use]
    pub fn offset(self, displacement: Displacement) -> Option<CellCoord> {
        let row = self.row.checked_add_signed(i32::from(displacement.row()))?;
        let column = self
            .column
            .checked_add_signed(i32::from(displacement.column()))?;
        Some(Self::new(row, column))
    }

    /// Number of king moves separating two cells.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.row
            .abs_diff(other.row)
            .max(self.column.abs_diff(other.column))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Result of asking the movement engine to displace an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The entity now occupies `to`.
    Moved {
        /// Cell vacated by the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Impassable, out of bounds, or held by an entity that cannot be captured.
    Blocked,
    /// The mover itself was captured by the encounter it triggered.
    Defeated,
    /// The session is not playing or the entity is not alive.
    Ignored,
}

/// Decides which side loses when the player and an adversary meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterRule {
    /// The adversary is always the casualty, whoever moved.
    #[default]
    PlayerPrevails,
    /// The moving entity captures the one it meets.
    AggressorPrevails,
}

/// Decides when two entities are considered to meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactModel {
    /// Only a move onto the other entity's cell counts.
    #[default]
    ExactCell,
    /// A move that ends adjacent to an opponent also counts.
    Touching,
}

/// Maximum consecutive attempts made by the random walk and by placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RetryLimit(u32);

impl RetryLimit {
    /// Attempt cap used unless configured otherwise.
    pub const DEFAULT: RetryLimit = RetryLimit(10);

    /// Creates a retry limit. Zero attempts can never place or move anything.
    pub fn new(attempts: u32) -> Result<Self, ConfigurationError> {
        if attempts == 0 {
            return Err(ConfigurationError::ZeroRetryLimit);
        }
        Ok(Self(attempts))
    }

    /// Number of attempts allowed.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl Default for RetryLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Side the entity plays on.
    pub role: Role,
    /// Grid cell currently occupied by the entity.
    pub cell: CellCoord,
}

/// Read-only snapshot describing every live entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the entity standing on `cell`, if any.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Option<&EntitySnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.cell == cell)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}
