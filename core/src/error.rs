//! Error taxonomy shared by the world and its shells.

use crate::{CellCoord, EntityId, Role};

/// Reasons a game session cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// The map instructions contain no cells.
    #[error("map instructions are empty")]
    EmptyMap,

    /// A row's length differs from the first row's.
    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A map symbol has no catalog entry.
    #[error("map symbol {symbol:?} at row {row}, column {column} has no terrain entry")]
    UnmappedSymbol {
        /// The symbol that failed to resolve.
        symbol: char,
        /// Zero-based row of the symbol.
        row: usize,
        /// Zero-based column of the symbol.
        column: usize,
    },

    /// Random placement ran out of attempts.
    #[error("could not place {role} after {attempts} attempts; the map has too little free space")]
    PlacementExhausted {
        /// Role of the entity being placed.
        role: Role,
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// An explicit placement targets a cell that cannot be occupied.
    #[error("cannot place {role} at {cell}: cell is out of bounds, impassable or taken")]
    InvalidPlacement {
        /// Role of the entity being placed.
        role: Role,
        /// Requested cell.
        cell: CellCoord,
    },

    /// The retry limit was configured as zero.
    #[error("retry limit must allow at least one attempt")]
    ZeroRetryLimit,
}

/// Attempt to occupy a cell that already holds another entity.
///
/// Move validation checks occupancy first, so this signals a bug in the
/// engine rather than a condition callers are expected to handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cell {cell} is held by {occupant}; {entrant} cannot enter")]
pub struct OccupancyConflict {
    /// Cell that was targeted.
    pub cell: CellCoord,
    /// Entity already standing there.
    pub occupant: EntityId,
    /// Entity that attempted to enter.
    pub entrant: EntityId,
}

/// Reasons a grid refuses to record an occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OccupancyError {
    /// The coordinate lies outside the grid.
    #[error("cell {cell} is outside the grid; {entrant} cannot enter")]
    OutOfBounds {
        /// Cell that was targeted.
        cell: CellCoord,
        /// Entity that attempted to enter.
        entrant: EntityId,
    },

    /// The cell's terrain can never hold an occupant.
    #[error("cell {cell} is impassable; {entrant} cannot enter")]
    Impassable {
        /// Cell that was targeted.
        cell: CellCoord,
        /// Entity that attempted to enter.
        entrant: EntityId,
    },

    /// Another entity already stands on the cell.
    #[error(transparent)]
    Conflict(#[from] OccupancyConflict),
}
