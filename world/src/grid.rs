//! Terrain grid and the single-occupant invariant.

use std::str::FromStr;

use tile_chase_core::{
    CellCoord, ConfigurationError, EntityId, OccupancyConflict, OccupancyError, TerrainCatalog,
    TerrainKind,
};

/// Rectangular matrix of terrain symbols describing a map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapInstructions {
    rows: Vec<Vec<char>>,
    columns: usize,
}

impl MapInstructions {
    /// Builds instructions from one string per row.
    ///
    /// Every row must contain the same number of symbols and at least one
    /// symbol must be present overall.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let columns = rows.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(ConfigurationError::EmptyMap);
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(ConfigurationError::RaggedRow {
                    row: index,
                    expected: columns,
                    found: row.len(),
                });
            }
        }

        Ok(Self { rows, columns })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of symbols per row.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Symbol at the provided position, if it lies inside the matrix.
    #[must_use]
    pub fn symbol(&self, row: usize, column: usize) -> Option<char> {
        self.rows.get(row).and_then(|cells| cells.get(column)).copied()
    }
}

impl FromStr for MapInstructions {
    type Err = ConfigurationError;

    /// Parses one row per line. A trailing newline does not add a row.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_rows(text.lines())
    }
}

/// A single terrain cell and its occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: CellCoord,
    kind: TerrainKind,
    occupant: Option<EntityId>,
}

impl Cell {
    /// Position of the cell.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Terrain kind of the cell.
    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    /// Entity standing on the cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }
}

/// Fixed-size terrain grid that owns the single-occupant invariant.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Resolves every symbol through the catalog. Cells start unoccupied.
    pub fn build(
        instructions: &MapInstructions,
        catalog: &TerrainCatalog,
    ) -> Result<Self, ConfigurationError> {
        let mut cells = Vec::with_capacity(instructions.rows() * instructions.columns());
        for (row_index, row) in instructions.rows.iter().enumerate() {
            for (column_index, symbol) in row.iter().copied().enumerate() {
                let kind = catalog.lookup(symbol, row_index, column_index)?;
                cells.push(Cell {
                    coord: CellCoord::new(to_u32(row_index), to_u32(column_index)),
                    kind,
                    occupant: None,
                });
            }
        }

        Ok(Self {
            rows: to_u32(instructions.rows()),
            columns: to_u32(instructions.columns()),
            cells,
        })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row() < self.rows && coord.column() < self.columns
    }

    /// Cell at the coordinate, if inside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Terrain kind at the coordinate, if inside the grid.
    #[must_use]
    pub fn kind_at(&self, coord: CellCoord) -> Option<TerrainKind> {
        self.cell(coord).map(Cell::kind)
    }

    /// Entity standing at the coordinate, if any.
    #[must_use]
    pub fn occupant(&self, coord: CellCoord) -> Option<EntityId> {
        self.cell(coord).and_then(Cell::occupant)
    }

    /// True iff the coordinate is in bounds, its terrain is passable and
    /// nobody stands there. Out of bounds is simply not passable.
    #[must_use]
    pub fn is_passable(&self, coord: CellCoord) -> bool {
        self.cell(coord)
            .is_some_and(|cell| cell.kind.passable() && cell.occupant.is_none())
    }

    /// In bounds with passable terrain, regardless of occupancy.
    pub(crate) fn admits_terrain(&self, coord: CellCoord) -> bool {
        self.cell(coord).is_some_and(|cell| cell.kind.passable())
    }

    /// Records `entity` as the occupant of `coord`.
    ///
    /// Fails if the coordinate is outside the grid, its terrain is
    /// impassable, or a different entity already stands there. The grid is
    /// unchanged on failure.
    pub fn occupy(&mut self, coord: CellCoord, entity: EntityId) -> Result<(), OccupancyError> {
        let Some(index) = self.index(coord) else {
            return Err(OccupancyError::OutOfBounds {
                cell: coord,
                entrant: entity,
            });
        };
        let cell = &mut self.cells[index];
        if !cell.kind.passable() {
            return Err(OccupancyError::Impassable {
                cell: coord,
                entrant: entity,
            });
        }
        match cell.occupant {
            Some(occupant) if occupant != entity => Err(OccupancyConflict {
                cell: coord,
                occupant,
                entrant: entity,
            }
            .into()),
            _ => {
                cell.occupant = Some(entity);
                Ok(())
            }
        }
    }

    /// Clears the occupant of `coord`. No-op when already empty.
    pub fn vacate(&mut self, coord: CellCoord) {
        if let Some(index) = self.index(coord) {
            self.cells[index].occupant = None;
        }
    }

    /// Moves `entity` from `from` to `to`, leaving the grid untouched on failure.
    pub(crate) fn relocate(
        &mut self,
        from: CellCoord,
        to: CellCoord,
        entity: EntityId,
    ) -> Result<(), OccupancyError> {
        if !self.contains(to) {
            return Err(OccupancyError::OutOfBounds {
                cell: to,
                entrant: entity,
            });
        }
        if !self.admits_terrain(to) {
            return Err(OccupancyError::Impassable {
                cell: to,
                entrant: entity,
            });
        }
        if let Some(occupant) = self.occupant(to) {
            if occupant != entity {
                return Err(OccupancyConflict {
                    cell: to,
                    occupant,
                    entrant: entity,
                }
                .into());
            }
        }
        self.vacate(from);
        self.occupy(to, entity)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
