//! Move validation, encounters, the adversary random walk and placement.

use rand::Rng;
use tile_chase_core::{
    CellCoord, ConfigurationError, ContactModel, Displacement, EntityId, Event, MoveOutcome, Role,
};

use crate::encounter::{self, Resolution};
use crate::World;

impl World {
    /// Single entry point for every displacement, player or adversary.
    ///
    /// An opponent on the target cell is resolved before occupancy changes,
    /// so at most one entity ever stands on a cell.
    pub(crate) fn displace(
        &mut self,
        id: EntityId,
        displacement: Displacement,
        out_events: &mut Vec<Event>,
    ) -> MoveOutcome {
        if !self.machine.accepts_moves() {
            return MoveOutcome::Ignored;
        }
        let Some(mover) = self.registry.get(id) else {
            return MoveOutcome::Ignored;
        };
        let Some(target) = mover
            .cell
            .offset(displacement)
            .filter(|cell| self.grid.admits_terrain(*cell))
        else {
            return MoveOutcome::Blocked;
        };

        let mut captured = false;
        if let Some(occupant) = self.grid.occupant(target) {
            let Some(other) = self.registry.get(occupant) else {
                tracing::error!(%occupant, cell = %target, "grid references a dead entity");
                return MoveOutcome::Blocked;
            };
            match encounter::resolve(self.encounter, &mover, &other) {
                Resolution::Blocked => return MoveOutcome::Blocked,
                Resolution::Capture { casualty, victor } => {
                    self.remove_casualty(casualty, victor, out_events);
                    captured = true;
                    if casualty == id {
                        self.settle(captured, out_events);
                        return MoveOutcome::Defeated;
                    }
                }
            }
        }

        if let Err(error) = self.grid.relocate(mover.cell, target, id) {
            tracing::error!(%error, "grid refused a validated move");
            return MoveOutcome::Blocked;
        }
        self.registry.set_cell(id, target);
        tracing::debug!(entity = %id, from = %mover.cell, to = %target, "entity moved");
        out_events.push(Event::EntityMoved {
            entity: id,
            from: mover.cell,
            to: target,
        });
        if let Some(effect) = self.grid.kind_at(target).and_then(|kind| kind.on_occupy()) {
            out_events.push(Event::TerrainEffectTriggered {
                entity: id,
                cell: target,
                effect,
            });
        }

        let mut defeated = false;
        if self.contact == ContactModel::Touching {
            let (touch_captures, mover_lost) = self.resolve_touching(id, out_events);
            captured |= touch_captures;
            defeated = mover_lost;
        }

        self.settle(captured, out_events);
        if defeated {
            MoveOutcome::Defeated
        } else {
            MoveOutcome::Moved {
                from: mover.cell,
                to: target,
            }
        }
    }

    /// Resolves every opponent adjacent to `id` after it moved. Returns
    /// whether anyone was captured and whether the mover itself was.
    fn resolve_touching(&mut self, id: EntityId, out_events: &mut Vec<Event>) -> (bool, bool) {
        let Some(mover) = self.registry.get(id) else {
            return (false, false);
        };
        let neighbours: Vec<_> = encounter::touching(&mover, self.registry.iter()).collect();

        let mut captured = false;
        for other in neighbours {
            if let Resolution::Capture { casualty, victor } =
                encounter::resolve(self.encounter, &mover, &other)
            {
                self.remove_casualty(casualty, victor, out_events);
                captured = true;
                if casualty == id {
                    return (captured, true);
                }
            }
        }
        (captured, false)
    }

    fn remove_casualty(&mut self, casualty: EntityId, victor: EntityId, out_events: &mut Vec<Event>) {
        let Some(entity) = self.registry.remove(casualty) else {
            return;
        };
        self.grid.vacate(entity.cell);
        tracing::info!(entity = %casualty, by = %victor, role = %entity.role, "entity captured");
        out_events.push(Event::EntityCaptured {
            entity: casualty,
            by: victor,
        });
    }

    /// Applies the outcome of any captures: losing the player ends the game,
    /// and capturing the last adversary wins it.
    fn settle(&mut self, captured: bool, out_events: &mut Vec<Event>) {
        if self.registry.player().is_none() {
            if let Some(state) = self.machine.lose() {
                out_events.push(Event::GameLost);
                self.announce(Some(state), out_events);
            }
        } else if captured && self.registry.adversary_count() == 0 {
            if let Some(state) = self.machine.win() {
                out_events.push(Event::GameWon);
                self.announce(Some(state), out_events);
            }
        }
    }

    /// Moves every live adversary once, in identifier order.
    ///
    /// Adversaries captured earlier in the same tick are skipped, and the
    /// tick stops as soon as the game leaves the playing state.
    pub(crate) fn tick_adversaries(&mut self, out_events: &mut Vec<Event>) {
        if !self.machine.accepts_moves() {
            return;
        }
        for id in self.registry.adversary_ids() {
            if !self.machine.accepts_moves() {
                break;
            }
            if self.registry.contains(id) {
                self.wander(id, out_events);
            }
        }
    }

    /// Tries random unit displacements until one is not blocked or the retry
    /// limit runs out, in which case the adversary stays put this tick.
    fn wander(&mut self, id: EntityId, out_events: &mut Vec<Event>) {
        let attempts = self.retry_limit.get();
        for _ in 0..attempts {
            let choice = self.rng.gen_range(0..Displacement::UNIT_VECTORS.len());
            let displacement = Displacement::UNIT_VECTORS[choice];
            match self.displace(id, displacement, out_events) {
                MoveOutcome::Blocked => continue,
                MoveOutcome::Moved { .. } | MoveOutcome::Defeated | MoveOutcome::Ignored => return,
            }
        }
        tracing::debug!(entity = %id, attempts, "adversary found no open move");
    }

    /// Samples uniformly random cells until one is passable and unoccupied.
    pub(crate) fn place_randomly(&mut self, role: Role) -> Result<EntityId, ConfigurationError> {
        let attempts = self.retry_limit.get();
        for _ in 0..attempts {
            let cell = CellCoord::new(
                self.rng.gen_range(0..self.grid.rows()),
                self.rng.gen_range(0..self.grid.columns()),
            );
            if self.grid.is_passable(cell) {
                return self.spawn(role, cell);
            }
        }
        tracing::warn!(%role, attempts, "random placement exhausted");
        Err(ConfigurationError::PlacementExhausted { role, attempts })
    }

    /// Places an entity on a caller-chosen cell.
    pub(crate) fn place_at(
        &mut self,
        role: Role,
        cell: CellCoord,
    ) -> Result<EntityId, ConfigurationError> {
        if !self.grid.is_passable(cell) {
            return Err(ConfigurationError::InvalidPlacement { role, cell });
        }
        self.spawn(role, cell)
    }

    fn spawn(&mut self, role: Role, cell: CellCoord) -> Result<EntityId, ConfigurationError> {
        let id = self.registry.spawn(role, cell);
        self.grid
            .occupy(cell, id)
            .map_err(|_| ConfigurationError::InvalidPlacement { role, cell })?;
        tracing::debug!(entity = %id, %role, %cell, "entity placed");
        Ok(id)
    }
}
