//! Live entities and identifier allocation.

use std::collections::BTreeMap;

use tile_chase_core::{CellCoord, EntityId, EntitySnapshot, Role};

/// Entity stored inside the world. Membership in the registry means alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Entity {
    pub(crate) id: EntityId,
    pub(crate) role: Role,
    pub(crate) cell: CellCoord,
}

impl Entity {
    pub(crate) fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            role: self.role,
            cell: self.cell,
        }
    }
}

/// Registry that stores the player, the adversaries, and allocates identifiers.
#[derive(Debug)]
pub(crate) struct EntityRegistry {
    player: Option<Entity>,
    adversaries: BTreeMap<EntityId, Entity>,
    next_id: u32,
}

impl EntityRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            player: None,
            adversaries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Registers a new entity at `cell` and returns its identifier.
    ///
    /// The grid must already have accepted the entity at `cell`.
    pub(crate) fn spawn(&mut self, role: Role, cell: CellCoord) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let entity = Entity { id, role, cell };
        match role {
            Role::Player => {
                debug_assert!(self.player.is_none(), "player is a singleton");
                self.player = Some(entity);
            }
            Role::Adversary => {
                let _ = self.adversaries.insert(id, entity);
            }
        }
        id
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<Entity> {
        match self.player {
            Some(player) if player.id == id => Some(player),
            _ => self.adversaries.get(&id).copied(),
        }
    }

    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Updates the recorded coordinates of a live entity.
    pub(crate) fn set_cell(&mut self, id: EntityId, cell: CellCoord) {
        if let Some(player) = self.player.as_mut().filter(|player| player.id == id) {
            player.cell = cell;
        } else if let Some(adversary) = self.adversaries.get_mut(&id) {
            adversary.cell = cell;
        }
    }

    /// Removes a dead entity, returning its final state.
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Entity> {
        if self.player.is_some_and(|player| player.id == id) {
            return self.player.take();
        }
        self.adversaries.remove(&id)
    }

    /// Identifiers of live adversaries in ascending order.
    pub(crate) fn adversary_ids(&self) -> Vec<EntityId> {
        self.adversaries.keys().copied().collect()
    }

    pub(crate) fn adversary_count(&self) -> usize {
        self.adversaries.len()
    }

    /// Live entities, player first, then adversaries by identifier.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.player.iter().chain(self.adversaries.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_sequential_and_never_reused() {
        let mut registry = EntityRegistry::new();
        let player = registry.spawn(Role::Player, CellCoord::new(0, 0));
        let first = registry.spawn(Role::Adversary, CellCoord::new(0, 1));
        assert_eq!(player, EntityId::new(0));
        assert_eq!(first, EntityId::new(1));

        assert!(registry.remove(first).is_some());
        let second = registry.spawn(Role::Adversary, CellCoord::new(0, 2));
        assert_eq!(second, EntityId::new(2));
    }

    #[test]
    fn removal_drops_player_and_adversaries() {
        let mut registry = EntityRegistry::new();
        let player = registry.spawn(Role::Player, CellCoord::new(0, 0));
        let adversary = registry.spawn(Role::Adversary, CellCoord::new(1, 1));

        assert_eq!(registry.adversary_count(), 1);
        assert_eq!(
            registry.remove(adversary).map(|entity| entity.cell),
            Some(CellCoord::new(1, 1))
        );
        assert_eq!(registry.adversary_count(), 0);
        assert!(registry.remove(adversary).is_none());

        assert!(registry.remove(player).is_some());
        assert!(registry.player().is_none());
        assert!(!registry.contains(player));
    }

    #[test]
    fn set_cell_updates_matching_entity_only() {
        let mut registry = EntityRegistry::new();
        let player = registry.spawn(Role::Player, CellCoord::new(0, 0));
        let adversary = registry.spawn(Role::Adversary, CellCoord::new(2, 2));

        registry.set_cell(adversary, CellCoord::new(2, 3));
        assert_eq!(registry.get(adversary).map(|e| e.cell), Some(CellCoord::new(2, 3)));
        assert_eq!(registry.get(player).map(|e| e.cell), Some(CellCoord::new(0, 0)));
    }

    #[test]
    fn iteration_lists_player_first() {
        let mut registry = EntityRegistry::new();
        let adversary = registry.spawn(Role::Adversary, CellCoord::new(0, 1));
        let player = registry.spawn(Role::Player, CellCoord::new(0, 0));
        let order: Vec<_> = registry.iter().map(|entity| entity.id).collect();
        assert_eq!(order, vec![player, adversary]);
        assert_eq!(registry.adversary_ids(), vec![adversary]);
    }
}
