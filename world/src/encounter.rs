//! Decides who is captured when the player and an adversary meet.

use tile_chase_core::{EncounterRule, EntityId, Role};

use crate::registry::Entity;

/// Outcome of two entities meeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Same side; the mover simply cannot enter.
    Blocked,
    /// `casualty` is removed by `victor`.
    Capture {
        casualty: EntityId,
        victor: EntityId,
    },
}

/// Resolves `mover` running into `other`.
pub(crate) fn resolve(rule: EncounterRule, mover: &Entity, other: &Entity) -> Resolution {
    if !mover.role.opposes(other.role) {
        return Resolution::Blocked;
    }

    let (casualty, victor) = match rule {
        EncounterRule::AggressorPrevails => (other.id, mover.id),
        EncounterRule::PlayerPrevails if mover.role == Role::Player => (other.id, mover.id),
        EncounterRule::PlayerPrevails => (mover.id, other.id),
    };
    Resolution::Capture { casualty, victor }
}

/// Opponents of `mover` standing next to its current cell, in registry order.
pub(crate) fn touching<'a>(
    mover: &'a Entity,
    entities: impl Iterator<Item = &'a Entity> + 'a,
) -> impl Iterator<Item = Entity> + 'a {
    entities
        .filter(move |other| {
            other.id != mover.id
                && mover.role.opposes(other.role)
                && other.cell.chebyshev_distance(mover.cell) == 1
        })
        .copied()
}
