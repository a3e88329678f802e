//! Plain-text presentation of the board and of world events.

use std::fmt::Write as _;

use tile_chase_core::{CellCoord, Event, GameState, OccupyEffect, Role};
use tile_chase_world::{query, World};

const PLAYER_GLYPH: char = '@';
const ADVERSARY_GLYPH: char = '!';

/// Draws the grid framed by a border, entities over terrain symbols.
pub(crate) fn board(world: &World) -> String {
    let (rows, columns) = query::dimensions(world);
    let view = query::entity_view(world);
    let width = usize::try_from(columns).unwrap_or(0);
    let border = format!("+{}+\n", "-".repeat(width));

    let mut output = border.clone();
    for row in 0..rows {
        output.push('|');
        for column in 0..columns {
            let cell = CellCoord::new(row, column);
            let glyph = match view.at(cell).map(|snapshot| snapshot.role) {
                Some(Role::Player) => PLAYER_GLYPH,
                Some(Role::Adversary) => ADVERSARY_GLYPH,
                None => query::terrain_at(world, cell).map_or(' ', |kind| kind.symbol()),
            };
            output.push(glyph);
        }
        output.push_str("|\n");
    }
    output.push_str(&border);
    let _ = writeln!(
        output,
        "{} | adversaries left: {}",
        state_label(query::game_state(world)),
        query::adversary_count(world)
    );
    output
}

/// One line describing an event, or `None` for events not worth printing.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::EntityMoved { .. } => return None,
        Event::TerrainEffectTriggered { entity, effect, .. } => {
            format!("{entity} {}", effect_phrase(*effect))
        }
        Event::EntityCaptured { entity, by } => format!("{by} captured {entity}"),
        Event::GameWon => "every adversary has been caught".to_owned(),
        Event::GameLost => "the player was caught".to_owned(),
        Event::StateChanged { state } => format!("game is now {}", state_label(*state)),
    };
    Some(line)
}

fn effect_phrase(effect: OccupyEffect) -> &'static str {
    match effect {
        OccupyEffect::Path => "follows the path",
        OccupyEffect::Forest => "pushes into the forest",
        OccupyEffect::Desert => "trudges through the desert",
        OccupyEffect::Lava => "steps onto lava",
    }
}

fn state_label(state: GameState) -> &'static str {
    match state {
        GameState::Playing => "playing",
        GameState::Paused => "paused",
        GameState::Won => "won",
        GameState::Lost => "lost",
    }
}
