//! Draw pass
//!
//! Reads the world and emits draw calls for the current status. Never
//! mutates anything.

use glam::Vec2;

use crate::consts::{MENU_TEXT, PAUSE_TEXT};
use crate::renderer::Renderer;
use crate::sim::{AbilityKind, GameStatus, Session, World};

/// HUD column, measured from the right edge
const HUD_INSET: f32 = 100.0;
const HUD_LINE_HEIGHT: f32 = 20.0;

pub fn draw(world: &World, renderer: &mut dyn Renderer, debug: bool) {
    let viewport = world.viewport;
    let status = world.status();

    let Some(session) = world.session.as_ref() else {
        renderer.draw_centered_text(MENU_TEXT, viewport.center());
        return;
    };

    match status {
        GameStatus::Menu => renderer.draw_centered_text(MENU_TEXT, viewport.center()),
        GameStatus::Started => {
            draw_actors(session, renderer, debug);
            draw_hud(world, session, renderer);
        }
        GameStatus::Paused => {
            draw_hud(world, session, renderer);
            draw_actors(session, renderer, debug);
            renderer.draw_box(viewport.centered_box(Vec2::new(200.0, 100.0)));
            renderer.draw_centered_text(PAUSE_TEXT, viewport.center());
        }
        GameStatus::AwaitingUser => {
            draw_hud(world, session, renderer);
            draw_actors(session, renderer, debug);
            session
                .mode
                .pause_game(&world.state, &session.npcs, &viewport, renderer);
        }
        GameStatus::Ended | GameStatus::Won | GameStatus::Lost => {
            draw_actors(session, renderer, debug);
            session
                .mode
                .end_game(&world.state, &session.player, &viewport, renderer);
        }
    }
}

fn draw_hud(world: &World, session: &Session, renderer: &mut dyn Renderer) {
    let x = world.viewport.width - HUD_INSET;
    for (i, line) in session
        .mode
        .hud_lines(&world.state, &session.player)
        .iter()
        .enumerate()
    {
        renderer.draw_text(line, Vec2::new(x, i as f32 * HUD_LINE_HEIGHT));
    }
}

/// NPCs, then abilities, then the player on top
fn draw_actors(session: &Session, renderer: &mut dyn Renderer, debug: bool) {
    for npc in session.npcs.iter().filter(|n| n.draw) {
        renderer.draw_sprite(&npc.texture, npc.pos);
        if debug {
            renderer.draw_border(npc.bounding_rect());
        }
    }

    for ability in &session.player.abilities {
        renderer.draw_sprite(&ability.actor.texture, ability.actor.pos);
        if debug && ability.kind == AbilityKind::AreaDuration {
            let (center, radius) = ability.footprint();
            renderer.draw_circle(center, radius);
        }
    }

    let player = &session.player.actor;
    renderer.draw_sprite(&player.texture, player.pos);
    if debug {
        renderer.draw_border(player.bounding_rect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::consts::PURGE_OR_SPARE_PROMPT;
    use crate::platform::{Key, TickInput};
    use crate::renderer::{DrawCommand, DrawList};
    use crate::settings::Settings;
    use crate::sim::tick;

    fn world(mode: u8) -> World {
        let settings = Settings {
            game_mode: mode,
            patrol_range: 0.0,
            ..Default::default()
        };
        World::new(&settings, Assets::placeholder(), 1)
    }

    #[test]
    fn test_menu_text() {
        let w = world(1);
        let mut list = DrawList::new();
        draw(&w, &mut list, false);
        assert_eq!(
            list.commands,
            vec![DrawCommand::CenteredText {
                text: MENU_TEXT.to_string(),
                pos: Vec2::new(500.0, 275.0)
            }]
        );
    }

    #[test]
    fn test_started_draws_sprites_and_counts() {
        let mut w = world(1);
        tick(&mut w, &TickInput::tap(&[Key::Space]), 0.0);
        let mut list = DrawList::new();
        draw(&w, &mut list, false);
        // Four NPCs and the player
        assert_eq!(list.sprite_count(), 5);
        assert!(list.commands.contains(&DrawCommand::Text {
            text: "Purged: 0".into(),
            pos: Vec2::new(900.0, 0.0)
        }));
        assert!(list.commands.contains(&DrawCommand::Text {
            text: "Spared: 0".into(),
            pos: Vec2::new(900.0, 20.0)
        }));
    }

    #[test]
    fn test_debug_borders() {
        let mut w = world(1);
        tick(&mut w, &TickInput::tap(&[Key::Space]), 0.0);
        let mut list = DrawList::new();
        draw(&w, &mut list, true);
        let borders = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Border(_)))
            .count();
        assert_eq!(borders, 5);
    }

    #[test]
    fn test_paused_overlay() {
        let mut w = world(1);
        tick(&mut w, &TickInput::tap(&[Key::Space]), 0.0);
        tick(&mut w, &TickInput::tap(&[Key::Escape]), 0.1);
        let mut list = DrawList::new();
        draw(&w, &mut list, false);
        assert!(list.texts().contains(&PAUSE_TEXT));
        assert!(list.commands.iter().any(|c| matches!(c, DrawCommand::Box(_))));
    }

    #[test]
    fn test_waiting_prompt() {
        let mut w = world(1);
        tick(&mut w, &TickInput::tap(&[Key::Space]), 0.0);
        if let Some(s) = w.session.as_mut() {
            s.player.actor.pos = Vec2::new(190.0, 190.0);
        }
        tick(&mut w, &TickInput::hold(&[Key::Right]), 0.1);
        let mut list = DrawList::new();
        draw(&w, &mut list, false);
        assert!(list.texts().contains(&PURGE_OR_SPARE_PROMPT));
    }

    #[test]
    fn test_draw_does_not_mutate() {
        let mut w = world(2);
        tick(&mut w, &TickInput::tap(&[Key::Space]), 0.0);
        tick(&mut w, &TickInput::tap(&[Key::Digit1]), 0.1);
        let before = serde_json::to_string(&w.state).expect("serializable");
        let mut list = DrawList::new();
        draw(&w, &mut list, true);
        assert_eq!(serde_json::to_string(&w.state).expect("serializable"), before);
        assert!(list.texts().contains(&"Mana: 40"));
        assert!(list.commands.iter().any(|c| matches!(c, DrawCommand::Circle { .. })));
    }
}
