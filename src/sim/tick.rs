//! Per-frame update
//!
//! One [`tick`] per frame: read the input snapshot, let the active play mode
//! act according to the current status, then compact the roster and expire
//! abilities.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::modes::{GameMode, PlayMode};
use super::player::Player;
use super::state::{GameState, GameStatus, NpcRegistry, StatusEvent};
use crate::assets::Assets;
use crate::platform::{Key, TickInput};
use crate::renderer::Viewport;
use crate::settings::Settings;

/// Everything that exists once a game has been started
pub struct Session {
    pub mode: Box<dyn PlayMode>,
    pub player: Player,
    pub npcs: NpcRegistry,
}

impl Session {
    fn new(mode: GameMode, assets: &Assets) -> Self {
        let mode = mode.create(assets);
        let player = mode.init_player();
        let npcs = NpcRegistry::new(mode.init_npcs());
        log::info!(
            "Session started: {} vs {} NPCs",
            player.actor.name,
            npcs.len()
        );
        Self { mode, player, npcs }
    }
}

/// The whole game: status, session and the resources it was built with
pub struct World {
    pub state: GameState,
    pub session: Option<Session>,
    pub mode: GameMode,
    pub viewport: Viewport,
    pub patrol_range: f32,
    assets: Assets,
    rng: Pcg32,
    /// Timestamp of the last tick, seconds
    pub now: f64,
}

impl World {
    pub fn new(settings: &Settings, assets: Assets, seed: u64) -> Self {
        Self {
            state: GameState::new(),
            session: None,
            mode: settings.mode(),
            viewport: settings.viewport(),
            patrol_range: settings.patrol_range,
            assets,
            rng: Pcg32::seed_from_u64(seed),
            now: 0.0,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Build the player and roster the first time they are needed
    fn ensure_session(&mut self) -> &mut Session {
        let (mode, assets) = (self.mode, &self.assets);
        self.session.get_or_insert_with(|| Session::new(mode, assets))
    }
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, now: f64) {
    world.now = now;

    match world.state.status {
        GameStatus::Menu => {
            if input.is_pressed(Key::Space) {
                world.ensure_session();
                world.state.apply(StatusEvent::Start);
            }
        }
        GameStatus::Paused => {
            if input.is_just_pressed(Key::Escape) {
                world.state.apply(StatusEvent::TogglePause);
            }
        }
        GameStatus::Started => {
            if input.is_just_pressed(Key::Escape) {
                world.state.apply(StatusEvent::TogglePause);
            } else {
                play(world, input, now);
            }
        }
        GameStatus::AwaitingUser => {
            if let Some(session) = world.session.as_mut() {
                let Session { mode, player, npcs } = session;
                mode.handle_player_input(&mut world.state, player, npcs, input);
            }
        }
        GameStatus::Ended | GameStatus::Won | GameStatus::Lost => {}
    }

    if let Some(session) = world.session.as_mut() {
        session.npcs.compact();
        session.player.update_abilities_durations(now);
    }
}

/// A started tick: patrol, input, continuous effects, game-over check
fn play(world: &mut World, input: &TickInput, now: f64) {
    let bounds = Vec2::new(world.viewport.width, world.viewport.height);
    let range = world.patrol_range;
    let World {
        state,
        session,
        rng,
        ..
    } = world;
    let Some(Session { mode, player, npcs }) = session.as_mut() else {
        return;
    };

    mode.init_actors(player, npcs, range, rng);
    if !input.is_empty() {
        mode.handle_keyboard_input(state, player, npcs, input, now);
        player.actor.set_limit_bounds(bounds.x, bounds.y);
    }
    mode.update_effects(state, player, npcs, now);
    mode.check_game_over_and_update_state(state, player, npcs);
}
