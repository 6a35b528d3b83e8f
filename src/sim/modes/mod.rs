//! Play modes
//!
//! A play mode decides what an encounter means: the turn-based mode stops
//! the world and asks the player, the area-effect mode resolves hits on its
//! own every tick. The world picks one at session start and keeps it.

pub mod frostmourne;
pub mod invincible;

pub use frostmourne::FrostmourneHungers;
pub use invincible::Invincible;

use rand_pcg::Pcg32;

use super::actor::{Actor, ActorId};
use super::player::Player;
use super::state::{GameState, GameStatus, NpcRegistry};
use crate::assets::Assets;
use crate::platform::TickInput;
use crate::renderer::{Renderer, Viewport, draw_prompt_at};

/// Mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Invincible,
    FrostmourneHungers,
}

impl GameMode {
    pub fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            1 => Some(GameMode::Invincible),
            2 => Some(GameMode::FrostmourneHungers),
            _ => None,
        }
    }

    pub fn selector(&self) -> u8 {
        match self {
            GameMode::Invincible => 1,
            GameMode::FrostmourneHungers => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Invincible => "Invincible",
            GameMode::FrostmourneHungers => "Frostmourne Hungers",
        }
    }

    pub fn create(&self, assets: &Assets) -> Box<dyn PlayMode> {
        log::info!("Play mode: {}", self.name());
        match self {
            GameMode::Invincible => Box::new(Invincible::new(assets.clone())),
            GameMode::FrostmourneHungers => Box::new(FrostmourneHungers::new(assets.clone())),
        }
    }
}

/// Encounter and resolution policy
pub trait PlayMode {
    fn mode(&self) -> GameMode;

    fn init_player(&self) -> Player;

    fn init_npcs(&self) -> Vec<Actor>;

    /// Per-tick setup before input: NPC patrols and similar
    fn init_actors(
        &mut self,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        patrol_range: f32,
        rng: &mut Pcg32,
    );

    /// Move the player, detect encounters against eligible NPCs, react
    fn handle_keyboard_input(
        &mut self,
        state: &mut GameState,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        input: &TickInput,
        now: f64,
    );

    /// The player ran into `npc`
    fn encounter_npcs(&mut self, state: &mut GameState, npc: ActorId);

    /// Resolution keys while awaiting the player's decision
    fn handle_player_input(
        &mut self,
        state: &mut GameState,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        input: &TickInput,
    );

    fn purge(&mut self, state: &mut GameState, player: &mut Player, npcs: &mut NpcRegistry, npc: ActorId);

    fn spare(&mut self, state: &mut GameState, player: &mut Player, npcs: &mut NpcRegistry, npc: ActorId);

    /// Continuous effects that run every started tick, with or without input
    fn update_effects(
        &mut self,
        _state: &mut GameState,
        _player: &mut Player,
        _npcs: &mut NpcRegistry,
        _now: f64,
    ) {
    }

    fn check_game_over_and_update_state(
        &self,
        state: &mut GameState,
        player: &Player,
        npcs: &NpcRegistry,
    );

    /// HUD lines, top to bottom
    fn hud_lines(&self, state: &GameState, _player: &Player) -> Vec<String> {
        vec![state.purged_label(), state.spared_label()]
    }

    /// Overlay while the world is suspended on an encounter
    fn pause_game(
        &self,
        state: &GameState,
        npcs: &NpcRegistry,
        viewport: &Viewport,
        renderer: &mut dyn Renderer,
    );

    fn prompt_player(&self, state: &GameState, actor: &Actor, renderer: &mut dyn Renderer) {
        if state.prompt_player {
            draw_prompt_at(renderer, &state.prompt_text, actor.pos);
        }
    }

    fn end_game(
        &self,
        state: &GameState,
        player: &Player,
        viewport: &Viewport,
        renderer: &mut dyn Renderer,
    );
}

/// Shared by both modes: statuses in which a game-over check applies
pub(crate) fn in_play(state: &GameState) -> bool {
    matches!(state.status, GameStatus::Started | GameStatus::AwaitingUser)
}

/// Patrol every visible NPC
pub(crate) fn patrol_all(npcs: &mut NpcRegistry, range: f32, rng: &mut Pcg32) {
    for npc in npcs.iter_mut().filter(|n| n.draw) {
        npc.patrol(range, rng);
    }
}

/// First eligible NPC overlapping the player, in roster order
pub(crate) fn first_collision(player: &Actor, npcs: &NpcRegistry) -> Option<ActorId> {
    npcs.eligible().find(|npc| player.collides_with(npc)).map(|npc| npc.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_round_trip() {
        for mode in [GameMode::Invincible, GameMode::FrostmourneHungers] {
            assert_eq!(GameMode::from_selector(mode.selector()), Some(mode));
        }
        assert_eq!(GameMode::from_selector(0), None);
        assert_eq!(GameMode::FrostmourneHungers.name(), "Frostmourne Hungers");
    }

    #[test]
    fn test_factory_builds_requested_mode() {
        let assets = Assets::placeholder();
        assert_eq!(GameMode::Invincible.create(&assets).mode(), GameMode::Invincible);
        assert_eq!(
            GameMode::FrostmourneHungers.create(&assets).mode(),
            GameMode::FrostmourneHungers
        );
    }
}
