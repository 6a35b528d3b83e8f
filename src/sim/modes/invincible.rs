//! Invincible: the player cannot be harmed, and every encounter stops the
//! world until the player purges or spares the NPC.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{GameMode, PlayMode, first_collision, in_play, patrol_all};
use crate::assets::Assets;
use crate::consts::*;
use crate::platform::{Key, TickInput};
use crate::renderer::{Renderer, Viewport};
use crate::sim::actor::{Actor, ActorId};
use crate::sim::player::Player;
use crate::sim::state::{GameState, NpcRegistry, StatusEvent};

pub struct Invincible {
    assets: Assets,
}

impl Invincible {
    pub fn new(assets: Assets) -> Self {
        Self { assets }
    }

    /// Shared tail of purge and spare
    fn resolve(&self, state: &mut GameState, player: &Player, npcs: &mut NpcRegistry, npc: ActorId) {
        npcs.hide(npc);
        state.clear_prompt();
        state.target = None;
        state.apply(StatusEvent::Resolved);
        self.check_game_over_and_update_state(state, player, npcs);
    }
}

impl PlayMode for Invincible {
    fn mode(&self) -> GameMode {
        GameMode::Invincible
    }

    fn init_player(&self) -> Player {
        Player::new(Actor::new(
            ActorId(0),
            "Purger",
            Vec2::ZERO,
            self.assets.player,
            PLAYER_SPEED,
            true,
        ))
    }

    fn init_npcs(&self) -> Vec<Actor> {
        let scourge = self.assets.scourge;
        let undead = self.assets.undead;
        vec![
            Actor::new(ActorId(1), "Scourge", Vec2::new(200.0, 200.0), scourge, 4.0, true),
            Actor::new(ActorId(2), "Undead1", Vec2::new(400.0, 200.0), undead, 1.0, true),
            Actor::new(ActorId(3), "Undead2", Vec2::new(500.0, 300.0), undead, 1.0, true),
            Actor::new(ActorId(4), "Undead3", Vec2::new(250.0, 50.0), undead, 1.0, true),
        ]
    }

    fn init_actors(
        &mut self,
        _player: &mut Player,
        npcs: &mut NpcRegistry,
        patrol_range: f32,
        rng: &mut Pcg32,
    ) {
        patrol_all(npcs, patrol_range, rng);
    }

    fn handle_keyboard_input(
        &mut self,
        state: &mut GameState,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        input: &TickInput,
        _now: f64,
    ) {
        player.actor.handle_input(input);
        if let Some(npc) = first_collision(&player.actor, npcs) {
            self.encounter_npcs(state, npc);
        }
    }

    fn encounter_npcs(&mut self, state: &mut GameState, npc: ActorId) {
        if state.apply(StatusEvent::Encounter) {
            log::debug!("Encounter with NPC {:?}", npc);
            state.target = Some(npc);
            state.set_prompt(PURGE_OR_SPARE_PROMPT);
        }
    }

    fn handle_player_input(
        &mut self,
        state: &mut GameState,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        input: &TickInput,
    ) {
        let Some(target) = state.target else {
            log::warn!("Awaiting a decision with no target");
            state.clear_prompt();
            state.apply(StatusEvent::Resolved);
            return;
        };
        if input.is_just_pressed(Key::P) {
            self.purge(state, player, npcs, target);
        } else if input.is_just_pressed(Key::S) {
            self.spare(state, player, npcs, target);
        }
    }

    fn purge(&mut self, state: &mut GameState, player: &mut Player, npcs: &mut NpcRegistry, npc: ActorId) {
        state.purged_count += 1;
        log::debug!("Purged NPC {:?} ({} total)", npc, state.purged_count);
        self.resolve(state, player, npcs, npc);
    }

    fn spare(&mut self, state: &mut GameState, player: &mut Player, npcs: &mut NpcRegistry, npc: ActorId) {
        state.spared_count += 1;
        log::debug!("Spared NPC {:?} ({} total)", npc, state.spared_count);
        self.resolve(state, player, npcs, npc);
    }

    fn check_game_over_and_update_state(
        &self,
        state: &mut GameState,
        _player: &Player,
        npcs: &NpcRegistry,
    ) {
        if in_play(state) && npcs.eligible_count() == 0 {
            state.apply(StatusEvent::RosterCleared { won: false });
        }
    }

    fn pause_game(
        &self,
        state: &GameState,
        npcs: &NpcRegistry,
        viewport: &Viewport,
        renderer: &mut dyn Renderer,
    ) {
        match state.target.and_then(|id| npcs.get(id)) {
            Some(target) => self.prompt_player(state, target, renderer),
            None => renderer.draw_centered_text(&state.prompt_text, viewport.center()),
        }
    }

    fn end_game(
        &self,
        state: &GameState,
        _player: &Player,
        viewport: &Viewport,
        renderer: &mut dyn Renderer,
    ) {
        let center = viewport.center();
        renderer.draw_box(viewport.centered_box(Vec2::new(300.0, 100.0)));
        renderer.draw_centered_text("The purge is over", center - Vec2::new(0.0, 20.0));
        renderer.draw_centered_text(
            &format!("{}  {}", state.purged_label(), state.spared_label()),
            center + Vec2::new(0.0, 20.0),
        );
    }
}
