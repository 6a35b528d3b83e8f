//! Frostmourne Hungers: the player can die, nothing waits for a decision.
//! Abilities purge NPCs the moment they touch them, and every fourth purge
//! levels the player up.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::{GameMode, PlayMode, first_collision, in_play, patrol_all};
use crate::assets::Assets;
use crate::consts::*;
use crate::platform::{Key, TickInput};
use crate::renderer::{Renderer, Viewport};
use crate::sim::actor::{Actor, ActorId};
use crate::sim::collision::{rect_circle_intersect, rect_intersect};
use crate::sim::player::{AbilityKind, Player};
use crate::sim::state::{GameState, GameStatus, NpcRegistry, StatusEvent};

pub struct FrostmourneHungers {
    assets: Assets,
}

impl FrostmourneHungers {
    pub fn new(assets: Assets) -> Self {
        Self { assets }
    }

    /// Nearest eligible NPC to the player's center
    fn nearest_target(player: &Player, npcs: &NpcRegistry) -> Option<ActorId> {
        let from = player.actor.center();
        npcs.eligible()
            .min_by(|a, b| {
                a.center()
                    .distance_squared(from)
                    .total_cmp(&b.center().distance_squared(from))
            })
            .map(|npc| npc.id)
    }

    /// NPCs currently overlapping `actor`
    fn touching(actor: &Actor, npcs: &NpcRegistry) -> Vec<ActorId> {
        npcs.eligible()
            .filter(|npc| actor.collides_with(npc))
            .map(|npc| npc.id)
            .collect()
    }

    fn cast_abilities(&self, player: &mut Player, input: &TickInput, now: f64) {
        if input.is_just_pressed(Key::Digit1) && !player.has_active(AbilityKind::AreaDuration, now) {
            player.cast(AbilityKind::AreaDuration, self.assets.death_and_decay, now);
        }
        if input.is_just_pressed(Key::Digit2) {
            if player.target.is_some() {
                player.cast(AbilityKind::ProjectileDamage, self.assets.death_coil, now);
            } else {
                log::debug!("Death Coil needs a target");
            }
        }
        if input.is_just_pressed(Key::Digit3)
            && player
                .cast(AbilityKind::SingleTargetHeal, self.assets.burst_of_light, now)
                .is_some()
        {
            player.heal(HEAL_AMOUNT);
        }
    }

    /// NPCs under an active Death and Decay
    fn area_hits(player: &Player, npcs: &NpcRegistry, now: f64) -> Vec<ActorId> {
        let mut hits = Vec::new();
        for ability in player
            .active_abilities(now)
            .filter(|a| a.kind == AbilityKind::AreaDuration)
        {
            let (center, radius) = ability.footprint();
            for npc in npcs.eligible() {
                if rect_circle_intersect(&npc.bounding_rect(), center, radius) && !hits.contains(&npc.id) {
                    hits.push(npc.id);
                }
            }
        }
        hits
    }

    /// Advance Death Coils toward their targets; returns targets struck
    fn advance_projectiles(player: &mut Player, npcs: &NpcRegistry, now: f64) -> Vec<ActorId> {
        let mut hits = Vec::new();
        for coil in player
            .abilities
            .iter_mut()
            .filter(|a| a.kind == AbilityKind::ProjectileDamage && a.is_active(now))
        {
            let Some(target) = coil.target.and_then(|id| npcs.get(id)).filter(|n| n.is_eligible()) else {
                coil.spent = true;
                continue;
            };
            let aim = target.center() - coil.actor.texture.size() * 0.5;
            coil.actor.move_to(aim);
            if rect_intersect(&coil.bounding_rect(), &target.bounding_rect()) {
                coil.spent = true;
                hits.push(target.id);
            }
        }
        hits
    }
}

impl PlayMode for FrostmourneHungers {
    fn mode(&self) -> GameMode {
        GameMode::FrostmourneHungers
    }

    fn init_player(&self) -> Player {
        Player::new(Actor::new(
            ActorId(0),
            "Arthas",
            Vec2::ZERO,
            self.assets.player,
            PLAYER_SPEED,
            true,
        ))
    }

    /// More NPCs than the turn-based mode, abominations among them
    fn init_npcs(&self) -> Vec<Actor> {
        let abomination = self.assets.scourge;
        let undead = self.assets.undead;
        vec![
            Actor::new(ActorId(1), "Abomination1", Vec2::new(200.0, 200.0), abomination, 3.0, true),
            Actor::new(ActorId(2), "Abomination2", Vec2::new(700.0, 350.0), abomination, 3.0, true),
            Actor::new(ActorId(3), "Undead1", Vec2::new(400.0, 200.0), undead, 1.0, true),
            Actor::new(ActorId(4), "Undead2", Vec2::new(500.0, 300.0), undead, 1.0, true),
            Actor::new(ActorId(5), "Undead3", Vec2::new(250.0, 50.0), undead, 1.5, true),
            Actor::new(ActorId(6), "Undead4", Vec2::new(800.0, 100.0), undead, 1.5, true),
            Actor::new(ActorId(7), "Undead5", Vec2::new(600.0, 450.0), undead, 2.0, true),
            Actor::new(ActorId(8), "Undead6", Vec2::new(150.0, 400.0), undead, 2.0, true),
        ]
    }

    fn init_actors(
        &mut self,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        patrol_range: f32,
        rng: &mut Pcg32,
    ) {
        patrol_all(npcs, patrol_range, rng);
        player.target = Self::nearest_target(player, npcs);
    }

    fn handle_keyboard_input(
        &mut self,
        _state: &mut GameState,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        input: &TickInput,
        now: f64,
    ) {
        let touching = Self::touching(&player.actor, npcs);
        let from = player.actor.pos;
        player.actor.handle_input(input);
        // Only a move into a fresh NPC is blocked; walking out from under one is not
        let blocked = npcs
            .eligible()
            .any(|npc| player.actor.collides_with(npc) && !touching.contains(&npc.id));
        if player.actor.pos != from && blocked {
            player.actor.rollback_position();
        }
        self.cast_abilities(player, input, now);
    }

    /// Resolution happens in `update_effects`; nothing waits on the player
    fn encounter_npcs(&mut self, _state: &mut GameState, npc: ActorId) {
        log::trace!("Touched NPC {:?}", npc);
    }

    fn handle_player_input(
        &mut self,
        _state: &mut GameState,
        _player: &mut Player,
        _npcs: &mut NpcRegistry,
        _input: &TickInput,
    ) {
    }

    fn purge(&mut self, state: &mut GameState, player: &mut Player, npcs: &mut NpcRegistry, npc: ActorId) {
        if !npcs.hide(npc) {
            return;
        }
        state.purged_count += 1;
        log::debug!("Frostmourne claims NPC {:?} ({} total)", npc, state.purged_count);
        if state.purged_count % PURGES_PER_LEVEL == 0 {
            player.level_up();
        }
        if player.target == Some(npc) {
            player.target = None;
        }
    }

    fn spare(&mut self, state: &mut GameState, player: &mut Player, npcs: &mut NpcRegistry, npc: ActorId) {
        if !npcs.hide(npc) {
            return;
        }
        state.spared_count += 1;
        log::debug!("Spared NPC {:?} ({} total)", npc, state.spared_count);
        if player.target == Some(npc) {
            player.target = None;
        }
    }

    fn update_effects(
        &mut self,
        state: &mut GameState,
        player: &mut Player,
        npcs: &mut NpcRegistry,
        now: f64,
    ) {
        let mut hits = Self::area_hits(player, npcs, now);
        for id in Self::advance_projectiles(player, npcs, now) {
            if !hits.contains(&id) {
                hits.push(id);
            }
        }
        for id in hits {
            self.purge(state, player, npcs, id);
        }

        if let Some(npc) = first_collision(&player.actor, npcs) {
            self.encounter_npcs(state, npc);
            player.take_damage(NPC_CONTACT_DAMAGE);
        }
    }

    fn check_game_over_and_update_state(
        &self,
        state: &mut GameState,
        player: &Player,
        npcs: &NpcRegistry,
    ) {
        if !in_play(state) {
            return;
        }
        if player.is_dead() {
            state.apply(StatusEvent::PlayerDied);
        } else if npcs.eligible_count() == 0 {
            state.apply(StatusEvent::RosterCleared { won: true });
        }
    }

    fn hud_lines(&self, state: &GameState, player: &Player) -> Vec<String> {
        vec![
            state.purged_label(),
            state.spared_label(),
            format!("Health: {}", player.health),
            format!("Mana: {}", player.mana),
            format!("Level: {}", player.level),
        ]
    }

    /// Never suspended on an encounter
    fn pause_game(
        &self,
        _state: &GameState,
        _npcs: &NpcRegistry,
        _viewport: &Viewport,
        _renderer: &mut dyn Renderer,
    ) {
    }

    fn end_game(
        &self,
        state: &GameState,
        player: &Player,
        viewport: &Viewport,
        renderer: &mut dyn Renderer,
    ) {
        let headline = match state.status {
            GameStatus::Lost => "Frostmourne hungers no more",
            _ => "Stratholme is purged",
        };
        let center = viewport.center();
        renderer.draw_box(viewport.centered_box(Vec2::new(300.0, 100.0)));
        renderer.draw_centered_text(headline, center - Vec2::new(0.0, 20.0));
        renderer.draw_centered_text(
            &format!("{}  Level: {}", state.purged_label(), player.level),
            center + Vec2::new(0.0, 20.0),
        );
    }
}
