//! The player entity and its timed abilities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId};
use super::collision::BoundingRect;
use crate::assets::Texture;
use crate::consts::*;

/// Ability type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Death and Decay: area effect that lasts for its duration
    AreaDuration,
    /// Death Coil: projectile that damages its target
    ProjectileDamage,
    /// Burst of Light: single-target heal
    SingleTargetHeal,
}

impl AbilityKind {
    pub fn name(&self) -> &'static str {
        match self {
            AbilityKind::AreaDuration => "Death and Decay",
            AbilityKind::ProjectileDamage => "Death Coil",
            AbilityKind::SingleTargetHeal => "Burst of Light",
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            AbilityKind::AreaDuration => AREA_ABILITY_DURATION,
            AbilityKind::ProjectileDamage => PROJECTILE_DURATION,
            AbilityKind::SingleTargetHeal => HEAL_DURATION,
        }
    }

    pub fn mana_cost(&self) -> i32 {
        match self {
            AbilityKind::AreaDuration => AREA_ABILITY_MANA_COST,
            AbilityKind::ProjectileDamage => PROJECTILE_MANA_COST,
            AbilityKind::SingleTargetHeal => HEAL_MANA_COST,
        }
    }
}

/// A timed ability with its own visual footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub actor: Actor,
    /// Seconds
    pub duration: f64,
    /// Seconds, same clock as `now` in `is_active`
    pub activated_at: f64,
    /// Projectile's NPC, if any
    pub target: Option<ActorId>,
    /// Set when a one-shot ability has done its work
    pub spent: bool,
}

impl Ability {
    pub fn is_active(&self, now: f64) -> bool {
        !self.spent && now - self.activated_at < self.duration
    }

    /// Circular footprint inscribed in the ability's square sprite
    pub fn footprint(&self) -> (Vec2, f32) {
        self.actor.bounding_rect().inscribed_circle()
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        self.actor.bounding_rect()
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub actor: Actor,
    pub health: i32,
    pub mana: i32,
    pub level: i32,
    pub abilities: Vec<Ability>,
    /// Current target NPC (non-owning)
    pub target: Option<ActorId>,
    next_ability_id: u32,
}

impl Player {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            health: DEFAULT_HEALTH,
            mana: DEFAULT_MANA,
            level: START_LEVEL,
            abilities: Vec::new(),
            target: None,
            next_ability_id: 1,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Heal to full, refill mana, gain a level
    pub fn level_up(&mut self) {
        self.level += 1;
        self.health = DEFAULT_HEALTH;
        self.mana = DEFAULT_MANA;
        log::debug!("{} reached level {}", self.actor.name, self.level);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(DEFAULT_HEALTH);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn has_active(&self, kind: AbilityKind, now: f64) -> bool {
        self.abilities
            .iter()
            .any(|a| a.kind == kind && a.is_active(now))
    }

    pub fn active_abilities(&self, now: f64) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter(move |a| a.is_active(now))
    }

    /// Spend mana and spawn an ability centered on the player.
    /// Returns `None` when mana is short.
    pub fn cast(&mut self, kind: AbilityKind, texture: Texture, now: f64) -> Option<&mut Ability> {
        let cost = kind.mana_cost();
        if self.mana < cost {
            log::debug!("Not enough mana for {} ({}/{})", kind.name(), self.mana, cost);
            return None;
        }
        self.mana -= cost;

        let anchor = self.actor.center() - texture.size() * 0.5;
        let speed = match kind {
            AbilityKind::ProjectileDamage => PROJECTILE_SPEED,
            _ => 0.0,
        };
        let id = ActorId(self.next_ability_id);
        self.next_ability_id += 1;
        let actor = Actor::new(id, kind.name(), anchor, texture, speed, true);

        log::debug!("Cast {} at {:.2}s", kind.name(), now);
        self.abilities.push(Ability {
            kind,
            actor,
            duration: kind.duration(),
            activated_at: now,
            target: self.target,
            spent: false,
        });
        self.abilities.last_mut()
    }

    /// Drop abilities whose time is up
    pub fn update_abilities_durations(&mut self, now: f64) {
        self.abilities.retain(|a| {
            let keep = a.is_active(now);
            if !keep {
                log::debug!("{} expired", a.kind.name());
            }
            keep
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Actor::new(
            ActorId(0),
            "Purger",
            Vec2::new(100.0, 100.0),
            Texture::new(1, 32.0, 48.0),
            PLAYER_SPEED,
            true,
        ))
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.health, 100);
        assert_eq!(p.mana, 50);
        assert_eq!(p.level, 1);
        assert!(p.abilities.is_empty());
        assert!(p.target.is_none());
    }

    #[test]
    fn test_level_up_resets_vitals() {
        let mut p = player();
        p.health = 12;
        p.mana = 0;
        p.level_up();
        assert_eq!(p.level, 2);
        assert_eq!(p.health, DEFAULT_HEALTH);
        assert_eq!(p.mana, DEFAULT_MANA);
    }

    #[test]
    fn test_cast_centers_on_player() {
        let mut p = player();
        let tex = Texture::new(9, 120.0, 120.0);
        let center = p.actor.center();
        let ability = p.cast(AbilityKind::AreaDuration, tex, 10.0).map(|a| a.footprint());
        let (circle_center, radius) = ability.expect("enough mana");
        assert_eq!(circle_center, center);
        assert_eq!(radius, 60.0);
        assert_eq!(p.mana, DEFAULT_MANA - AREA_ABILITY_MANA_COST);
    }

    #[test]
    fn test_cast_without_mana_fails() {
        let mut p = player();
        p.mana = AREA_ABILITY_MANA_COST - 1;
        assert!(p.cast(AbilityKind::AreaDuration, Texture::new(9, 120.0, 120.0), 0.0).is_none());
        assert!(p.abilities.is_empty());
        assert_eq!(p.mana, AREA_ABILITY_MANA_COST - 1);
    }

    #[test]
    fn test_ability_expiry() {
        let mut p = player();
        let t = 5.0;
        p.cast(AbilityKind::AreaDuration, Texture::new(9, 120.0, 120.0), t);

        p.update_abilities_durations(t + 2.9);
        assert_eq!(p.abilities.len(), 1);
        assert!(p.has_active(AbilityKind::AreaDuration, t + 2.9));

        p.update_abilities_durations(t + 3.1);
        assert!(p.abilities.is_empty());
    }

    #[test]
    fn test_spent_ability_is_pruned() {
        let mut p = player();
        p.cast(AbilityKind::SingleTargetHeal, Texture::new(9, 40.0, 40.0), 0.0);
        p.abilities[0].spent = true;
        p.update_abilities_durations(0.1);
        assert!(p.abilities.is_empty());
    }

    #[test]
    fn test_heal_caps_at_default() {
        let mut p = player();
        p.take_damage(10);
        p.heal(HEAL_AMOUNT);
        assert_eq!(p.health, DEFAULT_HEALTH);
        p.take_damage(DEFAULT_HEALTH);
        assert!(p.is_dead());
    }
}
