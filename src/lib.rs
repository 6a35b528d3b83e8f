//! Stratholme - a small top-down arcade game
//!
//! Core modules:
//! - `sim`: Gameplay simulation (actors, collisions, status machine, play modes)
//! - `renderer`: Draw-command sink the game emits into
//! - `platform`: Input sources (live snapshots, scripted replays)
//! - `assets`: Texture handles and the resource context
//! - `hud`: Read-only draw pass over the world
//! - `settings`: Runtime configuration

pub mod assets;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetLoader, Assets, Texture};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 550.0;
    pub const FONT_SIZE: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 14.0;
    pub const DEFAULT_HEALTH: i32 = 100;
    pub const DEFAULT_MANA: i32 = 50;
    pub const START_LEVEL: i32 = 1;

    /// Half-width of the square NPCs wander inside, around their home
    pub const PATROL_RANGE: f32 = 50.0;

    /// Death and Decay (area ability)
    pub const AREA_ABILITY_DURATION: f64 = 3.0;
    pub const AREA_ABILITY_MANA_COST: i32 = 10;
    /// Death Coil (projectile ability)
    pub const PROJECTILE_DURATION: f64 = 2.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_MANA_COST: i32 = 10;
    /// Burst of Light (heal)
    pub const HEAL_DURATION: f64 = 0.5;
    pub const HEAL_AMOUNT: i32 = 25;
    pub const HEAL_MANA_COST: i32 = 10;

    /// Every Nth cumulative purge levels the player up
    pub const PURGES_PER_LEVEL: u32 = 4;
    /// Health lost per tick while touching an NPC (Frostmourne Hungers)
    pub const NPC_CONTACT_DAMAGE: i32 = 1;

    pub const MENU_TEXT: &str = "Press space key to start";
    pub const PAUSE_TEXT: &str = "Game Paused";
    pub const PURGE_OR_SPARE_PROMPT: &str = "Press P to Purge or S to Spare";
}

/// Center of a `size`-sized box whose top-left corner is `pos`
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
