//! Gameplay simulation
//!
//! All game rules live here. Nothing in this module touches the window,
//! the file system or a global; input arrives as a `TickInput`, randomness
//! through the world's seeded RNG and time as an explicit timestamp.

pub mod actor;
pub mod collision;
pub mod modes;
pub mod player;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId};
pub use collision::{BoundingRect, rect_circle_intersect, rect_intersect};
pub use modes::{FrostmourneHungers, GameMode, Invincible, PlayMode};
pub use player::{Ability, AbilityKind, Player};
pub use state::{GameState, GameStatus, NpcRegistry, StatusEvent};
pub use tick::{Session, World, tick};
