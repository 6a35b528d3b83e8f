//! Platform abstraction layer
//!
//! The host toolkit owns the window and keyboard; the game only ever sees
//! one [`TickInput`] snapshot per tick, produced by an [`InputSource`].

pub mod input;
pub mod scripted;

pub use input::{InputSource, Key, TickInput};
pub use scripted::ScriptedInput;
