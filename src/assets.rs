//! Texture handles and the resource context
//!
//! The simulation only ever needs a sprite's footprint, so a texture is an
//! opaque handle plus its width/height. Loading is fatal on failure: a
//! loader never hands back a recoverable error.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque drawable handle with a queryable size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub handle: u32,
    pub width: f32,
    pub height: f32,
}

impl Texture {
    pub fn new(handle: u32, width: f32, height: f32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Something that turns a file path into a texture, or aborts the process
pub trait AssetLoader {
    fn load(&mut self, path: &str) -> Texture;
}

/// All textures the game draws, loaded once at startup
#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Texture,
    pub scourge: Texture,
    pub undead: Texture,
    pub death_and_decay: Texture,
    pub death_coil: Texture,
    pub burst_of_light: Texture,
}

impl Assets {
    pub const PLAYER: &'static str = "arthas.png";
    pub const SCOURGE: &'static str = "pudge.png";
    pub const UNDEAD: &'static str = "scourge.png";
    pub const DEATH_AND_DECAY: &'static str = "death_and_decay.png";
    pub const DEATH_COIL: &'static str = "death_coil.png";
    pub const BURST_OF_LIGHT: &'static str = "burst_of_light.png";

    pub fn load(loader: &mut dyn AssetLoader) -> Self {
        let assets = Self {
            player: loader.load(Self::PLAYER),
            scourge: loader.load(Self::SCOURGE),
            undead: loader.load(Self::UNDEAD),
            death_and_decay: loader.load(Self::DEATH_AND_DECAY),
            death_coil: loader.load(Self::DEATH_COIL),
            burst_of_light: loader.load(Self::BURST_OF_LIGHT),
        };
        log::info!("Textures loaded");
        assets
    }

    /// Fixed-size textures, no file access
    pub fn placeholder() -> Self {
        Self::load(&mut PlaceholderLoader::default())
    }
}

/// Reads sprite dimensions from PNG headers under a base directory
pub struct PngLoader {
    base: PathBuf,
    next_handle: u32,
}

impl PngLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            next_handle: 1,
        }
    }
}

impl AssetLoader for PngLoader {
    fn load(&mut self, path: &str) -> Texture {
        let full = self.base.join(path);
        let Some((width, height)) = read_png_size(&full) else {
            log::error!("Failed to load texture {}", full.display());
            std::process::exit(1);
        };
        let handle = self.next_handle;
        self.next_handle += 1;
        log::debug!("Texture {} -> #{} ({}x{})", full.display(), handle, width, height);
        Texture::new(handle, width as f32, height as f32)
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Width/height from the IHDR chunk (bytes 16..24)
fn read_png_size(path: &Path) -> Option<(u32, u32)> {
    let mut header = [0u8; 24];
    File::open(path).ok()?.read_exact(&mut header).ok()?;
    parse_png_size(&header)
}

fn parse_png_size(header: &[u8; 24]) -> Option<(u32, u32)> {
    if header[..8] != PNG_SIGNATURE || &header[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([header[16], header[17], header[18], header[19]]);
    let height = u32::from_be_bytes([header[20], header[21], header[22], header[23]]);
    (width > 0 && height > 0).then_some((width, height))
}

/// Hands out fixed sizes per known sprite; unknown paths get 32x32
#[derive(Default)]
pub struct PlaceholderLoader {
    issued: HashMap<String, Texture>,
}

impl AssetLoader for PlaceholderLoader {
    fn load(&mut self, path: &str) -> Texture {
        let handle = self.issued.len() as u32 + 1;
        *self.issued.entry(path.to_string()).or_insert_with(|| {
            let (w, h) = match path {
                Assets::PLAYER => (32.0, 48.0),
                Assets::SCOURGE => (48.0, 48.0),
                Assets::UNDEAD => (24.0, 32.0),
                Assets::DEATH_AND_DECAY => (120.0, 120.0),
                Assets::DEATH_COIL => (16.0, 16.0),
                Assets::BURST_OF_LIGHT => (40.0, 40.0),
                _ => (32.0, 32.0),
            };
            Texture::new(handle, w, h)
        })
    }
}
