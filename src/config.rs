//! Demo configuration, stored as RON

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rasterizer::{Color, FillStrategy};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "swrast.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Framebuffer size in pixels
    pub width: u32,
    pub height: u32,
    /// Window pixels per framebuffer pixel
    pub scale: u32,
    /// Force a fill strategy instead of probing the CPU
    pub strategy: Option<FillStrategy>,
    /// `env_logger` filter; `RUST_LOG` applies when unset
    pub log_filter: Option<String>,
    /// Outer vertices of the demo fan
    pub segments: u16,
    /// Radians per second
    pub rotation_speed: f32,
    pub clear_color: Color,
    /// Draw the outline and FPS text
    pub overlay: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            scale: 3,
            strategy: None,
            log_filter: None,
            segments: 24,
            rotation_speed: 0.6,
            clear_color: Color::new(16, 16, 24),
            overlay: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl DemoConfig {
    /// Parse a configuration from a RON string
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Load `path`, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }

    /// Framebuffer size clamped to what a texture upload can describe
    pub fn framebuffer_size(&self) -> (u16, u16) {
        let clamp = |v: u32| v.clamp(1, u16::MAX as u32) as u16;
        (clamp(self.width), clamp(self.height))
    }

    /// Fan segments clamped to what a `u16` index buffer can address
    pub fn fan_segments(&self) -> u16 {
        self.segments.clamp(3, u16::MAX - 2)
    }
}
