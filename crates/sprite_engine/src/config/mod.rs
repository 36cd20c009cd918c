//! Configuration system
//!
//! File-backed configuration for applications built on the engine. Settings
//! types derive `Serialize`/`Deserialize` and implement [`Config`] to gain
//! TOML and RON file loading and saving.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Renderer settings for sprite applications
///
/// Controls the world-space viewport the projection matrix is built from and
/// a few demo-facing knobs. Loaded from TOML or RON via [`Config`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Viewport width in world units
    pub viewport_width: f32,

    /// Viewport height in world units
    pub viewport_height: f32,

    /// Background clear color (RGB, 0-1 range)
    pub clear_color: [f32; 3],

    /// Number of sprites the demo scene spawns
    pub sprite_count: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            clear_color: [0.05, 0.05, 0.08],
            sprite_count: 100,
        }
    }
}

impl Config for RenderSettings {}
