//! Player configuration (TOML).

use ember_core::Result;
use serde::Deserialize;
use std::path::Path;

/// Playfield or view dimensions in logical pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Run configuration for the scripted player.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Logical playfield size.
    pub playfield: Dimensions,
    /// Visible view size.
    pub view: Dimensions,
    /// Number of ticks to run.
    pub ticks: u64,
    /// Seed for the stage RNG.
    pub seed: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playfield: Dimensions {
                width: 320.0,
                height: 240.0,
            },
            view: Dimensions {
                width: 320.0,
                height: 240.0,
            },
            ticks: 240,
            seed: 1,
        }
    }
}

impl PlayerConfig {
    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: PlayerConfig = toml::from_str(
            r#"
            ticks = 500
            seed = 99

            [playfield]
            width = 640.0
            height = 480.0

            [view]
            width = 320.0
            height = 240.0
        "#,
        )
        .unwrap();

        assert_eq!(config.ticks, 500);
        assert_eq!(config.seed, 99);
        assert_eq!(config.playfield.width, 640.0);
        assert_eq!(config.view.height, 240.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: PlayerConfig = toml::from_str("ticks = 10").unwrap();
        assert_eq!(config.ticks, 10);
        assert_eq!(config.seed, 1);
        assert_eq!(config.playfield.width, 320.0);
    }
}
