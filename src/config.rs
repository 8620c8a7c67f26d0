//! Optional JSON settings file, overridable from the command line.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Film grain density divisor: width*height/strength pixels per frame.
    /// 0 disables grain even where a sketch asks for it.
    pub grain_strength: u32,
    pub vignette: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            grain_strength: 10,
            vignette: true,
        }
    }
}

impl Config {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"width": 800, "vsync": false}"#).unwrap();
        assert_eq!(cfg.width, 800);
        assert!(!cfg.vsync);
        assert_eq!(cfg.height, DEFAULT_HEIGHT);
        assert_eq!(cfg.grain_strength, 10);
        assert!(cfg.vignette);
    }

    #[test]
    fn json_roundtrip() {
        let cfg = Config {
            width: 320,
            height: 240,
            vsync: false,
            grain_strength: 4,
            vignette: false,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width, 320);
        assert_eq!(back.height, 240);
        assert_eq!(back.grain_strength, 4);
        assert!(!back.vsync && !back.vignette);
    }
}
