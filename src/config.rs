//! Startup configuration
//!
//! Stored as RON, e.g.:
//!
//! ```ron
//! (
//!   radius: 50,
//!   height: 100,
//!   subdivisions: 20,
//!   camera_position: (x: 300.0, y: 200.0, z: 50.0),
//!   display_mode: Colored,
//! )
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::path::{Path, PathBuf};

use macroquad::logging::{info, warn};
use serde::{Deserialize, Serialize};

use crate::rasterizer::{Color, DisplayMode, Vec3};

/// Smallest subdivision count with a valid cap topology
pub const MIN_SUBDIVISIONS: i32 = 3;

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Serialize(ron::Error),
    Validation(String),
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

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Inclusive integer range for a parameter control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: i32,
    pub max: i32,
}

impl ParamRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// Viewer settings read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub radius: i32,
    pub height: i32,
    pub subdivisions: i32,
    pub radius_range: ParamRange,
    pub height_range: ParamRange,
    pub subdivision_range: ParamRange,
    /// Initial camera position; the camera always looks at (0, height / 2, 0)
    pub camera_position: Vec3,
    pub fov_degrees: f32,
    pub background: Color,
    /// Color for texture samples outside the image or without a texture
    pub texture_border: Color,
    pub display_mode: DisplayMode,
    /// Seed for the triangle color generator; `None` seeds from the clock
    pub color_seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            radius: 50,
            height: 100,
            subdivisions: 20,
            radius_range: ParamRange::new(5, 200),
            height_range: ParamRange::new(5, 400),
            subdivision_range: ParamRange::new(MIN_SUBDIVISIONS, 100),
            camera_position: Vec3::new(300.0, 200.0, 50.0),
            fov_degrees: 45.0,
            background: Color::BLACK,
            texture_border: Color::BLACK,
            display_mode: DisplayMode::Colored,
            color_seed: None,
        }
    }
}

impl ViewerConfig {
    /// Parse from RON text, validate, and clamp the initial values into
    /// their ranges
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let mut config: Self = ron::from_str(text)?;
        config.validate()?;
        config.radius = config.radius_range.clamp(config.radius);
        config.height = config.height_range.clamp(config.height);
        config.subdivisions = config.subdivision_range.clamp(config.subdivisions);
        Ok(config)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load from `path`; a missing file or an invalid one falls back to the
    /// defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("radius_range", self.radius_range),
            ("height_range", self.height_range),
            ("subdivision_range", self.subdivision_range),
        ];
        for (name, range) in ranges {
            if range.min > range.max {
                return Err(ConfigError::Validation(format!(
                    "{}: min {} > max {}",
                    name, range.min, range.max
                )));
            }
            if range.min <= 0 {
                return Err(ConfigError::Validation(format!("{}: min must be positive", name)));
            }
        }
        if self.subdivision_range.min < MIN_SUBDIVISIONS {
            return Err(ConfigError::Validation(format!(
                "subdivision_range: min {} < {}",
                self.subdivision_range.min, MIN_SUBDIVISIONS
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Validation(format!(
                "fov_degrees {} outside (0, 180)",
                self.fov_degrees
            )));
        }
        let p = self.camera_position;
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(ConfigError::Validation("camera_position must be finite".to_string()));
        }
        Ok(())
    }
}

/// `<config_dir>/cylinder-viewer/config.ron`
#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cylinder-viewer").join("config.ron"))
}

#[cfg(target_arch = "wasm32")]
pub fn default_config_path() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_ron_is_default() {
        assert_eq!(ViewerConfig::from_ron("()").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ViewerConfig::from_ron(
            "(radius: 80, display_mode: Wireframe, color_seed: Some(7), background: (r: 10, g: 20, b: 30))",
        )
        .unwrap();
        assert_eq!(config.radius, 80);
        assert_eq!(config.height, 100);
        assert_eq!(config.display_mode, DisplayMode::Wireframe);
        assert_eq!(config.color_seed, Some(7));
        assert_eq!(config.background, Color::new(10, 20, 30));
    }

    #[test]
    fn test_initial_values_clamped() {
        let config = ViewerConfig::from_ron("(radius: 1000, height: 1, subdivisions: 0)").unwrap();
        assert_eq!(config.radius, 200);
        assert_eq!(config.height, 5);
        assert_eq!(config.subdivisions, 3);
    }

    #[test]
    fn test_rejects_low_subdivision_minimum() {
        let result = ViewerConfig::from_ron("(subdivision_range: (min: 2, max: 50))");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let result = ViewerConfig::from_ron("(height_range: (min: 300, max: 10))");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_bad_fov() {
        assert!(ViewerConfig::from_ron("(fov_degrees: 0.0)").is_err());
        assert!(ViewerConfig::from_ron("(fov_degrees: 180.0)").is_err());
    }

    #[test]
    fn test_parse_error() {
        let result = ViewerConfig::from_ron("(radius: \"wide\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        let config = ViewerConfig {
            subdivisions: 42,
            camera_position: Vec3::new(1.0, 2.0, 3.0),
            display_mode: DisplayMode::Textured,
            ..ViewerConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(ViewerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_fallbacks() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.ron");
        assert_eq!(ViewerConfig::load_or_default(&missing), ViewerConfig::default());

        let broken = dir.path().join("broken.ron");
        std::fs::write(&broken, "(radius: ").unwrap();
        assert_eq!(ViewerConfig::load_or_default(&broken), ViewerConfig::default());
    }

    #[test]
    fn test_param_range_clamp() {
        let r = ParamRange::new(5, 200);
        assert_eq!(r.clamp(4), 5);
        assert_eq!(r.clamp(50), 50);
        assert_eq!(r.clamp(201), 200);
    }
}
