//! Configuration for a waterfall view.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::color_map::ColorMapKind;
use crate::data::raster::{Dimensions, RowCoordinates};
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// AutoRange
// ─────────────────────────────────────────────────────────────────────────────

/// When the display range should follow the stored data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoRange {
    /// The display range only changes through `set_range`.
    Manual,
    /// Adopt the data range after the first successful append, then stop.
    #[default]
    Once,
    /// Adopt the data range after every successful append.
    Always,
}

// ─────────────────────────────────────────────────────────────────────────────
// WaterfallConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for a [`WaterfallView`](crate::data::view::WaterfallView).
///
/// | Field             | Purpose |
/// |-------------------|---------|
/// | `x_min`, `x_max`  | Column axis bounds (swapped if reversed) |
/// | `history_extent`  | Number of retained rows |
/// | `layer_points`    | Values per row |
/// | `display_range`   | Initial color scale, `None` = leave at `(0, 0)` |
/// | `color_map`       | Color map preset |
/// | `row_coordinates` | Fixed or scrolling row coordinates |
/// | `auto_range`      | Display range follows the data |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub history_extent: usize,
    pub layer_points: usize,
    pub display_range: Option<[f64; 2]>,
    pub color_map: ColorMapKind,
    pub row_coordinates: RowCoordinates,
    pub auto_range: AutoRange,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 500.0,
            history_extent: 64,
            layer_points: 126,
            display_range: None,
            color_map: ColorMapKind::default(),
            row_coordinates: RowCoordinates::default(),
            auto_range: AutoRange::default(),
        }
    }
}

impl WaterfallConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            x_min: self.x_min,
            x_max: self.x_max,
            history_extent: self.history_extent,
            layer_points: self.layer_points,
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a YAML config file. Missing keys fall back to their defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_yaml_str(&s)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }

    /// Like [`load_from_path`](Self::load_from_path) but falls back to the
    /// defaults (with a warning) when the file is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("using default waterfall config, failed to load {:?}: {e}", path);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_shape() {
        let cfg = WaterfallConfig::default();
        assert_eq!(cfg.history_extent, 64);
        assert_eq!(cfg.layer_points, 126);
        assert_eq!((cfg.x_min, cfg.x_max), (0.0, 500.0));
        assert_eq!(cfg.auto_range, AutoRange::Once);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let cfg = WaterfallConfig::from_yaml_str("history_extent: 8\ncolor_map: Jet\n").unwrap();
        assert_eq!(cfg.history_extent, 8);
        assert_eq!(cfg.color_map, ColorMapKind::Jet);
        assert_eq!(cfg.layer_points, 126);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(WaterfallConfig::from_yaml_str("history_extent: [1, 2]").is_err());
    }
}
