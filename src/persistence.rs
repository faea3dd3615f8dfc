//! State persistence: save and load view settings to/from JSON files.
//!
//! Only settings are persisted (shape, marker, display range, color map and
//! modes). Raster contents are runtime data and are not written.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AutoRange;
use crate::data::color_map::ColorMapKind;
use crate::data::raster::{Dimensions, RowCoordinates};
use crate::data::value::RasterValue;
use crate::data::view::WaterfallView;
use crate::error::Result;

/// Serializable snapshot of a view's settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewStateSerde {
    pub dimensions: Option<Dimensions>,
    pub marker: Option<[f64; 2]>,
    pub display_range: Option<[f64; 2]>,
    pub color_map: ColorMapKind,
    pub row_coordinates: RowCoordinates,
    pub auto_range: AutoRange,
}

impl<T: RasterValue> From<&WaterfallView<T>> for ViewStateSerde {
    fn from(v: &WaterfallView<T>) -> Self {
        let dimensions = v.data_dimensions();
        Self {
            dimensions,
            marker: v.marker().map(|(x, y)| [x, y]),
            display_range: dimensions.map(|_| {
                let (lo, hi) = v.range();
                [lo, hi]
            }),
            color_map: v.color_map(),
            row_coordinates: v.row_coordinates(),
            auto_range: v.auto_range(),
        }
    }
}

impl ViewStateSerde {
    /// Apply stored settings to a view, rebuilding its raster.
    ///
    /// A stored marker that does not fit the rebuilt raster is ignored.
    pub fn apply_to<T: RasterValue>(self, v: &mut WaterfallView<T>) -> Result<()> {
        v.set_color_map(self.color_map);
        v.set_row_coordinates(self.row_coordinates);
        v.set_auto_range(self.auto_range);
        if let Some(dims) = self.dimensions {
            v.set_dimensions_from(dims)?;
            if let Some([lo, hi]) = self.display_range {
                v.set_range(lo, hi)?;
            }
            if let Some([x, y]) = self.marker {
                if let Err(e) = v.set_marker(x, y) {
                    log::warn!("stored marker not restored: {e}");
                }
            }
        }
        Ok(())
    }
}

// ---------- Public API ----------

/// Serialize the view state as pretty JSON.
pub fn state_to_json(state: &ViewStateSerde) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn state_from_json(json: &str) -> Result<ViewStateSerde> {
    Ok(serde_json::from_str(json)?)
}

/// Save the view state to a JSON file at the given path.
pub fn save_state_to_path(state: &ViewStateSerde, path: &Path) -> Result<()> {
    let txt = state_to_json(state)?;
    std::fs::write(path, txt)?;
    Ok(())
}

/// Load the view state from a JSON file at the given path.
pub fn load_state_from_path(path: &Path) -> Result<ViewStateSerde> {
    let txt = std::fs::read_to_string(path)?;
    state_from_json(&txt)
}
