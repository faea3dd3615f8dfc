//! WaterfallView: owns a [`RingRaster`] and the cross-section curves derived from it.
//!
//! The view starts *uninitialized* (no raster). `set_dimensions` builds a
//! raster together with its curve buffers; they are always created and
//! dropped as one unit. A renderer borrows the raster through
//! [`WaterfallView::raster`] and learns about stale state through the redraw
//! flags in [`crate::events`].

use std::sync::mpsc::Receiver;

use crate::config::{AutoRange, WaterfallConfig};
use crate::data::color_map::ColorMapKind;
use crate::data::curve::CrossSection;
use crate::data::raster::{Dimensions, RingRaster, RowCoordinates, Timestamp};
use crate::data::value::RasterValue;
use crate::error::{Result, WaterfallError};
use crate::events::{RedrawEvent, RedrawFilter, RedrawKind, RedrawNotifier};
use crate::sink::WaterfallCommand;

/// Raster plus everything derived from it.
struct ActiveState<T: RasterValue> {
    raster: RingRaster<T>,
    /// Column coordinates, computed once per set of dimensions.
    column_xs: Vec<f64>,
    horizontal: CrossSection,
    vertical: CrossSection,
    marker_column: f64,
    /// Physical row coordinate (caller's y minus the raster offset).
    marker_row: f64,
}

impl<T: RasterValue> ActiveState<T> {
    fn new(raster: RingRaster<T>) -> Self {
        let (x_min, x_max) = raster.x_interval();
        let points = raster.layer_points();
        let step = (x_max - x_min) / points as f64;
        let column_xs: Vec<f64> = (0..points).map(|i| x_min + i as f64 * step).collect();
        let mut state = Self {
            horizontal: CrossSection {
                xs: column_xs.clone(),
                ys: vec![0.0; points],
            },
            vertical: CrossSection::with_capacity(raster.max_history_length()),
            column_xs,
            marker_column: (x_min + x_max) / 2.0,
            marker_row: (raster.max_history_length() - 1) as f64,
            raster,
        };
        state.recompute_curves();
        state
    }

    fn reset_curves(&mut self) {
        self.horizontal = CrossSection {
            xs: self.column_xs.clone(),
            ys: vec![0.0; self.raster.layer_points()],
        };
        self.vertical = CrossSection::with_capacity(self.raster.max_history_length());
    }

    /// Refresh both curves from the raster. Returns `false` (curves left
    /// as they were) when the marker row is outside the raster.
    fn recompute_curves(&mut self) -> bool {
        let extent = self.raster.max_history_length();
        if !(self.marker_row >= 0.0 && self.marker_row < extent as f64) {
            return false;
        }

        let row = (self.marker_row as usize).min(extent - 1);
        if let Some(values) = self.raster.row(row) {
            for (y, v) in self.horizontal.ys.iter_mut().zip(values) {
                *y = v.to_f64();
            }
        }

        let offset = self.raster.offset();
        self.vertical.clear();
        for (index, _) in self.raster.written_rows() {
            let y = index as f64 + offset;
            self.vertical.xs.push(y);
            self.vertical.ys.push(self.raster.sample(self.marker_column, y));
        }
        true
    }
}

/// Outcome of draining a command channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub rejected: usize,
}

pub struct WaterfallView<T: RasterValue = f32> {
    state: Option<ActiveState<T>>,
    color_map: ColorMapKind,
    row_coordinates: RowCoordinates,
    auto_range: AutoRange,
    /// Set once `AutoRange::Once` has adopted a data range for the current raster.
    auto_range_done: bool,
    notifier: RedrawNotifier,
}

impl<T: RasterValue> Default for WaterfallView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RasterValue> WaterfallView<T> {
    /// An uninitialized view. Data operations fail until `set_dimensions` is called.
    pub fn new() -> Self {
        Self {
            state: None,
            color_map: ColorMapKind::default(),
            row_coordinates: RowCoordinates::default(),
            auto_range: AutoRange::Manual,
            auto_range_done: false,
            notifier: RedrawNotifier::new(),
        }
    }

    /// Build an active view from a configuration.
    pub fn from_config(cfg: &WaterfallConfig) -> Result<Self> {
        let mut view = Self::new();
        view.color_map = cfg.color_map;
        view.row_coordinates = cfg.row_coordinates;
        view.auto_range = cfg.auto_range;
        let dims = cfg.dimensions();
        view.set_dimensions(dims.x_min, dims.x_max, dims.history_extent, dims.layer_points)?;
        if let Some([lo, hi]) = cfg.display_range {
            view.set_range(lo, hi)?;
        }
        Ok(view)
    }

    // ── Dimensions ───────────────────────────────────────────────────────

    /// Replace the raster and its curves with fresh, empty ones.
    ///
    /// On error the previous raster (if any) is kept.
    pub fn set_dimensions(
        &mut self,
        x_min: f64,
        x_max: f64,
        history_extent: usize,
        layer_points: usize,
    ) -> Result<()> {
        let raster = RingRaster::new(x_min, x_max, history_extent, layer_points)?
            .with_row_coordinates(self.row_coordinates);
        log::debug!(
            "waterfall dimensions set: x [{}, {}), {} rows x {} points",
            raster.x_interval().0,
            raster.x_interval().1,
            history_extent,
            layer_points
        );
        self.state = Some(ActiveState::new(raster));
        self.auto_range_done = false;
        self.notifier.raise(
            RedrawKind::DIMENSIONS
                | RedrawKind::RASTER
                | RedrawKind::ROW_LABELS
                | RedrawKind::CURVES
                | RedrawKind::MARKER
                | RedrawKind::DISPLAY_RANGE,
        );
        Ok(())
    }

    pub fn set_dimensions_from(&mut self, dims: Dimensions) -> Result<()> {
        self.set_dimensions(dims.x_min, dims.x_max, dims.history_extent, dims.layer_points)
    }

    pub fn data_dimensions(&self) -> Option<Dimensions> {
        self.state.as_ref().map(|s| s.raster.dimensions())
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    // ── Data ─────────────────────────────────────────────────────────────

    /// Append a row and refresh the curves.
    pub fn add_data(&mut self, values: &[T], timestamp: Timestamp) -> Result<()> {
        let state = self.state.as_mut().ok_or(WaterfallError::Uninitialized)?;
        state.raster.add_row(values, timestamp)?;
        state.recompute_curves();

        let mut kinds = RedrawKind::RASTER | RedrawKind::ROW_LABELS | RedrawKind::CURVES;
        let adopt_range = match self.auto_range {
            AutoRange::Manual => false,
            AutoRange::Once => !self.auto_range_done,
            AutoRange::Always => true,
        };
        if adopt_range {
            let (lo, hi) = state.raster.data_range();
            state.raster.set_display_range(lo, hi);
            self.auto_range_done = true;
            kinds |= RedrawKind::DISPLAY_RANGE;
        }
        self.notifier.raise(kinds);
        Ok(())
    }

    pub fn add_data_now(&mut self, values: &[T]) -> Result<()> {
        self.add_data(values, chrono::Utc::now().timestamp())
    }

    /// Empty the raster and the curves. Dimensions, marker and display range are kept.
    pub fn clear(&mut self) -> Result<()> {
        let state = self.state.as_mut().ok_or(WaterfallError::Uninitialized)?;
        state.raster.clear();
        state.reset_curves();
        state.recompute_curves();
        log::debug!("waterfall cleared");
        self.notifier
            .raise(RedrawKind::RASTER | RedrawKind::ROW_LABELS | RedrawKind::CURVES);
        Ok(())
    }

    /// Cell value at `(x, y)`, `NaN` outside the raster or before initialization.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.state
            .as_ref()
            .map_or(f64::NAN, |s| s.raster.sample(x, y))
    }

    pub fn row_timestamp(&self, y: f64) -> Timestamp {
        self.state.as_ref().map_or(0, |s| s.raster.row_timestamp(y))
    }

    /// Borrow the raster for rendering.
    pub fn raster(&self) -> Option<&RingRaster<T>> {
        self.state.as_ref().map(|s| &s.raster)
    }

    // ── Ranges ───────────────────────────────────────────────────────────

    /// Set the color scale explicitly. Satisfies a pending `AutoRange::Once`,
    /// so the next append keeps this range; `AutoRange::Always` still follows
    /// the data.
    pub fn set_range(&mut self, lo: f64, hi: f64) -> Result<()> {
        let state = self.state.as_mut().ok_or(WaterfallError::Uninitialized)?;
        state.raster.set_display_range(lo, hi);
        self.notifier.raise(RedrawKind::DISPLAY_RANGE);
        self.auto_range_done = true;
        Ok(())
    }

    /// Display range, `(0, 0)` before initialization.
    pub fn range(&self) -> (f64, f64) {
        self.state
            .as_ref()
            .map_or((0.0, 0.0), |s| s.raster.display_range())
    }

    /// Stored data range, `(0, 0)` before initialization or when empty.
    pub fn data_range(&self) -> (f64, f64) {
        self.state
            .as_ref()
            .map_or((0.0, 0.0), |s| s.raster.data_range())
    }

    pub fn auto_range(&self) -> AutoRange {
        self.auto_range
    }

    pub fn set_auto_range(&mut self, mode: AutoRange) {
        self.auto_range = mode;
        self.auto_range_done = false;
    }

    // ── Marker & curves ──────────────────────────────────────────────────

    /// Move the marker to `(x, y)` and refresh the curves.
    ///
    /// Fails with `OutOfBounds` (marker unchanged) when the point is outside the raster.
    pub fn set_marker(&mut self, x: f64, y: f64) -> Result<()> {
        let state = self.state.as_mut().ok_or(WaterfallError::Uninitialized)?;
        if !state.raster.contains(x, y) {
            return Err(WaterfallError::OutOfBounds { x, y });
        }
        state.marker_column = x;
        state.marker_row = y - state.raster.offset();
        state.recompute_curves();
        self.notifier.raise(RedrawKind::MARKER | RedrawKind::CURVES);
        Ok(())
    }

    /// Marker position in caller coordinates.
    pub fn marker(&self) -> Option<(f64, f64)> {
        self.state
            .as_ref()
            .map(|s| (s.marker_column, s.marker_row + s.raster.offset()))
    }

    /// The row under the marker, one value per column.
    pub fn horizontal_curve(&self) -> Option<&CrossSection> {
        self.state.as_ref().map(|s| &s.horizontal)
    }

    /// The column under the marker across the written rows, oldest first.
    pub fn vertical_curve(&self) -> Option<&CrossSection> {
        self.state.as_ref().map(|s| &s.vertical)
    }

    // ── Presentation settings ────────────────────────────────────────────

    pub fn color_map(&self) -> ColorMapKind {
        self.color_map
    }

    pub fn set_color_map(&mut self, kind: ColorMapKind) {
        self.color_map = kind;
        self.notifier.raise(RedrawKind::COLOR_MAP);
    }

    pub fn row_coordinates(&self) -> RowCoordinates {
        self.row_coordinates
    }

    /// Takes effect with the next `set_dimensions`.
    pub fn set_row_coordinates(&mut self, mode: RowCoordinates) {
        self.row_coordinates = mode;
    }

    // ── Redraw notification ──────────────────────────────────────────────

    /// Flags raised since the last call, then reset.
    pub fn take_redraw(&mut self) -> RedrawKind {
        self.notifier.take()
    }

    pub fn pending_redraw(&self) -> RedrawKind {
        self.notifier.pending()
    }

    pub fn subscribe(&mut self, filter: RedrawFilter) -> Receiver<RedrawEvent> {
        self.notifier.subscribe(filter)
    }

    // ── Producer hand-off ────────────────────────────────────────────────

    pub fn apply_command(&mut self, cmd: WaterfallCommand<T>) -> Result<()> {
        match cmd {
            WaterfallCommand::AddRow { values, timestamp } => match timestamp {
                Some(ts) => self.add_data(&values, ts),
                None => self.add_data_now(&values),
            },
            WaterfallCommand::SetRange { lo, hi } => self.set_range(lo, hi),
            WaterfallCommand::SetMarker { x, y } => self.set_marker(x, y),
            WaterfallCommand::SetDimensions(dims) => self.set_dimensions_from(dims),
            WaterfallCommand::SetColorMap(kind) => {
                self.set_color_map(kind);
                Ok(())
            }
            WaterfallCommand::Clear => self.clear(),
        }
    }

    /// Apply every command currently queued on `rx`, in order, without blocking.
    ///
    /// Rejected commands are logged and counted; they never stop the drain.
    pub fn apply_commands(&mut self, rx: &Receiver<WaterfallCommand<T>>) -> ApplyReport {
        let mut report = ApplyReport::default();
        while let Ok(cmd) = rx.try_recv() {
            match self.apply_command(cmd) {
                Ok(()) => report.applied += 1,
                Err(e) => {
                    log::warn!("waterfall command rejected: {e}");
                    report.rejected += 1;
                }
            }
        }
        report
    }
}
