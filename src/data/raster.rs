//! RingRaster: a fixed-capacity 2-D buffer of rows ("layers") with per-row timestamps.
//!
//! Rows are stored row-major in one contiguous buffer. Physical row 0 is the
//! oldest slot and the last physical row holds the most recent layer. Appending
//! shifts every row one slot towards the start, so the buffer always scans
//! oldest first and can be handed to a renderer as a single slice.
//!
//! Coordinates:
//! - X spans `[x_min, x_max)` and is divided into `layer_points` columns.
//! - Y spans `[offset, offset + history_extent)`, one unit per row. `offset`
//!   stays at zero unless the raster uses [`RowCoordinates::Scrolling`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::value::RasterValue;
use crate::error::{Result, WaterfallError};

/// Seconds since the Unix epoch. `0` marks a row that was never written.
pub type Timestamp = i64;

/// How physical rows map to the caller's row coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowCoordinates {
    /// Row coordinates are physical indices, `[0, history_extent)`.
    #[default]
    Fixed,
    /// Row coordinates keep increasing: every append that evicts a row moves
    /// the whole Y interval up by one.
    Scrolling,
}

/// Resampling strategy announced by the renderer when asking for a pixel hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleMode {
    NearestNeighbour,
    BilinearInterpolation,
}

/// Geometry of a single raster cell in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The four numbers that define a raster's shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub x_min: f64,
    pub x_max: f64,
    pub history_extent: usize,
    pub layer_points: usize,
}

#[derive(Debug, Clone)]
pub struct RingRaster<T: RasterValue> {
    data: Vec<T>,
    timestamps: Vec<Timestamp>,
    layer_points: usize,
    max_history_length: usize,
    current_history_length: usize,
    x_min: f64,
    x_max: f64,
    display_range: (f64, f64),
    offset: f64,
    row_coordinates: RowCoordinates,
}

impl<T: RasterValue> RingRaster<T> {
    /// Allocate a zero-filled raster of `history_extent` rows by `layer_points` columns.
    ///
    /// Reversed X bounds are swapped. Zero rows, zero columns, or a cell count
    /// that does not fit in memory is an error.
    pub fn new(
        x_min: f64,
        x_max: f64,
        history_extent: usize,
        layer_points: usize,
    ) -> Result<Self> {
        let cells = history_extent
            .checked_mul(layer_points)
            .filter(|&n| n > 0)
            .filter(|&n| {
                n.checked_mul(std::mem::size_of::<T>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(WaterfallError::InvalidDimensions {
                history_extent,
                layer_points,
            })?;
        let (x_min, x_max) = if x_min > x_max {
            (x_max, x_min)
        } else {
            (x_min, x_max)
        };
        Ok(Self {
            data: vec![T::default(); cells],
            timestamps: vec![0; history_extent],
            layer_points,
            max_history_length: history_extent,
            current_history_length: 0,
            x_min,
            x_max,
            display_range: (0.0, 0.0),
            offset: 0.0,
            row_coordinates: RowCoordinates::Fixed,
        })
    }

    pub fn from_dimensions(dims: Dimensions) -> Result<Self> {
        Self::new(dims.x_min, dims.x_max, dims.history_extent, dims.layer_points)
    }

    pub fn with_row_coordinates(mut self, mode: RowCoordinates) -> Self {
        self.row_coordinates = mode;
        self
    }

    /// Append one layer, evicting the oldest row once the raster is full.
    ///
    /// A row of the wrong length is rejected and nothing is mutated.
    pub fn add_row(&mut self, values: &[T], timestamp: Timestamp) -> Result<()> {
        if values.len() != self.layer_points {
            return Err(WaterfallError::LengthMismatch {
                expected: self.layer_points,
                actual: values.len(),
            });
        }

        let n = self.layer_points;
        let total = self.data.len();
        self.data.copy_within(n.., 0);
        self.data[total - n..].copy_from_slice(values);

        self.timestamps.copy_within(1.., 0);
        self.timestamps[self.max_history_length - 1] = timestamp;

        if self.current_history_length < self.max_history_length {
            self.current_history_length += 1;
        } else if self.row_coordinates == RowCoordinates::Scrolling {
            self.offset += 1.0;
        }
        log::trace!(
            "raster append: {} of {} rows written",
            self.current_history_length,
            self.max_history_length
        );
        Ok(())
    }

    /// Append one layer stamped with the current wall-clock time.
    pub fn add_row_now(&mut self, values: &[T]) -> Result<()> {
        self.add_row(values, Utc::now().timestamp())
    }

    /// Value of the cell containing `(x, y)`, or `NaN` outside the raster.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        match self.cell_index(x, y) {
            Some((row, col)) => self.data[row * self.layer_points + col].to_f64(),
            None => f64::NAN,
        }
    }

    /// Physical `(row, column)` of the cell containing `(x, y)`.
    pub fn cell_index(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !self.contains(x, y) {
            return None;
        }
        let col = ((x - self.x_min) / self.cell_width()) as usize;
        let row = ((y - self.offset) / self.cell_height()) as usize;
        // float rounding can land exactly on the upper edge
        Some((
            row.min(self.max_history_length - 1),
            col.min(self.layer_points - 1),
        ))
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (y_min, y_max) = self.y_interval();
        x >= self.x_min && x < self.x_max && y >= y_min && y < y_max
    }

    /// Rendering hint: the footprint of one cell for nearest-neighbour
    /// rendering, `None` to let the renderer pick its own resolution.
    pub fn pixel_footprint(&self, mode: ResampleMode) -> Option<CellRect> {
        match mode {
            ResampleMode::NearestNeighbour => Some(CellRect {
                x: self.x_min,
                y: self.offset,
                width: self.cell_width(),
                height: self.cell_height(),
            }),
            ResampleMode::BilinearInterpolation => None,
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(T::default());
        self.timestamps.fill(0);
        self.current_history_length = 0;
        self.offset = 0.0;
    }

    /// Value range used to scale colors. Independent from the stored data.
    pub fn set_display_range(&mut self, lo: f64, hi: f64) {
        self.display_range = if lo > hi { (hi, lo) } else { (lo, hi) };
    }

    pub fn display_range(&self) -> (f64, f64) {
        self.display_range
    }

    /// Minimum and maximum over the written rows, `(0, 0)` when nothing is written.
    ///
    /// NaN cells are skipped.
    pub fn data_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .written_data()
            .iter()
            .map(|v| v.to_f64())
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            (0.0, 0.0)
        } else {
            (lo, hi)
        }
    }

    /// Insertion time of the row at coordinate `y` (truncated), `0` outside the raster.
    pub fn row_timestamp(&self, y: f64) -> Timestamp {
        match self.physical_row(y) {
            Some(index) => self.timestamps[index],
            None => 0,
        }
    }

    pub fn row_datetime(&self, y: f64) -> Option<DateTime<Utc>> {
        match self.row_timestamp(y) {
            0 => None,
            secs => DateTime::from_timestamp(secs, 0),
        }
    }

    /// Map a row coordinate to a physical row index.
    pub fn physical_row(&self, y: f64) -> Option<usize> {
        let local = y - self.offset;
        // also rejects NaN
        if !(local >= 0.0) {
            return None;
        }
        let index = local as usize;
        (index < self.max_history_length).then_some(index)
    }

    /// The whole buffer, row-major, oldest slot first.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Physical row `index`, written or not.
    pub fn row(&self, index: usize) -> Option<&[T]> {
        if index >= self.max_history_length {
            return None;
        }
        let n = self.layer_points;
        self.data.get(index * n..(index + 1) * n)
    }

    /// Written rows, oldest first, paired with their physical index.
    pub fn written_rows(&self) -> impl Iterator<Item = (usize, &[T])> + '_ {
        self.data
            .chunks_exact(self.layer_points)
            .enumerate()
            .skip(self.first_written_row())
    }

    /// Column `col` across the written rows, oldest first.
    pub fn column(&self, col: usize) -> Option<Vec<T>> {
        if col >= self.layer_points {
            return None;
        }
        Some(self.written_rows().map(|(_, row)| row[col]).collect())
    }

    fn written_data(&self) -> &[T] {
        &self.data[self.first_written_row() * self.layer_points..]
    }

    /// Physical index of the oldest written row (equals the capacity when empty).
    pub fn first_written_row(&self) -> usize {
        self.max_history_length - self.current_history_length
    }

    pub fn layer_points(&self) -> usize {
        self.layer_points
    }

    pub fn max_history_length(&self) -> usize {
        self.max_history_length
    }

    pub fn current_history_length(&self) -> usize {
        self.current_history_length
    }

    pub fn is_empty(&self) -> bool {
        self.current_history_length == 0
    }

    pub fn is_full(&self) -> bool {
        self.current_history_length == self.max_history_length
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn row_coordinates(&self) -> RowCoordinates {
        self.row_coordinates
    }

    pub fn x_interval(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    pub fn y_interval(&self) -> (f64, f64) {
        (self.offset, self.offset + self.max_history_length as f64)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            x_min: self.x_min,
            x_max: self.x_max,
            history_extent: self.max_history_length,
            layer_points: self.layer_points,
        }
    }

    /// Width of one column in X units.
    pub fn cell_width(&self) -> f64 {
        (self.x_max - self.x_min) / self.layer_points as f64
    }

    /// Height of one row in Y units.
    pub fn cell_height(&self) -> f64 {
        let (y_min, y_max) = self.y_interval();
        (y_max - y_min) / self.max_history_length as f64
    }
}
