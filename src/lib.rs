//! Waterfall crate root: re-exports and module wiring.
//!
//! This crate provides the data side of a scrolling waterfall (spectrogram)
//! display with synchronized cross-section curves. Painting is left to the
//! caller's plotting library.
//!
//! Modules:
//! - `data::raster`: fixed-capacity row buffer with coordinate sampling
//! - `data::view`: raster owner, marker and cross-section curves
//! - `data::color_map`: color map presets
//! - `events`: redraw flags and subscriptions for the renderer
//! - `sink`: channel to feed a view from other threads
//! - `config` / `persistence`: YAML configuration and JSON view state

pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod persistence;
pub mod sink;

// Public re-exports for a compact external API
pub use config::{AutoRange, WaterfallConfig};
pub use data::color_map::{ColorMapKind, ControlPoint};
pub use data::curve::CrossSection;
pub use data::raster::{CellRect, Dimensions, ResampleMode, RingRaster, RowCoordinates, Timestamp};
pub use data::value::RasterValue;
pub use data::view::{ApplyReport, WaterfallView};
pub use error::{Result, WaterfallError};
pub use events::{RedrawEvent, RedrawFilter, RedrawKind};
pub use sink::{channel, WaterfallCommand, WaterfallSink};
