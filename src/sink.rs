//! Channel for feeding a waterfall from other threads.
//!
//! The raster and the view hold no locks. A producer that lives on another
//! thread gets a [`WaterfallSink`] and sends [`WaterfallCommand`]s; the thread
//! that owns the [`WaterfallView`](crate::data::view::WaterfallView) drains them
//! with `apply_commands` before rendering.

use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::data::color_map::ColorMapKind;
use crate::data::raster::{Dimensions, Timestamp};

/// Messages sent over the channel to drive a view.
#[derive(Debug, Clone, PartialEq)]
pub enum WaterfallCommand<T> {
    /// Append one row. `None` stamps it with the time it is applied.
    AddRow {
        values: Vec<T>,
        timestamp: Option<Timestamp>,
    },
    SetRange { lo: f64, hi: f64 },
    SetMarker { x: f64, y: f64 },
    /// Rebuild the raster with new dimensions (all data is discarded).
    SetDimensions(Dimensions),
    SetColorMap(ColorMapKind),
    Clear,
}

/// Convenience sender for feeding rows into a waterfall.
pub struct WaterfallSink<T> {
    tx: Sender<WaterfallCommand<T>>,
}

impl<T> Clone for WaterfallSink<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Create a connected sink/receiver pair.
pub fn channel<T>() -> (WaterfallSink<T>, Receiver<WaterfallCommand<T>>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (WaterfallSink { tx }, rx)
}

impl<T> WaterfallSink<T> {
    /// Send a row with an explicit timestamp.
    pub fn add_row<I>(
        &self,
        values: I,
        timestamp: Timestamp,
    ) -> Result<(), SendError<WaterfallCommand<T>>>
    where
        I: Into<Vec<T>>,
    {
        self.tx.send(WaterfallCommand::AddRow {
            values: values.into(),
            timestamp: Some(timestamp),
        })
    }

    /// Send a row to be stamped when the owning thread applies it.
    pub fn add_row_now<I>(&self, values: I) -> Result<(), SendError<WaterfallCommand<T>>>
    where
        I: Into<Vec<T>>,
    {
        self.tx.send(WaterfallCommand::AddRow {
            values: values.into(),
            timestamp: None,
        })
    }

    pub fn set_range(&self, lo: f64, hi: f64) -> Result<(), SendError<WaterfallCommand<T>>> {
        self.tx.send(WaterfallCommand::SetRange { lo, hi })
    }

    pub fn set_marker(&self, x: f64, y: f64) -> Result<(), SendError<WaterfallCommand<T>>> {
        self.tx.send(WaterfallCommand::SetMarker { x, y })
    }

    pub fn set_dimensions(&self, dims: Dimensions) -> Result<(), SendError<WaterfallCommand<T>>> {
        self.tx.send(WaterfallCommand::SetDimensions(dims))
    }

    pub fn set_color_map(&self, kind: ColorMapKind) -> Result<(), SendError<WaterfallCommand<T>>> {
        self.tx.send(WaterfallCommand::SetColorMap(kind))
    }

    pub fn clear(&self) -> Result<(), SendError<WaterfallCommand<T>>> {
        self.tx.send(WaterfallCommand::Clear)
    }
}
