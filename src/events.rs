//! Redraw notifications for the external renderer.
//!
//! The waterfall does not own any renderer cache. Instead every mutation
//! raises one or more [`RedrawKind`] flags describing *what* went stale.
//! A renderer either polls the accumulated flags
//! ([`WaterfallView::take_redraw`](crate::data::view::WaterfallView::take_redraw))
//! or subscribes with a [`RedrawFilter`] to receive [`RedrawEvent`]s on an
//! `mpsc` channel.

use std::sync::mpsc::{Receiver, Sender};

// ─────────────────────────────────────────────────────────────────────────────
// RedrawKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing which renderer-side state is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RedrawKind(pub u32);

impl RedrawKind {
    /// Raster cells changed (append, clear).
    pub const RASTER: Self = Self(1 << 0);
    /// Row timestamps moved, so time-axis labels must be regenerated.
    pub const ROW_LABELS: Self = Self(1 << 1);
    /// Horizontal and/or vertical cross-section curves changed.
    pub const CURVES: Self = Self(1 << 2);
    /// The marker moved.
    pub const MARKER: Self = Self(1 << 3);
    /// The display range (color scale) changed.
    pub const DISPLAY_RANGE: Self = Self(1 << 4);
    /// A different color map was selected.
    pub const COLOR_MAP: Self = Self(1 << 5);
    /// The raster was rebuilt with new dimensions.
    pub const DIMENSIONS: Self = Self(1 << 6);

    pub const NONE: Self = Self(0);
    /// Wildcard: matches every kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for RedrawKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for RedrawKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for RedrawKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for RedrawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        if *self == RedrawKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(RedrawKind, &str)] = &[
            (RedrawKind::RASTER, "RASTER"),
            (RedrawKind::ROW_LABELS, "ROW_LABELS"),
            (RedrawKind::CURVES, "CURVES"),
            (RedrawKind::MARKER, "MARKER"),
            (RedrawKind::DISPLAY_RANGE, "DISPLAY_RANGE"),
            (RedrawKind::COLOR_MAP, "COLOR_MAP"),
            (RedrawKind::DIMENSIONS, "DIMENSIONS"),
        ];

        let mut names = Vec::new();
        let mut known_bits = 0u32;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RedrawEvent / RedrawFilter
// ─────────────────────────────────────────────────────────────────────────────

/// One notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedrawEvent {
    pub kinds: RedrawKind,
    /// Monotonic counter, incremented for every emitted event.
    pub sequence: u64,
}

/// OR-mask selecting which notifications a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct RedrawFilter {
    pub mask: RedrawKind,
}

impl RedrawFilter {
    pub const fn all() -> Self {
        Self {
            mask: RedrawKind::ALL,
        }
    }

    pub const fn only(mask: RedrawKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, kinds: RedrawKind) -> bool {
        kinds.intersects(self.mask)
    }
}

impl Default for RedrawFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RedrawNotifier
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: RedrawFilter,
    sender: Sender<RedrawEvent>,
}

/// Accumulates pending redraw flags and fans them out to subscribers.
///
/// Owned by the view; lives on the same thread as all mutations.
#[derive(Default)]
pub struct RedrawNotifier {
    pending: RedrawKind,
    sequence: u64,
    subscribers: Vec<Subscriber>,
}

impl RedrawNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, filter: RedrawFilter) -> Receiver<RedrawEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Mark `kinds` stale and notify matching subscribers.
    ///
    /// Subscribers whose receiver was dropped are removed.
    pub fn raise(&mut self, kinds: RedrawKind) {
        if kinds.is_empty() {
            return;
        }
        self.pending |= kinds;
        self.sequence += 1;
        let event = RedrawEvent {
            kinds,
            sequence: self.sequence,
        };
        self.subscribers.retain(|sub| {
            if sub.filter.matches(kinds) {
                sub.sender.send(event).is_ok()
            } else {
                true
            }
        });
    }

    pub fn pending(&self) -> RedrawKind {
        self.pending
    }

    /// Return the accumulated flags and reset them.
    pub fn take(&mut self) -> RedrawKind {
        std::mem::take(&mut self.pending)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_union_and_intersection() {
        let combined = RedrawKind::RASTER | RedrawKind::CURVES;
        assert!(combined.contains(RedrawKind::RASTER));
        assert!(combined.contains(RedrawKind::CURVES));
        assert!(!combined.intersects(RedrawKind::MARKER));
        assert!(RedrawKind::ALL.contains(RedrawKind::DIMENSIONS));
    }

    #[test]
    fn kind_display() {
        assert_eq!(RedrawKind::NONE.to_string(), "NONE");
        assert_eq!(RedrawKind::ALL.to_string(), "ALL");
        assert_eq!(
            (RedrawKind::RASTER | RedrawKind::COLOR_MAP).to_string(),
            "RASTER|COLOR_MAP"
        );
    }

    #[test]
    fn take_resets_pending() {
        let mut n = RedrawNotifier::new();
        n.raise(RedrawKind::RASTER);
        n.raise(RedrawKind::MARKER);
        assert_eq!(n.take(), RedrawKind::RASTER | RedrawKind::MARKER);
        assert!(n.pending().is_empty());
    }

    #[test]
    fn filtered_subscribers() {
        let mut n = RedrawNotifier::new();
        let rx_all = n.subscribe(RedrawFilter::all());
        let rx_range = n.subscribe(RedrawFilter::only(RedrawKind::DISPLAY_RANGE));

        n.raise(RedrawKind::RASTER);
        let evt = rx_all.try_recv().unwrap();
        assert_eq!(evt.kinds, RedrawKind::RASTER);
        assert_eq!(evt.sequence, 1);
        assert!(rx_range.try_recv().is_err());

        n.raise(RedrawKind::DISPLAY_RANGE);
        assert!(rx_range.try_recv().is_ok());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut n = RedrawNotifier::new();
        let rx = n.subscribe(RedrawFilter::all());
        drop(rx);
        n.raise(RedrawKind::CURVES);
        assert_eq!(n.subscriber_count(), 0);
    }
}
