//! Color map presets for the waterfall.
//!
//! Each preset is a list of control points `(position, red, green, blue)`,
//! all components in `[0, 1]` and positions sorted ascending. Turning the
//! control points into an actual gradient is left to the renderer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub position: f64,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ControlPoint {
    const fn new(position: f64, red: f64, green: f64, blue: f64) -> Self {
        Self {
            position,
            red,
            green,
            blue,
        }
    }
}

// Qt's darkBlue / darkRed component value
const DARK: f64 = 128.0 / 255.0;

const BLACK_BODY_RADIATION: &[ControlPoint] = &[
    ControlPoint::new(0.0, 0.0, 0.0, 0.0),
    ControlPoint::new(0.4, 0.901960784314, 0.0, 0.0),
    ControlPoint::new(0.8, 0.901960784314, 0.901960784314, 0.0),
    ControlPoint::new(1.0, 1.0, 1.0, 1.0),
];

const COOL_TO_WARM: &[ControlPoint] = &[
    ControlPoint::new(0.0, 0.23137254902, 0.298039215686, 0.752941176471),
    ControlPoint::new(0.5, 0.865, 0.865, 0.865),
    ControlPoint::new(1.0, 0.705882352941, 0.0156862745098, 0.149019607843),
];

const JET: &[ControlPoint] = &[
    ControlPoint::new(0.0, 0.0, 0.0, DARK),
    ControlPoint::new(0.2, 0.0, 0.0, 1.0),
    ControlPoint::new(0.4, 0.0, 1.0, 1.0),
    ControlPoint::new(0.6, 1.0, 1.0, 0.0),
    ControlPoint::new(0.8, 1.0, 0.0, 0.0),
    ControlPoint::new(1.0, DARK, 0.0, 0.0),
];

/// Built-in color map presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMapKind {
    BlackBodyRadiation,
    /// Diverging blue-grey-red map taken from ParaView.
    #[default]
    CoolToWarm,
    Jet,
}

impl ColorMapKind {
    /// All built-in presets (useful for combo-box UIs).
    pub fn all() -> &'static [ColorMapKind] {
        &[
            ColorMapKind::BlackBodyRadiation,
            ColorMapKind::CoolToWarm,
            ColorMapKind::Jet,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColorMapKind::BlackBodyRadiation => "Black body radiation",
            ColorMapKind::CoolToWarm => "Cool to warm",
            ColorMapKind::Jet => "Jet",
        }
    }

    pub fn control_points(&self) -> &'static [ControlPoint] {
        match self {
            ColorMapKind::BlackBodyRadiation => BLACK_BODY_RADIATION,
            ColorMapKind::CoolToWarm => COOL_TO_WARM,
            ColorMapKind::Jet => JET,
        }
    }

    /// The preset after `self`, wrapping around. Handy for a "change color map" button.
    pub fn next(&self) -> ColorMapKind {
        let all = Self::all();
        let idx = all.iter().position(|k| k == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_points_sorted_and_normalized() {
        for kind in ColorMapKind::all() {
            let pts = kind.control_points();
            assert!(pts.len() >= 2, "{} needs at least two stops", kind.label());
            assert_eq!(pts.first().unwrap().position, 0.0);
            assert_eq!(pts.last().unwrap().position, 1.0);
            for w in pts.windows(2) {
                assert!(w[0].position < w[1].position);
            }
            for p in pts {
                for c in [p.red, p.green, p.blue] {
                    assert!((0.0..=1.0).contains(&c));
                }
            }
        }
    }

    #[test]
    fn next_cycles_through_all() {
        let start = ColorMapKind::default();
        let mut k = start;
        for _ in 0..ColorMapKind::all().len() {
            k = k.next();
        }
        assert_eq!(k, start);
        assert_eq!(ColorMapKind::Jet.next(), ColorMapKind::BlackBodyRadiation);
    }
}
