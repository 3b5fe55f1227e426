//! Lab type: the CIELAB triple carried by every ramp entry.

use std::fmt;

/// CIELAB color: L* nominally 0–100, a* and b* unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Same chromaticity, lightness replaced.
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }

    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }

    /// Two-decimal projections of L*, a*, b* for display.
    pub fn to_display(&self) -> [String; 3] {
        [
            format!("{:.2}", self.l),
            format!("{:.2}", self.a),
            format!("{:.2}", self.b),
        ]
    }
}

impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lab({:.2}, {:.2}, {:.2})", self.l, self.a, self.b)
    }
}
