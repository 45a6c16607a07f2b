use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of the percent unit.
pub const PERCENT_MAX: f64 = 100.0;

/// Unit the value is expressed in. Governs the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Percent,
    #[serde(alias = "px")]
    Pixel,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::Pixel => "px",
        }
    }

    /// `None` means unbounded.
    pub fn max(self) -> Option<f64> {
        match self {
            Unit::Percent => Some(PERCENT_MAX),
            Unit::Pixel => None,
        }
    }

    /// Clamp `value` into `[0, max]` for this unit.
    pub fn clamp(self, value: f64) -> f64 {
        let value = value.max(0.0);
        match self.max() {
            Some(max) => value.min(max),
            None => value,
        }
    }

    pub fn other(self) -> Unit {
        match self {
            Unit::Percent => Unit::Pixel,
            Unit::Pixel => Unit::Percent,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percent() {
        assert_eq!(Unit::Percent.clamp(150.0), 100.0);
        assert_eq!(Unit::Percent.clamp(-3.0), 0.0);
        assert_eq!(Unit::Percent.clamp(42.5), 42.5);
    }

    #[test]
    fn test_clamp_pixel_is_unbounded_above() {
        assert_eq!(Unit::Pixel.clamp(1500.0), 1500.0);
        assert_eq!(Unit::Pixel.clamp(-1.0), 0.0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Unit::Percent.to_string(), "%");
        assert_eq!(Unit::Pixel.label(), "px");
        assert_eq!(Unit::Pixel.other(), Unit::Percent);
    }
}
