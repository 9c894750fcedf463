//! Field readings taken at a single flowing outlet.

use std::fmt;

use hf_core::Real;

/// Outlet coefficient of discharge.
///
/// The presets follow the three outlet shapes recognised by NFPA 291; any
/// other measured or manufacturer value is carried as `Custom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coefficient {
    /// Smooth, well-rounded outlet (0.90).
    Smooth,
    /// Square and sharp outlet (0.80).
    SquareSharp,
    /// Square outlet projecting into the barrel (0.70).
    SquareProjecting,
    Custom(Real),
}

impl Coefficient {
    pub const SMOOTH: Real = 0.90;
    pub const SQUARE_SHARP: Real = 0.80;
    pub const SQUARE_PROJECTING: Real = 0.70;

    /// Band outside which a custom coefficient is unusual enough to flag.
    pub const TYPICAL_RANGE: (Real, Real) = (0.70, 0.90);

    pub fn value(self) -> Real {
        match self {
            Self::Smooth => Self::SMOOTH,
            Self::SquareSharp => Self::SQUARE_SHARP,
            Self::SquareProjecting => Self::SQUARE_PROJECTING,
            Self::Custom(c) => c,
        }
    }

    /// Customary coefficient for an outlet size when none was recorded.
    pub fn default_for_diameter(diameter_in: Real) -> Self {
        const TOL: Real = 1e-6;
        if (diameter_in - 2.5).abs() < TOL {
            Self::Smooth
        } else if (diameter_in - 6.0).abs() < TOL {
            Self::SquareSharp
        } else {
            // 4.5 in and 5.0 in steamer ports, and anything unlisted
            Self::Custom(0.85)
        }
    }

    /// Parse a preset name (`smooth`, `square_sharp`, `square_projecting`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "smooth" | "rounded" => Some(Self::Smooth),
            "square_sharp" | "sharp" => Some(Self::SquareSharp),
            "square_projecting" | "projecting" => Some(Self::SquareProjecting),
            _ => None,
        }
    }

    pub fn is_typical(self) -> bool {
        let c = self.value();
        c >= Self::TYPICAL_RANGE.0 && c <= Self::TYPICAL_RANGE.1
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smooth => write!(f, "smooth (0.90)"),
            Self::SquareSharp => write!(f, "square sharp (0.80)"),
            Self::SquareProjecting => write!(f, "square projecting (0.70)"),
            Self::Custom(c) => write!(f, "{c:.2}"),
        }
    }
}

/// A single pitot reading at one open outlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Outlet inside diameter (in)
    pub diameter_in: Real,
    pub coefficient: Coefficient,
    /// Pitot gauge pressure (psi); zero for a closed outlet
    pub pitot_psi: Real,
}

impl Measurement {
    pub fn new(diameter_in: Real, coefficient: Coefficient, pitot_psi: Real) -> Self {
        Self {
            diameter_in,
            coefficient,
            pitot_psi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_values() {
        assert_eq!(Coefficient::Smooth.value(), 0.90);
        assert_eq!(Coefficient::SquareSharp.value(), 0.80);
        assert_eq!(Coefficient::SquareProjecting.value(), 0.70);
        assert_eq!(Coefficient::Custom(0.83).value(), 0.83);
    }

    #[test]
    fn default_by_outlet_size() {
        assert_eq!(Coefficient::default_for_diameter(2.5), Coefficient::Smooth);
        assert_eq!(Coefficient::default_for_diameter(4.5).value(), 0.85);
        assert_eq!(Coefficient::default_for_diameter(5.0).value(), 0.85);
        assert_eq!(Coefficient::default_for_diameter(6.0), Coefficient::SquareSharp);
        assert_eq!(Coefficient::default_for_diameter(3.0).value(), 0.85);
    }

    #[test]
    fn preset_names() {
        assert_eq!(Coefficient::from_name("Smooth"), Some(Coefficient::Smooth));
        assert_eq!(Coefficient::from_name("square-sharp"), Some(Coefficient::SquareSharp));
        assert_eq!(
            Coefficient::from_name("square projecting"),
            Some(Coefficient::SquareProjecting)
        );
        assert_eq!(Coefficient::from_name("bell mouth"), None);
    }

    #[test]
    fn typical_band() {
        assert!(Coefficient::Smooth.is_typical());
        assert!(Coefficient::SquareProjecting.is_typical());
        assert!(!Coefficient::Custom(0.95).is_typical());
        assert!(!Coefficient::Custom(0.6).is_typical());
    }
}
