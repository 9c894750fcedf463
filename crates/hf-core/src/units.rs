// hf-core/src/units.rs

use core::fmt;
use core::str::FromStr;

use uom::si::f64::Length as UomLength;

use crate::{HfError, HfResult};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Unit in which inter-hydrant distances are reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistanceUnit {
    #[default]
    Feet,
    Meters,
}

impl DistanceUnit {
    /// Express a length as a plain number in this unit.
    pub fn value_of(self, length: Length) -> f64 {
        use uom::si::length::{foot, meter};
        match self {
            Self::Feet => length.get::<foot>(),
            Self::Meters => length.get::<meter>(),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Feet => "ft",
            Self::Meters => "m",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feet => write!(f, "feet"),
            Self::Meters => write!(f, "meters"),
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = HfError;

    fn from_str(s: &str) -> HfResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            other => Err(HfError::InvalidArg {
                what: format!("unknown distance unit '{other}' (expected feet or meters)"),
            }),
        }
    }
}

pub mod constants {
    use super::*;

    /// Mean Earth radius used for great-circle distances.
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

    #[inline]
    pub fn earth_radius() -> Length {
        m(EARTH_RADIUS_M)
    }
}
