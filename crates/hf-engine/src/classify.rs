//! NFPA 291 hydrant classification by available fire flow.

use std::fmt;

use hf_core::Real;

pub const CLASS_AA_MIN_GPM: Real = 1500.0;
pub const CLASS_A_MIN_GPM: Real = 1000.0;
pub const CLASS_B_MIN_GPM: Real = 500.0;

/// Hydrant class, highest first. Boundary values belong to the higher class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NfpaClass {
    AA,
    A,
    B,
    C,
}

impl NfpaClass {
    pub const ALL: [NfpaClass; 4] = [NfpaClass::AA, NfpaClass::A, NfpaClass::B, NfpaClass::C];

    /// Lower bound of the class (inclusive), in GPM.
    pub fn min_flow_gpm(self) -> Real {
        match self {
            Self::AA => CLASS_AA_MIN_GPM,
            Self::A => CLASS_A_MIN_GPM,
            Self::B => CLASS_B_MIN_GPM,
            Self::C => 0.0,
        }
    }

    /// Bonnet/cap color used on maps and markers.
    pub fn color_name(self) -> &'static str {
        match self {
            Self::AA => "Blue",
            Self::A => "Green",
            Self::B => "Orange",
            Self::C => "Red",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            Self::AA => "#0066CC",
            Self::A => "#00AA00",
            Self::B => "#FF8800",
            Self::C => "#CC0000",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AA => "Class AA: 1,500 GPM or more (excellent fire protection)",
            Self::A => "Class A: 1,000-1,499 GPM (good fire protection)",
            Self::B => "Class B: 500-999 GPM (adequate fire protection)",
            Self::C => "Class C: less than 500 GPM (minimal fire protection)",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AA => "AA",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for NfpaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify(available_gpm: Real) -> NfpaClass {
    if available_gpm >= CLASS_AA_MIN_GPM {
        NfpaClass::AA
    } else if available_gpm >= CLASS_A_MIN_GPM {
        NfpaClass::A
    } else if available_gpm >= CLASS_B_MIN_GPM {
        NfpaClass::B
    } else {
        NfpaClass::C
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn higher_flow_never_lowers_class(q in 0.0_f64..5000.0, dq in 0.0_f64..5000.0) {
            // AA < A < B < C in declaration order
            prop_assert!(classify(q + dq) <= classify(q));
        }
    }
}
