//! # Unit Types
//!
//! Unit tags and type-safe value wrappers for the three dimensions the
//! calculators accept: mass, length and time.
//!
//! ## Design Philosophy
//!
//! Each dimension has a closed set of unit tags the user can select
//! ([`MassUnit`], [`LengthUnit`], [`TimeUnit`]) and a newtype per unit
//! ([`Kilograms`], [`Pounds`], ...) so conversions read as `From` impls.
//! Newtypes serialize as bare numbers; tags serialize as their symbols.
//!
//! Conversion never rounds. Rounding to 2 decimals happens only when a front
//! end displays a result.
//!
//! ## Conversion Factors
//!
//! - Mass: 1 kg = 2.20462 lbs
//! - Length: 1 in = 2.54 cm
//! - Time: 1 hr = 60 min
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Inches, Centimeters, MassUnit, to_canonical_mass};
//!
//! let height: Centimeters = Inches(10.0).into();
//! assert!((height.0 - 25.4).abs() < 1e-9);
//!
//! let weight = to_canonical_mass(70.0, MassUnit::Kg);
//! assert_eq!(weight.0, 70.0);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Pounds in one kilogram
pub const LBS_PER_KG: f64 = 2.20462;

/// Centimeters in one inch
pub const CM_PER_IN: f64 = 2.54;

/// Minutes in one hour
pub const MIN_PER_HR: f64 = 60.0;

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 / LBS_PER_KG)
    }
}

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LBS_PER_KG)
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_IN)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_IN)
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

impl From<Hours> for Minutes {
    fn from(hr: Hours) -> Self {
        Minutes(hr.0 * MIN_PER_HR)
    }
}

impl From<Minutes> for Hours {
    fn from(min: Minutes) -> Self {
        Hours(min.0 / MIN_PER_HR)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Kilograms);
impl_arithmetic!(Pounds);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Inches);
impl_arithmetic!(Hours);
impl_arithmetic!(Minutes);

// ============================================================================
// Unit Tags
// ============================================================================

/// Mass unit selectable on a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MassUnit {
    #[default]
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "lbs")]
    Lbs,
}

/// Length unit selectable on a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "in")]
    In,
}

/// Time unit selectable on a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    #[serde(rename = "hr")]
    Hr,
    #[serde(rename = "min")]
    Min,
}

/// Symbol, `Display` and `FromStr` for a unit tag enum
macro_rules! impl_unit_tag {
    ($type:ident, $dimension:literal, $($variant:ident => $symbol:literal),+ $(,)?) => {
        impl $type {
            /// Every selectable unit, in display order
            pub const ALL: &'static [$type] = &[$($type::$variant),+];

            /// Unit symbol as shown on the form (e.g., "kg")
            pub fn symbol(&self) -> &'static str {
                match self {
                    $($type::$variant => $symbol),+
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.symbol())
            }
        }

        impl FromStr for $type {
            type Err = CalcError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let tag = s.trim().to_ascii_lowercase();
                $(
                    if tag == $symbol {
                        return Ok($type::$variant);
                    }
                )+
                Err(CalcError::invalid_input(
                    $dimension,
                    s,
                    format!("Unknown unit, expected one of: {}", [$($symbol),+].join(", ")),
                ))
            }
        }
    };
}

impl_unit_tag!(MassUnit, "mass_unit", Kg => "kg", Lbs => "lbs");
impl_unit_tag!(LengthUnit, "length_unit", Cm => "cm", In => "in");
impl_unit_tag!(TimeUnit, "time_unit", Hr => "hr", Min => "min");

// ============================================================================
// Measurement
// ============================================================================

/// A parsed magnitude paired with the unit the user selected for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement<U> {
    pub value: f64,
    pub unit: U,
}

impl<U> Measurement<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }
}

impl Measurement<MassUnit> {
    /// Canonical mass for all formulas
    pub fn to_kilograms(&self) -> Kilograms {
        to_canonical_mass(self.value, self.unit)
    }
}

impl Measurement<LengthUnit> {
    pub fn to_centimeters(&self) -> Centimeters {
        Centimeters(convert_length(self.value, self.unit, LengthUnit::Cm))
    }

    pub fn to_inches(&self) -> Inches {
        Inches(convert_length(self.value, self.unit, LengthUnit::In))
    }
}

impl Measurement<TimeUnit> {
    pub fn to_hours(&self) -> Hours {
        Hours(convert_time(self.value, self.unit, TimeUnit::Hr))
    }

    pub fn to_minutes(&self) -> Minutes {
        Minutes(convert_time(self.value, self.unit, TimeUnit::Min))
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a mass to kilograms. `kg` is returned unchanged.
pub fn to_canonical_mass(value: f64, unit: MassUnit) -> Kilograms {
    match unit {
        MassUnit::Kg => Kilograms(value),
        MassUnit::Lbs => Pounds(value).into(),
    }
}

/// Convert a length between `cm` and `in`. Same-unit conversion is the identity.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    match (from, to) {
        (LengthUnit::In, LengthUnit::Cm) => Centimeters::from(Inches(value)).0,
        (LengthUnit::Cm, LengthUnit::In) => Inches::from(Centimeters(value)).0,
        _ => value,
    }
}

/// Convert a duration between `hr` and `min`. Same-unit conversion is the identity.
pub fn convert_time(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    match (from, to) {
        (TimeUnit::Hr, TimeUnit::Min) => Minutes::from(Hours(value)).0,
        (TimeUnit::Min, TimeUnit::Hr) => Hours::from(Minutes(value)).0,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_to_kilograms() {
        let kg: Kilograms = Pounds(220.462).into();
        assert!((kg.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_inches_to_centimeters() {
        let cm: Centimeters = Inches(60.0).into();
        assert!((cm.0 - 152.4).abs() < 1e-9);
        let back: Inches = cm.into();
        assert!((back.0 - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_hours_to_minutes() {
        let min: Minutes = Hours(8.0).into();
        assert_eq!(min.0, 480.0);
        let hr: Hours = Minutes(90.0).into();
        assert_eq!(hr.0, 1.5);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let value = 0.1 + 0.2;
        assert_eq!(to_canonical_mass(value, MassUnit::Kg).0, value);
        assert_eq!(convert_length(value, LengthUnit::Cm, LengthUnit::Cm), value);
        assert_eq!(convert_length(value, LengthUnit::In, LengthUnit::In), value);
        assert_eq!(convert_time(value, TimeUnit::Hr, TimeUnit::Hr), value);
        assert_eq!(convert_time(value, TimeUnit::Min, TimeUnit::Min), value);
    }

    #[test]
    fn test_measurement_canonicalization() {
        let height = Measurement::new(68.0, LengthUnit::In);
        assert!((height.to_centimeters().0 - 172.72).abs() < 1e-9);
        assert_eq!(height.to_inches().0, 68.0);

        let time = Measurement::new(30.0, TimeUnit::Min);
        assert_eq!(time.to_hours().0, 0.5);
        assert_eq!(time.to_minutes().0, 30.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilograms(10.0);
        let b = Kilograms(4.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a * 0.5).0, 5.0);
        assert_eq!((a / 4.0).0, 2.5);
    }

    #[test]
    fn test_unit_tag_parsing() {
        assert_eq!("kg".parse::<MassUnit>().unwrap(), MassUnit::Kg);
        assert_eq!(" LBS ".parse::<MassUnit>().unwrap(), MassUnit::Lbs);
        assert_eq!("In".parse::<LengthUnit>().unwrap(), LengthUnit::In);
        assert_eq!("min".parse::<TimeUnit>().unwrap(), TimeUnit::Min);

        let err = "stone".parse::<MassUnit>().unwrap_err();
        assert_eq!(err.field(), "mass_unit");
    }

    #[test]
    fn test_unit_tag_display_matches_serde() {
        for unit in MassUnit::ALL {
            let json = serde_json::to_string(unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit));
            assert_eq!(unit.to_string().parse::<MassUnit>().unwrap(), *unit);
        }
        for unit in LengthUnit::ALL {
            let json = serde_json::to_string(unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit));
        }
        for unit in TimeUnit::ALL {
            let json = serde_json::to_string(unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit));
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MassUnit::default(), MassUnit::Kg);
        assert_eq!(LengthUnit::default(), LengthUnit::Cm);
        assert_eq!(TimeUnit::default(), TimeUnit::Hr);
    }

    #[test]
    fn test_newtype_serialization() {
        let kg = Kilograms(70.5);
        let json = serde_json::to_string(&kg).unwrap();
        assert_eq!(json, "70.5");
        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(kg, roundtrip);
    }
}
