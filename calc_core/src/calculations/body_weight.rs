//! # Ideal & Adjusted Body Weight Calculation
//!
//! Ideal body weight by the Devine formula and the adjusted body weight
//! commonly used for dosing obese patients.
//!
//! ## Assumptions
//!
//! - Height is canonicalized to inches, weight to kilograms
//! - Heights at or below 60 in (152.4 cm) contribute no excess inches, so
//!   IBW equals the sex-specific base (50 kg male, 45.5 kg female)
//! - Adjusted body weight moves 40% of the way from IBW toward actual weight
//!   in either direction; it is not clamped to IBW
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::body_weight::{calculate, BodyWeightInput, Sex};
//! use calc_core::units::{LengthUnit, MassUnit};
//!
//! let input = BodyWeightInput::new("72", LengthUnit::In, "100", MassUnit::Kg, Sex::Male);
//! let result = calculate(&input).unwrap();
//!
//! // IBW = 50 + 2.3 × 12 = 77.6 kg
//! assert!((result.ibw_kg - 77.6).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{logged, CalculatorKind};
use crate::equations::clinical;
use crate::errors::{CalcError, CalcResult};
use crate::units::{LengthUnit, MassUnit};
use crate::validation::{ensure_finite, parse_measurement};

pub const FIELD_HEIGHT: &str = "height";
pub const FIELD_WEIGHT: &str = "weight";

/// Patient sex, used only to pick the Devine base weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Devine base weight (kg)
    pub fn devine_base_kg(&self) -> f64 {
        match self {
            Sex::Male => clinical::DEVINE_BASE_MALE_KG,
            Sex::Female => clinical::DEVINE_BASE_FEMALE_KG,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("Male"),
            Sex::Female => f.write_str("Female"),
        }
    }
}

impl FromStr for Sex {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(CalcError::invalid_input("sex", s, "Expected male or female")),
        }
    }
}

/// Input fields for the body weight calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "height": "175",
///   "height_unit": "cm",
///   "weight": "70",
///   "weight_unit": "kg",
///   "sex": "Male"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightInput {
    pub height: String,
    #[serde(default)]
    pub height_unit: LengthUnit,

    /// Actual body weight, as typed
    pub weight: String,
    #[serde(default)]
    pub weight_unit: MassUnit,

    #[serde(default)]
    pub sex: Sex,
}

impl BodyWeightInput {
    pub fn new(
        height: impl Into<String>,
        height_unit: LengthUnit,
        weight: impl Into<String>,
        weight_unit: MassUnit,
        sex: Sex,
    ) -> Self {
        Self {
            height: height.into(),
            height_unit,
            weight: weight.into(),
            weight_unit,
            sex,
        }
    }
}

/// Results from the body weight calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightResult {
    /// Ideal body weight, Devine (kg)
    pub ibw_kg: f64,

    /// Adjusted body weight (kg)
    pub adjusted_bw_kg: f64,
}

fn compute(input: &BodyWeightInput) -> CalcResult<BodyWeightResult> {
    let height = parse_measurement(FIELD_HEIGHT, &input.height, input.height_unit)?;
    let weight = parse_measurement(FIELD_WEIGHT, &input.weight, input.weight_unit)?;

    let ibw_kg = ensure_finite(
        "ibw_kg",
        clinical::devine_ibw(input.sex.devine_base_kg(), height.to_inches().value()),
    )?;
    let adjusted_bw_kg = ensure_finite(
        "adjusted_bw_kg",
        clinical::adjusted_body_weight(ibw_kg, weight.to_kilograms().value()),
    )?;

    Ok(BodyWeightResult { ibw_kg, adjusted_bw_kg })
}

/// Calculate IBW and adjusted body weight, reporting why input was rejected.
pub fn evaluate(input: &BodyWeightInput) -> CalcResult<BodyWeightResult> {
    logged(CalculatorKind::BodyWeight, compute(input))
}

/// Calculate IBW and adjusted body weight. `None` when height or weight is invalid.
pub fn calculate(input: &BodyWeightInput) -> Option<BodyWeightResult> {
    evaluate(input).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_175cm_70kg() {
        // 175 cm = 68.898 in → 8.898 in over 5 ft
        // IBW = 50 + 2.3 × 8.898 = 70.465, AdjBW = 70.465 + 0.4 × (70 − 70.465) = 70.279
        let input = BodyWeightInput::new("175", LengthUnit::Cm, "70", MassUnit::Kg, Sex::Male);
        let result = calculate(&input).unwrap();
        assert!((result.ibw_kg - 70.465).abs() < 1e-3, "ibw = {}", result.ibw_kg);
        assert!((result.adjusted_bw_kg - 70.279).abs() < 1e-3, "adj = {}", result.adjusted_bw_kg);
    }

    #[test]
    fn test_female_offset() {
        let male = calculate(&BodyWeightInput::new("70", LengthUnit::In, "80", MassUnit::Kg, Sex::Male)).unwrap();
        let female = calculate(&BodyWeightInput::new("70", LengthUnit::In, "80", MassUnit::Kg, Sex::Female)).unwrap();
        assert!((male.ibw_kg - female.ibw_kg - 4.5).abs() < 1e-9);
        assert!((female.ibw_kg - 68.5).abs() < 1e-9);
    }

    #[test]
    fn test_short_stature_floor() {
        for height_cm in ["152.4", "150", "120", "30"] {
            let male = calculate(&BodyWeightInput::new(height_cm, LengthUnit::Cm, "60", MassUnit::Kg, Sex::Male)).unwrap();
            let female =
                calculate(&BodyWeightInput::new(height_cm, LengthUnit::Cm, "60", MassUnit::Kg, Sex::Female)).unwrap();
            assert_eq!(male.ibw_kg, 50.0, "height {} cm", height_cm);
            assert_eq!(female.ibw_kg, 45.5, "height {} cm", height_cm);
        }
        let inches = calculate(&BodyWeightInput::new("60", LengthUnit::In, "60", MassUnit::Kg, Sex::Male)).unwrap();
        assert_eq!(inches.ibw_kg, 50.0);
    }

    #[test]
    fn test_adjusted_below_ideal_when_underweight() {
        let result = calculate(&BodyWeightInput::new("72", LengthUnit::In, "50", MassUnit::Kg, Sex::Male)).unwrap();
        assert!(result.adjusted_bw_kg < result.ibw_kg);
        // 77.6 + 0.4 × (50 − 77.6) = 66.56
        assert!((result.adjusted_bw_kg - 66.56).abs() < 1e-9);
    }

    #[test]
    fn test_weight_in_lbs() {
        // 220.462 lbs = 100 kg; IBW 77.6 → AdjBW = 77.6 + 0.4 × 22.4 = 86.56
        let result =
            calculate(&BodyWeightInput::new("72", LengthUnit::In, "220.462", MassUnit::Lbs, Sex::Male)).unwrap();
        assert!((result.adjusted_bw_kg - 86.56).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_fields_are_absent() {
        assert!(calculate(&BodyWeightInput::new("", LengthUnit::Cm, "70", MassUnit::Kg, Sex::Male)).is_none());
        assert!(calculate(&BodyWeightInput::new("175", LengthUnit::Cm, "0", MassUnit::Kg, Sex::Female)).is_none());
        assert!(calculate(&BodyWeightInput::new("-175", LengthUnit::In, "70", MassUnit::Lbs, Sex::Male)).is_none());
    }

    #[test]
    fn test_overflowing_height_is_absent() {
        // 2.3 kg/in × 1e308 in overflows
        let input = BodyWeightInput::new("1e308", LengthUnit::In, "70", MassUnit::Kg, Sex::Male);
        assert!(calculate(&input).is_none());
        assert_eq!(evaluate(&input).unwrap_err().field(), "ibw_kg");
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" FEMALE ".parse::<Sex>().unwrap(), Sex::Female);
        assert!("other".parse::<Sex>().is_err());
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"Female\"");
    }
}
