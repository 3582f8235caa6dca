//! # Body Surface Area Calculation
//!
//! Estimates body surface area (m²) with the Mosteller formula. Height is
//! canonicalized to centimeters and weight to kilograms before the formula
//! runs.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::bsa::{calculate, BsaInput};
//! use calc_core::units::{LengthUnit, MassUnit};
//!
//! let input = BsaInput::new("180", LengthUnit::Cm, "80", MassUnit::Kg);
//! let result = calculate(&input).unwrap();
//! assert!((result.bsa_m2 - 2.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::{logged, CalculatorKind};
use crate::equations::clinical;
use crate::errors::CalcResult;
use crate::units::{LengthUnit, MassUnit};
use crate::validation::{ensure_finite, parse_measurement};

pub const FIELD_HEIGHT: &str = "height";
pub const FIELD_WEIGHT: &str = "weight";

/// Input fields for the BSA calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "height": "175",
///   "height_unit": "cm",
///   "weight": "70",
///   "weight_unit": "kg"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BsaInput {
    pub height: String,
    #[serde(default)]
    pub height_unit: LengthUnit,
    pub weight: String,
    #[serde(default)]
    pub weight_unit: MassUnit,
}

impl BsaInput {
    pub fn new(
        height: impl Into<String>,
        height_unit: LengthUnit,
        weight: impl Into<String>,
        weight_unit: MassUnit,
    ) -> Self {
        Self {
            height: height.into(),
            height_unit,
            weight: weight.into(),
            weight_unit,
        }
    }
}

/// Results from the BSA calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BsaResult {
    /// Body surface area (m²)
    pub bsa_m2: f64,
}

fn compute(input: &BsaInput) -> CalcResult<BsaResult> {
    let height = parse_measurement(FIELD_HEIGHT, &input.height, input.height_unit)?;
    let weight = parse_measurement(FIELD_WEIGHT, &input.weight, input.weight_unit)?;

    let bsa_m2 = clinical::mosteller_bsa(height.to_centimeters().value(), weight.to_kilograms().value());

    Ok(BsaResult {
        bsa_m2: ensure_finite("bsa_m2", bsa_m2)?,
    })
}

/// Calculate BSA, reporting why input was rejected.
pub fn evaluate(input: &BsaInput) -> CalcResult<BsaResult> {
    logged(CalculatorKind::Bsa, compute(input))
}

/// Calculate BSA. `None` when height or weight is invalid.
pub fn calculate(input: &BsaInput) -> Option<BsaResult> {
    evaluate(input).ok()
}
