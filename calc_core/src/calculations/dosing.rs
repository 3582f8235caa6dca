//! # Weight-Based Dosing Calculation
//!
//! Total dose (mg) from patient weight and a per-kilogram dose (mg/kg).
//! Weight may be entered in kg or lbs; it is converted to kg once before the
//! multiplication.
//!
//! The result is not clamped or range-checked.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::dosing::{calculate, DosingInput};
//! use calc_core::units::MassUnit;
//!
//! let result = calculate(&DosingInput::new("70", MassUnit::Kg, "5")).unwrap();
//! assert_eq!(result.total_dose_mg, 350.0);
//! ```

use serde::{Deserialize, Serialize};

use super::{logged, CalculatorKind};
use crate::equations::clinical;
use crate::errors::CalcResult;
use crate::units::MassUnit;
use crate::validation::{ensure_finite, parse_measurement, parse_positive};

pub const FIELD_WEIGHT: &str = "weight";
pub const FIELD_DOSE_PER_WEIGHT: &str = "dose_per_weight";

/// Input fields for the dosing calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "weight": "154",
///   "weight_unit": "lbs",
///   "dose_per_weight": "5"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DosingInput {
    /// Patient weight, as typed
    pub weight: String,

    /// Unit of `weight`
    #[serde(default)]
    pub weight_unit: MassUnit,

    /// Dose per kilogram (mg/kg), as typed
    pub dose_per_weight: String,
}

impl DosingInput {
    pub fn new(weight: impl Into<String>, weight_unit: MassUnit, dose_per_weight: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            weight_unit,
            dose_per_weight: dose_per_weight.into(),
        }
    }
}

/// Results from the dosing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosingResult {
    /// Total dose (mg)
    pub total_dose_mg: f64,
}

fn compute(input: &DosingInput) -> CalcResult<DosingResult> {
    let weight = parse_measurement(FIELD_WEIGHT, &input.weight, input.weight_unit)?;
    let dose_mg_per_kg = parse_positive(FIELD_DOSE_PER_WEIGHT, &input.dose_per_weight)?;

    let total_dose_mg = clinical::total_dose(weight.to_kilograms().value(), dose_mg_per_kg);

    Ok(DosingResult {
        total_dose_mg: ensure_finite("total_dose_mg", total_dose_mg)?,
    })
}

/// Calculate the total dose, reporting why input was rejected.
pub fn evaluate(input: &DosingInput) -> CalcResult<DosingResult> {
    logged(CalculatorKind::Dosing, compute(input))
}

/// Calculate the total dose. `None` when either field is invalid.
pub fn calculate(input: &DosingInput) -> Option<DosingResult> {
    evaluate(input).ok()
}
