//! # Drip Rate Calculation
//!
//! Converts a prescribed volume and infusion time into an infusion pump rate
//! (mL/hr) and a gravity drip rate (gtt/min) for a given administration set.
//!
//! ## Assumptions
//!
//! - Volume is entered in mL (no unit selection)
//! - Drop factor is the set's calibration in gtt/mL (e.g., 10, 15, 20, 60)
//! - Time may be entered in hours or minutes; the other unit is derived from
//!   the parsed value, never re-parsed
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::drip_rate::{calculate, DripRateInput};
//! use calc_core::units::TimeUnit;
//!
//! let input = DripRateInput::new("1000", "8", TimeUnit::Hr, "15");
//! let result = calculate(&input).unwrap();
//!
//! assert_eq!(result.infusion_rate_ml_hr, 125.0);
//! assert_eq!(result.drip_rate_gtt_min, 31.25);
//! ```

use serde::{Deserialize, Serialize};

use super::{logged, CalculatorKind};
use crate::equations::clinical;
use crate::errors::CalcResult;
use crate::units::TimeUnit;
use crate::validation::{ensure_finite, parse_measurement, parse_positive};

pub const FIELD_VOLUME: &str = "volume";
pub const FIELD_TIME: &str = "time";
pub const FIELD_DROP_FACTOR: &str = "drop_factor";

/// Input fields for the drip rate calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume": "1000",
///   "time": "8",
///   "time_unit": "hr",
///   "drop_factor": "15"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DripRateInput {
    /// Total volume to infuse (mL), as typed
    pub volume: String,

    /// Infusion time, as typed
    pub time: String,

    /// Unit of `time`
    #[serde(default)]
    pub time_unit: TimeUnit,

    /// Administration set drop factor (gtt/mL), as typed
    pub drop_factor: String,
}

impl DripRateInput {
    pub fn new(
        volume: impl Into<String>,
        time: impl Into<String>,
        time_unit: TimeUnit,
        drop_factor: impl Into<String>,
    ) -> Self {
        Self {
            volume: volume.into(),
            time: time.into(),
            time_unit,
            drop_factor: drop_factor.into(),
        }
    }
}

/// Results from the drip rate calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DripRateResult {
    /// Pump rate (mL/hr)
    pub infusion_rate_ml_hr: f64,

    /// Gravity drip rate (gtt/min)
    pub drip_rate_gtt_min: f64,
}

fn compute(input: &DripRateInput) -> CalcResult<DripRateResult> {
    let volume_ml = parse_positive(FIELD_VOLUME, &input.volume)?;
    let time = parse_measurement(FIELD_TIME, &input.time, input.time_unit)?;
    let drop_factor = parse_positive(FIELD_DROP_FACTOR, &input.drop_factor)?;

    let time_hr = time.to_hours();
    let time_min = time.to_minutes();

    Ok(DripRateResult {
        infusion_rate_ml_hr: ensure_finite(
            "infusion_rate_ml_hr",
            clinical::infusion_rate(volume_ml, time_hr.value()),
        )?,
        drip_rate_gtt_min: ensure_finite(
            "drip_rate_gtt_min",
            clinical::drip_rate(volume_ml, drop_factor, time_min.value()),
        )?,
    })
}

/// Calculate infusion and drip rates, reporting why input was rejected.
pub fn evaluate(input: &DripRateInput) -> CalcResult<DripRateResult> {
    logged(CalculatorKind::DripRate, compute(input))
}

/// Calculate infusion and drip rates.
///
/// # Returns
///
/// * `Some(DripRateResult)` - When volume, time and drop factor are all positive numbers
/// * `None` - Otherwise
pub fn calculate(input: &DripRateInput) -> Option<DripRateResult> {
    evaluate(input).ok()
}
