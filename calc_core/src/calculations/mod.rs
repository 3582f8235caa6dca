//! # Clinical Calculations
//!
//! This module contains the four calculators. Each one follows the pattern:
//!
//! - `*Input` - Raw form fields (free text) plus unit selections
//! - `*Result` - Immutable record of the computed quantities
//! - `calculate(input) -> Option<*Result>` - Pure calculation; `None` on invalid input
//! - `evaluate(input) -> CalcResult<*Result>` - Same calculation, reporting why input was rejected
//!
//! ## Available Calculations
//!
//! - [`drip_rate`] - Infusion rate (mL/hr) and gravity drip rate (gtt/min)
//! - [`dosing`] - Weight-based total dose (mg)
//! - [`bsa`] - Body surface area (Mosteller)
//! - [`body_weight`] - Ideal (Devine) and adjusted body weight
//!
//! The generic [`calculate`] in this module dispatches a field map to one of
//! them by [`CalculatorKind`].

pub mod body_weight;
pub mod bsa;
pub mod dosing;
pub mod drip_rate;

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{LengthUnit, MassUnit, TimeUnit};

// Re-export commonly used types
pub use body_weight::{BodyWeightInput, BodyWeightResult, Sex};
pub use bsa::{BsaInput, BsaResult};
pub use dosing::{DosingInput, DosingResult};
pub use drip_rate::{DripRateInput, DripRateResult};

/// The four calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalculatorKind {
    #[default]
    DripRate,
    Dosing,
    Bsa,
    BodyWeight,
}

impl CalculatorKind {
    /// Every calculator, in navigation order
    pub const ALL: &'static [CalculatorKind] = &[
        CalculatorKind::DripRate,
        CalculatorKind::Dosing,
        CalculatorKind::Bsa,
        CalculatorKind::BodyWeight,
    ];

    /// Title shown above the calculator
    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorKind::DripRate => "Drip Rate",
            CalculatorKind::Dosing => "Dosing",
            CalculatorKind::Bsa => "Body Surface Area",
            CalculatorKind::BodyWeight => "Ideal & Adjusted Body Weight",
        }
    }

    /// Short machine name (e.g., "drip-rate")
    pub fn slug(&self) -> &'static str {
        match self {
            CalculatorKind::DripRate => "drip-rate",
            CalculatorKind::Dosing => "dosing",
            CalculatorKind::Bsa => "bsa",
            CalculatorKind::BodyWeight => "body-weight",
        }
    }

    /// Names of the free-text fields this calculator reads
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            CalculatorKind::DripRate => &[drip_rate::FIELD_VOLUME, drip_rate::FIELD_TIME, drip_rate::FIELD_DROP_FACTOR],
            CalculatorKind::Dosing => &[dosing::FIELD_WEIGHT, dosing::FIELD_DOSE_PER_WEIGHT],
            CalculatorKind::Bsa => &[bsa::FIELD_HEIGHT, bsa::FIELD_WEIGHT],
            CalculatorKind::BodyWeight => &[body_weight::FIELD_HEIGHT, body_weight::FIELD_WEIGHT],
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        CalculatorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == tag || kind.display_name().to_ascii_lowercase() == tag)
            .ok_or_else(|| CalcError::invalid_input("calculator", s, "Unknown calculator"))
    }
}

/// Unit selections shared by every calculator form.
///
/// Each calculator reads only the dimensions it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitSelections {
    pub mass: MassUnit,
    pub length: LengthUnit,
    pub time: TimeUnit,
}

/// Result of any calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationResult {
    DripRate(DripRateResult),
    Dosing(DosingResult),
    Bsa(BsaResult),
    BodyWeight(BodyWeightResult),
}

impl CalculationResult {
    /// Which calculator produced this result
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationResult::DripRate(_) => CalculatorKind::DripRate,
            CalculationResult::Dosing(_) => CalculatorKind::Dosing,
            CalculationResult::Bsa(_) => CalculatorKind::Bsa,
            CalculationResult::BodyWeight(_) => CalculatorKind::BodyWeight,
        }
    }
}

/// Raw text of a field. Missing fields read as empty and fail validation.
fn field<'a>(fields: &'a BTreeMap<String, String>, name: &str) -> &'a str {
    fields.get(name).map(String::as_str).unwrap_or("")
}

/// Run the calculator for `kind`, reporting why input was rejected.
pub fn evaluate(
    kind: CalculatorKind,
    fields: &BTreeMap<String, String>,
    units: &UnitSelections,
    sex: Sex,
) -> CalcResult<CalculationResult> {
    match kind {
        CalculatorKind::DripRate => {
            let input = DripRateInput::new(
                field(fields, drip_rate::FIELD_VOLUME),
                field(fields, drip_rate::FIELD_TIME),
                units.time,
                field(fields, drip_rate::FIELD_DROP_FACTOR),
            );
            drip_rate::evaluate(&input).map(CalculationResult::DripRate)
        }
        CalculatorKind::Dosing => {
            let input = DosingInput::new(
                field(fields, dosing::FIELD_WEIGHT),
                units.mass,
                field(fields, dosing::FIELD_DOSE_PER_WEIGHT),
            );
            dosing::evaluate(&input).map(CalculationResult::Dosing)
        }
        CalculatorKind::Bsa => {
            let input = BsaInput::new(
                field(fields, bsa::FIELD_HEIGHT),
                units.length,
                field(fields, bsa::FIELD_WEIGHT),
                units.mass,
            );
            bsa::evaluate(&input).map(CalculationResult::Bsa)
        }
        CalculatorKind::BodyWeight => {
            let input = BodyWeightInput::new(
                field(fields, body_weight::FIELD_HEIGHT),
                units.length,
                field(fields, body_weight::FIELD_WEIGHT),
                units.mass,
                sex,
            );
            body_weight::evaluate(&input).map(CalculationResult::BodyWeight)
        }
    }
}

/// Run the calculator for `kind`. Returns `None` when any field is invalid.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use calc_core::calculations::{calculate, CalculatorKind, CalculationResult, Sex, UnitSelections};
///
/// let mut fields = BTreeMap::new();
/// fields.insert("weight".to_string(), "70".to_string());
/// fields.insert("dose_per_weight".to_string(), "5".to_string());
///
/// let result = calculate(CalculatorKind::Dosing, &fields, &UnitSelections::default(), Sex::Male);
/// match result {
///     Some(CalculationResult::Dosing(r)) => assert!((r.total_dose_mg - 350.0).abs() < 1e-9),
///     _ => panic!("expected a dosing result"),
/// }
/// ```
pub fn calculate(
    kind: CalculatorKind,
    fields: &BTreeMap<String, String>,
    units: &UnitSelections,
    sex: Sex,
) -> Option<CalculationResult> {
    evaluate(kind, fields, units, sex).ok()
}

/// Log the outcome of an engine evaluation and pass it through unchanged.
///
/// Every engine's `evaluate` goes through here, so both `evaluate` and
/// `calculate` callers get one event per calculation.
pub(crate) fn logged<T: Debug>(kind: CalculatorKind, outcome: CalcResult<T>) -> CalcResult<T> {
    match &outcome {
        Ok(result) => {
            tracing::debug!(calculator = kind.slug(), ?result, "calculation complete");
        }
        Err(err) => {
            tracing::debug!(calculator = kind.slug(), field = err.field(), error = %err, "input rejected");
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_dispatch_drip_rate() {
        let f = fields(&[("volume", "1000"), ("time", "8"), ("drop_factor", "15")]);
        let result = calculate(CalculatorKind::DripRate, &f, &UnitSelections::default(), Sex::Male).unwrap();
        assert_eq!(result.kind(), CalculatorKind::DripRate);
        match result {
            CalculationResult::DripRate(r) => {
                assert!((r.infusion_rate_ml_hr - 125.0).abs() < 1e-9);
                assert!((r.drip_rate_gtt_min - 31.25).abs() < 1e-9);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_uses_selected_units() {
        let f = fields(&[("height", "68.9"), ("weight", "154.324")]);
        let units = UnitSelections {
            mass: MassUnit::Lbs,
            length: LengthUnit::In,
            time: TimeUnit::Hr,
        };
        let Some(CalculationResult::Bsa(r)) = calculate(CalculatorKind::Bsa, &f, &units, Sex::Male) else {
            panic!("expected a BSA result");
        };
        // 68.9 in ≈ 175 cm, 154.324 lbs ≈ 70 kg
        assert!((r.bsa_m2 - 1.845).abs() < 0.01);
    }

    #[test]
    fn test_dispatch_missing_field_is_absent() {
        let f = fields(&[("weight", "70")]);
        assert!(calculate(CalculatorKind::Dosing, &f, &UnitSelections::default(), Sex::Male).is_none());

        let err = evaluate(CalculatorKind::Dosing, &f, &UnitSelections::default(), Sex::Male).unwrap_err();
        assert_eq!(err.field(), "dose_per_weight");
    }

    #[test]
    fn test_dispatch_sex_reaches_body_weight() {
        let f = fields(&[("height", "150"), ("weight", "60")]);
        let units = UnitSelections::default();
        let male = calculate(CalculatorKind::BodyWeight, &f, &units, Sex::Male);
        let female = calculate(CalculatorKind::BodyWeight, &f, &units, Sex::Female);
        match (male, female) {
            (Some(CalculationResult::BodyWeight(m)), Some(CalculationResult::BodyWeight(w))) => {
                assert_eq!(m.ibw_kg, 50.0);
                assert_eq!(w.ibw_kg, 45.5);
            }
            other => panic!("unexpected results {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_overflow_is_absent() {
        let f = fields(&[("weight", "1e308"), ("dose_per_weight", "1e10")]);
        assert!(calculate(CalculatorKind::Dosing, &f, &UnitSelections::default(), Sex::Male).is_none());
    }

    /// Shared buffer the test subscriber writes formatted events into.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_evaluate_logs_rejection() {
        let logs = capture_logs(|| {
            let input = DosingInput::new("70", MassUnit::Kg, "");
            assert!(dosing::evaluate(&input).is_err());
        });
        assert!(logs.contains("input rejected"), "logs: {}", logs);
        assert!(logs.contains("dose_per_weight"), "logs: {}", logs);
        assert!(logs.contains("dosing"), "logs: {}", logs);
    }

    #[test]
    fn test_evaluate_logs_result() {
        let logs = capture_logs(|| {
            let f = fields(&[("height", "175"), ("weight", "70")]);
            assert!(evaluate(CalculatorKind::Bsa, &f, &UnitSelections::default(), Sex::Male).is_ok());
        });
        assert!(logs.contains("calculation complete"), "logs: {}", logs);
        assert!(logs.contains("bsa_m2"), "logs: {}", logs);
        assert_eq!(logs.matches("calculation complete").count(), 1);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("drip-rate".parse::<CalculatorKind>().unwrap(), CalculatorKind::DripRate);
        assert_eq!("Body Surface Area".parse::<CalculatorKind>().unwrap(), CalculatorKind::Bsa);
        assert_eq!(" BODY-WEIGHT ".parse::<CalculatorKind>().unwrap(), CalculatorKind::BodyWeight);
        assert!("ventilator".parse::<CalculatorKind>().is_err());
    }

    #[test]
    fn test_kind_fields() {
        assert_eq!(CalculatorKind::DripRate.fields(), &["volume", "time", "drop_factor"]);
        assert_eq!(CalculatorKind::Dosing.fields(), &["weight", "dose_per_weight"]);
        assert_eq!(CalculatorKind::Bsa.fields(), &["height", "weight"]);
        assert_eq!(CalculatorKind::BodyWeight.fields(), &["height", "weight"]);
    }

    #[test]
    fn test_result_serialization() {
        let result = CalculationResult::Dosing(DosingResult { total_dose_mg: 350.0 });
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"type":"Dosing","total_dose_mg":350.0}"#);
        let roundtrip: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_unit_selection_defaults() {
        let units = UnitSelections::default();
        assert_eq!(units.mass, MassUnit::Kg);
        assert_eq!(units.length, LengthUnit::Cm);
        assert_eq!(units.time, TimeUnit::Hr);
    }
}
