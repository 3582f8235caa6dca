//! # Calculator Form State
//!
//! The state a front end holds for one calculator: the raw text of each
//! field, the unit selections, the sex toggle and the result slot.
//!
//! The engines themselves are stateless. This struct only snapshots the
//! current fields into a calculation and stores what comes back:
//!
//! - [`CalculatorForm::calculate`] overwrites the result slot, with `None`
//!   when the input is invalid
//! - [`CalculatorForm::clear`] empties every field, restores the default
//!   units (kg, cm, hr) and sex (Male), and discards the result
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::CalculatorKind;
//! use calc_core::form::CalculatorForm;
//!
//! let mut form = CalculatorForm::new(CalculatorKind::Dosing);
//! form.set_field("weight", "70");
//! form.set_field("dose_per_weight", "5");
//! assert!(form.calculate().is_some());
//!
//! form.clear();
//! assert!(form.result().is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::{self, CalculationResult, CalculatorKind, Sex, UnitSelections};
use crate::errors::CalcResult;
use crate::units::{LengthUnit, MassUnit, TimeUnit};

/// Caller-held state for one calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorForm {
    kind: CalculatorKind,
    fields: BTreeMap<String, String>,
    units: UnitSelections,
    sex: Sex,
    result: Option<CalculationResult>,
}

impl CalculatorForm {
    /// Create a form in its cleared state.
    pub fn new(kind: CalculatorKind) -> Self {
        Self {
            kind,
            fields: empty_fields(kind),
            units: UnitSelections::default(),
            sex: Sex::default(),
            result: None,
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        self.kind
    }

    /// Raw text of a field, empty if never set
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// Set the raw text of a field. Does not recalculate.
    pub fn set_field(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.fields.insert(name.into(), raw.into());
    }

    pub fn units(&self) -> UnitSelections {
        self.units
    }

    pub fn set_mass_unit(&mut self, unit: MassUnit) {
        self.units.mass = unit;
    }

    pub fn set_length_unit(&mut self, unit: LengthUnit) {
        self.units.length = unit;
    }

    pub fn set_time_unit(&mut self, unit: TimeUnit) {
        self.units.time = unit;
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }

    /// The last calculated result, if any
    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    /// Calculate from the current fields and replace the result slot.
    pub fn calculate(&mut self) -> Option<&CalculationResult> {
        self.result = calculations::calculate(self.kind, &self.fields, &self.units, self.sex);
        self.result.as_ref()
    }

    /// Like [`calculate`](Self::calculate), but also return why input was rejected.
    pub fn evaluate(&mut self) -> CalcResult<CalculationResult> {
        let outcome = calculations::evaluate(self.kind, &self.fields, &self.units, self.sex);
        self.result = outcome.as_ref().ok().copied();
        outcome
    }

    /// Reset to the initial state and return the default unit selections.
    pub fn clear(&mut self) -> UnitSelections {
        self.fields = empty_fields(self.kind);
        self.units = UnitSelections::default();
        self.sex = Sex::default();
        self.result = None;
        tracing::trace!(calculator = self.kind.slug(), "form cleared");
        self.units
    }
}

fn empty_fields(kind: CalculatorKind) -> BTreeMap<String, String> {
    kind.fields().iter().map(|name| (name.to_string(), String::new())).collect()
}
