//! # calc_core - Clinical Calculation Engine
//!
//! `calc_core` is the computational heart of Bedside Calc: four independent,
//! unit-converting formula evaluators driven by simple form input.
//!
//! - Drip rate: volume, time and drop factor → mL/hr and gtt/min
//! - Dosing: weight and mg/kg → total mg
//! - Body surface area (Mosteller)
//! - Ideal (Devine) and adjusted body weight
//!
//! Outputs are illustrative only and are not clinically certified.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from an input snapshot to a result
//! - **Raw input in**: Fields arrive as typed text and are validated here
//! - **Absence, not errors**: Invalid input yields `None`, never a partial result
//! - **No formatting**: Results are plain `f64`; display is the caller's job
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::drip_rate::{calculate, DripRateInput};
//! use calc_core::units::TimeUnit;
//!
//! let result = calculate(&DripRateInput::new("1000", "8", TimeUnit::Hr, "15")).unwrap();
//! println!("{:.2} mL/hr, {:.2} gtt/min", result.infusion_rate_ml_hr, result.drip_rate_gtt_min);
//!
//! // Invalid input produces no result
//! assert!(calculate(&DripRateInput::new("1000", "0", TimeUnit::Hr, "15")).is_none());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The four calculators and kind-based dispatch
//! - [`form`] - Caller-side form state with `calculate` / `clear`
//! - [`equations`] - Formula library and equation registry
//! - [`units`] - Unit tags, typed values and conversions
//! - [`validation`] - Parsing raw form text
//! - [`errors`] - Structured error type

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod form;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationResult, CalculatorKind, Sex, UnitSelections};
pub use errors::{CalcError, CalcResult};
pub use form::CalculatorForm;
pub use units::{LengthUnit, MassUnit, Measurement, TimeUnit};
