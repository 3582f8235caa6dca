//! # Clinical Equations
//!
//! All formulas used by the calculators, kept in one place so they can be
//! checked against their references and documented consistently.
//!
//! ## Modules
//!
//! - [`clinical`] - The formulas as plain functions in canonical units
//! - [`registry`] - Equation metadata and the generated reference document
//!
//! ## Canonical Units
//!
//! - **Mass**: kilograms
//! - **Length**: centimeters for BSA, inches for the Devine formula
//! - **Time**: hours for infusion rate, minutes for drip rate
//! - **Volume**: milliliters (never converted)

pub mod clinical;
pub mod registry;

// Re-export commonly used items
pub use clinical::{
    adjusted_body_weight,
    devine_excess_inches,
    devine_ibw,
    drip_rate,
    infusion_rate,
    mosteller_bsa,
    total_dose,
};

pub use registry::{
    equations_for,
    generate_equations_markdown,
    Equation,
    EquationCategory,
    EquationMetadata,
    Reference,
    Variable,
    ALL_EQUATIONS,
};
