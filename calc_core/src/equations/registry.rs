//! # Equation Registry
//!
//! Central registry of every formula the calculators use. Each equation has
//! metadata including its literature reference, plain-text formula and
//! variable definitions, so the arithmetic can be audited in one place.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::{Equation, EquationCategory};
//!
//! let meta = Equation::MostellerBsa.metadata();
//! assert_eq!(meta.category, EquationCategory::BodySize);
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::CalculatorKind;

// ============================================================================
// References
// ============================================================================

/// Source of a formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    /// Published paper
    Literature {
        author: &'static str,
        year: u16,
        journal: &'static str,
    },
    /// Exact or conventional unit definition
    UnitDefinition { standard: &'static str },
    /// Dimensional analysis, no specific source needed
    Arithmetic,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::Literature { author, year, journal } => {
                format!("{} ({}), {}", author, year, journal)
            }
            Reference::UnitDefinition { standard } => format!("Unit definition: {}", standard),
            Reference::Arithmetic => "Dimensional analysis".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            Reference::Literature { author, .. } => *author,
            Reference::UnitDefinition { .. } => "Units",
            Reference::Arithmetic => "Arithmetic",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing the equation reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Conversions between selectable units
    UnitConversion,
    /// IV infusion rates
    Infusion,
    /// Weight-based dosing
    Dosing,
    /// Body surface area and body weight estimates
    BodySize,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::UnitConversion => "Unit Conversion",
            EquationCategory::Infusion => "Infusion",
            EquationCategory::Dosing => "Dosing",
            EquationCategory::BodySize => "Body Size",
        }
    }

    /// Sort order in the reference (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::UnitConversion => 1,
            EquationCategory::Infusion => 2,
            EquationCategory::Dosing => 3,
            EquationCategory::BodySize => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "V", "DF")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units (e.g., "mL", "gtt/mL")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Gravity Drip Rate")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub reference: Reference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every formula used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Unit Conversion
    // -------------------------------------------------------------------------
    /// kg = lbs / 2.20462
    PoundsToKilograms,
    /// cm = in × 2.54
    InchesToCentimeters,
    /// min = hr × 60
    HoursToMinutes,

    // -------------------------------------------------------------------------
    // Infusion
    // -------------------------------------------------------------------------
    /// rate = V / t_hr
    InfusionRate,
    /// gtt/min = V × DF / t_min
    DripRate,

    // -------------------------------------------------------------------------
    // Dosing
    // -------------------------------------------------------------------------
    /// dose = W × D
    WeightBasedDose,

    // -------------------------------------------------------------------------
    // Body Size
    // -------------------------------------------------------------------------
    /// BSA = √(H × W / 3600)
    MostellerBsa,
    /// IBW = base + 2.3 × max(0, H − 60)
    DevineIdealBodyWeight,
    /// AdjBW = IBW + 0.4 × (W − IBW)
    AdjustedBodyWeight,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::PoundsToKilograms => EquationMetadata {
                name: "Pounds to Kilograms",
                description: "Converts a mass entered in pounds to kilograms",
                formula_plain: "kg = lbs / 2.20462",
                reference: Reference::UnitDefinition { standard: "1 kg = 2.20462 lbs" },
                variables: vec![
                    Variable::new("lbs", "Mass in pounds", "lbs"),
                    Variable::new("kg", "Mass in kilograms", "kg"),
                ],
                assumptions: vec!["Factor truncated to 5 decimal places"],
                category: EquationCategory::UnitConversion,
                source_module: "units",
                source_function: "to_canonical_mass",
            },
            Equation::InchesToCentimeters => EquationMetadata {
                name: "Inches to Centimeters",
                description: "Converts a length between inches and centimeters",
                formula_plain: "cm = in × 2.54, in = cm / 2.54",
                reference: Reference::UnitDefinition { standard: "1 in = 2.54 cm (exact)" },
                variables: vec![
                    Variable::new("in", "Length in inches", "in"),
                    Variable::new("cm", "Length in centimeters", "cm"),
                ],
                assumptions: vec![],
                category: EquationCategory::UnitConversion,
                source_module: "units",
                source_function: "convert_length",
            },
            Equation::HoursToMinutes => EquationMetadata {
                name: "Hours to Minutes",
                description: "Converts a duration between hours and minutes",
                formula_plain: "min = hr × 60, hr = min / 60",
                reference: Reference::UnitDefinition { standard: "1 hr = 60 min" },
                variables: vec![
                    Variable::new("hr", "Duration in hours", "hr"),
                    Variable::new("min", "Duration in minutes", "min"),
                ],
                assumptions: vec![],
                category: EquationCategory::UnitConversion,
                source_module: "units",
                source_function: "convert_time",
            },
            Equation::InfusionRate => EquationMetadata {
                name: "Infusion Rate",
                description: "Pump rate needed to deliver a volume over a given time",
                formula_plain: "rate = V / t_hr",
                reference: Reference::Arithmetic,
                variables: vec![
                    Variable::new("V", "Total volume to infuse", "mL"),
                    Variable::new("t_hr", "Infusion time", "hr"),
                    Variable::new("rate", "Infusion rate", "mL/hr"),
                ],
                assumptions: vec!["Constant rate over the whole infusion"],
                category: EquationCategory::Infusion,
                source_module: "equations::clinical",
                source_function: "infusion_rate",
            },
            Equation::DripRate => EquationMetadata {
                name: "Gravity Drip Rate",
                description: "Drops per minute for a gravity infusion through a calibrated set",
                formula_plain: "gtt/min = (V × DF) / t_min",
                reference: Reference::Arithmetic,
                variables: vec![
                    Variable::new("V", "Total volume to infuse", "mL"),
                    Variable::new("DF", "Drop factor of the administration set", "gtt/mL"),
                    Variable::new("t_min", "Infusion time", "min"),
                ],
                assumptions: vec![
                    "Drop factor taken from the administration set packaging",
                    "Result is not rounded to whole drops",
                ],
                category: EquationCategory::Infusion,
                source_module: "equations::clinical",
                source_function: "drip_rate",
            },
            Equation::WeightBasedDose => EquationMetadata {
                name: "Weight-Based Dose",
                description: "Total dose from a per-kilogram dose and patient weight",
                formula_plain: "dose = W × D",
                reference: Reference::Arithmetic,
                variables: vec![
                    Variable::new("W", "Patient weight", "kg"),
                    Variable::new("D", "Dose per kilogram", "mg/kg"),
                    Variable::new("dose", "Total dose", "mg"),
                ],
                assumptions: vec!["No maximum-dose cap is applied"],
                category: EquationCategory::Dosing,
                source_module: "equations::clinical",
                source_function: "total_dose",
            },
            Equation::MostellerBsa => EquationMetadata {
                name: "Body Surface Area (Mosteller)",
                description: "Estimated body surface area from height and weight",
                formula_plain: "BSA = √(H × W / 3600)",
                reference: Reference::Literature {
                    author: "Mosteller",
                    year: 1987,
                    journal: "N Engl J Med 317:1098",
                },
                variables: vec![
                    Variable::new("H", "Height", "cm"),
                    Variable::new("W", "Weight", "kg"),
                    Variable::new("BSA", "Body surface area", "m²"),
                ],
                assumptions: vec![],
                category: EquationCategory::BodySize,
                source_module: "equations::clinical",
                source_function: "mosteller_bsa",
            },
            Equation::DevineIdealBodyWeight => EquationMetadata {
                name: "Ideal Body Weight (Devine)",
                description: "Ideal body weight from height and sex",
                formula_plain: "IBW = base + 2.3 × max(0, H − 60)",
                reference: Reference::Literature {
                    author: "Devine",
                    year: 1974,
                    journal: "Drug Intell Clin Pharm 8:650-655",
                },
                variables: vec![
                    Variable::new("base", "50 for male, 45.5 for female", "kg"),
                    Variable::new("H", "Height", "in"),
                    Variable::new("IBW", "Ideal body weight", "kg"),
                ],
                assumptions: vec!["Heights at or below 60 in add nothing to the base weight"],
                category: EquationCategory::BodySize,
                source_module: "equations::clinical",
                source_function: "devine_ibw",
            },
            Equation::AdjustedBodyWeight => EquationMetadata {
                name: "Adjusted Body Weight",
                description: "Blend of ideal and actual body weight",
                formula_plain: "AdjBW = IBW + 0.4 × (W − IBW)",
                reference: Reference::Arithmetic,
                variables: vec![
                    Variable::new("IBW", "Ideal body weight", "kg"),
                    Variable::new("W", "Actual body weight", "kg"),
                    Variable::new("AdjBW", "Adjusted body weight", "kg"),
                ],
                assumptions: vec!["Not clamped: AdjBW falls below IBW for underweight patients"],
                category: EquationCategory::BodySize,
                source_module: "equations::clinical",
                source_function: "adjusted_body_weight",
            },
        }
    }

    /// Get all equations in a category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in sort order
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut categories = vec![
            EquationCategory::UnitConversion,
            EquationCategory::Infusion,
            EquationCategory::Dosing,
            EquationCategory::BodySize,
        ];
        categories.sort_by_key(|c| c.sort_order());
        categories
    }
}

/// List of all equations (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::PoundsToKilograms,
    Equation::InchesToCentimeters,
    Equation::HoursToMinutes,
    Equation::InfusionRate,
    Equation::DripRate,
    Equation::WeightBasedDose,
    Equation::MostellerBsa,
    Equation::DevineIdealBodyWeight,
    Equation::AdjustedBodyWeight,
];

/// Equations a calculator applies, in evaluation order
pub fn equations_for(kind: CalculatorKind) -> Vec<Equation> {
    match kind {
        CalculatorKind::DripRate => vec![Equation::HoursToMinutes, Equation::InfusionRate, Equation::DripRate],
        CalculatorKind::Dosing => vec![Equation::PoundsToKilograms, Equation::WeightBasedDose],
        CalculatorKind::Bsa => vec![
            Equation::InchesToCentimeters,
            Equation::PoundsToKilograms,
            Equation::MostellerBsa,
        ],
        CalculatorKind::BodyWeight => vec![
            Equation::InchesToCentimeters,
            Equation::PoundsToKilograms,
            Equation::DevineIdealBodyWeight,
            Equation::AdjustedBodyWeight,
        ],
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the equations reference document as markdown.
///
/// ```rust
/// use calc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Bedside Calc Equations Reference"));
/// assert!(markdown.contains("Body Surface Area (Mosteller)"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Bedside Calc Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the calculators, with its
reference, variables and source location. Results are illustrative only and
are not clinically certified.

Inputs are converted to the formula's units once, before the formula runs.
No intermediate value is rounded; results are shown to 2 decimal places.

---

"#,
    );

    for category in Equation::all_categories() {
        let equations = Equation::in_category(category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** `calc_core::{}::{}`\n\n",
                meta.source_module, meta.source_function
            ));
        }
    }

    output
}
