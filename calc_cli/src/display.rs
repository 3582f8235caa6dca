//! Result formatting for the terminal.
//!
//! Every value is shown with exactly 2 decimals followed by its unit label.

use calc_core::calculations::{CalculationResult, CalculatorKind, UnitSelections};
use calc_core::equations::equations_for;
use calc_core::errors::CalcError;

/// Format a value to 2 decimal places with its unit label
pub fn format_quantity(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

/// Labeled, formatted lines for a result, in display order
pub fn result_lines(result: &CalculationResult) -> Vec<(&'static str, String)> {
    match result {
        CalculationResult::DripRate(r) => vec![
            ("Infusion Rate", format_quantity(r.infusion_rate_ml_hr, "mL/hr")),
            ("Drip Rate", format_quantity(r.drip_rate_gtt_min, "gtt/min")),
        ],
        CalculationResult::Dosing(r) => vec![("Total Dose", format_quantity(r.total_dose_mg, "mg"))],
        CalculationResult::Bsa(r) => vec![("Body Surface Area", format_quantity(r.bsa_m2, "m²"))],
        CalculationResult::BodyWeight(r) => vec![
            ("Ideal Body Weight (Devine)", format_quantity(r.ibw_kg, "kg")),
            ("Adjusted Body Weight", format_quantity(r.adjusted_bw_kg, "kg")),
        ],
    }
}

/// Prompt label and unit for a form field, given the current unit selections
pub fn field_label(name: &str, units: &UnitSelections) -> (&'static str, &'static str) {
    match name {
        "volume" => ("Total Volume", "mL"),
        "time" => ("Infusion Time", units.time.symbol()),
        "drop_factor" => ("Drop Factor", "gtt/mL"),
        "weight" => ("Weight", units.mass.symbol()),
        "dose_per_weight" => ("Dose", "mg/kg"),
        "height" => ("Height", units.length.symbol()),
        _ => ("Value", ""),
    }
}

/// Print a result panel for a calculator
pub fn print_result(kind: CalculatorKind, result: &CalculationResult) {
    println!("═══════════════════════════════════════");
    println!("  {}", kind.display_name().to_uppercase());
    println!("═══════════════════════════════════════");
    for (label, value) in result_lines(result) {
        println!("  {:<28} {}", format!("{}:", label), value);
    }
    println!("═══════════════════════════════════════");
}

/// Print why no result was produced
pub fn print_no_result(err: &CalcError) {
    eprintln!("No result: {}", err);
}

/// Render a result or error as pretty JSON
pub fn render_json(outcome: &Result<CalculationResult, CalcError>) -> serde_json::Result<String> {
    match outcome {
        Ok(result) => serde_json::to_string_pretty(result),
        Err(err) => serde_json::to_string_pretty(err),
    }
}

/// Print a result or error as pretty JSON
pub fn print_json(outcome: &Result<CalculationResult, CalcError>) {
    match render_json(outcome) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}

/// One line per equation a calculator applies, with its short reference
pub fn equation_list(kind: CalculatorKind) -> String {
    let mut out = format!("{}\n", kind.display_name());
    for equation in equations_for(kind) {
        let meta = equation.metadata();
        out.push_str(&format!(
            "  {:<32} {:<36} [{}]\n",
            meta.name,
            meta.formula_plain,
            meta.reference.short_form()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::calculations::{BodyWeightResult, BsaResult, DripRateResult};
    use calc_core::units::{LengthUnit, MassUnit, TimeUnit};
    use calc_core::validation::parse_positive;

    #[test]
    fn test_two_decimal_rounding() {
        assert_eq!(format_quantity(125.0, "mL/hr"), "125.00 mL/hr");
        assert_eq!(format_quantity(31.25, "gtt/min"), "31.25 gtt/min");
        assert_eq!(format_quantity(1.8446619, "m²"), "1.84 m²");
        assert_eq!(format_quantity(70.4646, "kg"), "70.46 kg");
    }

    #[test]
    fn test_drip_rate_lines() {
        let result = CalculationResult::DripRate(DripRateResult {
            infusion_rate_ml_hr: 125.0,
            drip_rate_gtt_min: 31.25,
        });
        let lines = result_lines(&result);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ("Infusion Rate", "125.00 mL/hr".to_string()));
        assert_eq!(lines[1], ("Drip Rate", "31.25 gtt/min".to_string()));
    }

    #[test]
    fn test_body_weight_and_bsa_labels() {
        let bw = CalculationResult::BodyWeight(BodyWeightResult {
            ibw_kg: 77.6,
            adjusted_bw_kg: 86.56,
        });
        assert_eq!(result_lines(&bw)[1].1, "86.56 kg");

        let bsa = CalculationResult::Bsa(BsaResult { bsa_m2: 2.0 });
        assert_eq!(result_lines(&bsa)[0].1, "2.00 m²");
    }

    #[test]
    fn test_field_label_follows_units() {
        let units = UnitSelections {
            mass: MassUnit::Lbs,
            length: LengthUnit::In,
            time: TimeUnit::Min,
        };
        assert_eq!(field_label("weight", &units), ("Weight", "lbs"));
        assert_eq!(field_label("height", &units), ("Height", "in"));
        assert_eq!(field_label("time", &units), ("Infusion Time", "min"));
        assert_eq!(field_label("drop_factor", &units), ("Drop Factor", "gtt/mL"));
    }

    #[test]
    fn test_json_error_shape() {
        let err = parse_positive("weight", "-70").unwrap_err();
        let text = render_json(&Err(err)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "InvalidInput");
        assert_eq!(value["details"]["field"], "weight");
        assert_eq!(value["details"]["value"], "-70");
    }

    #[test]
    fn test_json_result_reads_back() {
        let result = CalculationResult::Bsa(BsaResult { bsa_m2: 1.84 });
        let text = render_json(&Ok(result)).unwrap();
        let roundtrip: CalculationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(roundtrip, result);
        assert!(text.contains("\"type\": \"Bsa\""));
    }

    #[test]
    fn test_equation_list_for_bsa() {
        let listing = equation_list(CalculatorKind::Bsa);
        assert!(listing.starts_with("Body Surface Area\n"));
        assert!(listing.contains("Body Surface Area (Mosteller)"));
        assert!(listing.contains("[Mosteller]"));
        assert!(listing.contains("[Units]"));
        assert!(!listing.contains("Devine"));
        // header plus inches, pounds, Mosteller
        assert_eq!(listing.lines().count(), 4);
    }
}
