//! # Input Validation
//!
//! Form fields arrive as free text. Every numeric field a calculator reads
//! must parse to a finite number strictly greater than zero; anything else
//! is rejected with [`CalcError::InvalidInput`].
//!
//! Missing, malformed and negative values are not distinguished beyond the
//! human-readable `reason`.
//!
//! Outputs are checked too: valid but extreme inputs can overflow a formula,
//! and a non-finite result is reported against the field that produced it.

use crate::errors::{CalcError, CalcResult};
use crate::units::Measurement;

/// Parse a raw form field into a strictly positive, finite `f64`.
///
/// Leading and trailing whitespace is ignored.
///
/// # Example
///
/// ```rust
/// use calc_core::validation::parse_positive;
///
/// assert_eq!(parse_positive("volume", " 1000 ").unwrap(), 1000.0);
/// assert!(parse_positive("volume", "0").is_err());
/// assert!(parse_positive("volume", "abc").is_err());
/// ```
pub fn parse_positive(field: &str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid_input(field, raw, "Value is required"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::invalid_input(field, raw, "Value is not a number"))?;

    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, raw, "Value must be finite"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, raw, "Value must be greater than zero"));
    }
    Ok(value)
}

/// Parse a raw magnitude and attach the selected unit.
pub fn parse_measurement<U>(field: &str, raw: &str, unit: U) -> CalcResult<Measurement<U>> {
    Ok(Measurement::new(parse_positive(field, raw)?, unit))
}

/// Reject a computed output that overflowed to infinity or became NaN.
pub fn ensure_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Result is out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::MassUnit;

    #[test]
    fn test_accepts_positive_numbers() {
        assert_eq!(parse_positive("x", "15").unwrap(), 15.0);
        assert_eq!(parse_positive("x", "0.25").unwrap(), 0.25);
        assert_eq!(parse_positive("x", "1e3").unwrap(), 1000.0);
        assert_eq!(parse_positive("x", "\t8\n").unwrap(), 8.0);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(parse_positive("x", "").is_err());
        assert!(parse_positive("x", "   ").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_positive("x", "abc").is_err());
        assert!(parse_positive("x", "12abc").is_err());
        assert!(parse_positive("x", "1,000").is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(parse_positive("x", "NaN").is_err());
        assert!(parse_positive("x", "inf").is_err());
        assert!(parse_positive("x", "1e400").is_err());
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(parse_positive("x", "0").is_err());
        assert!(parse_positive("x", "-0").is_err());
        assert!(parse_positive("x", "-5").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = parse_positive("drop_factor", "-1").unwrap_err();
        assert_eq!(err.field(), "drop_factor");
    }

    #[test]
    fn test_parse_measurement() {
        let m = parse_measurement("weight", "70", MassUnit::Lbs).unwrap();
        assert_eq!(m.value, 70.0);
        assert_eq!(m.unit, MassUnit::Lbs);
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("total_dose_mg", 350.0).unwrap(), 350.0);

        let err = ensure_finite("total_dose_mg", 1e308 * 1e10).unwrap_err();
        assert_eq!(err.field(), "total_dose_mg");
        assert!(ensure_finite("bsa_m2", f64::NAN).is_err());
    }
}
