//! # Clinical Formulas
//!
//! The arithmetic behind each calculator, as plain `f64` functions in
//! canonical units. Callers convert units before calling these; nothing here
//! validates or rounds.
//!
//! ## Notation
//!
//! - `V` = Volume to infuse (mL)
//! - `t_hr`, `t_min` = Infusion time (hr, min)
//! - `DF` = Drop factor (gtt/mL)
//! - `W` = Actual body weight (kg)
//! - `D` = Dose per kilogram (mg/kg)
//! - `H_cm`, `H_in` = Height (cm, in)
//! - `IBW` = Ideal body weight (kg)
//!
//! ## References
//!
//! - Mosteller RD. Simplified calculation of body-surface area. N Engl J Med 1987;317:1098
//! - Devine BJ. Gentamicin therapy. Drug Intell Clin Pharm 1974;8:650-655

/// Height (in) above which the Devine formula adds weight
pub const DEVINE_BASELINE_IN: f64 = 60.0;

/// Devine base weight for males (kg)
pub const DEVINE_BASE_MALE_KG: f64 = 50.0;

/// Devine base weight for females (kg)
pub const DEVINE_BASE_FEMALE_KG: f64 = 45.5;

/// Kilograms added per inch above the baseline
pub const DEVINE_KG_PER_IN: f64 = 2.3;

/// Fraction of excess (or deficit) weight kept by the adjusted body weight
pub const ADJUSTED_WEIGHT_FACTOR: f64 = 0.4;

/// Mosteller divisor (cm·kg per m⁴)
pub const MOSTELLER_DIVISOR: f64 = 3600.0;

// =============================================================================
// INFUSION
// =============================================================================

/// Infusion rate in mL/hr
///
/// # Formula
/// rate = V / t_hr
#[inline]
pub fn infusion_rate(volume_ml: f64, time_hr: f64) -> f64 {
    volume_ml / time_hr
}

/// Gravity drip rate in drops per minute
///
/// # Formula
/// gtt/min = (V × DF) / t_min
#[inline]
pub fn drip_rate(volume_ml: f64, drop_factor: f64, time_min: f64) -> f64 {
    (volume_ml * drop_factor) / time_min
}

// =============================================================================
// DOSING
// =============================================================================

/// Total weight-based dose in mg
///
/// # Formula
/// dose = W × D
#[inline]
pub fn total_dose(weight_kg: f64, dose_mg_per_kg: f64) -> f64 {
    weight_kg * dose_mg_per_kg
}

// =============================================================================
// BODY SURFACE AREA
// =============================================================================

/// Body surface area in m² (Mosteller)
///
/// # Formula
/// BSA = √(H_cm × W / 3600)
#[inline]
pub fn mosteller_bsa(height_cm: f64, weight_kg: f64) -> f64 {
    ((height_cm * weight_kg) / MOSTELLER_DIVISOR).sqrt()
}

// =============================================================================
// BODY WEIGHT
// =============================================================================

/// Inches of height above 5 ft, floored at zero.
///
/// The floor keeps the Devine estimate from dropping below its base
/// constant for short stature.
#[inline]
pub fn devine_excess_inches(height_in: f64) -> f64 {
    (height_in - DEVINE_BASELINE_IN).max(0.0)
}

/// Ideal body weight in kg (Devine)
///
/// # Formula
/// IBW = base + 2.3 × max(0, H_in − 60)
///
/// where base is 50 kg (male) or 45.5 kg (female)
#[inline]
pub fn devine_ibw(base_kg: f64, height_in: f64) -> f64 {
    base_kg + DEVINE_KG_PER_IN * devine_excess_inches(height_in)
}

/// Adjusted body weight in kg
///
/// # Formula
/// AdjBW = IBW + 0.4 × (W − IBW)
///
/// Not clamped: a patient lighter than ideal gets AdjBW below IBW.
#[inline]
pub fn adjusted_body_weight(ibw_kg: f64, actual_kg: f64) -> f64 {
    ibw_kg + ADJUSTED_WEIGHT_FACTOR * (actual_kg - ibw_kg)
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_infusion_rate() {
        // 1000 mL over 8 hr
        assert!(approx_eq(infusion_rate(1000.0, 8.0), 125.0));
    }

    #[test]
    fn test_drip_rate() {
        // 1000 mL × 15 gtt/mL over 480 min
        assert!(approx_eq(drip_rate(1000.0, 15.0, 480.0), 31.25));
    }

    #[test]
    fn test_total_dose() {
        assert!(approx_eq(total_dose(70.0, 5.0), 350.0));
    }

    #[test]
    fn test_mosteller() {
        // √(180 × 80 / 3600) = √4 = 2
        assert!(approx_eq(mosteller_bsa(180.0, 80.0), 2.0));
    }

    #[test]
    fn test_excess_inches_floor() {
        assert_eq!(devine_excess_inches(72.0), 12.0);
        assert_eq!(devine_excess_inches(60.0), 0.0);
        assert_eq!(devine_excess_inches(48.0), 0.0);
    }

    #[test]
    fn test_devine_ibw() {
        // 6 ft male: 50 + 2.3 × 12 = 77.6
        assert!(approx_eq(devine_ibw(DEVINE_BASE_MALE_KG, 72.0), 77.6));
        // 5 ft 4 in female: 45.5 + 2.3 × 4 = 54.7
        assert!(approx_eq(devine_ibw(DEVINE_BASE_FEMALE_KG, 64.0), 54.7));
        // Below baseline returns the base exactly
        assert_eq!(devine_ibw(DEVINE_BASE_FEMALE_KG, 50.0), DEVINE_BASE_FEMALE_KG);
    }

    #[test]
    fn test_adjusted_body_weight_both_directions() {
        // Heavier than ideal: 70 + 0.4 × 30 = 82
        assert!(approx_eq(adjusted_body_weight(70.0, 100.0), 82.0));
        // Lighter than ideal: 70 + 0.4 × (−20) = 62
        assert!(approx_eq(adjusted_body_weight(70.0, 50.0), 62.0));
    }
}
