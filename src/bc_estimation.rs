//! Sectional density, ballistic coefficient estimates and mass/volume
//! conversions.
//!
//! Every function returns zero for non-positive inputs instead of failing,
//! so half-edited designs still produce a readable report.

use crate::constants::{GRAINS_PER_GRAM, GRAINS_PER_POUND, MM3_PER_CM3, MM_PER_INCH};
use crate::design::OgiveFamily;
use crate::drag_model::BallisticCoefficient;
use crate::form_factor::{g7_conversion_factor, ogive_form_factor};

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Sectional density in lb/in²
pub fn sectional_density(diameter_mm: f64, mass_grains: f64) -> f64 {
    if diameter_mm <= 0.0 || mass_grains <= 0.0 {
        return 0.0;
    }
    let diameter_in = diameter_mm / MM_PER_INCH;
    (mass_grains / GRAINS_PER_POUND) / (diameter_in * diameter_in)
}

/// G1 ballistic coefficient estimate, rounded to three places
pub fn ballistic_coefficient_g1(
    diameter_mm: f64,
    mass_grains: f64,
    length_mm: f64,
    ogive: OgiveFamily,
) -> BallisticCoefficient {
    if diameter_mm <= 0.0 || mass_grains <= 0.0 || length_mm <= 0.0 {
        return BallisticCoefficient::g1(0.0);
    }

    let mut bc = sectional_density(diameter_mm, mass_grains) / ogive_form_factor(ogive);
    if length_mm / diameter_mm > 4.0 {
        bc *= 1.05;  // Long bullets carry velocity better
    }

    BallisticCoefficient::g1(round_to(bc, 3))
}

/// G7 ballistic coefficient derived from a G1 value and boat-tail angle
pub fn ballistic_coefficient_g7(bc_g1: f64, boat_tail_angle_deg: f64) -> BallisticCoefficient {
    if bc_g1 <= 0.0 {
        return BallisticCoefficient::g7(0.0);
    }
    BallisticCoefficient::g7(bc_g1 / g7_conversion_factor(boat_tail_angle_deg))
}

/// Solid volume in mm³ for a mass of material
pub fn volume_from_weight(mass_grains: f64, density_g_cm3: f64) -> f64 {
    if mass_grains <= 0.0 || density_g_cm3 <= 0.0 {
        return 0.0;
    }
    mass_grains / GRAINS_PER_GRAM / density_g_cm3 * MM3_PER_CM3
}

/// Mass in grains of a solid volume of material
pub fn weight_from_volume(volume_mm3: f64, density_g_cm3: f64) -> f64 {
    if volume_mm3 <= 0.0 || density_g_cm3 <= 0.0 {
        return 0.0;
    }
    volume_mm3 / MM3_PER_CM3 * density_g_cm3 * GRAINS_PER_GRAM
}

/// Surface in contact with the bore, mm².
///
/// Bands carry the bearing load when present; otherwise the full body does.
pub fn bearing_surface_area(
    diameter_mm: f64,
    length_mm: f64,
    band_count: u32,
    band_length_mm: f64,
) -> f64 {
    if diameter_mm <= 0.0 || length_mm <= 0.0 {
        return 0.0;
    }
    let circumference = std::f64::consts::PI * diameter_mm;
    if band_count > 0 {
        band_count as f64 * band_length_mm.max(0.0) * circumference
    } else {
        circumference * length_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag_model::DragFamily;

    #[test]
    fn test_sectional_density_known_value() {
        // .308 / 168gr is the classic 0.253
        let sd = sectional_density(7.8232, 168.0);
        assert!((sd - 0.253).abs() < 0.001);
    }

    #[test]
    fn test_sectional_density_non_positive() {
        assert_eq!(sectional_density(0.0, 140.0), 0.0);
        assert_eq!(sectional_density(6.7, -1.0), 0.0);
    }

    #[test]
    fn test_bc_g1_length_boost_and_rounding() {
        let bc = ballistic_coefficient_g1(6.7, 140.0, 32.0, OgiveFamily::Tangent);
        assert_eq!(bc.family, DragFamily::G1);
        let expected = sectional_density(6.7, 140.0) / 0.85 * 1.05;
        assert!((bc.value - expected).abs() <= 0.0005);
        assert_eq!(bc.value, round_to(bc.value, 3));

        let short = ballistic_coefficient_g1(6.7, 140.0, 20.0, OgiveFamily::Tangent);
        assert!(short.value < bc.value);
    }

    #[test]
    fn test_bc_g1_zero_for_bad_inputs() {
        assert_eq!(ballistic_coefficient_g1(6.7, 140.0, 0.0, OgiveFamily::Secant).value, 0.0);
        assert_eq!(ballistic_coefficient_g1(0.0, 140.0, 32.0, OgiveFamily::Secant).value, 0.0);
    }

    #[test]
    fn test_bc_g7_from_g1() {
        let bc = ballistic_coefficient_g7(0.5, 8.0);
        assert_eq!(bc.family, DragFamily::G7);
        assert!((bc.value - 0.25).abs() < 1e-12);
        assert!((ballistic_coefficient_g7(0.46, 0.0).value - 0.2).abs() < 1e-12);
        assert_eq!(ballistic_coefficient_g7(0.0, 8.0).value, 0.0);
    }

    #[test]
    fn test_volume_weight_inverse() {
        let volume = volume_from_weight(140.0, 8.96);
        assert!((weight_from_volume(volume, 8.96) - 140.0).abs() < 1e-9);
        // 140gr of copper is a little over 1 cm³
        assert!((volume - 1012.4).abs() < 1.0);
        assert_eq!(volume_from_weight(140.0, 0.0), 0.0);
        assert_eq!(weight_from_volume(-5.0, 8.96), 0.0);
    }

    #[test]
    fn test_bearing_surface() {
        let banded = bearing_surface_area(6.7, 32.0, 4, 2.25);
        assert!((banded - 4.0 * 2.25 * std::f64::consts::PI * 6.7).abs() < 1e-9);
        let smooth = bearing_surface_area(6.7, 32.0, 0, 2.25);
        assert!((smooth - std::f64::consts::PI * 6.7 * 32.0).abs() < 1e-9);
        assert_eq!(bearing_surface_area(0.0, 32.0, 4, 2.25), 0.0);
    }
}
