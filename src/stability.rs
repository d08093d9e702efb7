use serde::Serialize;

use crate::bc_estimation::round_to;
use crate::constants::{
    is_monolithic_density, HPA_TO_INHG, MARGINAL_STABILITY_FRACTION, MILLER_REF_PRESSURE_INHG,
    MILLER_REF_TEMP_RANKINE, MILLER_REF_VELOCITY_FPS, MM_PER_INCH, MPS_TO_FPS, RANKINE_OFFSET,
    STABILITY_THRESHOLD_LEAD_CORE, STABILITY_THRESHOLD_MONOLITHIC,
};
use crate::design::DesignParameters;

/// Inputs to the Miller stability estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityInputs {
    /// Diameter where the bore constrains the bullet (mm)
    pub effective_diameter_mm: f64,
    pub length_mm: f64,
    pub mass_grains: f64,
    /// Barrel twist, inches per turn
    pub twist_inches: f64,
    pub velocity_mps: f64,
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    /// Material density, selects the stability threshold
    pub density_g_cm3: f64,
}

impl StabilityInputs {
    pub fn for_design(
        params: &DesignParameters,
        twist_inches: f64,
        velocity_mps: f64,
        temperature_c: f64,
        pressure_hpa: f64,
    ) -> Self {
        Self {
            effective_diameter_mm: params.effective_diameter_mm(),
            length_mm: params.length_mm,
            mass_grains: params.mass_grains,
            twist_inches,
            velocity_mps,
            temperature_c,
            pressure_hpa,
            density_g_cm3: params.density_g_cm3,
        }
    }
}

/// Classification of a stability factor against its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StabilityStatus {
    Stable,
    Marginal,
    Unstable,
}

impl StabilityStatus {
    pub fn classify(factor: f64, threshold: f64) -> Self {
        if factor >= threshold {
            StabilityStatus::Stable
        } else if factor >= threshold * MARGINAL_STABILITY_FRACTION {
            StabilityStatus::Marginal
        } else {
            StabilityStatus::Unstable
        }
    }
}

impl std::fmt::Display for StabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityResult {
    /// Gyroscopic stability factor, two decimals
    pub factor: f64,
    pub threshold: f64,
    pub status: StabilityStatus,
}

/// Required stability factor for a material density
pub fn stability_threshold(density_g_cm3: f64) -> f64 {
    if is_monolithic_density(density_g_cm3) {
        STABILITY_THRESHOLD_MONOLITHIC
    } else {
        STABILITY_THRESHOLD_LEAD_CORE
    }
}

/// Calculate the Miller gyroscopic stability factor (Sg).
///
/// Sg = 30·m·(V/2800)^(1/3) / [(T/d)²·d³·l·(1+l²)] in grains, inches and
/// ft/s, scaled by temperature and pressure corrections. `d` is the
/// effective diameter, not the nominal one.
///
/// # Arguments
/// * `inputs` - Design, barrel and atmosphere values in metric units
///
/// # Returns
/// * Factor rounded to two places with the applicable threshold. Any
///   non-positive dimension, mass or twist gives a factor of 0 against the
///   lead-core threshold.
pub fn miller_stability(inputs: &StabilityInputs) -> StabilityResult {
    if inputs.effective_diameter_mm <= 0.0
        || inputs.length_mm <= 0.0
        || inputs.mass_grains <= 0.0
        || inputs.twist_inches <= 0.0
    {
        return StabilityResult {
            factor: 0.0,
            threshold: STABILITY_THRESHOLD_LEAD_CORE,
            status: StabilityStatus::Unstable,
        };
    }

    let threshold = stability_threshold(inputs.density_g_cm3);

    let diameter_in = inputs.effective_diameter_mm / MM_PER_INCH;
    let length_calibers = inputs.length_mm / inputs.effective_diameter_mm;
    let twist_calibers = inputs.twist_inches / diameter_in;
    let velocity_fps = inputs.velocity_mps * MPS_TO_FPS;

    let velocity_correction = if velocity_fps > 0.0 {
        (velocity_fps / MILLER_REF_VELOCITY_FPS).powf(1.0 / 3.0)
    } else {
        1.0
    };

    let temperature_f = inputs.temperature_c * 9.0 / 5.0 + 32.0;
    let temp_correction =
        ((temperature_f + RANKINE_OFFSET) / MILLER_REF_TEMP_RANKINE).max(0.0).sqrt();
    let pressure_inhg = inputs.pressure_hpa * HPA_TO_INHG;
    let pressure_correction = (pressure_inhg / MILLER_REF_PRESSURE_INHG).max(0.0).sqrt();

    let geom_term = twist_calibers.powi(2)
        * diameter_in.powi(3)
        * length_calibers
        * (1.0 + length_calibers.powi(2));

    let sg = 30.0 * inputs.mass_grains * velocity_correction / geom_term
        * temp_correction
        * pressure_correction;

    let factor = round_to(sg, 2);
    StabilityResult {
        factor,
        threshold,
        status: StabilityStatus::classify(factor, threshold),
    }
}

/// Recommended barrel twist in inches per turn, with its `1:N"` label.
///
/// Monolithic densities solve the Miller relation for Sg = 1.8; anything
/// else uses Greenhill, corrected above 2800 ft/s. Returns `(0.0, "N/A")`
/// for a non-positive diameter, length or mass.
pub fn recommended_twist(
    effective_diameter_mm: f64,
    length_mm: f64,
    mass_grains: f64,
    velocity_mps: f64,
    density_g_cm3: f64,
) -> (f64, String) {
    if !(effective_diameter_mm > 0.0) || !(length_mm > 0.0) || !(mass_grains > 0.0) {
        return (0.0, "N/A".to_string());
    }

    let diameter_in = effective_diameter_mm / MM_PER_INCH;
    let length_in = length_mm / MM_PER_INCH;
    let velocity_fps = velocity_mps * MPS_TO_FPS;

    let twist = if is_monolithic_density(density_g_cm3) {
        let l = length_in / diameter_in;
        let denominator =
            STABILITY_THRESHOLD_MONOLITHIC * diameter_in.powi(3) * l * (1.0 + l * l);
        let root = if denominator > 0.0 {
            (30.0 * mass_grains / denominator).sqrt()
        } else {
            0.0
        };
        let velocity_correction = if velocity_fps > 0.0 {
            (MILLER_REF_VELOCITY_FPS / velocity_fps).powf(1.0 / 6.0)
        } else {
            1.0
        };
        diameter_in * root * velocity_correction
    } else {
        let greenhill = 150.0 * diameter_in * diameter_in / length_in;
        if velocity_fps > MILLER_REF_VELOCITY_FPS {
            greenhill * (velocity_fps / MILLER_REF_VELOCITY_FPS).sqrt()
        } else {
            greenhill
        }
    };

    let twist = twist.round();
    (twist, format!("1:{}\"", twist as i64))
}
