// CLI API module - one-call entry points over the engine for the command-line tool
use serde::{Deserialize, Serialize};

use crate::atmosphere::atmosphere;
use crate::bc_estimation::{
    ballistic_coefficient_g1, ballistic_coefficient_g7, bearing_surface_area, sectional_density,
};
use crate::constants::{GRAINS_TO_KG, MM_PER_INCH};
use crate::design::DesignParameters;
use crate::drag_model::BallisticCoefficient;
use crate::stability::{miller_stability, recommended_twist, StabilityInputs, StabilityResult};
use crate::trajectory_solver::{
    FlightConditions, ProjectileModel, TrajectoryConfig, TrajectoryResult, TrajectorySolver,
};
use crate::validation::{correct_parameters, ValidationReport};

// Firing environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub velocity_mps: f64,
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    /// Barrel twist, inches per turn
    pub twist_inches: f64,
    pub elevation_deg: f64,
    pub max_range_m: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            velocity_mps: 853.0,
            temperature_c: 15.0,
            pressure_hpa: 1013.25,
            twist_inches: 8.0,
            elevation_deg: 0.0,
            max_range_m: 1000.0,
        }
    }
}

impl Environment {
    /// Air density and speed of sound for this environment
    pub fn flight_conditions(&self) -> FlightConditions {
        let (air_density_kg_m3, speed_of_sound_mps) =
            atmosphere(self.pressure_hpa, self.temperature_c);
        FlightConditions {
            air_density_kg_m3,
            speed_of_sound_mps,
        }
    }

    fn stability_inputs(&self, params: &DesignParameters) -> StabilityInputs {
        StabilityInputs::for_design(
            params,
            self.twist_inches,
            self.velocity_mps,
            self.temperature_c,
            self.pressure_hpa,
        )
    }
}

// Ballistic summary of a design
#[derive(Debug, Clone, Serialize)]
pub struct BallisticReport {
    /// lb/in² on the groove diameter
    pub sectional_density: f64,
    pub bc_g1: BallisticCoefficient,
    pub bc_g7: BallisticCoefficient,
    pub stability: StabilityResult,
    pub effective_diameter_mm: f64,
    pub recommended_twist_inches: f64,
    pub recommended_twist_label: String,
    /// Band contact area, or the whole body cylinder when smooth
    pub bearing_surface_mm2: f64,
    /// Corrections applied before any of the above was computed
    pub validation: ValidationReport,
}

/// Compute sectional density, both ballistic coefficients, stability and
/// the recommended twist for a design.
///
/// # Arguments
/// * `params` - Design to evaluate; it is corrected first and the corrections
///   are carried in the report
/// * `env` - Velocity, atmosphere and barrel twist
pub fn analyze_design(params: &DesignParameters, env: &Environment) -> BallisticReport {
    let (params, validation) = correct_parameters(params);

    let diameter = params.groove_diameter_mm;
    let bc_g1 = ballistic_coefficient_g1(diameter, params.mass_grains, params.length_mm, params.ogive);
    let bc_g7 = ballistic_coefficient_g7(bc_g1.value, params.effective_boat_tail_angle_deg());
    let stability = miller_stability(&env.stability_inputs(&params));

    let effective_diameter_mm = params.effective_diameter_mm();
    let (recommended_twist_inches, recommended_twist_label) = recommended_twist(
        effective_diameter_mm,
        params.length_mm,
        params.mass_grains,
        env.velocity_mps,
        params.density_g_cm3,
    );

    BallisticReport {
        sectional_density: sectional_density(diameter, params.mass_grains),
        bc_g1,
        bc_g7,
        stability,
        effective_diameter_mm,
        recommended_twist_inches,
        recommended_twist_label,
        bearing_surface_mm2: bearing_surface_area(
            params.groove_diameter_mm,
            params.body_length_mm().max(0.0),
            params.band_count,
            params.band_length_mm,
        ),
        validation,
    }
}

// Trajectory request
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryRequest {
    pub design: DesignParameters,
    pub environment: Environment,
    /// Use this G1 value instead of the estimate from the design
    pub bc_g1_override: Option<f64>,
    pub time_step_s: f64,
    pub sample_interval_m: f64,
    pub max_steps: usize,
}

impl TrajectoryRequest {
    pub fn new(design: DesignParameters, environment: Environment) -> Self {
        let defaults = TrajectoryConfig::default();
        Self {
            design,
            environment,
            bc_g1_override: None,
            time_step_s: defaults.time_step_s,
            sample_interval_m: defaults.sample_interval_m,
            max_steps: defaults.max_steps,
        }
    }

    fn config(&self) -> TrajectoryConfig {
        TrajectoryConfig {
            muzzle_velocity_mps: self.environment.velocity_mps,
            elevation_deg: self.environment.elevation_deg,
            max_range_m: self.environment.max_range_m,
            time_step_s: self.time_step_s,
            sample_interval_m: self.sample_interval_m,
            max_steps: self.max_steps,
            ..TrajectoryConfig::default()
        }
    }
}

// Trajectory outcome with the values used to build it
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryReport {
    pub bc_g1: BallisticCoefficient,
    pub bc_g7: BallisticCoefficient,
    pub projectile: ProjectileModel,
    pub conditions: FlightConditions,
    pub trajectory: TrajectoryResult,
    pub validation: ValidationReport,
}

/// Projectile model for a corrected design.
///
/// The G7 form factor is sectional density over the G7 ballistic
/// coefficient; a zero BC gives a zero form factor and so a drag-free path.
pub fn projectile_model(
    params: &DesignParameters,
    bc_g7: f64,
    stability_factor: f64,
) -> ProjectileModel {
    let diameter_mm = params.groove_diameter_mm;
    let sd = sectional_density(diameter_mm, params.mass_grains);
    let form_factor = if bc_g7 > 0.0 { sd / bc_g7 } else { 0.0 };
    let diameter_m = diameter_mm / 1000.0;

    ProjectileModel {
        mass_kg: params.mass_grains * GRAINS_TO_KG,
        area_m2: std::f64::consts::PI * (diameter_m / 2.0).powi(2),
        form_factor,
        stability_factor,
        length_mm: params.length_mm,
        diameter_mm,
    }
}

/// Integrate the trajectory of a design through the shared G7 drag table.
pub fn run_trajectory(request: &TrajectoryRequest) -> TrajectoryReport {
    let (params, validation) = correct_parameters(&request.design);
    let env = &request.environment;

    let bc_g1 = match request.bc_g1_override {
        Some(value) if value > 0.0 => BallisticCoefficient::g1(value),
        _ => ballistic_coefficient_g1(
            params.groove_diameter_mm,
            params.mass_grains,
            params.length_mm,
            params.ogive,
        ),
    };
    let bc_g7 = ballistic_coefficient_g7(bc_g1.value, params.effective_boat_tail_angle_deg());
    let stability = miller_stability(&env.stability_inputs(&params));

    let projectile = projectile_model(&params, bc_g7.value, stability.factor);
    let conditions = env.flight_conditions();
    let trajectory = TrajectorySolver::g7(projectile, conditions, request.config()).solve();

    TrajectoryReport {
        bc_g1,
        bc_g7,
        projectile,
        conditions,
        trajectory,
        validation,
    }
}

/// Twist in calibers per turn for display
pub fn twist_calibers(twist_inches: f64, diameter_mm: f64) -> f64 {
    if diameter_mm <= 0.0 {
        return 0.0;
    }
    twist_inches / (diameter_mm / MM_PER_INCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stability::StabilityStatus;
    use crate::trajectory_solver::TerminationReason;

    fn copper_design() -> DesignParameters {
        DesignParameters {
            density_g_cm3: 8.9,
            ..DesignParameters::default()
        }
    }

    #[test]
    fn test_analyze_default_design() {
        let report = analyze_design(&copper_design(), &Environment::default());
        assert!(report.stability.factor > 1.8);
        assert_eq!(report.stability.status, StabilityStatus::Stable);
        assert!(report.bc_g1.value >= 0.3 && report.bc_g1.value <= 0.6);
        assert!(report.bc_g7.value < report.bc_g1.value);
        assert_eq!(report.effective_diameter_mm, 6.5);
        assert!((report.recommended_twist_inches - 8.0).abs() <= 1.0);
    }

    #[test]
    fn test_bearing_surface_follows_bands() {
        let banded = analyze_design(&copper_design(), &Environment::default());
        let expected = 4.0 * 2.25 * std::f64::consts::PI * 6.7;
        assert!((banded.bearing_surface_mm2 - expected).abs() < 1e-9);

        let smooth = DesignParameters {
            band_count: 0,
            ..copper_design()
        };
        let report = analyze_design(&smooth, &Environment::default());
        let body = smooth.body_length_mm();
        assert!((report.bearing_surface_mm2 - std::f64::consts::PI * 6.7 * body).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_reports_corrections() {
        let design = DesignParameters {
            land_diameter_mm: 7.0,
            ..copper_design()
        };
        let report = analyze_design(&design, &Environment::default());
        assert!(report.validation.has_field("land_diameter_mm"));
        assert!(report.effective_diameter_mm < design.groove_diameter_mm);
    }

    #[test]
    fn test_flat_base_uses_flat_conversion() {
        let design = DesignParameters {
            base: crate::design::BaseFamily::Flat,
            ..copper_design()
        };
        let report = analyze_design(&design, &Environment::default());
        assert!((report.bc_g7.value - report.bc_g1.value / 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_projectile_model_form_factor() {
        let params = copper_design();
        let model = projectile_model(&params, 0.2, 2.0);
        let sd = sectional_density(6.7, 140.0);
        assert!((model.form_factor - sd / 0.2).abs() < 1e-12);
        assert!((model.mass_kg - 140.0 * GRAINS_TO_KG).abs() < 1e-15);

        let drag_free = projectile_model(&params, 0.0, 2.0);
        assert_eq!(drag_free.form_factor, 0.0);
    }

    #[test]
    fn test_run_trajectory_reaches_max_range() {
        let request = TrajectoryRequest::new(copper_design(), Environment::default());
        let report = run_trajectory(&request);
        let samples = &report.trajectory.samples;

        assert_eq!(report.trajectory.termination, Some(TerminationReason::MaxRange));
        assert!(samples[0].range_m < 1.0);
        assert_eq!(samples.len(), 10);
        assert!(samples.windows(2).all(|w| w[1].range_m > w[0].range_m));
        assert!(samples.windows(2).all(|w| w[1].velocity_mps < w[0].velocity_mps));
        assert!(report.trajectory.last().map_or(false, |s| s.drop_cm > 0.0));
    }

    #[test]
    fn test_bc_override() {
        let mut request = TrajectoryRequest::new(copper_design(), Environment::default());
        request.bc_g1_override = Some(0.9);
        let high = run_trajectory(&request);
        request.bc_g1_override = Some(0.2);
        let low = run_trajectory(&request);

        assert_eq!(high.bc_g1.value, 0.9);
        let v_high = high.trajectory.last().map(|s| s.velocity_mps).unwrap_or(0.0);
        let v_low = low.trajectory.last().map(|s| s.velocity_mps).unwrap_or(0.0);
        assert!(v_high > v_low);
    }

    #[test]
    fn test_twist_calibers() {
        assert!((twist_calibers(8.0, 25.4) - 8.0).abs() < 1e-12);
        assert_eq!(twist_calibers(8.0, 0.0), 0.0);
    }
}
