//! # Bullet Designer
//!
//! Parametric projectile design engine: axial profile generation, weight to
//! length dimension solving, ballistic metrics and RK4 trajectory
//! integration with a tabulated G7 drag model.

// Re-export the main types and functions
pub use atmosphere::{air_density, atmosphere, speed_of_sound};
pub use bc_estimation::{
    ballistic_coefficient_g1, ballistic_coefficient_g7, bearing_surface_area, sectional_density,
    volume_from_weight, weight_from_volume,
};
pub use cli_api::{
    analyze_design, projectile_model, run_trajectory, twist_calibers, BallisticReport, Environment,
    TrajectoryReport, TrajectoryRequest,
};
pub use config::DesignFile;
pub use design::{BaseFamily, DesignParameters, DesignPreset, OgiveFamily};
pub use dimensions::{
    design_volume_mm3, solve_dimensions, DimensionSolution, DEFAULT_MAX_ITERATIONS,
};
pub use drag::{drag_coefficient, g7_table, DragCoefficient, DragTable};
pub use drag_model::{BallisticCoefficient, DragFamily};
pub use error::{DesignerError, DesignerResult};
pub use form_factor::{g7_conversion_factor, ogive_form_factor, refined_form_factor, ShapeCorrections};
pub use materials::{
    default_materials, lookup_color, lookup_density, MaterialDatabase, MaterialEntry,
    MaterialLookup,
};
pub use ogive::{elliptical_radius, ogive_radius, ogive_radius_at, secant_radius, tangent_radius};
pub use profile::{generate_profile, profile_volume_mm3, BodyStrategy, BulletProfile, ProfilePoint};
pub use spin_drift::spin_drift_mm;
pub use stability::{
    miller_stability, recommended_twist, stability_threshold, StabilityInputs, StabilityResult,
    StabilityStatus,
};
pub use trajectory_solver::{
    FlightConditions, ProjectileModel, TerminationReason, TrajectoryConfig, TrajectoryIter,
    TrajectoryResult, TrajectorySample, TrajectorySolver,
};
pub use validation::{correct_parameters, ValidationIssue, ValidationReport, MIN_BAND_SPACING_MM};

// Module declarations
mod atmosphere;
mod bc_estimation;
mod cli_api;
mod config;
mod constants;
mod design;
mod dimensions;
mod drag;
mod drag_model;
mod error;
mod form_factor;
mod materials;
mod ogive;
mod profile;
mod spin_drift;
mod stability;
mod trajectory_solver;
mod validation;
