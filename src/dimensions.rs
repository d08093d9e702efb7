//! Weight-to-dimensions solver.
//!
//! Works backwards from a target mass: the material volume is split into an
//! ogive (paraboloid), a boat-tail frustum, the driving bands and the body
//! gaps between them. The boat-tail is shortened until the gaps needed to
//! hold the remaining volume at least cover the requested band spacing.

use serde::Serialize;

use crate::bc_estimation::{sectional_density, volume_from_weight, weight_from_volume};
use crate::constants::{GRAINS_TO_GRAMS, MAX_BOAT_TAIL_FRACTION};
use crate::design::{BaseFamily, DesignParameters};
use crate::drag_model::BallisticCoefficient;
use crate::form_factor::{refined_form_factor, ShapeCorrections};
use crate::profile::{BodyStrategy, MIN_BASE_RADIUS_FRACTION};
use crate::validation::{correct_cross_section, ValidationIssue, ValidationReport};

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Initial boat-tail estimate in groove diameters
const INITIAL_BOAT_TAIL_CALIBERS: f64 = 0.7;

/// Remaining fraction of the initial boat-tail below which a warning is raised
const BOAT_TAIL_DISCARD_FRACTION: f64 = 0.25;

#[derive(Debug, Clone, Serialize)]
pub struct DimensionSolution {
    pub total_length_mm: f64,
    pub boat_tail_length_mm: f64,
    /// Band coverage plus gap length
    pub bearing_length_mm: f64,
    pub ogive_length_mm: f64,
    pub gap_length_needed_mm: f64,
    /// Gap length implied by the requested band spacing
    pub gap_coverage_mm: f64,
    pub target_weight_grains: f64,
    pub calculated_weight_grains: f64,
    pub weight_error_percent: f64,
    pub sectional_density: f64,
    pub length_diameter_ratio: f64,
    pub meplat_ratio: f64,
    pub form_factor: f64,
    pub ballistic_coefficient: BallisticCoefficient,
    pub iterations: usize,
    pub is_valid: bool,
    pub message: String,
    pub report: ValidationReport,
}

impl DimensionSolution {
    /// Copy of `params` with the solved length and boat-tail applied.
    ///
    /// A valid solution also carries over the cross-section corrections the
    /// solver made; an invalid one returns `params` unchanged.
    pub fn apply_to(&self, params: &DesignParameters) -> DesignParameters {
        if !self.is_valid {
            return params.clone();
        }
        let (mut out, _) = correct_cross_section(params);
        out.length_mm = self.total_length_mm;
        if out.base == BaseFamily::BoatTail {
            out.boat_tail_length_mm = self.boat_tail_length_mm;
        }
        out
    }
}

/// Radii and volume formulas shared by the solver and its weight check
struct VolumeModel {
    groove_radius: f64,
    body_radius: f64,
    band_radius: f64,
    taper: f64,
}

impl VolumeModel {
    fn new(params: &DesignParameters) -> Self {
        let strategy = BodyStrategy::select(params);
        Self {
            groove_radius: params.groove_diameter_mm / 2.0,
            body_radius: strategy.body_radius(params),
            band_radius: strategy.band_radius(params),
            taper: params.effective_boat_tail_angle_deg().to_radians().tan(),
        }
    }

    fn body_area(&self) -> f64 {
        std::f64::consts::PI * self.body_radius * self.body_radius
    }

    /// Paraboloid approximation
    fn ogive_volume(&self, ogive_length: f64) -> f64 {
        self.body_area() * ogive_length / 2.0
    }

    fn boat_tail_volume(&self, length: f64) -> f64 {
        if length <= 0.0 {
            return 0.0;
        }
        let r1 = self.body_radius;
        let r0 = (r1 - length * self.taper)
            .max(self.groove_radius * MIN_BASE_RADIUS_FRACTION)
            .min(r1);
        std::f64::consts::PI * length / 3.0 * (r0 * r0 + r0 * r1 + r1 * r1)
    }

    /// Full band cylinders: body core plus the raised annulus
    fn band_volume(&self, count: u32, band_length: f64) -> f64 {
        let core = self.body_area();
        let annulus = std::f64::consts::PI
            * (self.band_radius * self.band_radius - self.body_radius * self.body_radius);
        count as f64 * band_length * (core + annulus)
    }
}

/// Material volume of a complete design under the solver's component model
pub fn design_volume_mm3(params: &DesignParameters) -> f64 {
    let model = VolumeModel::new(params);
    let ogive = params.ogive_length_mm();
    let boat_tail = params.effective_boat_tail_mm();
    let body = (params.length_mm - ogive - boat_tail).max(0.0);
    let band_count = if params.band_length_mm > 0.0 { params.band_count } else { 0 };
    let annulus = model.band_volume(band_count, params.band_length_mm)
        - band_count as f64 * params.band_length_mm * model.body_area();

    model.ogive_volume(ogive) + model.boat_tail_volume(boat_tail) + model.body_area() * body + annulus
}

fn invalid(
    params: &DesignParameters,
    boat_tail: f64,
    gap_needed: f64,
    gap_coverage: f64,
    iterations: usize,
    message: String,
    report: ValidationReport,
) -> DimensionSolution {
    let groove = params.groove_diameter_mm;
    DimensionSolution {
        total_length_mm: 0.0,
        boat_tail_length_mm: boat_tail,
        bearing_length_mm: 0.0,
        ogive_length_mm: params.ogive_length_mm(),
        gap_length_needed_mm: gap_needed,
        gap_coverage_mm: gap_coverage,
        target_weight_grains: params.mass_grains,
        calculated_weight_grains: 0.0,
        weight_error_percent: 100.0,
        sectional_density: 0.0,
        length_diameter_ratio: 0.0,
        meplat_ratio: if groove > 0.0 { params.meplat_diameter_mm / groove } else { 0.0 },
        form_factor: 0.0,
        ballistic_coefficient: BallisticCoefficient::g1(0.0),
        iterations,
        is_valid: false,
        message,
        report,
    }
}

/// Solve overall length and boat-tail length for the target mass in `params`.
///
/// `params.length_mm` and `params.boat_tail_length_mm` are ignored; every
/// other field is an input. Never fails: when no layout is found within
/// `max_iterations` the result has `is_valid == false` and a message naming
/// the final gap shortfall.
pub fn solve_dimensions(params: &DesignParameters, max_iterations: usize) -> DimensionSolution {
    let (p, mut report) = correct_cross_section(params);

    if !(p.mass_grains > 0.0) || !(p.density_g_cm3 > 0.0) {
        let message = "Target weight and material density must be positive".to_string();
        return invalid(&p, 0.0, 0.0, 0.0, 0, message, report);
    }

    let model = VolumeModel::new(&p);
    let ogive_length = p.ogive_length_mm();
    if !(model.body_area() > 0.0) || !(ogive_length > 0.0) || !ogive_length.is_finite() {
        let message = format!(
            "Body diameter ({:.3}mm) and ogive length ({:.3}mm) must be positive and finite",
            p.body_diameter_mm(),
            ogive_length
        );
        return invalid(&p, 0.0, 0.0, 0.0, 0, message, report);
    }

    let volume_total = volume_from_weight(p.mass_grains, p.density_g_cm3);
    let volume_ogive = model.ogive_volume(ogive_length);

    let band_count = if p.band_length_mm > 0.0 { p.band_count } else { 0 };
    let band_coverage = band_count as f64 * p.band_length_mm.max(0.0);
    let gap_coverage = if band_count > 1 {
        (band_count - 1) as f64 * p.band_spacing_mm.max(0.0)
    } else {
        0.0
    };
    let volume_bands = model.band_volume(band_count, p.band_length_mm.max(0.0));

    let initial_boat_tail = match p.base {
        BaseFamily::BoatTail => p.groove_diameter_mm * INITIAL_BOAT_TAIL_CALIBERS,
        BaseFamily::Flat => 0.0,
    };
    let mut boat_tail = initial_boat_tail;
    let mut last_gap: Option<f64> = None;

    for iteration in 1..=max_iterations {
        let volume_bearing = volume_total - volume_ogive - model.boat_tail_volume(boat_tail);
        if volume_bearing <= 0.0 {
            boat_tail *= 0.8;
            continue;
        }

        let volume_gaps = volume_bearing - volume_bands;
        if volume_gaps < 0.0 {
            boat_tail *= 0.9;
            continue;
        }

        let gap_needed = volume_gaps / model.body_area();
        last_gap = Some(gap_needed);
        if gap_needed < gap_coverage {
            boat_tail *= 0.9;
            continue;
        }

        let bearing_length = band_coverage + gap_needed;
        let total_length = boat_tail + bearing_length + ogive_length;
        if boat_tail > MAX_BOAT_TAIL_FRACTION * total_length {
            boat_tail *= 0.9;
            continue;
        }

        let solved = DesignParameters {
            length_mm: total_length,
            boat_tail_length_mm: boat_tail,
            ..p.clone()
        };
        let calculated_weight = weight_from_volume(design_volume_mm3(&solved), p.density_g_cm3);

        let sd = sectional_density(p.groove_diameter_mm, p.mass_grains);
        let shape = ShapeCorrections {
            length_calibers: total_length / p.groove_diameter_mm,
            meplat_ratio: p.meplat_diameter_mm / p.groove_diameter_mm,
            boat_tail_angle_deg: if boat_tail > 0.0 { p.effective_boat_tail_angle_deg() } else { 0.0 },
        };
        let form_factor = refined_form_factor(p.ogive, &shape);

        if p.base == BaseFamily::BoatTail
            && boat_tail < initial_boat_tail * BOAT_TAIL_DISCARD_FRACTION
        {
            report.push(ValidationIssue::warning(
                "boat_tail_length_mm",
                format!(
                    "boat tail shrank to {:.2}mm from {:.2}mm; the {:.1}° taper has little effect",
                    boat_tail, initial_boat_tail, p.boat_tail_angle_deg
                ),
            ));
        }

        return DimensionSolution {
            total_length_mm: total_length,
            boat_tail_length_mm: boat_tail,
            bearing_length_mm: bearing_length,
            ogive_length_mm: ogive_length,
            gap_length_needed_mm: gap_needed,
            gap_coverage_mm: gap_coverage,
            target_weight_grains: p.mass_grains,
            calculated_weight_grains: calculated_weight,
            weight_error_percent: (calculated_weight - p.mass_grains).abs() / p.mass_grains * 100.0,
            sectional_density: sd,
            length_diameter_ratio: shape.length_calibers,
            meplat_ratio: shape.meplat_ratio,
            form_factor,
            ballistic_coefficient: BallisticCoefficient::g1(sd / form_factor),
            iterations: iteration,
            is_valid: true,
            message: format!(
                "Valid: gap length needed ({:.2}mm) >= gap coverage ({:.2}mm)",
                gap_needed, gap_coverage
            ),
            report,
        };
    }

    let message = match last_gap {
        Some(gap) => format!(
            "Failed to find valid dimensions after {} iterations. Gap needed ({:.2}mm) < gap coverage ({:.2}mm). \
             Try reducing band spacing or increasing target weight.",
            max_iterations, gap, gap_coverage
        ),
        None => format!(
            "Failed to find valid dimensions after {} iterations. Target weight ({:.1}gr, {:.3}g) is too low \
             to fill the ogive and bands.",
            max_iterations,
            p.mass_grains,
            p.mass_grains * GRAINS_TO_GRAMS
        ),
    };
    invalid(&p, boat_tail, last_gap.unwrap_or(0.0), gap_coverage, max_iterations, message, report)
}
