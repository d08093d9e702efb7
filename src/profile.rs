//! Axial half-profile generation.
//!
//! The profile is the (z, r) outline revolved about the bullet axis, walked
//! from the base at z = 0 to the tip at z = length. It always starts and
//! ends on the axis so a solid builder can close it without extra work.

use serde::Serialize;

use crate::constants::GEOMETRY_TOLERANCE_MM;
use crate::design::DesignParameters;
use crate::ogive::{ogive_radius_at, sample_parameters};
use crate::validation::{correct_parameters, ValidationReport, MIN_BAND_SPACING_MM};

/// Axial length of the ramp on either side of a band
pub const BAND_CHAMFER_MM: f64 = 0.2;

/// Expansion of a band over the groove radius on groove-riding bodies
pub const GROOVE_BAND_EXPANSION: f64 = 1.01;

/// Minimum boat-tail base radius as a fraction of groove radius
pub const MIN_BASE_RADIUS_FRACTION: f64 = 0.3;

/// Shortest cylindrical body kept when ogive and base consume the length
pub const MIN_BODY_LENGTH_MM: f64 = 0.1;

/// One point of the half-profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    /// Axial position from the base
    pub z_mm: f64,
    pub r_mm: f64,
}

impl ProfilePoint {
    pub fn new(z_mm: f64, r_mm: f64) -> Self {
        Self { z_mm, r_mm }
    }
}

/// How the cylindrical body is laid out, chosen once per profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyStrategy {
    /// Land-diameter body with bands expanding to the groove diameter
    LandRidingWithBands,
    LandRidingSmooth,
    /// Groove-diameter body with slightly proud bands
    GrooveRidingWithBands,
    GrooveRidingSmooth,
}

impl BodyStrategy {
    pub fn select(params: &DesignParameters) -> Self {
        match (params.land_riding, params.band_count > 0) {
            (true, true) => BodyStrategy::LandRidingWithBands,
            (true, false) => BodyStrategy::LandRidingSmooth,
            (false, true) => BodyStrategy::GrooveRidingWithBands,
            (false, false) => BodyStrategy::GrooveRidingSmooth,
        }
    }

    pub fn has_bands(self) -> bool {
        matches!(
            self,
            BodyStrategy::LandRidingWithBands | BodyStrategy::GrooveRidingWithBands
        )
    }

    pub fn is_land_riding(self) -> bool {
        matches!(
            self,
            BodyStrategy::LandRidingWithBands | BodyStrategy::LandRidingSmooth
        )
    }

    pub fn body_radius(self, params: &DesignParameters) -> f64 {
        if self.is_land_riding() {
            params.land_diameter_mm / 2.0
        } else {
            params.groove_diameter_mm / 2.0
        }
    }

    /// Outer radius of a driving band
    pub fn band_radius(self, params: &DesignParameters) -> f64 {
        let groove_radius = params.groove_diameter_mm / 2.0;
        if self.is_land_riding() {
            groove_radius
        } else {
            groove_radius * GROOVE_BAND_EXPANSION
        }
    }
}

/// Generated profile together with the parameters it was built from
#[derive(Debug, Clone, Serialize)]
pub struct BulletProfile {
    pub points: Vec<ProfilePoint>,
    pub strategy: BodyStrategy,
    /// Corrected parameters actually used for the geometry
    pub params: DesignParameters,
    pub report: ValidationReport,
}

impl BulletProfile {
    pub fn volume_mm3(&self) -> f64 {
        profile_volume_mm3(&self.points)
    }

    pub fn max_radius_mm(&self) -> f64 {
        self.points.iter().map(|p| p.r_mm).fold(0.0, f64::max)
    }
}

struct ProfileBuilder {
    points: Vec<ProfilePoint>,
}

impl ProfileBuilder {
    fn new() -> Self {
        Self { points: Vec::with_capacity(64) }
    }

    fn push(&mut self, z_mm: f64, r_mm: f64) {
        let point = ProfilePoint::new(z_mm, r_mm.max(0.0));
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    fn last_radius(&self) -> f64 {
        self.points.last().map(|p| p.r_mm).unwrap_or(0.0)
    }
}

/// Build the half-profile for a design.
///
/// Parameters are corrected first; the returned report lists every
/// correction and any band-fit shortfall.
pub fn generate_profile(params: &DesignParameters) -> BulletProfile {
    let (p, report) = correct_parameters(params);
    let strategy = BodyStrategy::select(&p);

    let groove_radius = p.groove_diameter_mm / 2.0;
    let body_radius = strategy.body_radius(&p);
    let meplat_radius = p.meplat_diameter_mm / 2.0;

    let mut b = ProfileBuilder::new();
    b.push(0.0, 0.0);

    // Base
    let boat_tail = p.effective_boat_tail_mm();
    let mut z = 0.0;
    if boat_tail > 0.0 {
        let taper = boat_tail * p.effective_boat_tail_angle_deg().to_radians().tan();
        let base_radius = (body_radius - taper).max(groove_radius * MIN_BASE_RADIUS_FRACTION);
        b.push(0.0, base_radius.min(body_radius));
        z = boat_tail;
    }
    b.push(z, body_radius);

    // Body
    let body_length = (p.length_mm - z - p.ogive_length_mm()).max(MIN_BODY_LENGTH_MM);
    let body_end = (z + body_length).min(p.length_mm);

    if strategy.has_bands() {
        let band_radius = strategy.band_radius(&p);
        let mut spacing = p.band_spacing_mm;
        if p.band_count > 1 && p.band_span_mm() > body_length + GEOMETRY_TOLERANCE_MM {
            let available = body_length - p.band_count as f64 * p.band_length_mm;
            spacing = (available / (p.band_count - 1) as f64).max(MIN_BAND_SPACING_MM);
        }

        let mut current = z;
        for i in 0..p.band_count {
            let start = if i == 0 { current } else { current + spacing };
            if start >= body_end {
                break;
            }
            if start > current {
                b.push(start, body_radius);
            }

            let end = (start + p.band_length_mm).min(body_end);
            let chamfer = BAND_CHAMFER_MM.min((end - start) / 2.0);
            let rise = start + chamfer;
            let fall = end - chamfer;
            if rise < body_end {
                b.push(rise, band_radius);
            }
            if fall > rise {
                b.push(fall, band_radius);
            }
            if end < body_end {
                b.push(end, body_radius);
            }
            current = end;
        }
        if current < body_end {
            b.push(body_end, body_radius);
        }
    } else {
        b.push(body_end, body_radius);
    }

    // Ogive
    let ogive_length = (p.length_mm - body_end).max(0.0);
    for t in sample_parameters(ogive_length) {
        let r = ogive_radius_at(p.ogive, t, body_radius, meplat_radius);
        b.push((body_end + t * ogive_length).min(p.length_mm), r);
    }

    // Tip
    if b.last_radius() > 0.0 {
        b.push(p.length_mm, 0.0);
    }

    BulletProfile {
        points: b.points,
        strategy,
        params: p,
        report,
    }
}

/// Volume of the solid of revolution described by `points`, summed as frustums
pub fn profile_volume_mm3(points: &[ProfilePoint]) -> f64 {
    points
        .windows(2)
        .map(|w| {
            let dz = w[1].z_mm - w[0].z_mm;
            let (r0, r1) = (w[0].r_mm, w[1].r_mm);
            std::f64::consts::PI * dz * (r0 * r0 + r0 * r1 + r1 * r1) / 3.0
        })
        .sum()
}
