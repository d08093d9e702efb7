//! Parameter validation and auto-correction.
//!
//! Geometry generation is never blocked: every problem is either corrected to
//! the nearest usable value or recorded as a warning, and the caller decides
//! what to surface.

use serde::Serialize;

use crate::constants::{
    DEFAULT_DENSITY_G_CM3, GEOMETRY_TOLERANCE_MM, MAX_BANDS, MAX_BOAT_TAIL_FRACTION,
};
use crate::design::{band_span, BaseFamily, DesignParameters};

/// One validation finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Name of the offending `DesignParameters` field
    pub field: String,
    /// Value substituted for the input, if any
    pub corrected_value: Option<f64>,
    pub reason: String,
}

impl ValidationIssue {
    pub fn corrected(field: &str, value: f64, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            corrected_value: Some(value),
            reason: reason.into(),
        }
    }

    pub fn warning(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            corrected_value: None,
            reason: reason.into(),
        }
    }

    pub fn is_correction(&self) -> bool {
        self.corrected_value.is_some()
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.corrected_value {
            Some(v) => write!(f, "{}: {} (using {:.3})", self.field, self.reason, v),
            None => write!(f, "{}: {}", self.field, self.reason),
        }
    }
}

/// Ordered list of findings for one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.issues.iter().filter(move |i| i.field == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }
}

/// Minimum spacing kept between bands when squeezing them onto a short body
pub const MIN_BAND_SPACING_MM: f64 = 0.1;

/// Correct every field of `params` that would make geometry impossible.
///
/// Returns the corrected snapshot and the report describing each change.
pub fn correct_parameters(params: &DesignParameters) -> (DesignParameters, ValidationReport) {
    let (mut p, mut report) = correct_cross_section(params);

    if !(p.length_mm > 0.0) {
        let minimum = p.ogive_length_mm() + p.effective_boat_tail_mm() + p.band_span_mm().max(1.0);
        p.length_mm = minimum;
        report.push(ValidationIssue::corrected(
            "length_mm",
            minimum,
            "length must be positive",
        ));
    }

    let max_boat_tail = p.length_mm * MAX_BOAT_TAIL_FRACTION;
    if p.base == BaseFamily::BoatTail && p.boat_tail_length_mm > max_boat_tail {
        p.boat_tail_length_mm = max_boat_tail;
        report.push(ValidationIssue::corrected(
            "boat_tail_length_mm",
            max_boat_tail,
            "boat tail length should not exceed 30% of total length",
        ));
    }

    if !(p.density_g_cm3 > 0.0) {
        p.density_g_cm3 = DEFAULT_DENSITY_G_CM3;
        report.push(ValidationIssue::corrected(
            "density_g_cm3",
            DEFAULT_DENSITY_G_CM3,
            "material density must be positive",
        ));
    }

    if !(p.mass_grains > 0.0) {
        report.push(ValidationIssue::warning(
            "mass_grains",
            "mass must be positive; ballistic figures will read zero",
        ));
    }

    let body_length = p.body_length_mm();
    if body_length <= 0.0 {
        report.push(ValidationIssue::warning(
            "length_mm",
            format!(
                "ogive and base need {:.2}mm but length is only {:.2}mm",
                p.ogive_length_mm() + p.effective_boat_tail_mm(),
                p.length_mm
            ),
        ));
    }

    if p.band_count > 0 {
        let needed = p.band_span_mm();
        if needed > body_length + GEOMETRY_TOLERANCE_MM {
            let shortfall = needed - body_length.max(0.0);
            let reason = format!(
                "bands do not fit: need {:.2}mm but body is only {:.2}mm (short by {:.2}mm)",
                needed,
                body_length.max(0.0),
                shortfall
            );
            if p.band_count > 1 {
                let available = body_length - p.band_count as f64 * p.band_length_mm;
                p.band_spacing_mm = (available / (p.band_count - 1) as f64).max(MIN_BAND_SPACING_MM);
                report.push(ValidationIssue::corrected("band_spacing_mm", p.band_spacing_mm, reason));
            } else {
                report.push(ValidationIssue::warning("band_spacing_mm", reason));
            }

            let still_needed = band_span(p.band_count, p.band_length_mm, p.band_spacing_mm);
            if still_needed > body_length + GEOMETRY_TOLERANCE_MM {
                report.push(ValidationIssue::warning(
                    "band_count",
                    format!(
                        "bands overrun the body by {:.2}mm and are truncated at the ogive",
                        still_needed - body_length.max(0.0)
                    ),
                ));
            }
        }
    }

    (p, report)
}

/// Corrections that do not depend on overall length: diameters, bands,
/// ogive ratio, boat-tail signs and meplat.
///
/// The dimension solver runs only these, since length is what it solves for.
pub(crate) fn correct_cross_section(params: &DesignParameters) -> (DesignParameters, ValidationReport) {
    let defaults = DesignParameters::default();
    let mut p = params.clone();
    let mut report = ValidationReport::new();

    if !(p.groove_diameter_mm > 0.0) {
        p.groove_diameter_mm = defaults.groove_diameter_mm;
        report.push(ValidationIssue::corrected(
            "groove_diameter_mm",
            p.groove_diameter_mm,
            "diameter must be positive",
        ));
    }

    if !(p.land_diameter_mm > 0.0) || p.land_diameter_mm >= p.groove_diameter_mm {
        p.land_diameter_mm = p.groove_diameter_mm * 0.98;
        report.push(ValidationIssue::corrected(
            "land_diameter_mm",
            p.land_diameter_mm,
            "land diameter must be positive and less than groove diameter",
        ));
    }

    if p.band_count > MAX_BANDS {
        p.band_count = MAX_BANDS;
        report.push(ValidationIssue::corrected(
            "band_count",
            MAX_BANDS as f64,
            format!("number of bands must be between 0 and {}", MAX_BANDS),
        ));
    }

    if p.band_count > 0 && !(p.band_length_mm > 0.0) {
        p.band_count = 0;
        report.push(ValidationIssue::corrected(
            "band_count",
            0.0,
            "band length must be positive; body left smooth",
        ));
    }

    if p.band_spacing_mm < 0.0 {
        p.band_spacing_mm = 0.0;
        report.push(ValidationIssue::corrected(
            "band_spacing_mm",
            0.0,
            "band spacing cannot be negative",
        ));
    }

    if !(p.ogive_caliber_ratio > 0.0) {
        p.ogive_caliber_ratio = 2.0;
        report.push(ValidationIssue::corrected(
            "ogive_caliber_ratio",
            2.0,
            "ogive caliber ratio must be positive",
        ));
    } else if !(2.0..=15.0).contains(&p.ogive_caliber_ratio) {
        report.push(ValidationIssue::warning(
            "ogive_caliber_ratio",
            "ogive caliber ratio should be between 2 and 15",
        ));
    }

    if p.boat_tail_length_mm < 0.0 {
        p.boat_tail_length_mm = 0.0;
        report.push(ValidationIssue::corrected(
            "boat_tail_length_mm",
            0.0,
            "boat tail length cannot be negative",
        ));
    }

    if p.boat_tail_angle_deg < 0.0 {
        p.boat_tail_angle_deg = 0.0;
        report.push(ValidationIssue::corrected(
            "boat_tail_angle_deg",
            0.0,
            "boat tail angle cannot be negative",
        ));
    }

    let body_radius = p.body_diameter_mm() / 2.0;
    if p.meplat_diameter_mm < 0.0 {
        p.meplat_diameter_mm = 0.0;
        report.push(ValidationIssue::corrected(
            "meplat_diameter_mm",
            0.0,
            "meplat diameter cannot be negative",
        ));
    } else if p.meplat_diameter_mm / 2.0 >= body_radius {
        p.meplat_diameter_mm = body_radius;
        report.push(ValidationIssue::corrected(
            "meplat_diameter_mm",
            p.meplat_diameter_mm,
            "meplat diameter must be less than body diameter",
        ));
    }

    (p, report)
}
