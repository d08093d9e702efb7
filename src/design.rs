//! Design parameters describing a single projectile.

use serde::{Deserialize, Serialize};

use crate::error::{DesignerError, DesignerResult};

/// Ogive curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OgiveFamily {
    Tangent,
    Secant,
    Elliptical,
}

impl OgiveFamily {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tangent" => Some(OgiveFamily::Tangent),
            "secant" => Some(OgiveFamily::Secant),
            "elliptical" | "ellipse" => Some(OgiveFamily::Elliptical),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> DesignerResult<Self> {
        Self::from_str(s).ok_or_else(|| DesignerError::UnknownOgive(s.to_string()))
    }
}

impl std::fmt::Display for OgiveFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Base shape family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseFamily {
    Flat,
    BoatTail,
}

impl BaseFamily {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(&['-', '_', ' '][..], "").as_str() {
            "flat" => Some(BaseFamily::Flat),
            "boattail" | "bt" => Some(BaseFamily::BoatTail),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> DesignerResult<Self> {
        Self::from_str(s).ok_or_else(|| DesignerError::UnknownBase(s.to_string()))
    }
}

impl std::fmt::Display for BaseFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Starting points for new designs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignPreset {
    Traditional,
    /// Very low drag: longer secant ogive, finer meplat, longer boat-tail
    Vld,
}

/// Snapshot of every dimension the engine needs.
///
/// Lengths are millimeters, mass is grains, angles are degrees and density
/// is g/cm³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    pub groove_diameter_mm: f64,
    pub land_diameter_mm: f64,
    pub length_mm: f64,
    pub mass_grains: f64,
    pub ogive: OgiveFamily,
    /// Ogive length in calibers
    pub ogive_caliber_ratio: f64,
    pub meplat_diameter_mm: f64,
    pub band_count: u32,
    pub band_length_mm: f64,
    pub band_spacing_mm: f64,
    pub base: BaseFamily,
    pub boat_tail_length_mm: f64,
    /// Half-angle of the boat-tail taper
    pub boat_tail_angle_deg: f64,
    pub density_g_cm3: f64,
    /// Body rides the land diameter with bands expanding to the groove diameter
    pub land_riding: bool,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self::preset(DesignPreset::Traditional)
    }
}

impl DesignParameters {
    pub fn preset(preset: DesignPreset) -> Self {
        let base = Self {
            groove_diameter_mm: 6.7,
            land_diameter_mm: 6.5,
            length_mm: 32.0,
            mass_grains: 140.0,
            ogive: OgiveFamily::Tangent,
            ogive_caliber_ratio: 7.0,
            meplat_diameter_mm: 1.5,
            band_count: 4,
            band_length_mm: 2.25,
            band_spacing_mm: 3.0,
            base: BaseFamily::BoatTail,
            boat_tail_length_mm: 5.0,
            boat_tail_angle_deg: 9.0,
            density_g_cm3: 8.96,
            land_riding: true,
        };

        match preset {
            DesignPreset::Traditional => base,
            DesignPreset::Vld => Self {
                ogive: OgiveFamily::Secant,
                ogive_caliber_ratio: 9.0,
                meplat_diameter_mm: 0.5,
                boat_tail_length_mm: 8.0,
                boat_tail_angle_deg: 8.0,
                ..base
            },
        }
    }

    /// Diameter of the cylindrical body
    pub fn body_diameter_mm(&self) -> f64 {
        if self.land_riding {
            self.land_diameter_mm
        } else {
            self.groove_diameter_mm
        }
    }

    /// Diameter at which the bore constrains the bullet, used by the Miller formula
    pub fn effective_diameter_mm(&self) -> f64 {
        self.body_diameter_mm()
    }

    /// Axial length of the ogive section
    pub fn ogive_length_mm(&self) -> f64 {
        self.ogive_caliber_ratio * self.groove_diameter_mm / 2.0
    }

    /// Boat-tail length actually used by the base section
    pub fn effective_boat_tail_mm(&self) -> f64 {
        match self.base {
            BaseFamily::BoatTail => self.boat_tail_length_mm.max(0.0),
            BaseFamily::Flat => 0.0,
        }
    }

    /// Boat-tail angle actually used, zero for a flat base
    pub fn effective_boat_tail_angle_deg(&self) -> f64 {
        match self.base {
            BaseFamily::BoatTail => self.boat_tail_angle_deg.max(0.0),
            BaseFamily::Flat => 0.0,
        }
    }

    /// Axial span of all bands including the gaps between them
    pub fn band_span_mm(&self) -> f64 {
        band_span(self.band_count, self.band_length_mm, self.band_spacing_mm)
    }

    /// Length available for the cylindrical body between base and ogive
    pub fn body_length_mm(&self) -> f64 {
        self.length_mm - self.ogive_length_mm() - self.effective_boat_tail_mm()
    }
}

/// Axial span of `count` bands separated by `spacing`
pub fn band_span(count: u32, band_length: f64, spacing: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 * band_length + (count - 1) as f64 * spacing
}
