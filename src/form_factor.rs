/// Form factor estimates relating a design to the standard drag projectiles
use crate::design::OgiveFamily;

/// G1 form factor for an ogive family (lower is sleeker)
pub fn ogive_form_factor(ogive: OgiveFamily) -> f64 {
    match ogive {
        OgiveFamily::Tangent => 0.85,
        OgiveFamily::Secant => 0.80,
        OgiveFamily::Elliptical => 0.75,
    }
}

/// Divisor converting a G1 coefficient to G7 for a given boat-tail angle.
///
/// Flat bases use 2.3; the 5-7°, 7-9° and 9-11° bands use 2.1, 2.0 and
/// 1.95. Shallow angles interpolate toward flat, steep angles extrapolate
/// downward by 0.01 per degree.
pub fn g7_conversion_factor(boat_tail_angle_deg: f64) -> f64 {
    let angle = boat_tail_angle_deg;
    if !(angle > 0.0) {
        2.3  // Flat base
    } else if angle < 5.0 {
        2.3 - (angle / 5.0) * (2.3 - 2.1)
    } else if angle < 7.0 {
        2.1
    } else if angle <= 9.0 {
        2.0
    } else if angle <= 11.0 {
        1.95
    } else {
        1.95 - (angle - 11.0) * 0.01
    }
}

/// Shape corrections applied to the ogive form factor by the dimension solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeCorrections {
    /// Overall length in calibers
    pub length_calibers: f64,
    /// Meplat diameter over groove diameter
    pub meplat_ratio: f64,
    pub boat_tail_angle_deg: f64,
}

/// Ogive form factor refined for length, meplat and boat-tail
pub fn refined_form_factor(ogive: OgiveFamily, shape: &ShapeCorrections) -> f64 {
    let mut i = ogive_form_factor(ogive);

    if shape.length_calibers > 4.0 {
        i *= 0.95;  // Long bodies
    } else if shape.length_calibers < 3.0 {
        i *= 1.05;  // Stubby bodies
    }

    if shape.meplat_ratio > 0.3 {
        i *= 1.10;  // Blunt tips
    } else if shape.meplat_ratio < 0.1 {
        i *= 0.98;  // Sharp tips
    }

    if shape.boat_tail_angle_deg > 0.0 {
        i *= 0.95;
    }

    i
}
