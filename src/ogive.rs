//! Ogive curve families.
//!
//! Each curve maps a normalized axial position `t` (0 at the body junction,
//! 1 at the meplat) to a radius between the body radius and the meplat radius.

use crate::design::OgiveFamily;

/// Circular-arc profile, tangent to the body cylinder
pub fn tangent_radius(t: f64, base_radius: f64, tip_radius: f64) -> f64 {
    let delta = base_radius - tip_radius;
    if delta <= 0.0 {
        return base_radius - delta * t.clamp(0.0, 1.0);
    }
    if t <= 0.0 {
        return base_radius;
    }
    if t >= 1.0 {
        return tip_radius;
    }
    let r = tip_radius + delta * (1.0 - t * t).sqrt();
    r.clamp(tip_radius, base_radius)
}

/// Sharper power-law profile
pub fn secant_radius(t: f64, base_radius: f64, tip_radius: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    base_radius - (base_radius - tip_radius) * t.powf(1.2)
}

/// Quarter-ellipse profile
pub fn elliptical_radius(t: f64, base_radius: f64, tip_radius: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let angle = std::f64::consts::FRAC_PI_2 * (1.0 - t);
    tip_radius + (base_radius - tip_radius) * angle.sin()
}

/// Radius of an ogive of the given family at `t`
pub fn ogive_radius_at(family: OgiveFamily, t: f64, base_radius: f64, tip_radius: f64) -> f64 {
    match family {
        OgiveFamily::Tangent => tangent_radius(t, base_radius, tip_radius),
        OgiveFamily::Secant => secant_radius(t, base_radius, tip_radius),
        OgiveFamily::Elliptical => elliptical_radius(t, base_radius, tip_radius),
    }
}

/// Parameter values for sampling an ogive of `length_mm`.
///
/// About one sample per millimeter with at least 20 intervals, always
/// including the midpoint `t = 0.5`.
pub fn sample_parameters(length_mm: f64) -> Vec<f64> {
    let intervals = if length_mm.is_finite() {
        (length_mm.max(0.0).floor() as usize).max(20)
    } else {
        20
    };
    let mut ts: Vec<f64> = (0..=intervals).map(|i| i as f64 / intervals as f64).collect();

    if !ts.iter().any(|&t| t == 0.5) {
        let closest = ts
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - 0.5).abs().total_cmp(&(b.1 - 0.5).abs()))
            .map(|(i, _)| i);
        if let Some(i) = closest {
            ts[i] = 0.5;
        }
        ts.sort_by(|a, b| a.total_cmp(b));
    }
    ts
}

/// Radius of curvature of the arc generating an ogive, in millimeters.
///
/// Zero when the ratio or diameter is not positive.
pub fn ogive_radius(family: OgiveFamily, caliber_ratio: f64, diameter_mm: f64) -> f64 {
    if caliber_ratio <= 0.0 || diameter_mm <= 0.0 {
        return 0.0;
    }
    let length = caliber_ratio * diameter_mm / 2.0;
    let tangent = (length * length + (diameter_mm / 2.0).powi(2)) / diameter_mm;
    match family {
        OgiveFamily::Tangent => tangent,
        OgiveFamily::Secant => tangent * 1.1,
        OgiveFamily::Elliptical => length * 1.2,
    }
}
