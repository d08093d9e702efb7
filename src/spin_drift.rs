use crate::constants::MM_PER_INCH;

/// Meters in 100 yards
const HUNDRED_YARDS_M: f64 = 91.44;

/// Cumulative spin drift in millimeters at a range, Litz-style.
///
/// Drift per 100 yd is 1.25·(Sg + 1.2)·l^1.83 inches with `l` the length in
/// calibers; it is rescaled to 100 m and grows with range^1.5.
///
/// # Arguments
/// * `stability_factor` - Miller Sg for the design
/// * `length_mm` - Overall bullet length
/// * `diameter_mm` - Bullet diameter
/// * `range_m` - Horizontal range
pub fn spin_drift_mm(stability_factor: f64, length_mm: f64, diameter_mm: f64, range_m: f64) -> f64 {
    if diameter_mm <= 0.0 || length_mm <= 0.0 || range_m <= 0.0 {
        return 0.0;
    }

    let length_calibers = length_mm / diameter_mm;
    let drift_per_100yd_in = 1.25 * (stability_factor + 1.2) * length_calibers.powf(1.83);
    let drift_per_100m_mm = drift_per_100yd_in * MM_PER_INCH * (100.0 / HUNDRED_YARDS_M);

    drift_per_100m_mm * (range_m / 100.0).powf(1.5)
}
