/// Drag coefficient lookup for the G7 reference projectile
use once_cell::sync::Lazy;

/// Anything that can produce a drag coefficient for a Mach number.
///
/// The trajectory integrator is generic over this so tests and callers can
/// substitute alternate tables.
pub trait DragCoefficient {
    fn drag_coefficient(&self, mach: f64) -> f64;
}

/// Drag table data structure
#[derive(Debug, Clone)]
pub struct DragTable {
    pub mach_values: Vec<f64>,
    pub cd_values: Vec<f64>,
}

impl DragTable {
    /// Create a new drag table from mach and cd arrays.
    ///
    /// Mach values must be strictly increasing and both arrays the same length.
    pub fn new(mach_values: Vec<f64>, cd_values: Vec<f64>) -> Self {
        Self { mach_values, cd_values }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let mach_values = pairs.iter().map(|(m, _)| *m).collect();
        let cd_values = pairs.iter().map(|(_, cd)| *cd).collect();
        Self::new(mach_values, cd_values)
    }

    /// Piecewise-linear interpolation, clamped to the end entries outside the table
    pub fn interpolate(&self, mach: f64) -> f64 {
        let n = self.mach_values.len().min(self.cd_values.len());
        if n == 0 {
            return 0.0;
        }

        if mach.is_nan() || mach <= self.mach_values[0] {
            return self.cd_values[0];
        }
        if mach >= self.mach_values[n - 1] {
            return self.cd_values[n - 1];
        }

        // First index whose Mach is >= the query; always in 1..n here
        let idx = self.mach_values[..n].partition_point(|&m| m < mach);
        self.linear_interpolate(mach, idx - 1)
    }

    /// Linear interpolation between two points
    pub fn linear_interpolate(&self, mach: f64, idx: usize) -> f64 {
        if idx + 1 >= self.mach_values.len() || idx + 1 >= self.cd_values.len() {
            return self.cd_values.get(idx).copied().unwrap_or(0.0);
        }

        let x0 = self.mach_values[idx];
        let x1 = self.mach_values[idx + 1];
        let y0 = self.cd_values[idx];
        let y1 = self.cd_values[idx + 1];

        if (x1 - x0).abs() < crate::constants::MIN_DIVISION_THRESHOLD {
            return y0;
        }

        let t = (mach - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    pub fn max_mach(&self) -> f64 {
        self.mach_values.last().copied().unwrap_or(0.0)
    }
}

impl DragCoefficient for DragTable {
    fn drag_coefficient(&self, mach: f64) -> f64 {
        self.interpolate(mach)
    }
}

impl<T: DragCoefficient + ?Sized> DragCoefficient for &T {
    fn drag_coefficient(&self, mach: f64) -> f64 {
        (**self).drag_coefficient(mach)
    }
}

/// G7 reference pairs, Mach 0 to 3.0
const G7_REFERENCE: [(f64, f64); 22] = [
    (0.0, 0.1198),
    (0.5, 0.1197),
    (0.7, 0.1196),
    (0.8, 0.1312),
    (0.825, 0.1352),
    (0.85, 0.1404),
    (0.875, 0.1479),
    (0.9, 0.1589),
    (0.925, 0.1776),
    (0.95, 0.2034),
    (0.975, 0.2165),
    (1.0, 0.2346),
    (1.025, 0.2407),
    (1.05, 0.2497),
    (1.1, 0.2596),
    (1.2, 0.2677),
    (1.3, 0.2680),
    (1.5, 0.2656),
    (1.8, 0.2458),
    (2.0, 0.2344),
    (2.5, 0.2049),
    (3.0, 0.1776),
];

/// G7 drag table, built once on first access
static G7_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| DragTable::from_pairs(&G7_REFERENCE));

/// Shared handle to the process-wide G7 table
pub fn g7_table() -> &'static DragTable {
    &G7_DRAG_TABLE
}

/// Get the G7 drag coefficient for the given Mach number
pub fn drag_coefficient(mach: f64) -> f64 {
    G7_DRAG_TABLE.interpolate(mach)
}
