/// Physical constants and unit conversions used across the engine

/// Gravitational acceleration in m/s²
pub const G_ACCEL_MPS2: f64 = 9.80665;

/// Conversion factor: meters per second to feet per second
pub const MPS_TO_FPS: f64 = 3.28084;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Grains per pound (avoirdupois)
pub const GRAINS_PER_POUND: f64 = 7000.0;

/// Grains per gram
pub const GRAINS_PER_GRAM: f64 = 15.4323584;

/// Conversion factor: grains to grams
pub const GRAINS_TO_GRAMS: f64 = 0.06479891;

/// Conversion factor: grains to kilograms
pub const GRAINS_TO_KG: f64 = 0.00006479891;

/// Cubic millimeters per cubic centimeter
pub const MM3_PER_CM3: f64 = 1000.0;

/// Conversion factor: hectopascals to inches of mercury
pub const HPA_TO_INHG: f64 = 0.0295299830714;

/// Miller reference velocity (ft/s)
pub const MILLER_REF_VELOCITY_FPS: f64 = 2800.0;

/// Standard temperature for the Miller correction, 59°F in Rankine
pub const MILLER_REF_TEMP_RANKINE: f64 = 518.67;

/// Standard pressure for the Miller correction (inHg)
pub const MILLER_REF_PRESSURE_INHG: f64 = 29.92;

/// Offset from Fahrenheit to Rankine
pub const RANKINE_OFFSET: f64 = 459.67;

/// Speed of sound at 0°C (m/s)
///
/// Temperature dependence: c = 331.3 * sqrt(T_kelvin / 273.15)
pub const SPEED_OF_SOUND_0C_MPS: f64 = 331.3;

/// Kelvin offset from Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

/// Molar mass of dry air (kg/mol)
pub const MOLAR_MASS_AIR: f64 = 0.0289644;

/// Universal gas constant (J/(mol·K))
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.31446;

/// Default material density (gilding metal 95/5) in g/cm³
pub const DEFAULT_DENSITY_G_CM3: f64 = 8.86;

/// Default material color (copper tone), RGB in 0..1
pub const DEFAULT_COLOR_RGB: [f64; 3] = [0.80, 0.50, 0.20];

/// Density band treated as monolithic copper/brass (g/cm³)
pub const MONOLITHIC_DENSITY_MIN: f64 = 7.0;
pub const MONOLITHIC_DENSITY_MAX: f64 = 9.5;

/// Miller stability thresholds
pub const STABILITY_THRESHOLD_MONOLITHIC: f64 = 1.8;
pub const STABILITY_THRESHOLD_LEAD_CORE: f64 = 1.5;

/// Fraction of the threshold at which a design is marginal rather than unstable
pub const MARGINAL_STABILITY_FRACTION: f64 = 0.67;

/// Transonic zone boundaries (Mach)
pub const TRANSONIC_ENTRY_MACH: f64 = 1.1;
pub const TRANSONIC_EXIT_MACH: f64 = 0.9;

/// Maximum number of driving bands
pub const MAX_BANDS: u32 = 6;

/// Maximum boat-tail length as a fraction of overall length
pub const MAX_BOAT_TAIL_FRACTION: f64 = 0.3;

// Numerical stability constants
/// Minimum threshold for preventing division by zero in general calculations
pub const MIN_DIVISION_THRESHOLD: f64 = 1e-12;

/// Tolerance used when comparing profile coordinates (mm)
pub const GEOMETRY_TOLERANCE_MM: f64 = 0.001;

/// Returns true when the density falls in the monolithic copper/brass band.
pub fn is_monolithic_density(density_g_cm3: f64) -> bool {
    (MONOLITHIC_DENSITY_MIN..=MONOLITHIC_DENSITY_MAX).contains(&density_g_cm3)
}
