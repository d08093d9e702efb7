use crate::constants::{KELVIN_OFFSET, MOLAR_MASS_AIR, SPEED_OF_SOUND_0C_MPS, UNIVERSAL_GAS_CONSTANT};

/// Dry-air density from the ideal gas law.
///
/// # Arguments
/// * `pressure_hpa` - Station pressure in hectopascals
/// * `temperature_c` - Air temperature in Celsius
///
/// # Returns
/// * Density in kg/m³, or 0 at or below absolute zero
pub fn air_density(pressure_hpa: f64, temperature_c: f64) -> f64 {
    let temp_k = temperature_c + KELVIN_OFFSET;
    if temp_k <= 0.0 {
        return 0.0;
    }
    let pressure_pa = pressure_hpa * 100.0;
    pressure_pa * MOLAR_MASS_AIR / (UNIVERSAL_GAS_CONSTANT * temp_k)
}

/// Speed of sound in m/s, floored at the 0°C value for non-physical temperatures
pub fn speed_of_sound(temperature_c: f64) -> f64 {
    let temp_k = temperature_c + KELVIN_OFFSET;
    if temp_k <= 0.0 {
        return SPEED_OF_SOUND_0C_MPS;
    }
    SPEED_OF_SOUND_0C_MPS * (temp_k / KELVIN_OFFSET).sqrt()
}

/// Density and speed of sound together
pub fn atmosphere(pressure_hpa: f64, temperature_c: f64) -> (f64, f64) {
    (air_density(pressure_hpa, temperature_c), speed_of_sound(temperature_c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sea_level() {
        let rho = air_density(1013.25, 15.0);
        assert!((rho - 1.225).abs() < 0.001);
        let c = speed_of_sound(15.0);
        assert!((c - 340.3).abs() < 0.2);
    }

    #[test]
    fn test_freezing_point() {
        assert!((speed_of_sound(0.0) - 331.3).abs() < 1e-12);
    }

    #[test]
    fn test_non_physical_temperature() {
        assert_eq!(air_density(1013.25, -300.0), 0.0);
        assert_eq!(speed_of_sound(-273.15), 331.3);
        assert_eq!(speed_of_sound(-500.0), 331.3);
    }

    #[test]
    fn test_density_falls_with_heat_and_altitude() {
        let (rho, _) = atmosphere(1013.25, 15.0);
        assert!(air_density(1013.25, 35.0) < rho);
        assert!(air_density(850.0, 15.0) < rho);
    }
}
