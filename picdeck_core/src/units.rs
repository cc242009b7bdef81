//! Normalization constants.
//!
//! Every length and time in a deck is expressed in the engine's normalized
//! units, where one reference wavelength (or laser period) equals `L0 = 2π`.

use std::f64::consts::PI;

/// Conversion from the normalization length to one reference wavelength.
pub const L0: f64 = 2.0 * PI;

/// Speed of light as written in the reference decks (m/s).
pub const SPEED_OF_LIGHT_SI: f64 = 3e8;

/// Reference wavelength (m).
pub const REFERENCE_WAVELENGTH_SI: f64 = 1e-6;

/// Electron rest energy (keV).
pub const ELECTRON_REST_ENERGY_KEV: f64 = 511.0;

/// Proton to electron mass ratio used for ion masses.
pub const PROTON_ELECTRON_MASS_RATIO: f64 = 1836.0;

/// Reference angular frequency in SI units (rad/s).
pub fn reference_angular_frequency_si() -> f64 {
    L0 * SPEED_OF_LIGHT_SI / REFERENCE_WAVELENGTH_SI
}

/// Converts a count of wavelengths (or periods) to normalized units.
pub fn wavelengths(n: f64) -> f64 {
    n * L0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_frequency() {
        // ~1.88e15 rad/s for a 1 µm wavelength
        assert_relative_eq!(reference_angular_frequency_si(), 1.884955592153876e15, max_relative = 1e-12);
    }

    #[test]
    fn test_wavelengths() {
        assert_relative_eq!(wavelengths(1.0), L0);
        assert_relative_eq!(wavelengths(160.0) / wavelengths(5.0), 32.0, epsilon = 1e-12);
    }
}
