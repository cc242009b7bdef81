//! Relativistic beam kinematics.
//!
//! A beam is specified by a single free parameter, its kinetic energy in keV.
//! Everything else placed into the deck (drift velocity, binning range) is
//! derived from the dimensionless ratio `E / (m_e c²)`.

use crate::error::DeckError;
use crate::units::ELECTRON_REST_ENERGY_KEV;
use serde::{Deserialize, Serialize};

/// Fraction of light speed for a given kinetic energy ratio.
///
/// `v/c = sqrt(1 - 1/(1+ratio)²)`, in `[0, 1)` for `ratio >= 0`.
pub fn velocity_fraction(ratio: f64) -> f64 {
    let gamma = 1.0 + ratio;
    (1.0 - 1.0 / (gamma * gamma)).sqrt()
}

/// Normalized momentum `p / (m c)` for a given kinetic energy ratio.
///
/// `sqrt((1+ratio)² - 1)`, non-negative for `ratio >= 0`.
pub fn momentum_parameter(ratio: f64) -> f64 {
    let gamma = 1.0 + ratio;
    (gamma * gamma - 1.0).sqrt()
}

/// Derived kinematic quantities for an electron beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamKinematics {
    /// Input kinetic energy (keV)
    pub kinetic_energy_kev: f64,

    /// Kinetic energy in electron rest-mass units
    pub energy_ratio: f64,

    /// Velocity as a fraction of c
    pub velocity: f64,

    /// Momentum p/mc
    pub momentum: f64,
}

impl BeamKinematics {
    /// Derives beam kinematics from a kinetic energy in keV.
    ///
    /// Negative and non-finite energies are rejected.
    pub fn from_kinetic_energy_kev(energy_kev: f64) -> Result<Self, DeckError> {
        if !energy_kev.is_finite() || energy_kev < 0.0 {
            return Err(DeckError::InvalidEnergy(energy_kev));
        }

        let energy_ratio = energy_kev / ELECTRON_REST_ENERGY_KEV;

        Ok(Self {
            kinetic_energy_kev: energy_kev,
            energy_ratio,
            velocity: velocity_fraction(energy_ratio),
            momentum: momentum_parameter(energy_ratio),
        })
    }

    /// Lorentz factor `1 + E/mc²`.
    pub fn lorentz_factor(&self) -> f64 {
        1.0 + self.energy_ratio
    }
}
