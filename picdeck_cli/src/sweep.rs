//! Beam energy sweeps.
//!
//! A sweep produces one deck per energy, e.g. `100:1000:100` for ten decks
//! from 100 keV to 1 MeV.

use thiserror::Error;

/// Most decks a single sweep may produce.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Absorbs rounding when `(max - min) / step` should land on a whole number.
const STEP_EPSILON: f64 = 1e-9;

/// Errors from parsing or expanding a sweep.
#[derive(Debug, Error, PartialEq)]
pub enum SweepError {
    #[error("Expected MIN:MAX:STEP, got `{0}`")]
    Format(String),

    #[error("Invalid number `{0}` in sweep")]
    Number(String),

    #[error("Empty sweep: step must be > 0 and max >= min")]
    Empty,

    #[error("Sweep of {0} energies exceeds the limit of {}", MAX_SWEEP_POINTS)]
    TooLarge(f64),
}

/// Inclusive range of beam energies (keV).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySweep {
    pub min_kev: f64,
    pub max_kev: f64,
    pub step_kev: f64,
}

impl EnergySweep {
    pub fn new(min_kev: f64, max_kev: f64, step_kev: f64) -> Result<Self, SweepError> {
        let all_finite = min_kev.is_finite() && max_kev.is_finite() && step_kev.is_finite();
        if !all_finite || step_kev <= 0.0 || max_kev < min_kev {
            return Err(SweepError::Empty);
        }
        let steps = ((max_kev - min_kev) / step_kev + STEP_EPSILON).floor();
        if !steps.is_finite() || steps >= MAX_SWEEP_POINTS as f64 {
            return Err(SweepError::TooLarge(steps + 1.0));
        }
        Ok(Self {
            min_kev,
            max_kev,
            step_kev,
        })
    }

    /// Number of energies in the sweep, at most [`MAX_SWEEP_POINTS`].
    pub fn count(&self) -> usize {
        let steps = ((self.max_kev - self.min_kev) / self.step_kev + STEP_EPSILON).floor();
        (steps as usize)
            .checked_add(1)
            .map_or(MAX_SWEEP_POINTS, |n| n.min(MAX_SWEEP_POINTS))
    }

    /// All energies, `min, min+step, ..., max`.
    pub fn values(&self) -> Vec<f64> {
        // Multiply instead of accumulating so the endpoint does not drift.
        (0..self.count())
            .map(|i| self.min_kev + i as f64 * self.step_kev)
            .collect()
    }
}

impl std::str::FromStr for EnergySweep {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err(SweepError::Format(s.to_string()));
        }
        let mut numbers = [0.0; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| SweepError::Number(part.to_string()))?;
        }
        Self::new(numbers[0], numbers[1], numbers[2])
    }
}
