//! Deck runner - builds, validates and renders decks for a set of energies.

use crate::presets::PresetId;
use crate::sweep::EnergySweep;

use picdeck_core::{render_namelist, validate, BeamKinematics, DeckError, Namelist, ValidationReport};
use tracing::{debug, info, warn};

/// Configuration for a runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Deck to build
    pub preset: PresetId,

    /// Beam energy (keV) when no sweep is given
    pub energy_kev: f64,

    /// Optional energy sweep, overrides `energy_kev`
    pub sweep: Option<EnergySweep>,

    /// Validate only, skip rendering
    pub check_only: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            preset: PresetId::IonizationAl,
            energy_kev: 1000.0,
            sweep: None,
            check_only: false,
        }
    }
}

/// Outcome of processing one deck.
#[derive(Debug, Clone)]
pub struct DeckResult {
    /// Preset name, or the input path for stored decks
    pub label: String,

    /// Beam energy, if the deck came from a preset
    pub energy_kev: Option<f64>,

    /// Derived beam kinematics, if the deck came from a preset
    pub kinematics: Option<BeamKinematics>,

    /// The built deck (absent if construction failed)
    pub deck: Option<Namelist>,

    /// Validation findings
    pub report: ValidationReport,

    /// Rendered namelist text (absent in check-only mode or on failure)
    pub rendered: Option<String>,

    /// Whether the deck is ready to hand to the engine
    pub passed: bool,

    /// Failure message if any
    pub failure_reason: Option<String>,
}

impl DeckResult {
    fn failed(label: String, energy_kev: Option<f64>, err: DeckError) -> Self {
        Self {
            label,
            energy_kev,
            kinematics: None,
            deck: None,
            report: ValidationReport::default(),
            rendered: None,
            passed: false,
            failure_reason: Some(err.to_string()),
        }
    }
}

/// Runs deck generation.
pub struct DeckRunner {
    config: RunnerConfig,
}

impl DeckRunner {
    /// Creates a new runner.
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Energies this runner will build decks for.
    pub fn energies(&self) -> Vec<f64> {
        match &self.config.sweep {
            Some(sweep) => sweep.values(),
            None => vec![self.config.energy_kev],
        }
    }

    /// Builds and processes the preset deck for every configured energy.
    pub fn run(&self) -> Vec<DeckResult> {
        let energies = self.energies();
        info!(
            "Building {} deck(s) for preset {}",
            energies.len(),
            self.config.preset.name()
        );

        energies
            .into_iter()
            .map(|energy| self.run_energy(energy))
            .collect()
    }

    /// Builds and processes the preset deck for one energy.
    pub fn run_energy(&self, energy_kev: f64) -> DeckResult {
        let label = self.config.preset.name().to_string();

        let kinematics = match BeamKinematics::from_kinetic_energy_kev(energy_kev) {
            Ok(k) => k,
            Err(e) => return DeckResult::failed(label, Some(energy_kev), e),
        };
        let deck = self.config.preset.build_for(&kinematics);

        debug!(
            "E={} keV -> ratio={:.6}, v/c={:.6}, p/mc={:.6}",
            energy_kev, kinematics.energy_ratio, kinematics.velocity, kinematics.momentum
        );

        let mut result = self.process(label, deck);
        result.energy_kev = Some(energy_kev);
        result.kinematics = Some(kinematics);
        result
    }

    /// Validates and renders an existing deck.
    pub fn process(&self, label: String, deck: Namelist) -> DeckResult {
        let report = validate(&deck);

        if !report.is_ok() {
            let reason = report
                .errors()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            warn!("{}: {} validation error(s)", label, report.error_count());
            return DeckResult {
                label,
                energy_kev: None,
                kinematics: None,
                deck: Some(deck),
                report,
                rendered: None,
                passed: false,
                failure_reason: Some(reason),
            };
        }

        let rendered = if self.config.check_only {
            None
        } else {
            match render_namelist(&deck) {
                Ok(text) => Some(text),
                Err(e) => {
                    let mut failed = DeckResult::failed(label, None, e);
                    failed.deck = Some(deck);
                    failed.report = report;
                    return failed;
                }
            }
        };

        DeckResult {
            label,
            energy_kev: None,
            kinematics: None,
            deck: Some(deck),
            report,
            rendered,
            passed: true,
            failure_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_energy() {
        let runner = DeckRunner::new(RunnerConfig::default());
        let results = runner.run();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!(result.passed, "{:?}", result.failure_reason);
        assert_relative_eq!(result.kinematics.unwrap().velocity, 0.9410790, epsilon = 1e-6);
        assert!(result.rendered.as_ref().unwrap().contains("Collisions("));
    }

    #[test]
    fn test_sweep_builds_each_energy() {
        let config = RunnerConfig {
            sweep: Some(EnergySweep::new(100.0, 300.0, 100.0).unwrap()),
            ..Default::default()
        };
        let results = DeckRunner::new(config).run();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed));

        let uppers: Vec<f64> = results
            .iter()
            .map(|r| r.deck.as_ref().unwrap().diag_particle_binning[0].axes[0].upper)
            .collect();
        assert!(uppers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_deck_uses_reported_kinematics() {
        let result = DeckRunner::new(RunnerConfig::default()).run_energy(250.0);
        let kinematics = result.kinematics.unwrap();
        let deck = result.deck.unwrap();

        assert_eq!(deck.species[0].mean_velocity.x, kinematics.velocity);
        assert_eq!(deck.diag_particle_binning[0].axes[0].upper, kinematics.energy_ratio);
    }

    #[test]
    fn test_check_only_skips_render() {
        let config = RunnerConfig {
            check_only: true,
            ..Default::default()
        };
        let result = DeckRunner::new(config).run_energy(1000.0);
        assert!(result.passed);
        assert!(result.rendered.is_none());
    }

    #[test]
    fn test_negative_energy_fails() {
        let result = DeckRunner::new(RunnerConfig::default()).run_energy(-10.0);
        assert!(!result.passed);
        assert!(result.failure_reason.unwrap().contains("Invalid kinetic energy"));
    }

    #[test]
    fn test_zero_energy_fails_validation() {
        // A beam at rest has an empty energy histogram range.
        let result = DeckRunner::new(RunnerConfig::default()).run_energy(0.0);
        assert!(!result.passed);
        assert!(result.report.error_count() >= 1);
        assert!(result.failure_reason.unwrap().contains("lower 0 >= upper 0"));
    }

    #[test]
    fn test_process_stored_deck() {
        let deck = PresetId::IonizationAl.build(1000.0).unwrap();
        let result = DeckRunner::new(RunnerConfig::default()).process("stored.json".into(), deck);
        assert!(result.passed);
        assert!(result.energy_kev.is_none());
    }
}
