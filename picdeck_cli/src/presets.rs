//! Benchmark deck presets.

use picdeck_core::benchmarks;
use picdeck_core::{BeamKinematics, DeckError, Namelist};

/// Preset identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetId {
    /// Electron-impact ionization of neutral aluminium (1D periodic)
    IonizationAl,
}

impl PresetId {
    /// Returns a list of all presets.
    pub fn all() -> Vec<PresetId> {
        vec![PresetId::IonizationAl]
    }

    /// Returns the preset name.
    pub fn name(&self) -> &'static str {
        match self {
            PresetId::IonizationAl => "ionization_al",
        }
    }

    /// Returns a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            PresetId::IonizationAl => {
                "Electron beam impact ionization of Al (Z=13), 1d3v periodic, 32 cells"
            }
        }
    }

    /// Builds the deck for a beam of `energy_kev`.
    pub fn build(&self, energy_kev: f64) -> Result<Namelist, DeckError> {
        let beam = BeamKinematics::from_kinetic_energy_kev(energy_kev)?;
        Ok(self.build_for(&beam))
    }

    /// Builds the deck for an already derived beam.
    pub fn build_for(&self, beam: &BeamKinematics) -> Namelist {
        match self {
            PresetId::IonizationAl => benchmarks::ionization_aluminium_for(beam),
        }
    }
}

impl std::fmt::Display for PresetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PresetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ionization_al" | "ionization" | "al" => Ok(PresetId::IonizationAl),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}
