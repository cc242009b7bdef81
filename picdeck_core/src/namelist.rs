//! The namelist container: every block of one deck, in declaration order.

use crate::collisions::Collisions;
use crate::diagnostics::{DiagFields, DiagParticleBinning, DiagScalar};
use crate::error::DeckError;
use crate::run::{MainBlock, MovingWindow};
use crate::species::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default file name of the rendered deck.
pub const DEFAULT_OUTPUT_SCRIPT: &str = "smilei.py";

/// Block kinds, as named by the engine's loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Main,
    MovingWindow,
    Species,
    Collisions,
    DiagFields,
    DiagScalar,
    DiagParticleBinning,
}

impl Component {
    /// Returns the block name.
    pub fn name(&self) -> &'static str {
        match self {
            Component::Main => "Main",
            Component::MovingWindow => "MovingWindow",
            Component::Species => "Species",
            Component::Collisions => "Collisions",
            Component::DiagFields => "DiagFields",
            Component::DiagScalar => "DiagScalar",
            Component::DiagParticleBinning => "DiagParticleBinning",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn default_output_script() -> String {
    DEFAULT_OUTPUT_SCRIPT.to_string()
}

/// A complete deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namelist {
    /// File name the rendered deck is written to
    #[serde(default = "default_output_script")]
    pub output_script: String,

    pub main: MainBlock,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_window: Option<MovingWindow>,

    #[serde(default)]
    pub species: Vec<Species>,

    #[serde(default)]
    pub collisions: Vec<Collisions>,

    #[serde(default)]
    pub diag_fields: Vec<DiagFields>,

    #[serde(default)]
    pub diag_scalar: Vec<DiagScalar>,

    #[serde(default)]
    pub diag_particle_binning: Vec<DiagParticleBinning>,
}

impl Namelist {
    /// Creates a deck with only a `Main` block.
    pub fn new(main: MainBlock) -> Self {
        Self {
            output_script: default_output_script(),
            main,
            moving_window: None,
            species: Vec::new(),
            collisions: Vec::new(),
            diag_fields: Vec::new(),
            diag_scalar: Vec::new(),
            diag_particle_binning: Vec::new(),
        }
    }

    pub fn with_moving_window(mut self, window: MovingWindow) -> Self {
        self.moving_window = Some(window);
        self
    }

    pub fn add_species(mut self, species: Species) -> Self {
        self.species.push(species);
        self
    }

    pub fn add_collisions(mut self, collisions: Collisions) -> Self {
        self.collisions.push(collisions);
        self
    }

    pub fn add_diag_fields(mut self, diag: DiagFields) -> Self {
        self.diag_fields.push(diag);
        self
    }

    pub fn add_diag_scalar(mut self, diag: DiagScalar) -> Self {
        self.diag_scalar.push(diag);
        self
    }

    pub fn add_diag_particle_binning(mut self, diag: DiagParticleBinning) -> Self {
        self.diag_particle_binning.push(diag);
        self
    }

    /// Number of declared blocks of a kind.
    pub fn n_components(&self, component: Component) -> usize {
        match component {
            Component::Main => 1,
            Component::MovingWindow => usize::from(self.moving_window.is_some()),
            Component::Species => self.species.len(),
            Component::Collisions => self.collisions.len(),
            Component::DiagFields => self.diag_fields.len(),
            Component::DiagScalar => self.diag_scalar.len(),
            Component::DiagParticleBinning => self.diag_particle_binning.len(),
        }
    }

    /// Returns the species block at `index`.
    pub fn species(&self, index: usize) -> Result<&Species, DeckError> {
        self.species.get(index).ok_or_else(|| {
            DeckError::component_index(Component::Species.name(), index, self.species.len())
        })
    }

    pub fn species_by_name(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.species_type == name)
    }

    /// Species names in declaration order.
    pub fn species_names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.species_type.as_str()).collect()
    }

    pub fn to_json(&self) -> Result<String, DeckError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a deck stored as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded deck from {}", path.as_ref().display());
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_species() -> Namelist {
        Namelist::new(MainBlock::default())
            .add_species(Species::electron("electron1"))
            .add_species(Species::ion("ion1", 1836.0, Some(1)))
    }

    #[test]
    fn test_component_counts() {
        let deck = two_species().add_diag_scalar(DiagScalar { every: 10 });

        assert_eq!(deck.n_components(Component::Main), 1);
        assert_eq!(deck.n_components(Component::Species), 2);
        assert_eq!(deck.n_components(Component::DiagScalar), 1);
        assert_eq!(deck.n_components(Component::MovingWindow), 0);
    }

    #[test]
    fn test_species_lookup() {
        let deck = two_species();

        assert_eq!(deck.species(1).unwrap().species_type, "ion1");
        assert_eq!(deck.species_names(), vec!["electron1", "ion1"]);
        assert!(deck.species_by_name("ion1").unwrap().is_ionizable());
        assert!(deck.species_by_name("positron").is_none());
    }

    #[test]
    fn test_species_index_out_of_range() {
        let err = two_species().species(2).unwrap_err();
        assert_eq!(err.to_string(), "Requested Species #2, but only 2 available");
    }

    #[test]
    fn test_output_script_defaults_when_absent() {
        let mut value = serde_json::to_value(two_species()).unwrap();
        value.as_object_mut().unwrap().remove("output_script");

        let deck = Namelist::from_json(&value.to_string()).unwrap();
        assert_eq!(deck.output_script, DEFAULT_OUTPUT_SCRIPT);
    }

    #[test]
    fn test_json_round_trip() {
        let deck = two_species();
        let back = Namelist::from_json(&deck.to_json().unwrap()).unwrap();
        assert_eq!(back, deck);
    }
}
