//! Binary collision blocks.

use serde::{Deserialize, Serialize};

/// A `Collisions` block between two groups of species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collisions {
    pub species1: Vec<String>,

    pub species2: Vec<String>,

    /// Fixed Coulomb logarithm (0 lets the engine compute it)
    pub coulomb_log: f64,

    /// Enables electron-impact ionization of `species2`
    pub ionizing: bool,
}

impl Collisions {
    /// Creates a non-ionizing collision block between two groups.
    pub fn between<S: Into<String>>(
        species1: impl IntoIterator<Item = S>,
        species2: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            species1: species1.into_iter().map(Into::into).collect(),
            species2: species2.into_iter().map(Into::into).collect(),
            coulomb_log: 0.0,
            ionizing: false,
        }
    }

    pub fn with_coulomb_log(mut self, coulomb_log: f64) -> Self {
        self.coulomb_log = coulomb_log;
        self
    }

    pub fn ionizing(mut self, ionizing: bool) -> Self {
        self.ionizing = ionizing;
        self
    }

    /// All species names referenced by this block.
    pub fn referenced_species(&self) -> impl Iterator<Item = &str> {
        self.species1
            .iter()
            .chain(self.species2.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let c = Collisions::between(["electron1"], ["ion1"])
            .with_coulomb_log(1e-8)
            .ionizing(true);

        assert_eq!(c.species1, vec!["electron1".to_string()]);
        assert!(c.ionizing);
        assert_eq!(c.referenced_species().collect::<Vec<_>>(), vec!["electron1", "ion1"]);
    }

    #[test]
    fn test_schema() {
        let c = Collisions::between(["a"], ["b"]);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json["species1"].is_array());
        assert!(json["coulomb_log"].is_f64());
        assert!(json["ionizing"].is_boolean());
    }
}
