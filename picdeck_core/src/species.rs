//! Species records.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Initial particle placement within each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionInit {
    Regular,
    Random,
    Centered,
}

/// Initial momentum distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumInit {
    /// Relativistic thermal distribution
    #[serde(rename = "maxwell-juettner")]
    MaxwellJuettner,
    #[serde(rename = "cold")]
    Cold,
    #[serde(rename = "rectangular")]
    Rectangular,
}

/// Particle behaviour at a domain boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleBoundary {
    /// Left to the engine (periodic wrap for periodic EM boundaries)
    None,
    Refl,
    Supp,
    Stop,
    Thermalize,
}

/// Spatial shape of a species' density.
///
/// Written as the flat `nb_density_*` keywords the engine reads. Length
/// vectors only apply to the axes the geometry has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityProfile {
    /// Profile tag, e.g. `constant` or `trapezoidal`
    #[serde(rename = "nb_density_profile")]
    pub profile: String,

    #[serde(rename = "nb_density_length_x", default, skip_serializing_if = "Vec::is_empty")]
    pub length_x: Vec<f64>,

    #[serde(rename = "nb_density_length_y", default, skip_serializing_if = "Vec::is_empty")]
    pub length_y: Vec<f64>,

    #[serde(rename = "nb_density_length_z", default, skip_serializing_if = "Vec::is_empty")]
    pub length_z: Vec<f64>,

    #[serde(rename = "nb_density_dbl_params", default, skip_serializing_if = "Vec::is_empty")]
    pub dbl_params: Vec<f64>,

    #[serde(rename = "nb_density_int_params", default, skip_serializing_if = "Vec::is_empty")]
    pub int_params: Vec<i64>,
}

impl DensityProfile {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            length_x: Vec::new(),
            length_y: Vec::new(),
            length_z: Vec::new(),
            dbl_params: Vec::new(),
            int_params: Vec::new(),
        }
    }

    /// Uniform density, what the engine assumes when no profile is given.
    pub fn constant() -> Self {
        Self::new("constant")
    }

    /// Sets the length parameters, one vector per axis in x, y, z order.
    pub fn with_lengths(mut self, lengths: &[Vec<f64>]) -> Self {
        let mut axes = lengths.iter().cloned();
        self.length_x = axes.next().unwrap_or_default();
        self.length_y = axes.next().unwrap_or_default();
        self.length_z = axes.next().unwrap_or_default();
        self
    }

    pub fn with_dbl_params(mut self, params: Vec<f64>) -> Self {
        self.dbl_params = params;
        self
    }

    pub fn with_int_params(mut self, params: Vec<i64>) -> Self {
        self.int_params = params;
        self
    }

    /// Length vectors by axis, x first.
    pub fn lengths(&self) -> [&[f64]; 3] {
        [self.length_x.as_slice(), self.length_y.as_slice(), self.length_z.as_slice()]
    }
}

/// A `Species` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Unique name other blocks refer to
    pub species_type: String,

    pub position_initialization: PositionInit,

    pub momentum_initialization: MomentumInit,

    pub n_part_per_cell: u32,

    /// Mass in electron masses
    pub mass: f64,

    /// Charge in elementary charges
    pub charge: f64,

    /// Density in critical-density units
    pub nb_density: f64,

    /// Drift velocity (fraction of c)
    pub mean_velocity: Vector3<f64>,

    /// Temperature per axis (m_e c² units)
    pub temperature: Vector3<f64>,

    /// Time before the species becomes mobile
    pub time_frozen: f64,

    pub bc_part_type_xmin: ParticleBoundary,
    pub bc_part_type_xmax: ParticleBoundary,
    pub bc_part_type_ymin: ParticleBoundary,
    pub bc_part_type_ymax: ParticleBoundary,

    /// Buffer growth factor for particle storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_part_max: Option<f64>,

    /// Enables ionization physics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_number: Option<u32>,

    /// Density profile; the engine assumes `constant` when absent
    #[serde(flatten)]
    pub density_profile: Option<DensityProfile>,
}

impl Species {
    /// Creates an electron species at rest with default sampling.
    pub fn electron(name: impl Into<String>) -> Self {
        Self {
            species_type: name.into(),
            position_initialization: PositionInit::Regular,
            momentum_initialization: MomentumInit::MaxwellJuettner,
            n_part_per_cell: 100,
            mass: 1.0,
            charge: -1.0,
            nb_density: 1.0,
            mean_velocity: Vector3::zeros(),
            temperature: Vector3::zeros(),
            time_frozen: 0.0,
            bc_part_type_xmin: ParticleBoundary::None,
            bc_part_type_xmax: ParticleBoundary::None,
            bc_part_type_ymin: ParticleBoundary::None,
            bc_part_type_ymax: ParticleBoundary::None,
            c_part_max: None,
            atomic_number: None,
            density_profile: None,
        }
    }

    /// Creates a neutral ion species of `mass` electron masses.
    ///
    /// Giving an atomic number lets ionizing collisions strip its electrons.
    pub fn ion(name: impl Into<String>, mass: f64, atomic_number: Option<u32>) -> Self {
        Self {
            mass,
            charge: 0.0,
            atomic_number,
            ..Self::electron(name)
        }
    }

    pub fn with_mean_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.mean_velocity = velocity;
        self
    }

    /// Sets an isotropic temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Vector3::repeat(temperature);
        self
    }

    pub fn with_density_profile(mut self, profile: DensityProfile) -> Self {
        self.density_profile = Some(profile);
        self
    }

    pub fn with_time_frozen(mut self, time: f64) -> Self {
        self.time_frozen = time;
        self
    }

    pub fn with_particles_per_cell(mut self, n: u32) -> Self {
        self.n_part_per_cell = n;
        self
    }

    pub fn with_c_part_max(mut self, factor: f64) -> Self {
        self.c_part_max = Some(factor);
        self
    }

    /// Applies the same behaviour on every particle boundary.
    pub fn with_particle_boundaries(mut self, bc: ParticleBoundary) -> Self {
        self.bc_part_type_xmin = bc;
        self.bc_part_type_xmax = bc;
        self.bc_part_type_ymin = bc;
        self.bc_part_type_ymax = bc;
        self
    }

    /// True if the species can take part in ionization.
    pub fn is_ionizable(&self) -> bool {
        self.atomic_number.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const REQUIRED_FIELDS: [&str; 15] = [
        "species_type",
        "position_initialization",
        "momentum_initialization",
        "n_part_per_cell",
        "mass",
        "charge",
        "nb_density",
        "mean_velocity",
        "temperature",
        "time_frozen",
        "bc_part_type_xmin",
        "bc_part_type_xmax",
        "bc_part_type_ymin",
        "bc_part_type_ymax",
        "c_part_max",
    ];

    #[test]
    fn test_ion_builder() {
        let ion = Species::ion("ion1", 1836.0 * 27.0, Some(13));
        assert_eq!(ion.charge, 0.0);
        assert_eq!(ion.mass, 49572.0);
        assert!(ion.is_ionizable());
        assert!(!Species::electron("e").is_ionizable());
    }

    #[test]
    fn test_schema_field_types() {
        let electron = Species::electron("electron1")
            .with_mean_velocity(Vector3::new(0.5, 0.0, 0.0))
            .with_temperature(1e-10)
            .with_c_part_max(10.0);
        let json = serde_json::to_value(&electron).unwrap();
        let obj = json.as_object().unwrap();

        for field in REQUIRED_FIELDS {
            assert!(obj.contains_key(field), "missing field {}", field);
        }

        assert!(obj["species_type"].is_string());
        assert!(obj["position_initialization"].is_string());
        assert!(obj["momentum_initialization"].is_string());
        assert!(obj["n_part_per_cell"].is_u64());
        assert!(obj["mass"].is_f64());
        assert!(obj["charge"].is_f64());
        assert!(obj["nb_density"].is_f64());
        assert!(obj["time_frozen"].is_f64());
        for vector in ["mean_velocity", "temperature"] {
            let items = obj[vector].as_array().unwrap();
            assert_eq!(items.len(), 3);
            assert!(items.iter().all(Value::is_f64));
        }
        for bc in ["bc_part_type_xmin", "bc_part_type_ymax"] {
            assert_eq!(obj[bc], Value::String("none".into()));
        }
        assert!(!obj.contains_key("atomic_number"));
        assert!(!obj.contains_key("nb_density_profile"));
    }

    #[test]
    fn test_density_profile_flattened() {
        let profile = DensityProfile::new("trapezoidal")
            .with_lengths(&[vec![2.0, 10.0, 2.0]])
            .with_int_params(vec![1]);
        let electron = Species::electron("e").with_density_profile(profile);
        let json = serde_json::to_value(&electron).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["nb_density_profile"], "trapezoidal");
        assert_eq!(obj["nb_density_length_x"].as_array().unwrap().len(), 3);
        assert_eq!(obj["nb_density_int_params"][0], 1);
        assert!(!obj.contains_key("nb_density_length_y"));
        assert!(!obj.contains_key("nb_density_dbl_params"));

        // Follows the other keywords rather than nesting.
        let keys: Vec<&String> = obj.keys().collect();
        assert_eq!(keys.last().map(|k| k.as_str()), Some("nb_density_int_params"));
    }

    #[test]
    fn test_density_profile_round_trip() {
        let profile = DensityProfile::new("gaussian")
            .with_lengths(&[vec![4.0], vec![1.0, 3.0]])
            .with_dbl_params(vec![0.5, 1.5]);
        let electron = Species::electron("e").with_density_profile(profile);

        let text = serde_json::to_string(&electron).unwrap();
        let back: Species = serde_json::from_str(&text).unwrap();
        assert_eq!(back, electron);
        assert_eq!(back.density_profile.unwrap().length_y, vec![1.0, 3.0]);

        let plain: Species = serde_json::from_str(&serde_json::to_string(&Species::electron("e")).unwrap()).unwrap();
        assert!(plain.density_profile.is_none());
    }

    #[test]
    fn test_momentum_init_tag() {
        let json = serde_json::to_value(MomentumInit::MaxwellJuettner).unwrap();
        assert_eq!(json, Value::String("maxwell-juettner".into()));
    }

    #[test]
    fn test_species_json_round_trip() {
        let ion = Species::ion("ion1", 49572.0, Some(13)).with_temperature(1e-11);
        let text = serde_json::to_string(&ion).unwrap();
        let back: Species = serde_json::from_str(&text).unwrap();
        assert_eq!(back, ion);
    }
}
