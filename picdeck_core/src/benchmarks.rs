//! Reference benchmark decks.

use crate::collisions::Collisions;
use crate::diagnostics::{BinningAxis, DiagFields, DiagParticleBinning, DiagScalar};
use crate::error::DeckError;
use crate::kinematics::BeamKinematics;
use crate::namelist::Namelist;
use crate::run::{EmBoundary, Geometry, MainBlock};
use crate::species::{ParticleBoundary, Species};
use crate::units::{reference_angular_frequency_si, wavelengths, PROTON_ELECTRON_MASS_RATIO};
use nalgebra::Vector3;
use tracing::debug;

/// Name of the beam species in the ionization benchmark.
pub const BEAM_SPECIES: &str = "electron1";

/// Name of the target species in the ionization benchmark.
pub const TARGET_SPECIES: &str = "ion1";

/// Aluminium
const ALUMINIUM_Z: u32 = 13;
const ALUMINIUM_MASS_NUMBER: f64 = 27.0;

/// Impact ionization of neutral aluminium by a mono-energetic electron beam.
///
/// 1D periodic box of 32 cells. The beam drifts along x at the velocity
/// derived from `energy_kev`; the energy histogram spans `[0, E/mc²]`.
pub fn ionization_aluminium(energy_kev: f64) -> Result<Namelist, DeckError> {
    let beam = BeamKinematics::from_kinetic_energy_kev(energy_kev)?;
    Ok(ionization_aluminium_for(&beam))
}

/// Same deck, built from already derived beam kinematics.
pub fn ionization_aluminium_for(beam: &BeamKinematics) -> Namelist {
    debug!(
        "Beam at {} keV: v/c={:.6}, p/mc={:.6}",
        beam.kinetic_energy_kev, beam.velocity, beam.momentum
    );

    let main = MainBlock {
        geometry: Geometry::Cartesian1D,
        interpolation_order: 2,
        number_of_patches: vec![4],
        timestep: wavelengths(50.0),
        sim_time: wavelengths(2000.0),
        time_fields_frozen: 100000000000.0,
        cell_length: vec![wavelengths(5.0)],
        sim_length: vec![wavelengths(160.0)],
        bc_em_type_x: vec![EmBoundary::Periodic],
        bc_em_type_y: None,
        bc_em_type_z: None,
        random_seed: 0,
        reference_angular_frequency_si: reference_angular_frequency_si(),
        print_every: 10,
    };

    let electrons = Species::electron(BEAM_SPECIES)
        .with_particles_per_cell(100)
        .with_mean_velocity(Vector3::new(beam.velocity, 0.0, 0.0))
        .with_temperature(0.0000000001)
        .with_time_frozen(100000000.0)
        .with_particle_boundaries(ParticleBoundary::None)
        .with_c_part_max(10.0);

    let ions = Species::ion(
        TARGET_SPECIES,
        PROTON_ELECTRON_MASS_RATIO * ALUMINIUM_MASS_NUMBER,
        Some(ALUMINIUM_Z),
    )
    .with_particles_per_cell(100)
    .with_temperature(0.00000000001)
    .with_time_frozen(100000000.0)
    .with_particle_boundaries(ParticleBoundary::None);

    let collisions = Collisions::between([BEAM_SPECIES], [TARGET_SPECIES])
        .with_coulomb_log(0.00000001)
        .ionizing(true);

    let histogram = DiagParticleBinning {
        output: "density".to_string(),
        every: 1,
        species: vec![BEAM_SPECIES.to_string()],
        axes: vec![BinningAxis::new("ekin", 0.0, beam.energy_ratio, 1000)],
    };

    Namelist::new(main)
        .add_species(electrons)
        .add_species(ions)
        .add_collisions(collisions)
        .add_diag_fields(DiagFields { every: 1000000 })
        .add_diag_scalar(DiagScalar { every: 10000000 })
        .add_diag_particle_binning(histogram)
}
