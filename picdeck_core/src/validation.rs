//! Validation Module - Pre-flight Checks Before Handing a Deck to the Engine
//! ==========================================================================
//!
//! The engine only rejects an inconsistent deck once it has been loaded on
//! every rank. This module runs the same checks up front so a bad deck never
//! leaves the workstation.
//!
//! Checks:
//! - Grid shape (dimensions, whole cells, power-of-two patches)
//! - EM boundary tags allowed for the geometry
//! - Species uniqueness and physical sanity
//! - Cross references from collisions and diagnostics
//!
//! Usage:
//! ```ignore
//! use picdeck_core::validation::validate;
//!
//! let report = validate(&deck);
//! report.print();
//! report.into_result()?;
//! ```

use crate::error::DeckError;
use crate::namelist::{Component, Namelist};
use crate::run::{EmBoundary, Geometry, MainBlock};
use crate::species::{DensityProfile, MomentumInit, Species};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Relative tolerance when checking that a length is a whole number of cells.
const WHOLE_CELL_TOLERANCE: f64 = 1e-9;

// =============================================================================
// ISSUES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// The engine would refuse the deck
    Error,
    /// Loads, but likely not what was intended
    Warning,
}

/// A single finding about a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub component: String,
    pub message: String,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "[{}] {}: {}", tag, self.component, self.message)
    }
}

// =============================================================================
// VALIDATOR
// =============================================================================

/// Collects issues while walking a deck
struct Validator {
    issues: Vec<Issue>,
}

impl Validator {
    fn new() -> Self {
        Self { issues: Vec::new() }
    }

    fn error(&mut self, component: impl std::fmt::Display, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Error,
            component: component.to_string(),
            message: message.into(),
        });
    }

    fn warning(&mut self, component: impl std::fmt::Display, message: impl Into<String>) {
        let issue = Issue {
            severity: Severity::Warning,
            component: component.to_string(),
            message: message.into(),
        };
        warn!("{}", issue);
        self.issues.push(issue);
    }

    fn check_main(&mut self, main: &MainBlock) {
        let c = Component::Main;
        let dims = main.geometry.dimensions();

        if main.interpolation_order != 2 && main.interpolation_order != 4 {
            self.error(c, format!("interpolation_order must be 2 or 4, got {}", main.interpolation_order));
        }

        for (field, len) in [
            ("cell_length", main.cell_length.len()),
            ("sim_length", main.sim_length.len()),
            ("number_of_patches", main.number_of_patches.len()),
        ] {
            if len != dims {
                self.error(c, format!("{} has {} entries, geometry {} needs {}", field, len, main.geometry, dims));
            }
        }

        for (field, value) in [("timestep", main.timestep), ("sim_time", main.sim_time)] {
            if !(value.is_finite() && value > 0.0) {
                self.error(c, format!("{} must be finite and > 0, got {}", field, value));
            }
        }
        if !main.time_fields_frozen.is_finite() || main.time_fields_frozen < 0.0 {
            self.error(c, "time_fields_frozen must be finite and >= 0");
        }

        for (axis, (&cell, &length)) in main.cell_length.iter().zip(&main.sim_length).enumerate() {
            if !(cell.is_finite() && cell > 0.0) || !(length.is_finite() && length > 0.0) {
                self.error(c, format!("cell_length and sim_length along axis {} must be finite and > 0", axis));
                continue;
            }
            let cells = length / cell;
            if (cells - cells.round()).abs() > WHOLE_CELL_TOLERANCE * cells.max(1.0) {
                self.error(c, format!("sim_length along axis {} is {} cells, not a whole number", axis, cells));
            }
        }

        for (axis, &patches) in main.number_of_patches.iter().enumerate() {
            if !patches.is_power_of_two() {
                self.error(c, format!("number_of_patches along axis {} must be a power of two, got {}", axis, patches));
            }
        }

        self.check_em_boundaries(main);

        // Frozen fields never advance, so CFL only matters once they are released.
        if dims == 1 && main.time_fields_frozen < main.sim_time {
            if let Some(&dx) = main.cell_length.first() {
                if main.timestep >= dx {
                    self.warning(c, format!("timestep {} >= cell_length {} violates the CFL condition", main.timestep, dx));
                }
            }
        }
    }

    fn check_em_boundaries(&mut self, main: &MainBlock) {
        let c = Component::Main;
        let geometry = main.geometry;
        let allowed = geometry.allowed_em_boundaries();

        let check_axis = |v: &mut Self, field: &str, tags: &[EmBoundary]| {
            if tags.is_empty() || tags.len() > 2 {
                v.error(c, format!("{} must hold 1 or 2 entries, got {}", field, tags.len()));
            }
            for tag in tags {
                if !allowed.contains(tag) {
                    v.error(c, format!("Unknown EM boundary `{}` in {} for geometry {}", tag, field, geometry));
                }
            }
        };

        check_axis(self, "bc_em_type_x", main.bc_em_type_x.as_slice());

        match geometry {
            Geometry::Cartesian1D => {}
            Geometry::Cartesian2D | Geometry::Cartesian3D => {
                match &main.bc_em_type_y {
                    Some(tags) => check_axis(self, "bc_em_type_y", tags.as_slice()),
                    None => self.error(c, format!("bc_em_type_y is required for geometry {}", geometry)),
                }
                if geometry == Geometry::Cartesian3D {
                    match &main.bc_em_type_z {
                        Some(tags) => check_axis(self, "bc_em_type_z", tags.as_slice()),
                        None => self.error(c, "bc_em_type_z is required for geometry 3d3v"),
                    }
                }
            }
            Geometry::ThetaMode => {
                // The lower radial side is the axis; only the outer side is configurable.
                let outer = main.bc_em_type_y.as_ref().and_then(|tags| tags.last());
                if outer != Some(&EmBoundary::Buneman) {
                    self.error(c, "bc_em_type_y upper boundary must be `Buneman` for geometry 3drz");
                }
            }
        }
    }

    fn check_moving_window(&mut self, deck: &Namelist) {
        if let Some(window) = &deck.moving_window {
            if !(0.0..=1.0).contains(&window.vx_win) {
                self.error(Component::MovingWindow, format!("vx_win must lie in [0, 1], got {}", window.vx_win));
            }
            if !window.t_move_win.is_finite() {
                self.error(Component::MovingWindow, "t_move_win must be finite");
            }
        }
    }

    fn check_species(&mut self, index: usize, species: &Species, geometry: Geometry) {
        let c = format!("Species #{} ({})", index, species.species_type);

        if species.species_type.is_empty() {
            self.error(&c, "species_type must not be empty");
        }
        if !(species.mass.is_finite() && species.mass > 0.0) {
            self.error(&c, format!("mass must be finite and > 0, got {}", species.mass));
        }
        if species.n_part_per_cell == 0 {
            self.error(&c, "n_part_per_cell must be > 0");
        }
        if !species.charge.is_finite() || !species.nb_density.is_finite() || species.nb_density < 0.0 {
            self.error(&c, "charge must be finite and nb_density finite and >= 0");
        }
        if species.mean_velocity.iter().chain(species.temperature.iter()).any(|x| !x.is_finite()) {
            self.error(&c, "mean_velocity and temperature components must be finite");
        }
        if species.temperature.iter().any(|&t| t < 0.0) {
            self.error(&c, "temperature components must be >= 0");
        }
        if species.momentum_initialization == MomentumInit::MaxwellJuettner
            && species.mean_velocity.norm() >= 1.0
        {
            self.warning(&c, format!("mean velocity {:.4} is not below c", species.mean_velocity.norm()));
        }
        if let Some(factor) = species.c_part_max {
            if !(factor.is_finite() && factor >= 1.0) {
                self.error(&c, format!("c_part_max must be >= 1, got {}", factor));
            }
        }
        if species.atomic_number == Some(0) {
            self.error(&c, "atomic_number must be > 0");
        }

        match &species.density_profile {
            Some(profile) => self.check_density_profile(&c, profile, geometry),
            None => self.warning(&c, "nb_density_profile not defined, assumed constant"),
        }
    }

    fn check_density_profile(&mut self, c: &str, profile: &DensityProfile, geometry: Geometry) {
        if profile.profile.is_empty() {
            self.error(c, "nb_density_profile must not be empty");
        }
        let dims = geometry.dimensions();
        for (axis, (name, lengths)) in ["x", "y", "z"].iter().zip(profile.lengths()).enumerate() {
            if axis >= dims && !lengths.is_empty() {
                self.error(c, format!("nb_density_length_{} given, but geometry {} has {} dimension(s)", name, geometry, dims));
            }
            if lengths.iter().any(|l| !(l.is_finite() && *l >= 0.0)) {
                self.error(c, format!("nb_density_length_{} entries must be finite and >= 0", name));
            }
        }
        if profile.dbl_params.iter().any(|p| !p.is_finite()) {
            self.error(c, "nb_density_dbl_params entries must be finite");
        }
    }

    fn check_references(&mut self, deck: &Namelist) {
        let mut seen = HashSet::new();
        for name in deck.species_names() {
            if !seen.insert(name) {
                self.error(Component::Species, format!("duplicate species_type `{}`", name));
            }
        }

        for (i, collisions) in deck.collisions.iter().enumerate() {
            let c = format!("Collisions #{}", i);
            for name in collisions.referenced_species() {
                if !seen.contains(name) {
                    self.error(&c, format!("references undeclared species `{}`", name));
                }
            }
            if collisions.species1.is_empty() || collisions.species2.is_empty() {
                self.error(&c, "species1 and species2 must both be non-empty");
            }
            if !collisions.coulomb_log.is_finite() || collisions.coulomb_log < 0.0 {
                self.error(&c, "coulomb_log must be finite and >= 0");
            }
            if collisions.ionizing {
                let ionizable = collisions
                    .species2
                    .iter()
                    .filter_map(|name| deck.species_by_name(name))
                    .any(Species::is_ionizable);
                if !ionizable {
                    self.error(&c, "ionizing collisions need an atomic_number on a species2 member");
                }
            }
        }

        for species in deck.species.iter().filter(|s| s.is_ionizable()) {
            let used = deck
                .collisions
                .iter()
                .any(|c| c.ionizing && c.species2.iter().any(|n| *n == species.species_type));
            if !used {
                self.warning(
                    Component::Species,
                    format!("`{}` has an atomic_number but no ionizing collision targets it", species.species_type),
                );
            }
        }
    }

    fn check_diagnostics(&mut self, deck: &Namelist) {
        for (i, diag) in deck.diag_fields.iter().enumerate() {
            if diag.every == 0 {
                self.error(format!("DiagFields #{}", i), "every must be > 0");
            }
        }
        for (i, diag) in deck.diag_scalar.iter().enumerate() {
            if diag.every == 0 {
                self.error(format!("DiagScalar #{}", i), "every must be > 0");
            }
        }
        for (i, diag) in deck.diag_particle_binning.iter().enumerate() {
            let c = format!("DiagParticleBinning #{}", i);
            if diag.every == 0 {
                self.error(&c, "every must be > 0");
            }
            if diag.species.is_empty() {
                self.error(&c, "species must not be empty");
            }
            for name in &diag.species {
                if deck.species_by_name(name).is_none() {
                    self.error(&c, format!("references undeclared species `{}`", name));
                }
            }
            if diag.axes.is_empty() {
                self.error(&c, "at least one axis is required");
            }
            for axis in &diag.axes {
                if axis.bins == 0 {
                    self.error(&c, format!("axis `{}` needs at least one bin", axis.quantity));
                }
                if !(axis.lower < axis.upper) {
                    self.error(&c, format!("axis `{}` has lower {} >= upper {}", axis.quantity, axis.lower, axis.upper));
                }
            }
        }
    }
}

/// Runs every check on a deck.
pub fn validate(deck: &Namelist) -> ValidationReport {
    let mut v = Validator::new();

    v.check_main(&deck.main);
    v.check_moving_window(deck);
    for (i, species) in deck.species.iter().enumerate() {
        v.check_species(i, species, deck.main.geometry);
    }
    v.check_references(deck);
    v.check_diagnostics(deck);

    ValidationReport { issues: v.issues }
}

// =============================================================================
// VALIDATION REPORT
// =============================================================================

/// Result of validating a deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// True when the deck has no errors (warnings allowed).
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Converts to an error carrying every error message.
    pub fn into_result(self) -> Result<(), DeckError> {
        let errors: Vec<String> = self.errors().map(ToString::to_string).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DeckError::Validation {
                errors: errors.len(),
                summary: errors.join("; "),
            })
        }
    }

    /// Print formatted report to console
    pub fn print(&self) {
        println!();
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║                  DECK VALIDATION REPORT                      ║");
        println!("╠══════════════════════════════════════════════════════════════╣");
        println!("║ Errors:                {:>10}                            ║", self.error_count());
        println!("║ Warnings:              {:>10}                            ║", self.warning_count());
        println!("╚══════════════════════════════════════════════════════════════╝");

        for issue in &self.issues {
            println!("  {}", issue);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
