//! PicDeck Core - Typed Input Decks for Particle-in-Cell Plasma Simulations
//!
//! The simulation engine reads its whole configuration from a namelist: a
//! script of `Main(...)`, `Species(...)`, `Collisions(...)` and diagnostic
//! blocks. This library builds those blocks as typed records and checks them
//! before they are written out:
//! 1. **Kinematics**: beam velocity and momentum derived from a kinetic energy
//! 2. **Validation**: the engine's load-time checks, run ahead of time
//! 3. **Rendering**: the namelist script, plus a JSON form for storage
//!
//! All lengths and times are normalized so that one reference wavelength is
//! [`units::L0`].

pub mod benchmarks;
pub mod collisions;
pub mod diagnostics;
pub mod error;
pub mod kinematics;
pub mod namelist;
pub mod render;
pub mod run;
pub mod species;
pub mod units;
pub mod validation;

// Re-export key types for convenience
pub use collisions::Collisions;
pub use diagnostics::{BinningAxis, DiagFields, DiagParticleBinning, DiagScalar};
pub use error::DeckError;
pub use kinematics::BeamKinematics;
pub use namelist::{Component, Namelist};
pub use render::render_namelist;
pub use run::{EmBoundary, Geometry, MainBlock, MovingWindow};
pub use species::{DensityProfile, MomentumInit, ParticleBoundary, PositionInit, Species};
pub use validation::{validate, Issue, Severity, ValidationReport};
