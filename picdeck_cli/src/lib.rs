//! PicDeck deck generation harness
//!
//! Builds benchmark decks for one beam energy or a sweep of energies,
//! validates them, and writes the namelist scripts the engine reads.
//!
//! # Usage
//!
//! ```ignore
//! use picdeck_cli::{DeckRunner, RunnerConfig, EnergySweep};
//!
//! let config = RunnerConfig {
//!     sweep: Some("100:1000:100".parse()?),
//!     ..Default::default()
//! };
//!
//! for result in DeckRunner::new(config).run() {
//!     println!("{} keV: passed={}", result.energy_kev.unwrap_or_default(), result.passed);
//! }
//! ```

mod exporter;
mod runner;
pub mod presets;
pub mod sweep;

pub use exporter::{script_file_name, write_namelist, DeckEntry, DeckExport};
pub use runner::{DeckResult, DeckRunner, RunnerConfig};
pub use sweep::{EnergySweep, SweepError};
