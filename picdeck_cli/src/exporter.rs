//! JSON exporter and namelist writer.
//!
//! Each run writes the rendered namelist scripts plus one JSON summary that
//! records the kinematics and validation findings of every deck.

use crate::runner::DeckResult;
use picdeck_core::namelist::DEFAULT_OUTPUT_SCRIPT;
use picdeck_core::{BeamKinematics, DeckError, Issue, Namelist};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Export record for one deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckEntry {
    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_kev: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinematics: Option<BeamKinematics>,

    pub passed: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,

    /// Path of the written namelist script
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    /// The deck itself, so it can be reloaded with `--input`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namelist: Option<Namelist>,
}

impl DeckEntry {
    pub fn from_result(result: &DeckResult, script: Option<PathBuf>) -> Self {
        Self {
            label: result.label.clone(),
            energy_kev: result.energy_kev,
            kinematics: result.kinematics,
            passed: result.passed,
            issues: result.report.issues.clone(),
            script,
            failure_reason: result.failure_reason.clone(),
            namelist: result.deck.clone(),
        }
    }
}

/// Complete run export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckExport {
    /// Preset or input name
    pub source: String,

    /// All decks
    pub decks: Vec<DeckEntry>,

    /// Final result
    pub passed: bool,
}

impl DeckExport {
    /// Creates a new export container.
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            decks: Vec::new(),
            passed: true,
        }
    }

    /// Adds a deck entry.
    pub fn add_deck(&mut self, entry: DeckEntry) {
        self.passed &= entry.passed;
        self.decks.push(entry);
    }

    pub fn failed_count(&self) -> usize {
        self.decks.iter().filter(|d| !d.passed).count()
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// File name for a deck's script.
///
/// Only the last component of `output_script` is kept, so a stored deck cannot
/// write outside the output directory. Sweeps write several decks into one
/// directory, so the energy is inserted before the extension: `smilei.py`
/// becomes `smilei_1000keV.py`.
pub fn script_file_name(output_script: &str, energy_kev: Option<f64>) -> String {
    let name = Path::new(output_script)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_OUTPUT_SCRIPT);

    match energy_kev {
        None => name.to_string(),
        Some(energy) => {
            let path = Path::new(name);
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("deck");
            let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("py");
            // Micro-keV resolution hides float noise such as 0.30000000000000004.
            let energy = (energy * 1e6).round() / 1e6;
            format!("{}_{}keV.{}", stem, energy, ext)
        }
    }
}

/// Writes rendered namelist text to `dir/file_name`, creating `dir`.
pub fn write_namelist(dir: impl AsRef<Path>, file_name: &str, text: &str) -> Result<PathBuf, DeckError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let mut file = File::create(&path)?;
    file.write_all(text.as_bytes())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{DeckRunner, RunnerConfig};

    #[test]
    fn test_script_file_name() {
        assert_eq!(script_file_name("smilei.py", None), "smilei.py");
        assert_eq!(script_file_name("smilei.py", Some(1000.0)), "smilei_1000keV.py");
        assert_eq!(script_file_name("run.py", Some(12.5)), "run_12.5keV.py");
    }

    #[test]
    fn test_script_file_name_rounds_sweep_energy() {
        assert_eq!(script_file_name("smilei.py", Some(0.1 + 0.2)), "smilei_0.3keV.py");
        assert_eq!(script_file_name("smilei.py", Some(299.99999999999994)), "smilei_300keV.py");
    }

    #[test]
    fn test_script_file_name_stays_in_output_dir() {
        assert_eq!(script_file_name("/etc/smilei.py", None), "smilei.py");
        assert_eq!(script_file_name("../../deck.py", Some(100.0)), "deck_100keV.py");
        assert_eq!(script_file_name("..", None), DEFAULT_OUTPUT_SCRIPT);
        assert_eq!(script_file_name("", None), DEFAULT_OUTPUT_SCRIPT);

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let path = write_namelist(&dir, &script_file_name("../escape.py", None), "").unwrap();
        assert_eq!(path, dir.join("escape.py"));
    }

    #[test]
    fn test_write_namelist_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("decks");

        let path = write_namelist(&dir, "smilei.py", "Main(\n)\n").unwrap();

        assert_eq!(path, dir.join("smilei.py"));
        assert_eq!(fs::read_to_string(path).unwrap(), "Main(\n)\n");
    }

    #[test]
    fn test_export_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let result = DeckRunner::new(RunnerConfig::default()).run_energy(1000.0);

        let mut export = DeckExport::new("ionization_al");
        export.add_deck(DeckEntry::from_result(&result, None));
        let path = tmp.path().join("summary.json");
        export.write_to_file(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let back: DeckExport = serde_json::from_str(&text).unwrap();
        assert!(back.passed);
        assert_eq!(back.decks.len(), 1);
        assert_eq!(back.decks[0].namelist, result.deck);
    }

    #[test]
    fn test_failed_entry_marks_export() {
        let result = DeckRunner::new(RunnerConfig::default()).run_energy(-1.0);
        let mut export = DeckExport::new("ionization_al");
        export.add_deck(DeckEntry::from_result(&result, None));

        assert!(!export.passed);
        assert_eq!(export.failed_count(), 1);
    }
}
