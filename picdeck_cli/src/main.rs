//! PicDeck CLI
//!
//! Generate, check and export input decks for the PIC engine.

use clap::Parser;
use picdeck_cli::presets::PresetId;
use picdeck_cli::{
    script_file_name, write_namelist, DeckEntry, DeckExport, DeckResult, DeckRunner, EnergySweep,
    RunnerConfig,
};
use picdeck_core::Namelist;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// PicDeck input deck generator
#[derive(Parser, Debug)]
#[command(name = "picdeck")]
#[command(about = "Build, validate and render PIC simulation input decks", long_about = None)]
struct Args {
    /// Preset to build (ionization_al)
    #[arg(short, long, default_value = "ionization_al")]
    preset: String,

    /// Beam kinetic energy in keV
    #[arg(short, long, default_value = "1000")]
    energy_kev: f64,

    /// Energy sweep MIN:MAX:STEP in keV (overrides --energy-kev)
    #[arg(long)]
    sweep: Option<EnergySweep>,

    /// Validate and render a stored JSON deck instead of a preset
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for namelist scripts and the run summary
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Validate only, write nothing
    #[arg(long)]
    check: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let preset: PresetId = args.preset.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        let names: Vec<_> = PresetId::all().iter().map(|p| p.name()).collect();
        eprintln!("Available presets: {}", names.join(", "));
        std::process::exit(1);
    });

    let runner = DeckRunner::new(RunnerConfig {
        preset,
        energy_kev: args.energy_kev,
        sweep: args.sweep,
        check_only: args.check,
    });

    let (source, results) = match &args.input {
        Some(path) => {
            info!("Reading deck {}", path.display());
            let label = path.display().to_string();
            match Namelist::load(path) {
                Ok(deck) => (label.clone(), vec![runner.process(label, deck)]),
                Err(e) => {
                    error!("Failed to load {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => (preset.name().to_string(), runner.run()),
    };

    let mut export = DeckExport::new(&source);

    for result in &results {
        let script = if args.check {
            None
        } else {
            write_script(&args, result)
        };

        let mut entry = DeckEntry::from_result(result, script.clone());
        if !args.check && result.rendered.is_some() && script.is_none() {
            entry.passed = false;
            entry.failure_reason = Some("namelist could not be written".to_string());
        }

        if !args.json {
            report(result, &entry);
        }
        export.add_deck(entry);
    }

    if !args.check {
        let summary_path = args.output_dir.join("picdeck_summary.json");
        match export.write_to_file(&summary_path) {
            Ok(()) => info!("Wrote run summary to {}", summary_path.display()),
            Err(e) => {
                error!("Failed to write summary: {}", e);
                export.passed = false;
            }
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&export) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize summary: {}", e),
        }
    } else {
        info!("");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        let total = export.decks.len();
        let failed = export.failed_count();
        if failed == 0 && export.passed {
            info!("✅ All {} deck(s) ready", total);
        } else {
            error!("❌ {}/{} deck(s) failed", failed, total);
        }
    }

    // Exit with proper code for CI
    if !export.passed {
        std::process::exit(1);
    }
}

/// Writes a passing deck's script, returning its path.
fn write_script(args: &Args, result: &DeckResult) -> Option<PathBuf> {
    let text = result.rendered.as_ref()?;
    let deck = result.deck.as_ref()?;
    let energy = if args.sweep.is_some() { result.energy_kev } else { None };
    let file_name = script_file_name(&deck.output_script, energy);

    match write_namelist(&args.output_dir, &file_name, text) {
        Ok(path) => Some(path),
        Err(e) => {
            error!("Failed to write {}: {}", file_name, e);
            None
        }
    }
}

fn report(result: &DeckResult, entry: &DeckEntry) {
    let energy = result
        .energy_kev
        .map(|e| format!(" @ {} keV", e))
        .unwrap_or_default();

    if entry.passed {
        match &entry.script {
            Some(path) => info!("✓ {}{} -> {}", result.label, energy, path.display()),
            None => info!("✓ {}{} OK", result.label, energy),
        }
        if let Some(k) = result.kinematics {
            info!(
                "    v/c = {:.6}, p/mc = {:.6}, E/mc² = {:.6}",
                k.velocity, k.momentum, k.energy_ratio
            );
        }
        if result.report.warning_count() > 0 {
            result.report.print();
        }
    } else {
        error!(
            "✗ {}{} FAILED: {}",
            result.label,
            energy,
            entry.failure_reason.as_deref().unwrap_or("unknown")
        );
        if !result.report.issues.is_empty() {
            result.report.print();
        }
    }
}
