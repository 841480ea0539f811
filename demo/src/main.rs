//! Afya reference CLI
//!
//! Runs the reference clinic scenarios, lists regions, or assesses a single
//! set of answers given on the command line. Every command uses the embedded
//! rule book unless `--rules` names another.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- emergency
//!   cargo run -p demo -- regions
//!   cargo run -p demo -- assess --symptom fever --symptom headache --severity severe --region ng
//!   cargo run -p demo -- --rules my-clinic.toml assess --symptom cough --history-file amara.json

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use afya_contracts::{
    error::{AfyaError, AfyaResult},
    input::{DurationBucket, Severity},
    region::RegionCode,
};
use afya_core::{
    traits::{HistoryWriter, RuleSource},
    AssessmentSession,
};
use afya_history::{HistoryBlob, InMemoryHistory};
use afya_ref_clinic::{
    harness::{build_runner, print_confidence_breakdown, print_history, print_outcome},
    scenarios::{bounded_history, emergency_escalation, fallback_and_insufficient, routine_assessment},
};
use afya_rules::TomlRuleBook;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Afya: rule-based symptom assessment.
#[derive(Parser)]
#[command(
    name = "afya",
    about = "Afya symptom assessment reference CLI",
    long_about = "Runs Afya reference scenarios or assesses one set of answers,\n\
                  showing rule lookup, urgency escalation, confidence scoring,\n\
                  result verification, and bounded history."
)]
struct Cli {
    /// Load this TOML rule book instead of the embedded default.
    #[arg(long, global = true, value_name = "PATH")]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four reference scenarios in sequence.
    RunAll,
    /// Scenario 1: routine assessment with regional filtering.
    Routine,
    /// Scenario 2: emergency escalation.
    Emergency,
    /// Scenario 3: fallback rule and insufficient input.
    Fallback,
    /// Scenario 4: bounded history and tamper detection.
    History,
    /// List the regions the rule book knows.
    Regions,
    /// Assess one set of answers.
    Assess(AssessArgs),
}

#[derive(Args)]
struct AssessArgs {
    /// A selected symptom; repeat for each one.
    #[arg(long = "symptom", value_name = "SYMPTOM")]
    symptoms: Vec<String>,

    /// 1-10, or mild / moderate / severe. Defaults to 5.
    #[arg(long, value_parser = parse_severity)]
    severity: Option<Severity>,

    /// minutes, hours, days or weeks+.
    #[arg(long, value_parser = parse_duration)]
    duration: Option<DurationBucket>,

    /// Region code, e.g. ng or ke.
    #[arg(long)]
    region: Option<String>,

    /// A photo of the affected area was attached.
    #[arg(long)]
    photo: bool,

    /// The user shared their location.
    #[arg(long)]
    location: bool,

    /// History profile the result is recorded under.
    #[arg(long, default_value = "cli")]
    profile: String,

    /// Load history from this blob file and write it back afterwards.
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Print the result as JSON instead of the walkthrough layout.
    #[arg(long)]
    json: bool,
}

fn parse_severity(s: &str) -> Result<Severity, AfyaError> {
    s.parse()
}

fn parse_duration(s: &str) -> Result<DurationBucket, AfyaError> {
    s.parse()
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_book(cli.rules.as_deref()).and_then(|book| match cli.command {
        Command::RunAll => run_all(&book),
        Command::Routine => routine_assessment::run_scenario(&book),
        Command::Emergency => emergency_escalation::run_scenario(&book),
        Command::Fallback => fallback_and_insufficient::run_scenario(&book),
        Command::History => bounded_history::run_scenario(&book),
        Command::Regions => {
            list_regions(&book);
            Ok(())
        }
        Command::Assess(args) => assess(&book, args),
    });

    if let Err(e) = result {
        eprintln!("afya error: {}", e);
        std::process::exit(1);
    }
}

fn load_book(path: Option<&Path>) -> AfyaResult<TomlRuleBook> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading rule book");
            TomlRuleBook::from_file(path)
        }
        None => TomlRuleBook::embedded(),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_all(book: &TomlRuleBook) -> AfyaResult<()> {
    print_banner(book);
    routine_assessment::run_scenario(book)?;
    emergency_escalation::run_scenario(book)?;
    fallback_and_insufficient::run_scenario(book)?;
    bounded_history::run_scenario(book)?;
    println!("All scenarios completed successfully.");
    Ok(())
}

fn list_regions(book: &TomlRuleBook) {
    println!("{:<6} {:<16} {:<10} Common diseases", "Code", "Name", "Emergency");
    for region in book.regions() {
        println!(
            "{:<6} {:<16} {:<10} {}",
            region.code.as_str(),
            region.name,
            region.emergency_number,
            region.common_diseases.join(", ")
        );
    }
}

fn assess(book: &TomlRuleBook, args: AssessArgs) -> AfyaResult<()> {
    let history = Arc::new(InMemoryHistory::new());
    if let Some(path) = &args.history_file {
        load_history(&history, path)?;
    }
    let runner = build_runner(book, Arc::clone(&history));

    let mut session = AssessmentSession::new(args.profile.as_str());
    for symptom in &args.symptoms {
        session.toggle_symptom(symptom);
    }
    if let Some(severity) = args.severity {
        session.set_severity(severity);
    }
    if let Some(duration) = args.duration {
        session.set_duration(duration);
    }
    if let Some(region) = &args.region {
        session.set_region(RegionCode::new(region));
    }
    if args.photo {
        session.attach_photo();
    }
    if args.location {
        session.share_location();
    }

    let input = session.build_input();
    let outcome = runner.run(&mut session)?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome).map_err(|e| AfyaError::SchemaValidation {
            reason: format!("failed to serialize outcome: {}", e),
        })?;
        println!("{}", json);
    } else {
        print_outcome(&outcome);
        if let Some(result) = outcome.result() {
            print_confidence_breakdown(book, &input, result);
        }
        println!();
        print_history(&args.profile, &history.recent(&args.profile)?);
    }

    if let Some(path) = &args.history_file {
        save_history(&history, path)?;
    }
    Ok(())
}

// ── History file ─────────────────────────────────────────────────────────────

/// A missing file is an empty history.
fn load_history(history: &InMemoryHistory, path: &Path) -> AfyaResult<()> {
    if !path.exists() {
        info!(path = %path.display(), "no history file yet, starting empty");
        return Ok(());
    }
    let bytes = std::fs::read(path).map_err(|e| AfyaError::HistoryCorrupt {
        reason: format!("failed to read history file '{}': {}", path.display(), e),
    })?;
    let loaded = history.import_blob(HistoryBlob::from_bytes(&bytes)?)?;
    info!(path = %path.display(), entries = loaded, "history loaded");
    Ok(())
}

fn save_history(history: &InMemoryHistory, path: &Path) -> AfyaResult<()> {
    let bytes = history.export_blob()?.to_bytes()?;
    std::fs::write(path, bytes).map_err(|e| AfyaError::HistoryWriteFailed {
        reason: format!("failed to write history file '{}': {}", path.display(), e),
    })?;
    info!(path = %path.display(), "history saved");
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner(book: &TomlRuleBook) {
    println!();
    println!("Afya: Rule-based Symptom Assessment");
    println!("Reference Clinic Demo");
    println!("===================================");
    println!();
    println!(
        "Rule book: {} symptom combinations, {} regions",
        book.rule_count(),
        book.regions().len()
    );
    println!();
    println!("Assessment pipeline per request:");
    println!("  [1] Session answers -> AssessmentInput (severity defaults to 5)");
    println!("  [2] Canonical symptom key -> rule lookup, fallback if unknown");
    println!("  [3] Conditions filtered to the region, urgency escalated, confidence scored");
    println!("  [4] Result verified against JSON Schema + semantic rules");
    println!("  [5] Verified result appended to the profile's bounded history");
    println!();
}
