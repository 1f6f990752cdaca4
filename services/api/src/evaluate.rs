use crate::infra::build_engine;
use clap::Args;
use clause_audit::audit::{report_stem, FileReportStore, ReportStore};
use clause_audit::config::AppConfig;
use clause_audit::document::{collect_inputs, read_text};
use clause_audit::error::AppError;
use clause_audit::report::{render_trace, ComplianceReport};
use clause_audit::{ClauseEngine, DocumentView, RuleSet};
use std::path::{Path, PathBuf};
use tracing::warn;

const DEFAULT_INPUT_DIR: &str = "documents";

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Extracted text documents to evaluate
    pub(crate) paths: Vec<PathBuf>,
    /// Directory scanned for documents when no paths are given
    #[arg(long)]
    pub(crate) input_dir: Option<PathBuf>,
    /// Override the configured rule set path
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Override the configured report directory
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
    /// Print the per-clause evaluation trace
    #[arg(long)]
    pub(crate) debug: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// Override the configured rule set path
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    clause_audit::telemetry::init(&config.telemetry)?;

    let engine = build_engine(&config.engine, args.rules.as_deref())?;
    let inputs = resolve_inputs(&args)?;
    if inputs.is_empty() {
        println!("No documents to evaluate. Exiting.");
        return Ok(());
    }

    let store = FileReportStore::new(args.out.unwrap_or(config.engine.report_dir));
    println!("Processing {} document(s)...\n", inputs.len());

    let written = evaluate_documents(&engine, &inputs, &store, args.debug)?;
    println!("Done. {written} report(s) written to {}", store.root().display());
    Ok(())
}

fn resolve_inputs(args: &EvaluateArgs) -> Result<Vec<PathBuf>, AppError> {
    if args.paths.is_empty() {
        let dir = args
            .input_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
        return Ok(collect_inputs(dir)?);
    }

    let (present, missing): (Vec<PathBuf>, Vec<PathBuf>) =
        args.paths.iter().cloned().partition(|path| path.exists());
    for path in missing {
        println!("  ! File not found: {}", path.display());
    }
    Ok(present)
}

/// Evaluate each document and persist its report, returning how many were written.
///
/// Unreadable and empty documents are skipped with a warning.
pub(crate) fn evaluate_documents<S: ReportStore>(
    engine: &ClauseEngine,
    inputs: &[PathBuf],
    store: &S,
    debug: bool,
) -> Result<usize, AppError> {
    let mut written = 0;

    for path in inputs {
        let filename = display_name(path);
        println!("> Processing: {filename}");

        let raw = match read_text(path) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(%error, "skipping document");
                println!("  ! {error}");
                continue;
            }
        };

        if raw.trim().is_empty() {
            println!("  ! No text found in {filename}");
            continue;
        }

        let evaluation = engine.evaluate(&DocumentView::from_raw(&raw));
        if debug {
            println!("{}", render_trace(&filename, &evaluation));
        }

        let report = ComplianceReport::new(filename.as_str(), &evaluation);
        let stored = store.save(&report_stem(&filename), &report)?;
        println!("  + JSON report -> {}", stored.json_file);
        println!("  + CSV summary -> {}\n", stored.csv_file);
        written += 1;
    }

    Ok(written)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args.rules.unwrap_or(config.engine.rules_path);
    let rules = RuleSet::from_path(&path)?;

    println!("{} clause(s) in {}", rules.len(), path.display());
    for clause in rules.clauses() {
        println!("\n{} [{}]", clause.id, clause.archetype);
        if !clause.intent.is_empty() {
            println!("  intent: {}", clause.intent);
        }
        for (name, block) in clause.evidence_blocks.iter() {
            let marker = if block.mandatory { "mandatory" } else { "optional" };
            println!(
                "  - {name} ({marker}, weight {}): {}",
                block.weight,
                block.signals.join(", ")
            );
        }
    }

    let findings = rules.lint();
    if !findings.is_empty() {
        println!("\nLint findings:");
        for finding in findings {
            println!("  {}: {}", finding.clause_id, finding.message);
        }
    }
    Ok(())
}
