//! # CLI Module
//!
//! Command-line interface and the `cmd_*` entry points behind each
//! subcommand. Every command takes the store path and backend name
//! explicitly and writes to a caller-supplied writer.

use crate::prompt::{WizardExit, run_wizard};
use crate::slots::{DEFAULT_STORE, SystemClock, open_slot};
use clap::{Parser, Subcommand};
use healthscan_core::scoring::compute_result;
use healthscan_core::wizard::TOTAL_SCREENS;
use healthscan_core::{
    AnswerSet, CtaConfig, QuestionId, RecommendationResult, ScanSession, StateSlot, catalog,
};
use serde::Serialize;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type CmdResult = Result<(), Box<dyn Error>>;

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "healthscan")]
#[command(version, about = "Business health scan: thirteen questions, one next step", long_about = None)]
pub struct Cli {
    /// Where progress is saved
    #[arg(long, global = true, env = "HEALTHSCAN_STORE", default_value = DEFAULT_STORE)]
    pub store: PathBuf,

    /// Storage backend: file or redb
    #[arg(long, global = true, env = "HEALTHSCAN_BACKEND", default_value = "file")]
    pub backend: String,

    /// JSON file overriding the call-to-action URLs
    #[arg(long, global = true, env = "HEALTHSCAN_CTA_CONFIG")]
    pub cta_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk through the questionnaire (resumes saved progress)
    Run,
    /// Score an answer file, or the saved answers
    Score {
        /// JSON object of q1..q13 labels
        #[arg(long)]
        answers: Option<PathBuf>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Include the sub-scores
        #[arg(long)]
        explain: bool,
    },
    /// List every question and its options
    Questions {
        #[arg(long)]
        json: bool,
    },
    /// Show saved progress
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Clear every answer and delete saved progress
    Reset,
}

/// Dispatch parsed arguments to the matching command.
pub fn run(cli: Cli) -> CmdResult {
    let cta = load_cta_config(cli.cta_config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            cmd_run(&cli.store, &cli.backend, &cta, &mut input, &mut out)
        }
        Commands::Score {
            answers,
            json,
            explain,
        } => cmd_score(
            &cli.store,
            &cli.backend,
            answers.as_deref(),
            &cta,
            json,
            explain,
            &mut out,
        ),
        Commands::Questions { json } => cmd_questions(json, &mut out),
        Commands::Status { json } => cmd_status(&cli.store, &cli.backend, json, &mut out),
        Commands::Reset => cmd_reset(&cli.store, &cli.backend, &mut out),
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Read CTA overrides; missing fields keep their defaults.
pub fn load_cta_config(path: Option<&Path>) -> Result<CtaConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(CtaConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read CTA config {}: {e}", path.display()))?;
    let config: CtaConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid CTA config {}: {e}", path.display()))?;
    debug!(path = %path.display(), "loaded CTA config");
    Ok(config)
}

/// Open a session on the given store.
pub fn open_session(
    store: &Path,
    backend: &str,
    cta: &CtaConfig,
) -> Result<ScanSession<Box<dyn StateSlot>, SystemClock>, Box<dyn Error>> {
    let slot = open_slot(store, backend)?;
    let mut session = ScanSession::open(slot, SystemClock).with_cta(cta.clone());
    if let Some(e) = session.take_persist_error() {
        warn!(error = %e, "saved progress could not be read, starting fresh");
    }
    Ok(session)
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Interactive wizard.
pub fn cmd_run(
    store: &Path,
    backend: &str,
    cta: &CtaConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> CmdResult {
    let mut session = open_session(store, backend, cta)?;
    info!(
        store = %store.display(),
        step = session.step(),
        answered = session.answers().answered_count(),
        "starting health scan"
    );

    match run_wizard(&mut session, input, out)? {
        WizardExit::Quit => debug!("user quit"),
        WizardExit::EndOfInput => debug!("input closed"),
    }
    Ok(())
}

/// Score answers from a file, or the saved answers when no file is given.
pub fn cmd_score(
    store: &Path,
    backend: &str,
    answers_file: Option<&Path>,
    cta: &CtaConfig,
    json: bool,
    explain: bool,
    out: &mut impl Write,
) -> CmdResult {
    let answers = match answers_file {
        Some(path) => read_answers(path)?,
        None => open_session(store, backend, cta)?.snapshot_for_scoring(),
    };

    if let Some(missing) = answers.first_unanswered() {
        warn!(
            first_missing = %missing,
            answered = answers.answered_count(),
            "scoring an incomplete answer set; unanswered questions score 0"
        );
    }

    let result = compute_result(&answers, cta);
    debug!(total = result.total, band = %result.band, route = ?result.route, "scored");

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        write_result_text(&result, explain, out)?;
    }
    Ok(())
}

fn read_answers(path: &Path) -> Result<AnswerSet, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let answers: AnswerSet = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid answers in {}: {e}", path.display()))?;
    Ok(answers)
}

fn write_result_text(
    result: &RecommendationResult,
    explain: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "{}", result.message)?;
    writeln!(out, "{} {}", result.cta_text, result.cta_url)?;

    if explain {
        let c = &result.components;
        writeln!(out)?;
        writeln!(out, "Financial clarity        {:>3} / 30", c.financial_clarity)?;
        writeln!(out, "Sales consistency        {:>3} / 25", c.sales_consistency)?;
        writeln!(out, "Operations & team        {:>3} / 20", c.operations_and_team)?;
        writeln!(out, "Founder dependency       {:>3} / 15", c.founder_dependency_derived)?;
        writeln!(out, "Growth intent            {:>3} / 10", c.growth_intent)?;
        writeln!(out, "Total                    {:>3} / 100 ({})", result.total, result.band)?;
        for stop in &result.hard_stops {
            writeln!(out, "Hard stop: {stop:?}")?;
        }
        for flag in &result.flags {
            writeln!(out, "Flag: {flag:?}")?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct OptionView {
    number: usize,
    label: &'static str,
}

#[derive(Serialize)]
struct QuestionView {
    key: &'static str,
    section: String,
    title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<&'static str>,
    options: Vec<OptionView>,
}

/// Print the questionnaire.
pub fn cmd_questions(json: bool, out: &mut impl Write) -> CmdResult {
    let views: Vec<QuestionView> = catalog()
        .iter()
        .map(|q| QuestionView {
            key: q.id.key(),
            section: q.section().title(),
            title: q.title,
            subtitle: q.subtitle,
            options: q
                .options()
                .into_iter()
                .enumerate()
                .map(|(i, option)| OptionView {
                    number: i + 1,
                    label: option.label(),
                })
                .collect(),
        })
        .collect();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&views)?)?;
        return Ok(());
    }

    let mut current_section = String::new();
    for view in &views {
        if view.section != current_section {
            writeln!(out, "\n{}", view.section)?;
            current_section.clone_from(&view.section);
        }
        writeln!(out, "  {}. {}", view.key, view.title)?;
        for option in &view.options {
            writeln!(out, "      {}) {}", option.number, option.label)?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub step: usize,
    pub total_screens: usize,
    pub progress_percent: u8,
    pub answered: usize,
    pub next_unanswered: Option<&'static str>,
    pub on_recommendation: bool,
}

/// Summarise saved progress.
pub fn cmd_status(store: &Path, backend: &str, json: bool, out: &mut impl Write) -> CmdResult {
    let session = open_session(store, backend, &CtaConfig::default())?;
    let report = StatusReport {
        step: session.step(),
        total_screens: TOTAL_SCREENS,
        progress_percent: session.progress_percent(),
        answered: session.answers().answered_count(),
        next_unanswered: session.answers().first_unanswered().map(QuestionId::key),
        on_recommendation: session.is_on_recommendation(),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "Store:     {} ({backend})", store.display())?;
    writeln!(
        out,
        "Step:      {} of {} ({}% complete)",
        report.step + 1,
        report.total_screens,
        report.progress_percent
    )?;
    writeln!(out, "Answered:  {} of {}", report.answered, QuestionId::ALL.len())?;
    if let Some(next) = report.next_unanswered {
        writeln!(out, "Next:      {next}")?;
    }
    Ok(())
}

/// Destructive reset: clear every answer and the saved record.
pub fn cmd_reset(store: &Path, backend: &str, out: &mut impl Write) -> CmdResult {
    let mut session = open_session(store, backend, &CtaConfig::default())?;
    session.reset();
    if let Some(e) = session.take_persist_error() {
        return Err(e.into());
    }
    info!(store = %store.display(), "scan reset");
    writeln!(out, "All answers cleared.")?;
    Ok(())
}
