mod analysis;
mod config;
mod errors;
mod export;
mod models;
mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::run_analysis;
use crate::config::Config;
use crate::errors::AppError;
use crate::export::{
    export_filename, render_checklist_text, render_full_text, render_plan_text,
    render_questions_text,
};
use crate::models::entry::{AnalysisEntry, SkillConfidence};
use crate::storage::history::HistoryStore;
use crate::storage::proof::{is_shipped, validate_url, ProofStore, ProofUpdate, TOTAL_STEPS};
use crate::storage::test_checklist::{TestChecklistStore, TOTAL_TESTS};
use crate::storage::{CollectionStore, FileStore};

/// Placement preparation assistant: JD analysis, prep plans, and tracking.
#[derive(Parser)]
#[command(name = "prep", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a job description and save the result to history
    Analyze {
        /// Read the JD text from a file
        #[arg(long, value_name = "PATH")]
        jd_file: Option<PathBuf>,
        /// JD text given inline (takes precedence over --jd-file)
        #[arg(long)]
        jd: Option<String>,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        role: String,
    },
    /// List saved analyses
    History,
    /// Show a saved analysis (most recent when no id is given)
    Show {
        #[arg(long)]
        id: Option<String>,
    },
    /// Mark a skill as known or needing practice; recomputes the live score
    Confidence {
        id: String,
        skill: String,
        confidence: SkillConfidence,
    },
    /// Export an analysis as plain text
    Export {
        what: ExportKind,
        #[arg(long)]
        id: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Manual test checklist (10 items)
    Tests {
        #[command(subcommand)]
        command: TestsCommand,
    },
    /// Proof-of-build submission and the shipped gate
    Proof {
        #[command(subcommand)]
        command: ProofCommand,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportKind {
    Plan,
    Checklist,
    Questions,
    Full,
}

#[derive(Subcommand)]
enum TestsCommand {
    /// Show the checklist and pass count
    Show,
    /// Check test N (1-based)
    Check { n: usize },
    /// Uncheck test N (1-based)
    Uncheck { n: usize },
    /// Uncheck everything
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum UrlField {
    Lovable,
    Github,
    Deployed,
}

#[derive(Clone, Copy, ValueEnum)]
enum StepState {
    Done,
    Todo,
}

#[derive(Subcommand)]
enum ProofCommand {
    /// Show the submission links and step progress
    Show,
    /// Set one of the three submission links
    SetUrl { field: UrlField, url: String },
    /// Mark step N (1-based) done or todo
    Step { n: usize, state: StepState },
    /// Evaluate the shipped gate
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store: Arc<dyn CollectionStore> = Arc::new(FileStore::new(&config.data_dir));

    if let Err(e) = run(cli.command, store).await {
        tracing::error!(code = e.code(), "{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, store: Arc<dyn CollectionStore>) -> errors::Result<()> {
    match command {
        Command::Analyze {
            jd_file,
            jd,
            company,
            role,
        } => {
            let jd_text = read_jd(jd, jd_file).await?;
            if jd_text.trim().is_empty() {
                return Err(AppError::Validation(
                    "job description text must not be empty".to_string(),
                ));
            }
            let bundle = run_analysis(&jd_text, &company, &role)?;
            let history = HistoryStore::new(store);
            let entry = history.save(&bundle, &company, &role, &jd_text).await?;
            print_entry_summary(&entry);
        }
        Command::History => {
            let history = HistoryStore::new(store);
            let (list, skipped) = history.list().await?;
            if list.is_empty() && skipped == 0 {
                println!("No analyses saved yet.");
                return Ok(());
            }
            for summary in &list {
                let label = match (summary.company.as_str(), summary.role.as_str()) {
                    ("", "") => "(no company/role)".to_string(),
                    (c, "") => c.to_string(),
                    ("", r) => r.to_string(),
                    (c, r) => format!("{c} · {r}"),
                };
                println!(
                    "{}  {}  {:>3}/100  {}",
                    summary.id,
                    summary.created_at.format("%Y-%m-%d %H:%M"),
                    summary.readiness_score,
                    label
                );
            }
            if skipped > 0 {
                println!("({skipped} unreadable record(s) skipped)");
            }
        }
        Command::Show { id } => {
            let history = HistoryStore::new(store);
            let entry = resolve_entry(&history, id.as_deref()).await?;
            print_entry_summary(&entry);
            println!();
            println!("{}", render_full_text(&entry));
        }
        Command::Confidence {
            id,
            skill,
            confidence,
        } => {
            let history = HistoryStore::new(store);
            let entry = history.set_skill_confidence(&id, &skill, confidence).await?;
            println!(
                "{skill}: {}. Score {} -> {}/100",
                match confidence {
                    SkillConfidence::Know => "know",
                    SkillConfidence::Practice => "practice",
                },
                entry.base_score,
                entry.final_score
            );
        }
        Command::Export { what, id, out } => {
            let history = HistoryStore::new(store);
            let entry = resolve_entry(&history, id.as_deref()).await?;
            let text = match what {
                ExportKind::Plan => render_plan_text(&entry),
                ExportKind::Checklist => render_checklist_text(&entry),
                ExportKind::Questions => render_questions_text(&entry),
                ExportKind::Full => render_full_text(&entry),
            };
            match out {
                Some(path) => {
                    tokio::fs::write(&path, &text).await?;
                    println!("Wrote {}", path.display());
                }
                None if matches!(what, ExportKind::Full) => {
                    let path = export_filename(&entry.company, Utc::now().timestamp_millis());
                    tokio::fs::write(&path, &text).await?;
                    println!("Wrote {path}");
                }
                None => println!("{text}"),
            }
        }
        Command::Tests { command } => {
            let tests = TestChecklistStore::new(store);
            match command {
                TestsCommand::Show => {
                    let list = tests.get().await?;
                    for (i, checked) in list.iter().enumerate() {
                        println!("{:>2}. [{}]", i + 1, if *checked { "x" } else { " " });
                    }
                    let summary = tests.summary().await?;
                    println!("{}/{} passed", summary.passed, summary.total);
                }
                TestsCommand::Check { n } => {
                    tests.set_checked(one_based(n, TOTAL_TESTS)?, true).await?;
                    println!("Checked test {n}.");
                }
                TestsCommand::Uncheck { n } => {
                    tests.set_checked(one_based(n, TOTAL_TESTS)?, false).await?;
                    println!("Unchecked test {n}.");
                }
                TestsCommand::Reset => {
                    tests.reset().await?;
                    println!("Checklist reset.");
                }
            }
        }
        Command::Proof { command } => {
            let proof = ProofStore::new(Arc::clone(&store));
            match command {
                ProofCommand::Show => {
                    let sub = proof.get().await?;
                    println!("lovable:  {}", or_unset(&sub.lovable_url));
                    println!("github:   {}", or_unset(&sub.github_url));
                    println!("deployed: {}", or_unset(&sub.deployed_url));
                    let done = sub.steps.iter().filter(|&&s| s).count();
                    println!("steps: {done}/{TOTAL_STEPS} done");
                }
                ProofCommand::SetUrl { field, url } => {
                    if let Err(msg) = validate_url(&url) {
                        return Err(AppError::Validation(format!("invalid url: {msg}")));
                    }
                    let mut update = ProofUpdate::default();
                    match field {
                        UrlField::Lovable => update.lovable_url = Some(url),
                        UrlField::Github => update.github_url = Some(url),
                        UrlField::Deployed => update.deployed_url = Some(url),
                    }
                    proof.set(update).await?;
                    println!("Saved.");
                }
                ProofCommand::Step { n, state } => {
                    let done = matches!(state, StepState::Done);
                    proof.set_step(one_based(n, TOTAL_STEPS)?, done).await?;
                    println!("Step {n} marked {}.", if done { "done" } else { "todo" });
                }
                ProofCommand::Status => {
                    let tests = TestChecklistStore::new(store);
                    let summary = tests.summary().await?;
                    let sub = proof.get().await?;
                    let steps_done = sub.steps.iter().filter(|&&s| s).count();
                    println!("tests: {}/{}", summary.passed, summary.total);
                    println!("steps: {steps_done}/{TOTAL_STEPS}");
                    for (label, value) in [
                        ("lovable", &sub.lovable_url),
                        ("github", &sub.github_url),
                        ("deployed", &sub.deployed_url),
                    ] {
                        match validate_url(value) {
                            Ok(()) => println!("{label}: ok"),
                            Err(msg) => println!("{label}: {msg}"),
                        }
                    }
                    if is_shipped(&summary, &sub) {
                        println!("SHIPPED");
                    } else {
                        println!("Not shipped yet.");
                    }
                }
            }
        }
    }
    Ok(())
}

async fn read_jd(inline: Option<String>, file: Option<PathBuf>) -> errors::Result<String> {
    if let Some(text) = inline {
        return Ok(text);
    }
    if let Some(path) = file {
        let text = tokio::fs::read_to_string(&path).await?;
        info!(path = %path.display(), bytes = text.len(), "read JD file");
        return Ok(text);
    }
    Err(AppError::Validation(
        "provide the JD via --jd or --jd-file".to_string(),
    ))
}

/// Loads by id when given, else the most recent entry. A missing id is
/// NotFound; an empty history is its own message.
async fn resolve_entry(history: &HistoryStore, id: Option<&str>) -> errors::Result<AnalysisEntry> {
    match id {
        Some(id) => history
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no analysis with id '{id}'"))),
        None => history
            .latest()
            .await?
            .ok_or_else(|| AppError::NotFound("no analyses saved yet".to_string())),
    }
}

fn one_based(n: usize, total: usize) -> errors::Result<usize> {
    if n == 0 || n > total {
        return Err(AppError::Validation(format!(
            "expected a number between 1 and {total}, got {n}"
        )));
    }
    Ok(n - 1)
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}

fn print_entry_summary(entry: &AnalysisEntry) {
    println!("id: {}", entry.id);
    if !entry.company.is_empty() || !entry.role.is_empty() {
        println!(
            "{}",
            [entry.company.as_str(), entry.role.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" · ")
        );
    }
    println!("score: {}/100 (base {})", entry.final_score, entry.base_score);
    let skills = entry.extracted_skills.all_skills();
    if !skills.is_empty() {
        println!("skills: {}", skills.join(", "));
    }
    if let Some(intel) = &entry.company_intel {
        println!(
            "company intel: {} ({}, {})",
            intel.company_name, intel.size_category, intel.industry
        );
    }
    println!("expected rounds: {}", entry.round_mapping.len());
}
