//! Contract CLI
//!
//! Works on project and answer files without the API:
//! - `analyze` prints what a template contains
//! - `generate` assembles one party's contract
//! - `check` lists configuration issues of both parties

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contract_engine::{
    generate_contract, loader, today, unanswered_steps, validate_config, ContractEngine,
    IssueSeverity,
};
use contract_types::{ProjectDefinition, Role};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "contract-cli")]
#[command(version, about = "Two-party contract assembly from templates and answers")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print placeholders, articles and anchor choices of a template as JSON
    Analyze {
        /// Plain-text template file
        template: PathBuf,
    },
    /// Generate one party's contract
    Generate {
        /// Project definition (JSON)
        project: PathBuf,
        /// Answer set (JSON object of strings)
        answers: PathBuf,
        /// Party whose contract is generated
        #[arg(long, default_value = "A", value_parser = parse_role)]
        role: Role,
        /// Date printed above the signatures; today when absent
        #[arg(long)]
        date: Option<String>,
        /// Write the contract here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List configuration issues of both parties
    Check {
        /// Project definition (JSON)
        project: PathBuf,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("invalid role '{}', expected A or B", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // stdout carries only command output
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Analyze { template } => {
            let text = fs::read_to_string(&template)
                .with_context(|| format!("Failed to read {}", template.display()))?;
            let analysis = ContractEngine::new().analyze(&text);
            if !analysis.has_articles() {
                warn!("No article headers found in {}", template.display());
            }
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Generate {
            project,
            answers,
            role,
            date,
            output,
        } => {
            let project = loader::load_project(&project)?;
            let answers = loader::load_answers(&answers)?;
            let config = project.contracts.get(role);

            for step in unanswered_steps(config, &answers) {
                warn!("Unanswered: {} ({})", step.key, step.question.prompt);
            }

            let date = date.unwrap_or_else(today);
            let document = generate_contract(&project.name, config, &answers, &date);
            for name in &document.unresolved_placeholders {
                warn!("Placeholder left in the contract: {{{{{}}}}}", name);
            }
            for id in &document.unplaced_clauses {
                warn!("Clause {} not inserted, its article is missing", id);
            }

            match output {
                Some(path) => {
                    fs::write(&path, &document.content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Contract written to {}", path.display());
                }
                None => print!("{}", document.content),
            }
        }
        Command::Check { project } => {
            let project = loader::load_project(&project)?;
            let (report, errors) = check_report(&project);
            print!("{}", report);
            if errors > 0 {
                anyhow::bail!("{} configuration error(s)", errors);
            }
        }
    }

    Ok(())
}

/// One line per issue, prefixed with party and severity; returns the error count too
fn check_report(project: &ProjectDefinition) -> (String, usize) {
    let mut report = String::new();
    let mut errors = 0;

    for role in [Role::A, Role::B] {
        for issue in validate_config(project.contracts.get(role)) {
            let label = match issue.severity() {
                IssueSeverity::Error => {
                    errors += 1;
                    "error"
                }
                IssueSeverity::Warning => "warning",
            };
            report.push_str(&format!("[{}] {}: {}\n", role, label, issue.message()));
        }
    }

    if report.is_empty() {
        report.push_str("No issues found\n");
    }
    (report, errors)
}
