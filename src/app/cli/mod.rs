//! CLI Adapter.

mod plan;

use std::io::{ErrorKind, IsTerminal};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dialoguer::{Error as DialoguerError, Input, Password};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, GenerateOptions, GenerateOutcome};
use crate::domain::{AppConfig, AppError};

#[derive(Parser)]
#[command(name = "versecast")]
#[command(version)]
#[command(about = "Turn scripture references into OBS verse scenes", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Args)]
struct GenerateArgs {
    /// Config file (defaults to ~/.config/versecast/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Fetch and print the verses without connecting to OBS
    #[arg(long)]
    dry_run: bool,
    /// Scripture reference, e.g. John 3:16-18 (prompted when omitted)
    reference: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the study plan
    #[clap(visible_alias = "p")]
    Plan {
        #[command(subcommand)]
        command: plan::PlanCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Plan { command }) => plan::run_plan(command),
        None => run_generate(cli.generate),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let reference = match join_words(&args.reference) {
        Some(reference) => reference,
        None => match prompt_reference()? {
            Some(reference) => reference,
            None => {
                println!("Scripture reference is required.");
                return Ok(());
            }
        },
    };

    let config = api::load_config(args.config.as_deref())?;
    generate_and_report(config, reference, args.dry_run)
}

/// Run the generate pipeline and print its outcome.
fn generate_and_report(
    mut config: AppConfig,
    reference: String,
    dry_run: bool,
) -> Result<(), AppError> {
    if !dry_run && !resolve_obs_connection(&mut config)? {
        return Ok(());
    }
    let outcome = api::generate(config, &GenerateOptions { reference, dry_run })?;
    print_outcome(&outcome)
}

fn print_outcome(outcome: &GenerateOutcome) -> Result<(), AppError> {
    if outcome.passage.is_empty() {
        println!("No verses found for {}.", outcome.reference);
        return Ok(());
    }

    let Some(report) = &outcome.report else {
        if let Some(title) = &outcome.passage.title {
            println!("{}\n", title);
        }
        for verse in &outcome.passage.verses {
            println!("--- {} ---", verse.scene_name);
            println!("{}\n", verse.render_text);
        }
        return Ok(());
    };

    for scene in &report.created {
        println!("✅ Created scene {}", scene);
    }
    for scene in &report.updated {
        println!("✅ Updated scene {}", scene);
    }
    if let Some(scene) = &outcome.activated_scene {
        println!("✅ Activated scene {}", scene);
    }
    let image_failures = match &outcome.image_report {
        Some(images) => {
            for scene in &images.created {
                println!("✅ Created image scene {}", scene);
            }
            for scene in &images.updated {
                println!("✅ Updated image scene {}", scene);
            }
            images.failures.as_slice()
        }
        None => &[],
    };
    if outcome.plan_updated {
        println!("✅ Marked {} as processed in the study plan", outcome.reference);
    }
    if !report.failures.is_empty() || !image_failures.is_empty() || !outcome.warnings.is_empty() {
        println!("⚠️  Warnings:");
        for failure in report.failures.iter().chain(image_failures) {
            println!("  • {}", failure);
        }
        for warning in &outcome.warnings {
            println!("  • {}", warning);
        }
    }

    report.ensure_complete()
}

fn join_words(words: &[String]) -> Option<String> {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn prompt_reference() -> Result<Option<String>, AppError> {
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }
    match Input::<String>::new()
        .with_prompt("Scripture reference (e.g. John 3:16-18)")
        .allow_empty(true)
        .interact_text()
    {
        Ok(value) => Ok(join_words(&[value])),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::config_error(format!("Failed to read reference: {}", err))),
    }
}

/// Prompt for host, port and password when no password came from the file or environment.
///
/// Returns `false` when the user cancelled.
fn resolve_obs_connection(config: &mut AppConfig) -> Result<bool, AppError> {
    if config.obs.password.is_some() {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        debug!("stdin is not a terminal; connecting without a password");
        return Ok(true);
    }

    let Some(host) = prompt_input("OBS host", config.obs.host.clone())? else {
        return Ok(false);
    };
    let Some(port) = prompt_input("OBS port", config.obs.port)? else {
        return Ok(false);
    };
    let password = match Password::new()
        .with_prompt("OBS password (empty for none)")
        .allow_empty_password(true)
        .interact()
    {
        Ok(value) => value,
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => return Ok(false),
        Err(err) => {
            return Err(AppError::config_error(format!("Failed to read password: {}", err)));
        }
    };

    config.obs.host = host;
    config.obs.port = port;
    config.obs.password = Some(password);
    config.validate()?;
    Ok(true)
}

fn prompt_input<T>(prompt: &str, default: T) -> Result<Option<T>, AppError>
where
    T: Clone + ToString + std::str::FromStr,
    <T as std::str::FromStr>::Err: ToString,
{
    match Input::<T>::new().with_prompt(prompt).default(default).interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::config_error(format!("Failed to read {}: {}", prompt, err))),
    }
}
