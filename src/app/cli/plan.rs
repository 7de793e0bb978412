//! Study plan subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::app::api;
use crate::domain::AppError;

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Append a reference to the study plan
    #[clap(visible_alias = "a")]
    Add {
        /// Scripture reference, e.g. John 3:16-18
        #[arg(required = true)]
        reference: Vec<String>,
    },
    /// Show every reference in the study plan
    #[clap(visible_alias = "ls")]
    List,
    /// Generate scenes for the first pending reference
    #[clap(visible_alias = "n")]
    Next {
        /// Config file (defaults to ~/.config/versecast/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Fetch and print the verses without connecting to OBS
        #[arg(long)]
        dry_run: bool,
    },
    /// Mark a reference as complete
    Complete {
        #[arg(required = true)]
        reference: Vec<String>,
    },
}

pub fn run_plan(command: PlanCommands) -> Result<(), AppError> {
    match command {
        PlanCommands::Add { reference } => {
            let item = api::plan_add(&reference.join(" "))?;
            println!("✅ Added {} to the study plan", item.reference);
        }
        PlanCommands::List => {
            let items = api::plan_list()?;
            if items.is_empty() {
                println!("Study plan is empty.");
            }
            for (i, item) in items.iter().enumerate() {
                let title = item.title.as_ref().map(|t| format!(" ({})", t)).unwrap_or_default();
                println!("  {}. [{}] {}{}", i + 1, item.status, item.reference, title);
            }
        }
        PlanCommands::Next { config, dry_run } => {
            let Some(item) = api::plan_next()? else {
                println!("No pending references in the study plan.");
                return Ok(());
            };
            println!("Next: {}", item.reference);
            let config = api::load_config(config.as_deref())?;
            super::generate_and_report(config, item.reference, dry_run)?;
        }
        PlanCommands::Complete { reference } => {
            let reference = reference.join(" ");
            api::plan_complete(&reference)?;
            println!("✅ Marked {} as complete", reference.trim());
        }
    }
    Ok(())
}
