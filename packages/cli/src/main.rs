#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for SmartHood.
//!
//! ```text
//! smarthood recommend --profile assessment.json [--report-dir reports] [--json]
//! smarthood fallback --profile assessment.json [--json]
//! smarthood cities
//! smarthood serve [--interactive]
//! ```
//!
//! Running `smarthood` with no subcommand enters interactive mode.
//!
//! Uses `indicatif-log-bridge` (via [`smarthood_cli_utils::init_logger`])
//! so that log lines and the spinner shown while waiting on the model
//! never fight for the terminal.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};

#[derive(Parser)]
#[command(
    name = "smarthood",
    about = "Neighborhood recommendations from a lifestyle questionnaire"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the language model for recommendations (falls back to the catalog)
    Recommend {
        /// Questionnaire profile JSON file
        #[arg(long)]
        profile: PathBuf,
        /// Directory to write the plain-text report to
        #[arg(long)]
        report_dir: Option<PathBuf>,
        /// Print the recommendations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the catalog fallback without calling the model
    Fallback {
        /// Questionnaire profile JSON file
        #[arg(long)]
        profile: PathBuf,
        /// Print the recommendations as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the cities with curated neighborhoods
    Cities,
    /// Start the API server
    Serve {
        /// Prompt for the bind address, port and defaults
        #[arg(long)]
        interactive: bool,
    },
}

/// Top-level actions offered in interactive mode.
enum Action {
    Recommend,
    Fallback,
    Cities,
    Serve,
}

impl Action {
    const ALL: &[Self] = &[Self::Recommend, Self::Fallback, Self::Cities, Self::Serve];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Recommend => "Get recommendations for a profile",
            Self::Fallback => "Preview catalog fallback for a profile",
            Self::Cities => "List catalogued cities",
            Self::Serve => "Start server",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = smarthood_cli_utils::init_logger();
    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => prompt_command()?,
    };

    match command {
        Commands::Recommend {
            profile,
            report_dir,
            json,
        } => commands::recommend(&multi, &profile, report_dir.as_deref(), json).await?,
        Commands::Fallback { profile, json } => commands::fallback(&profile, json)?,
        Commands::Cities => commands::cities(),
        Commands::Serve { interactive } => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(async move {
                    if interactive {
                        smarthood_server::interactive::run().await
                    } else {
                        smarthood_server::run_server().await
                    }
                })
            })
            .await??;
        }
    }

    Ok(())
}

fn prompt_command() -> Result<Commands, Box<dyn std::error::Error>> {
    println!("SmartHood");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(match Action::ALL[idx] {
        Action::Recommend => Commands::Recommend {
            profile: prompt_profile_path()?,
            report_dir: Some(PathBuf::from(".")),
            json: false,
        },
        Action::Fallback => Commands::Fallback {
            profile: prompt_profile_path()?,
            json: false,
        },
        Action::Cities => Commands::Cities,
        Action::Serve => Commands::Serve { interactive: true },
    })
}

fn prompt_profile_path() -> Result<PathBuf, dialoguer::Error> {
    let path: String = Input::new()
        .with_prompt("Profile JSON file")
        .default("assessment.json".to_string())
        .interact_text()?;
    Ok(PathBuf::from(path))
}
