mod config;
mod ledger;
mod models;
mod utils;
use std::fs;
use std::path::PathBuf;
use std::process;
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use log::{error, info};
use simplelog::{ColorChoice, Config as LogConfig, TermLogger, TerminalMode};
use crate::config::Config;
use crate::ledger::{Action, Ledger, RowInput};
use crate::models::Grade;
use crate::utils::gpa::calculate;
use crate::utils::render::{render_html, render_table};
use crate::utils::storage::FileStore;

#[derive(Parser)]
#[command(name = "gpa-ledger", version, about = "Keep a list of courses and compute a credit-weighted GPA")]
struct Cli {
    /// Store file holding the saved courses [env: GPA_LEDGER_STORE, default: gpa_ledger.json]
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Fields {
    /// Course name
    #[arg(long)]
    name: Option<String>,

    /// Credit count, kept as typed
    #[arg(long)]
    credits: Option<String>,

    /// Letter (A, A-, B+ ..) or grade points (4.0, 3.7 ..)
    #[arg(long)]
    grade: Option<Grade>,
}

impl From<Fields> for RowInput {
    fn from(fields: Fields) -> Self {
        RowInput { name: fields.name, credits: fields.credits, grade: fields.grade }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the courses and the current GPA
    Show,
    /// Append a course row (blank unless fields are given)
    Add(Fields),
    /// Change fields of an existing row
    Edit {
        /// Row number as shown by `show`
        row: usize,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a row
    Remove {
        /// Row number as shown by `show`
        row: usize,
    },
    /// Calculate the GPA
    Calc,
    /// Remove every course, leaving one blank row
    Clear,
    /// Render the ledger as an HTML page
    Html {
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

// Converts a 1-based row number from the command line into a list position.
fn position(row: usize) -> Result<usize> {
    row.checked_sub(1).ok_or_else(|| anyhow!("Rows are numbered from 1"))
}

// Opens the ledger, handles one subcommand and prints what it produced.
fn run(command: Commands, config: &Config) -> Result<()> {
    // Loads the saved courses, or the defaults on a first run.
    let mut ledger = Ledger::open(FileStore::new(&config.store_path))
        .with_context(|| format!("Failed to open ledger at {}", config.store_path.display()))?;

    match command {
        Commands::Show => {
            println!("{}", render_table(ledger.courses(), &calculate(ledger.courses())));
        }
        Commands::Html { output } => {
            let html = render_html(ledger.courses(), &calculate(ledger.courses()));
            match output {
                Some(path) => {
                    fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Commands::Calc => println!("{}", ledger.dispatch(Action::Calculate)?),
        Commands::Add(fields) => {
            ledger.dispatch(Action::Add(fields.into()))?;
            println!("{}", render_table(ledger.courses(), &calculate(ledger.courses())));
        }
        Commands::Edit { row, fields } => {
            ledger.dispatch(Action::Edit(position(row)?, fields.into()))?;
            println!("{}", render_table(ledger.courses(), &calculate(ledger.courses())));
        }
        Commands::Remove { row } => {
            ledger.dispatch(Action::Remove(position(row)?))?;
            println!("{}", render_table(ledger.courses(), &calculate(ledger.courses())));
        }
        Commands::Clear => {
            let output = ledger.dispatch(Action::Clear)?.to_string();
            println!("{}", render_table(ledger.courses(), &output));
        }
    }
    Ok(())
}

fn main() {
    // Loads environment variables from a `.env` file, if present.
    dotenv().ok();

    let cli = Cli::parse();

    let config = match Config::resolve(cli.store, cli.verbose) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    // Terminal logging with mixed output (both stdout and stderr) and automatic color support.
    if TermLogger::init(config.log_level, LogConfig::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        eprintln!("Logger was already initialized");
    }

    if let Err(e) = run(cli.command, &config) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
