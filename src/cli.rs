//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use specrun::output::OutputMode;

/// specrun - resolve resource expressions and prepare browser test harnesses
#[derive(Parser, Debug)]
#[command(
    name = "specrun",
    version,
    about = "Resolve resource expressions and prepare browser test harnesses",
    long_about = "Expand include/exclude resource expressions against directories and\n\
                  archives, probe how classpath resources are backed, and turn a runner\n\
                  property bag into the resolved harness plan."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Expand expression lists into the final resource set
    Resolve {
        /// Semicolon-separated expressions, `~` prefix excludes
        expressions: String,

        /// Resource root (directory or archive) for classpath lookups
        #[arg(short, long = "root")]
        roots: Vec<PathBuf>,

        /// Combine exclusions by symmetric difference (legacy semantics)
        /// instead of subtraction
        #[arg(long)]
        disjunction: bool,
    },

    /// Probe whether a classpath resource is archive-backed
    Probe {
        /// Resource path, e.g. /org/app/Widget.js
        resource: String,

        /// Resource root (directory or archive) for classpath lookups
        #[arg(short, long = "root", required = true)]
        roots: Vec<PathBuf>,
    },

    /// Resolve a runner property bag into a harness plan
    Plan {
        /// TOML file with string runner properties
        properties: PathBuf,

        /// Resource root (directory or archive) for classpath lookups
        #[arg(short, long = "root")]
        roots: Vec<PathBuf>,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Resolve {
            expressions,
            roots,
            disjunction,
        }) => commands::resolve(&expressions, &roots, disjunction, output_mode),
        Some(Command::Probe { resource, roots }) => {
            commands::probe(&resource, &roots, output_mode)
        }
        Some(Command::Plan { properties, roots }) => {
            commands::plan(&properties, &roots, output_mode)
        }
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("specrun v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        }
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("specrun v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'specrun --help' for usage");
            }
            Ok(())
        }
    }
}
