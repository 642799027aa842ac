//! CLI entry point for the grid path solver.
//!
//! Usage:
//!   gridpath solve <grid.txt> [options]
//!   gridpath solve --stdin [options]
//!
//! Options:
//!   --preset <basic|ultra>  Named constraint preset (overrides run flags)
//!   --min-run <n>           Minimum straight run before a turn (default: 1)
//!   --max-run <n>           Maximum straight run (default: 3)
//!   --verbose               Log search progress to stderr

mod error;
mod grid;
mod labels;
mod solver;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use grid::Grid;
use solver::{run_search, RunLimits, SearchOutcome};

#[derive(Parser)]
#[command(name = "gridpath")]
#[command(about = "Constrained-turn shortest path solver for weighted digit grids")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Preset {
    /// min_run=1, max_run=3
    Basic,
    /// min_run=4, max_run=10
    Ultra,
}

impl Preset {
    fn limits(self) -> RunLimits {
        match self {
            Preset::Basic => RunLimits::BASIC,
            Preset::Ultra => RunLimits::ULTRA,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a digit grid from its top-left to its bottom-right cell
    Solve {
        /// Path to grid text file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the grid from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Named constraint preset (overrides --min-run/--max-run)
        #[arg(long, value_enum)]
        preset: Option<Preset>,

        /// Minimum straight run before a turn or the final arrival
        #[arg(long, default_value = "1")]
        min_run: u8,

        /// Maximum straight run
        #[arg(long, default_value = "3")]
        max_run: u8,

        /// Log search progress to stderr
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Output format for the solve result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<u32>,
    min_run: u8,
    max_run: u8,
    states_expanded: usize,
    relaxations: usize,
    time_elapsed_ms: u64,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            preset,
            min_run,
            max_run,
            verbose,
        } => {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            };
            // stdout carries the JSON result, so logs go to stderr.
            TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )
            .ok();

            // Read grid text
            let grid_text = if stdin {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .expect("Failed to read from stdin");
                buffer
            } else if let Some(path) = file {
                fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
            } else {
                eprintln!("Error: Must provide either a file path or --stdin");
                std::process::exit(1);
            };

            // Parse grid
            let grid = match Grid::parse(&grid_text) {
                Ok(g) => g,
                Err(e) => {
                    eprintln!("Error parsing grid: {}", e);
                    std::process::exit(1);
                }
            };

            // Resolve run limits
            let limits = match preset {
                Some(p) => p.limits(),
                None => match RunLimits::new(min_run, max_run) {
                    Ok(l) => l,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                },
            };

            // Run solver
            let outcome =
                match run_search(&grid, limits, grid.top_left(), grid.bottom_right()) {
                    Ok(o) => o,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                };

            // Format output
            let output = format_outcome(&outcome, limits);

            // Print JSON output
            println!("{}", serde_json::to_string_pretty(&output).unwrap());

            // Exit with appropriate code
            if output.found {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn format_outcome(outcome: &SearchOutcome, limits: RunLimits) -> SolveOutput {
    SolveOutput {
        found: outcome.cost.is_some(),
        cost: outcome.cost,
        min_run: limits.min_run,
        max_run: limits.max_run,
        states_expanded: outcome.stats.states_expanded,
        relaxations: outcome.stats.relaxations,
        time_elapsed_ms: outcome.time_elapsed_ms,
    }
}
