mod cli;
mod config;
mod outcome;
mod report;
mod results;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gridlab::io::config::{CONFIG_FILE, load_config};

#[derive(Parser)]
#[command(name = "judge", version, about = "Score a solver against gridlab instances")]
struct Cli {
    /// Path to the gridlab config file.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the solver on every file in a directory.
    Dir {
        input_dir: PathBuf,
        /// Per-file time limit; overrides `[judge] timeout_secs`.
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Write a JSON report to this path.
        #[arg(long)]
        json: Option<PathBuf>,
        /// Solver command and arguments, after `--`.
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },
}

fn main() -> Result<()> {
    gridlab::logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Dir {
            input_dir,
            timeout_secs,
            json,
            command,
        } => {
            let cfg = config::apply_overrides(load_config(&cli.config)?, timeout_secs)?;
            cli::judge_dir(&input_dir, &command, &cfg, json.as_deref())?;
            Ok(())
        }
    }
}
