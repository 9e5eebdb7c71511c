//! Grid puzzle engine CLI.
//!
//! Generates instances from seeds, replays solutions against them, and
//! reports scores. Configuration lives in `gridlab.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use tracing::info;

use gridlab::core::error::EngineError;
use gridlab::core::mt::Mt19937;
use gridlab::exit_codes;
use gridlab::generate::{gen_list, gen_once, gen_random};
use gridlab::inspect::{inspect, load_engine, render};
use gridlab::io::config::{CONFIG_FILE, GridlabConfig, load_config, write_config};
use gridlab::logging;
use gridlab::score::evaluate;

#[derive(Parser)]
#[command(
    name = "gridlab",
    version,
    about = "Grid puzzle engine: generate instances, replay and score solutions"
)]
struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Generate instance files from seeds.
    Gen {
        #[command(subcommand)]
        mode: GenMode,
    },
    /// Print the engine state after seeking a solution to a given time.
    Show {
        instance: PathBuf,
        /// Solution file; an empty timeline if omitted.
        #[arg(long)]
        solution: Option<PathBuf>,
        /// Number of timeline entries to apply (default: all).
        #[arg(long)]
        time: Option<usize>,
    },
    /// Score a solution against an instance.
    Score { instance: PathBuf, solution: PathBuf },
}

#[derive(Subcommand)]
enum GenMode {
    /// One instance for one seed.
    Once { out_dir: PathBuf, seed: u32 },
    /// One instance per seed listed in a file.
    List { out_dir: PathBuf, seed_file: PathBuf },
    /// `count` instances with random seeds.
    Random {
        out_dir: PathBuf,
        count: u32,
        /// Draw the seeds from MT19937 seeded with this value instead of the thread RNG.
        #[arg(long)]
        seed: Option<u32>,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Gen { mode } => cmd_gen(&cli.config, mode),
        Command::Show {
            instance,
            solution,
            time,
        } => cmd_show(&instance, solution.as_deref(), time),
        Command::Score { instance, solution } => cmd_score(&instance, &solution),
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let out_of_range = err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<EngineError>(),
            Some(EngineError::SeekOutOfRange { .. })
        )
    });
    if out_of_range {
        exit_codes::OUT_OF_RANGE
    } else {
        exit_codes::INVALID
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if !force && config_path.exists() {
        info!(path = %config_path.display(), "config exists, leaving it untouched");
        return Ok(());
    }
    write_config(config_path, &GridlabConfig::default())
        .with_context(|| format!("write {}", config_path.display()))?;
    println!("{}", config_path.display());
    Ok(())
}

fn cmd_gen(config_path: &Path, mode: GenMode) -> Result<()> {
    let cfg = load_config(config_path)?;
    let paths = match mode {
        GenMode::Once { out_dir, seed } => vec![gen_once(&out_dir, seed, &cfg.generator)?],
        GenMode::List { out_dir, seed_file } => gen_list(&out_dir, &seed_file, &cfg.generator)?,
        GenMode::Random {
            out_dir,
            count,
            seed: Some(seed),
        } => gen_random(
            &out_dir,
            count,
            &cfg.generator,
            &mut Mt19937::from_seed(seed.to_le_bytes()),
        )?,
        GenMode::Random {
            out_dir,
            count,
            seed: None,
        } => gen_random(&out_dir, count, &cfg.generator, &mut rand::thread_rng())?,
    };
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_show(instance: &Path, solution: Option<&Path>, time: Option<usize>) -> Result<()> {
    let inspection = inspect(instance, solution, time)?;
    print!("{}", render(&inspection));
    Ok(())
}

fn cmd_score(instance: &Path, solution: &Path) -> Result<()> {
    let engine = load_engine(instance, Some(solution))?;
    let eval = evaluate(&engine);
    println!("score: {}", eval.score);
    println!("sse: {}", eval.sse);
    println!("applied: {}", eval.applied);
    Ok(())
}
