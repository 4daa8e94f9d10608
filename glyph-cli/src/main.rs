//! Glyph CLI - a thin command-line driver over the `glyph-*` engine
//! crates.
//!
//! `init` scaffolds a project, `check` lexes and parses script files
//! and reports syntax errors, `info` brings up a library and one VM to
//! show what a script would see. None of these run a script: turning a
//! parsed tree into bytecode and executing it belongs to a driver built
//! on top of this crate.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{check::CheckArgs, info, init::InitArgs};
use error::Result;

#[derive(Parser, Debug)]
#[command(name = "glyph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line driver for the glyph engine", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true, env = "GLYPH_VERBOSE")]
    verbose: bool,

    /// Path to a configuration file.
    #[arg(short, long, global = true, env = "GLYPH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a new glyph project.
    Init(InitCommand),
    /// Parse script files and report syntax errors.
    Check(CheckCommand),
    /// Show what a freshly created VM sees.
    Info(InfoCommand),
}

#[derive(Parser, Debug)]
struct InitCommand {
    #[arg(short, long)]
    path: Option<PathBuf>,
    #[arg(short, long)]
    force: bool,
}

#[derive(Parser, Debug)]
struct CheckCommand {
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
struct InfoCommand {
    /// Bring the library up in multi-thread mode.
    #[arg(long)]
    multi_thread: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let _config = load_config(cli.config.as_deref())?;
    dispatch(cli.command, cli.verbose)
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::new(if verbose { "debug" } else { "warn" });
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| error::CliError::Config(format!("failed to initialize logging: {e}")))?;
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<glyph_runtime::GlyphConfig> {
    match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    }
}

fn dispatch(command: Commands, verbose: bool) -> Result<()> {
    match command {
        Commands::Init(args) => commands::run_init(InitArgs { verbose, force: args.force, path: args.path }),
        Commands::Check(args) => commands::run_check(CheckArgs { verbose, files: args.files }).map(|_| ()),
        Commands::Info(args) => {
            let report = info::run_info(args.multi_thread)?;
            info::print_info(&report);
            Ok(())
        }
    }
}
