//! Chapterize - audiobook chapter splitting CLI tool.
//!
//! Splits `.m4b` audiobooks into per-chapter MP3s with embedded metadata,
//! grouping multi-part books by inferred title and numbering tracks
//! continuously across parts. Chapter boundaries come from `ffprobe`;
//! cutting and re-encoding is done by `ffmpeg`.

#![warn(missing_docs)]
#![allow(clippy::print_stdout)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod splitter;

use clap::Parser;
use cli::{Cli, Command, ConfigAction};
use config::{Config, config_file_path, load_default_config, save_default_config};
use tracing::warn;

pub use error::{Error, Result};

/// Main entry point for the chapterize CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.split.verbose, cli.split.quiet);

    // Install Ctrl+C handler to remove partially written chapter files
    if let Err(e) = ctrlc::set_handler(|| {
        splitter::cleanup_partial_outputs();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    // Load configuration
    let config = load_default_config()?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    // Default: split audiobooks
    // Show help if no input directory provided
    let Some(input_dir) = cli.input_dir else {
        let mut help = <Cli as clap::CommandFactory>::command();
        let _ = help.print_help();
        std::process::exit(0);
    };

    splitter::command::execute(&input_dir, &cli.split, &config)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
