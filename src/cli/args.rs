//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Split audiobook files into per-chapter MP3s with embedded metadata.
#[derive(Debug, Parser)]
#[command(name = "chapterize")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory containing audiobook files to split.
    ///
    /// A directory whose name collides with a subcommand (e.g. `config`)
    /// must be disambiguated with a path prefix: `./config`.
    pub input_dir: Option<PathBuf>,

    /// Common options for splitting.
    #[command(flatten)]
    pub split: SplitArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the split command.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Base output directory for chapter files.
    #[arg(short, long, env = "CHAPTERIZE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Regex applied to audiobook filenames; the first capture group is the
    /// album title used for grouping.
    #[arg(long, env = "CHAPTERIZE_PATTERN")]
    pub pattern: Option<String>,

    /// Output audio bitrate (e.g. 40k, 64k).
    #[arg(long, value_parser = parse_bitrate, env = "CHAPTERIZE_BITRATE")]
    pub bitrate: Option<String>,

    /// Output sample rate in Hz.
    #[arg(long, value_parser = clap::value_parser!(u32).range(8000..=48000),
          env = "CHAPTERIZE_SAMPLE_RATE")]
    pub sample_rate: Option<u32>,

    /// Output channel count (1 = mono, 2 = stereo).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2),
          env = "CHAPTERIZE_CHANNELS")]
    pub channels: Option<u32>,

    /// Stop on first transcoding error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the chapter progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

/// Parse and validate a bitrate value like `40k` or `128000`.
fn parse_bitrate(s: &str) -> Result<String, String> {
    let digits = s.strip_suffix(['k', 'K']).unwrap_or(s);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{s}' is not a valid bitrate (expected e.g. 40k)"));
    }

    Ok(s.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bitrate_valid() {
        assert_eq!(parse_bitrate("40k").ok(), Some("40k".to_string()));
        assert_eq!(parse_bitrate("64K").ok(), Some("64K".to_string()));
        assert_eq!(parse_bitrate("128000").ok(), Some("128000".to_string()));
    }

    #[test]
    fn test_parse_bitrate_invalid() {
        assert!(parse_bitrate("").is_err());
        assert!(parse_bitrate("k").is_err());
        assert!(parse_bitrate("40kb").is_err());
        assert!(parse_bitrate("fast").is_err());
    }

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["chapterize", "books/", "-o", "out/"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.input_dir, Some(PathBuf::from("books/")));
        assert_eq!(cli.split.output_dir, Some(PathBuf::from("out/")));
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "chapterize",
            "books/",
            "-o",
            "out/",
            "--bitrate",
            "64k",
            "--sample-rate",
            "44100",
            "--channels",
            "2",
            "-q",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.split.bitrate, Some("64k".to_string()));
        assert_eq!(cli.split.sample_rate, Some(44100));
        assert_eq!(cli.split.channels, Some(2));
        assert!(cli.split.quiet);
    }

    #[test]
    fn test_cli_parse_channels_out_of_range() {
        let cli = Cli::try_parse_from(["chapterize", "books/", "--channels", "6"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_sample_rate_out_of_range() {
        let cli = Cli::try_parse_from(["chapterize", "books/", "--sample-rate", "96000"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["chapterize", "config", "show"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_bare_config_is_subcommand() {
        // `config` resolves as the subcommand, not an input directory
        let cli = Cli::try_parse_from(["chapterize", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Config { .. })));
        assert_eq!(cli.input_dir, None);
    }

    #[test]
    fn test_cli_parse_config_dir_with_path_prefix() {
        let cli = Cli::try_parse_from(["chapterize", "./config", "-o", "out/"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.input_dir, Some(PathBuf::from("./config")));
    }

    #[test]
    fn test_cli_parse_custom_pattern() {
        let cli = Cli::try_parse_from(["chapterize", "books/", "--pattern", r"(.+) - Part \d+"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.split.pattern, Some(r"(.+) - Part \d+".to_string()));
    }
}
