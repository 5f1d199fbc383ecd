//! Error types for chapterize.

/// Result type alias for chapterize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for chapterize.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Title pattern is not a valid regular expression.
    #[error("invalid title pattern '{pattern}'")]
    InvalidTitlePattern {
        /// The rejected pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Failed to read the input directory.
    #[error("failed to read input directory '{path}'")]
    InputDirRead {
        /// Path to the input directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No audiobook files matched in the input directory.
    #[error("no audiobook files matching the title pattern found in '{path}'")]
    NoAudiobookFiles {
        /// Path to the input directory.
        path: std::path::PathBuf,
    },

    /// The ffprobe binary could not be found.
    #[error("ffprobe not found (is FFmpeg installed and on PATH?)")]
    ProberNotFound,

    /// The ffmpeg binary could not be found.
    #[error("ffmpeg not found (is FFmpeg installed and on PATH?)")]
    TranscoderNotFound,

    /// ffprobe exited with a non-zero status.
    #[error("ffprobe failed for '{path}': {stderr}")]
    ProberFailed {
        /// Path to the audiobook file.
        path: std::path::PathBuf,
        /// Captured stderr from ffprobe.
        stderr: String,
    },

    /// ffprobe output could not be parsed.
    #[error("failed to parse ffprobe output for '{path}'")]
    ProbeParse {
        /// Path to the audiobook file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// ffmpeg exited with a non-zero status.
    #[error("ffmpeg failed while writing '{path}': {stderr}")]
    TranscoderFailed {
        /// Path to the chapter output file.
        path: std::path::PathBuf,
        /// Captured stderr from ffmpeg.
        stderr: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
