//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "chapterize";

/// Audiobook container extension accepted by the grouper.
pub const AUDIOBOOK_EXTENSION: &str = "m4b";

/// Default title pattern applied to audiobook filenames.
///
/// Strips an optional leading part number so that `1 Some Book.m4b` and
/// `2 Some Book.m4b` land in the same group. The first capture group is
/// the inferred album title.
pub const DEFAULT_TITLE_PATTERN: &str = r"^(?:\d+)?\s?(.+)\.[mM]4[bB]$";

/// Album name used when the container carries no `album` tag.
pub const DEFAULT_ALBUM: &str = "Unknown Album";

/// External tool names resolved via PATH.
pub mod tools {
    /// Media prober used to read chapter boundaries and tags.
    pub const PROBER: &str = "ffprobe";

    /// Media transcoder used to cut and re-encode chapters.
    pub const TRANSCODER: &str = "ffmpeg";
}

/// Encoding defaults for chapter output.
///
/// Spoken-word audio tolerates aggressive compression; these defaults
/// target small files over fidelity.
pub mod encode {
    /// Audio codec passed to the transcoder.
    pub const CODEC: &str = "libmp3lame";

    /// Default audio bitrate.
    pub const DEFAULT_BITRATE: &str = "40k";

    /// Default output sample rate in Hz.
    pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

    /// Default output channel count.
    pub const DEFAULT_CHANNELS: u32 = 1;

    /// Chapter output file extension.
    pub const OUTPUT_EXTENSION: &str = "mp3";
}
