//! Chapter export via the external transcoder.
//!
//! Builds and runs one ffmpeg invocation per chapter, embedding title,
//! album, and track metadata into the MP3 output.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex};

use crate::Error;
use crate::constants::{encode, tools};

use super::ChapterRecord;

/// Outputs currently being written by the transcoder.
///
/// ffmpeg killed mid-encode leaves a truncated file; the Ctrl+C handler
/// drains this registry to remove it.
static IN_FLIGHT_OUTPUTS: LazyLock<Mutex<Vec<PathBuf>>> =
    LazyLock::new(|| Mutex::new(Vec::new()));

fn register_output(path: &Path) {
    if let Ok(mut outputs) = IN_FLIGHT_OUTPUTS.lock() {
        outputs.push(path.to_path_buf());
    }
}

fn unregister_output(path: &Path) {
    if let Ok(mut outputs) = IN_FLIGHT_OUTPUTS.lock() {
        outputs.retain(|p| p != path);
    }
}

/// Remove any partially written chapter files.
///
/// Called from the interrupt handler before the process exits.
pub fn cleanup_partial_outputs() {
    if let Ok(mut outputs) = IN_FLIGHT_OUTPUTS.lock() {
        for path in outputs.drain(..) {
            let _ = fs::remove_file(path);
        }
    }
}

/// Encoding settings passed to the transcoder.
#[derive(Debug, Clone)]
pub struct EncodeSettings {
    /// Audio bitrate (e.g. "40k").
    pub bitrate: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u32,
}

/// Per-chapter export seam.
///
/// `ChapterExporter` implements this against ffmpeg; the orchestration
/// layer only depends on the trait so track numbering can be exercised
/// without a transcoder.
pub trait ChapterSink {
    /// Export one chapter as a tagged audio file, returning the output path.
    ///
    /// # Errors
    ///
    /// Returns an error if the chapter cannot be written.
    fn export_chapter(
        &self,
        source: &Path,
        chapter: &ChapterRecord,
        album: &str,
        track: u32,
    ) -> Result<PathBuf, Error>;
}

/// Exports chapters of one audiobook group to tagged MP3 files.
pub struct ChapterExporter {
    /// Output directory for this group's chapter files.
    group_dir: PathBuf,
    /// Encoding settings.
    settings: EncodeSettings,
}

impl ChapterExporter {
    /// Create an exporter writing into `<output_root>/<sanitized title>/`.
    #[must_use]
    pub fn for_group(output_root: &Path, group_title: &str, settings: EncodeSettings) -> Self {
        Self {
            group_dir: output_root.join(sanitize_filename(group_title)),
            settings,
        }
    }

    /// Directory this exporter writes chapter files into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.group_dir
    }

    fn run_transcoder(
        &self,
        source: &Path,
        chapter: &ChapterRecord,
        title: &str,
        album: &str,
        track: u32,
        output_path: &Path,
    ) -> Result<(), Error> {
        let output = Command::new(tools::TRANSCODER)
            .args(["-loglevel", "error", "-i"])
            .arg(source)
            .args(["-ss", &chapter.start, "-to", &chapter.end])
            .args(["-metadata", &format!("title={title}")])
            .args(["-metadata", &format!("album={album}")])
            .args(["-metadata", &format!("track={track}")])
            .args(["-acodec", encode::CODEC])
            .args(["-ar", &self.settings.sample_rate.to_string()])
            .args(["-b:a", &self.settings.bitrate])
            .args(["-ac", &self.settings.channels.to_string()])
            .arg("-y")
            .arg(output_path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::TranscoderNotFound
                } else {
                    Error::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(Error::TranscoderFailed {
                path: output_path.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl ChapterSink for ChapterExporter {
    /// Export one chapter as `<track> <title>.mp3` with embedded metadata.
    ///
    /// A chapter without a title tag is labeled `Chapter <track>`. The
    /// chapter's start/end strings are passed to ffmpeg verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created, ffmpeg
    /// is not installed, or ffmpeg exits with a non-zero status.
    fn export_chapter(
        &self,
        source: &Path,
        chapter: &ChapterRecord,
        album: &str,
        track: u32,
    ) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.group_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: self.group_dir.clone(),
            source: e,
        })?;

        let title = chapter
            .title
            .as_deref()
            .map_or_else(|| format!("Chapter {track}"), sanitize_filename);
        let album = sanitize_filename(album);

        let output_path = self.group_dir.join(format!(
            "{track} {title}.{}",
            encode::OUTPUT_EXTENSION
        ));

        register_output(&output_path);
        let result = self.run_transcoder(source, chapter, &title, &album, track, &output_path);
        unregister_output(&output_path);

        if result.is_err() {
            // ffmpeg may have written a truncated file before failing
            let _ = fs::remove_file(&output_path);
        }

        result.map(|()| output_path)
    }
}

/// Sanitize a string for use as a filename/directory name.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    // Prevent path traversal: replace ".." with "__"
    sanitized.replace("..", "__")
}
