//! Chapter metadata probing.
//!
//! Invokes ffprobe per audiobook file and parses its JSON output into
//! chapter boundary records and the container's album tag.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::Error;
use crate::constants::tools;

/// A chapter boundary record read from the container.
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    /// Chapter start as the decimal seconds string ffprobe printed.
    pub start: String,
    /// Chapter end as the decimal seconds string ffprobe printed.
    pub end: String,
    /// Chapter title tag, if the container carries one.
    pub title: Option<String>,
}

/// Probe result for a single audiobook file.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    /// The container's `album` tag, if any.
    pub album: Option<String>,
    /// Chapters in container order.
    pub chapters: Vec<ChapterRecord>,
}

/// Raw ffprobe JSON structure.
#[derive(Debug, Deserialize)]
struct RawProbe {
    #[serde(default)]
    chapters: Vec<RawChapter>,
    format: Option<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawChapter {
    start_time: String,
    end_time: String,
    tags: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    tags: Option<HashMap<String, String>>,
}

/// Probe an audiobook file for chapters and container tags.
///
/// Runs `ffprobe -loglevel error -print_format json -show_format
/// -show_chapters -i <file>` and parses the JSON output.
///
/// # Errors
///
/// Returns an error if ffprobe is not installed, exits with a non-zero
/// status, or prints output that cannot be parsed.
pub fn probe_file(path: &Path) -> Result<ProbeReport, Error> {
    let output = Command::new(tools::PROBER)
        .args([
            "-loglevel",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_chapters",
            "-i",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ProberNotFound
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        return Err(Error::ProberFailed {
            path: path.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_probe_output(path, &String::from_utf8_lossy(&output.stdout))
}

/// Parse ffprobe JSON output into a probe report.
fn parse_probe_output(path: &Path, json: &str) -> Result<ProbeReport, Error> {
    let raw: RawProbe = serde_json::from_str(json).map_err(|e| Error::ProbeParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let album = raw
        .format
        .and_then(|f| f.tags)
        .and_then(|mut tags| tags.remove("album"));

    let chapters = raw
        .chapters
        .into_iter()
        .map(|c| ChapterRecord {
            start: c.start_time,
            end: c.end_time,
            title: c.tags.and_then(|mut t| t.remove("title")),
        })
        .collect();

    Ok(ProbeReport { album, chapters })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "chapters": [
            {
                "id": 0,
                "time_base": "1/1000",
                "start": 0,
                "start_time": "0.000000",
                "end": 1520000,
                "end_time": "1520.000000",
                "tags": { "title": "Opening Credits" }
            },
            {
                "id": 1,
                "time_base": "1/1000",
                "start": 1520000,
                "start_time": "1520.000000",
                "end": 3493000,
                "end_time": "3493.000000"
            }
        ],
        "format": {
            "filename": "book.m4b",
            "tags": { "album": "The Long Way", "artist": "A. Writer" }
        }
    }"#;

    #[test]
    fn test_parse_chapters_and_album() {
        let report = parse_probe_output(Path::new("book.m4b"), SAMPLE).unwrap();
        assert_eq!(report.album, Some("The Long Way".to_string()));
        assert_eq!(report.chapters.len(), 2);
        assert_eq!(report.chapters[0].start, "0.000000");
        assert_eq!(report.chapters[0].end, "1520.000000");
        assert_eq!(
            report.chapters[0].title,
            Some("Opening Credits".to_string())
        );
    }

    #[test]
    fn test_parse_chapter_without_title_tag() {
        let report = parse_probe_output(Path::new("book.m4b"), SAMPLE).unwrap();
        assert_eq!(report.chapters[1].title, None);
    }

    #[test]
    fn test_parse_no_chapters() {
        let json = r#"{ "format": { "tags": { "album": "Solo" } } }"#;
        let report = parse_probe_output(Path::new("book.m4b"), json).unwrap();
        assert!(report.chapters.is_empty());
        assert_eq!(report.album, Some("Solo".to_string()));
    }

    #[test]
    fn test_parse_no_album_tag() {
        let json = r#"{ "chapters": [], "format": { "filename": "book.m4b" } }"#;
        let report = parse_probe_output(Path::new("book.m4b"), json).unwrap();
        assert_eq!(report.album, None);
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        let result = parse_probe_output(Path::new("book.m4b"), "not json");
        assert!(matches!(result, Err(Error::ProbeParse { .. })));
    }

    #[test]
    fn test_timestamps_kept_verbatim() {
        // Fractional timestamps must not round-trip through floats.
        let json = r#"{
            "chapters": [{
                "start_time": "12.345678",
                "end_time": "99.999999"
            }]
        }"#;
        let report = parse_probe_output(Path::new("book.m4b"), json).unwrap();
        assert_eq!(report.chapters[0].start, "12.345678");
        assert_eq!(report.chapters[0].end, "99.999999");
    }
}
