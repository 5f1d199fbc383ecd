//! Split command execution.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::{info, warn};

use crate::Error;
use crate::cli::SplitArgs;
use crate::config::Config;
use crate::constants::{DEFAULT_ALBUM, DEFAULT_TITLE_PATTERN};

use super::{
    AudiobookGroup, ChapterExporter, ChapterSink, EncodeSettings, ProbeReport,
    group_audiobook_files, probe_file,
};

/// Export counters accumulated per group.
#[derive(Debug, Default)]
struct GroupStats {
    /// Chapters successfully exported.
    exported: usize,
    /// Chapters whose transcode failed.
    failed_chapters: usize,
    /// Files skipped whole because probing failed.
    skipped_files: usize,
}

/// Execute the split command.
///
/// # Errors
///
/// Returns an error if grouping fails, no output directory is configured,
/// or (with `--fail-fast`) a probe or transcode fails.
pub fn execute(input_dir: &Path, args: &SplitArgs, config: &Config) -> Result<(), Error> {
    let output_root = args
        .output_dir
        .clone()
        .or_else(|| config.defaults.output_dir.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no output directory specified (use -o or set defaults.output_dir in config)"
                .to_string(),
        })?;

    let pattern_str = args
        .pattern
        .clone()
        .or_else(|| config.defaults.pattern.clone())
        .unwrap_or_else(|| DEFAULT_TITLE_PATTERN.to_string());
    let pattern = Regex::new(&pattern_str).map_err(|e| Error::InvalidTitlePattern {
        pattern: pattern_str.clone(),
        source: e,
    })?;

    let settings = EncodeSettings {
        bitrate: args
            .bitrate
            .clone()
            .unwrap_or_else(|| config.encode.bitrate.clone()),
        sample_rate: args.sample_rate.unwrap_or(config.encode.sample_rate),
        channels: args.channels.unwrap_or(config.encode.channels),
    };

    let groups = group_audiobook_files(input_dir, &pattern)?;
    info!(
        "Found {} audiobook group(s) in {}",
        groups.len(),
        input_dir.display()
    );

    let progress_enabled = !args.quiet && !args.no_progress;

    let mut totals = GroupStats::default();

    for group in &groups {
        let exporter = ChapterExporter::for_group(&output_root, &group.title, settings.clone());
        info!(
            "Processing '{}' ({} part(s)) -> {}",
            group.title,
            group.files.len(),
            exporter.output_dir().display()
        );

        let stats = process_group(group, &exporter, args.fail_fast, progress_enabled)?;
        totals.exported += stats.exported;
        totals.failed_chapters += stats.failed_chapters;
        totals.skipped_files += stats.skipped_files;
    }

    info!(
        "Complete: {} chapter(s) exported across {} group(s)",
        totals.exported,
        groups.len()
    );
    if totals.failed_chapters > 0 {
        warn!("{} chapter(s) failed to export", totals.failed_chapters);
    }
    if totals.skipped_files > 0 {
        warn!(
            "{} file(s) skipped because probing failed",
            totals.skipped_files
        );
    }

    Ok(())
}

/// Probe and export all chapters of a group, numbering tracks continuously
/// across its files.
fn process_group(
    group: &AudiobookGroup,
    exporter: &ChapterExporter,
    fail_fast: bool,
    progress_enabled: bool,
) -> Result<GroupStats, Error> {
    let mut stats = GroupStats::default();
    let mut track: u32 = 1;

    for file in &group.files {
        let report = match probe_file(file) {
            Ok(report) => report,
            Err(e) if !fail_fast => {
                warn!("Failed to probe {}: {e}", file.display());
                stats.skipped_files += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if report.chapters.is_empty() {
            warn!("No chapters found in {}", file.display());
            continue;
        }

        info!(
            "Processing {} ({} chapters)",
            file.display(),
            report.chapters.len()
        );

        let pb = create_chapter_progress(report.chapters.len(), progress_enabled);
        track = export_file_chapters(exporter, file, &report, track, fail_fast, &pb, &mut stats)?;
        pb.finish_with_message("done");
    }

    Ok(stats)
}

/// Export one file's chapters starting at `first_track`; returns the next
/// free track number.
///
/// The counter advances past a failed export too, so surviving tracks stay
/// aligned with their chapter positions.
fn export_file_chapters(
    sink: &impl ChapterSink,
    source: &Path,
    report: &ProbeReport,
    first_track: u32,
    fail_fast: bool,
    pb: &ProgressBar,
    stats: &mut GroupStats,
) -> Result<u32, Error> {
    let album = report.album.as_deref().unwrap_or(DEFAULT_ALBUM);
    let mut track = first_track;

    for chapter in &report.chapters {
        pb.set_message(format!("track {track}"));

        match sink.export_chapter(source, chapter, album, track) {
            Ok(path) => {
                // Use pb.println to avoid progress bar stuttering
                pb.println(format!(
                    "  {track}: {}-{}s -> {}",
                    chapter.start,
                    chapter.end,
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
                stats.exported += 1;
            }
            Err(e) => {
                if fail_fast {
                    pb.finish_with_message("failed");
                    return Err(e);
                }
                warn!("Failed to export track {track}: {e}");
                stats.failed_chapters += 1;
            }
        }

        track += 1;
        pb.inc(1);
    }

    Ok(track)
}

/// Create a progress bar over one file's chapters.
#[allow(clippy::cast_possible_truncation)]
fn create_chapter_progress(total_chapters: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_chapters as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chapters ({msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
