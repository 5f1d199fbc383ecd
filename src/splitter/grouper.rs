//! Audiobook file grouping.
//!
//! Buckets `.m4b` files by the album title inferred from their filenames
//! and orders each bucket naturally so `part 2` precedes `part 10`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use regex::Regex;
use tracing::debug;

use crate::Error;
use crate::constants::AUDIOBOOK_EXTENSION;

/// A group of audiobook parts sharing an inferred album title.
#[derive(Debug, Clone)]
pub struct AudiobookGroup {
    /// The album title inferred from the filenames.
    pub title: String,
    /// Member files in natural order.
    pub files: Vec<PathBuf>,
}

/// Scan a directory and group audiobook files by inferred album title.
///
/// Only direct children with an `.m4b` extension are considered. The title
/// is taken from the pattern's first capture group, falling back to the
/// whole match for patterns without groups. Files that do not match are
/// skipped. Groups are returned sorted by title; files within each group
/// are naturally sorted by filename.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or no file matches.
pub fn group_audiobook_files(dir: &Path, pattern: &Regex) -> Result<Vec<AudiobookGroup>, Error> {
    let mut buckets: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

    let entries = std::fs::read_dir(dir).map_err(|e| Error::InputDirRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::InputDirRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if !path.is_file() || !is_audiobook_file(&path) {
            continue;
        }

        let Some(name) = path.file_name().and_then(OsStr::to_str) else {
            debug!("Skipping non-UTF-8 filename: {}", path.display());
            continue;
        };

        let Some(title) = infer_title(name, pattern) else {
            debug!("Skipping (no pattern match): {name}");
            continue;
        };

        buckets.entry(title).or_default().push(path);
    }

    if buckets.is_empty() {
        return Err(Error::NoAudiobookFiles {
            path: dir.to_path_buf(),
        });
    }

    let groups = buckets
        .into_iter()
        .map(|(title, mut files)| {
            files.sort_by(|a, b| {
                natural_cmp(
                    &a.file_name().unwrap_or_default().to_string_lossy(),
                    &b.file_name().unwrap_or_default().to_string_lossy(),
                )
            });
            AudiobookGroup { title, files }
        })
        .collect();

    Ok(groups)
}

/// Infer the album title from a filename using the title pattern.
fn infer_title(name: &str, pattern: &Regex) -> Option<String> {
    let captures = pattern.captures(name)?;
    let matched = captures
        .get(1)
        .or_else(|| captures.get(0))
        .map(|m| m.as_str().trim().to_string())?;

    if matched.is_empty() {
        return None;
    }
    Some(matched)
}

/// Check if a file has the audiobook container extension.
fn is_audiobook_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(AUDIOBOOK_EXTENSION)))
}

/// Compare two strings in natural order.
///
/// Runs of ASCII digits compare by numeric value, everything else compares
/// character-wise, so `part 2` sorts before `part 10`.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ac), Some(bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let an = take_digit_run(&mut ai);
                    let bn = take_digit_run(&mut bi);
                    // Compare numerically without parsing: strip leading
                    // zeros, then longer run wins, then lexicographic.
                    let at = an.trim_start_matches('0');
                    let bt = bn.trim_start_matches('0');
                    let ord = at.len().cmp(&bt.len()).then_with(|| at.cmp(bt));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let ord = ac.cmp(&bc);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    ai.next();
                    bi.next();
                }
            }
        }
    }
}

/// Consume a run of ASCII digits from the iterator.
fn take_digit_run(iter: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = iter.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        iter.next();
    }
    run
}
