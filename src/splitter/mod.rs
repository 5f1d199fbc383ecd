//! Audiobook splitting pipeline.
//!
//! This module groups audiobook container files by inferred album title,
//! reads chapter boundaries via the external prober, and exports each
//! chapter as a tagged MP3 via the external transcoder.

pub mod command;
mod exporter;
mod grouper;
mod probe;

pub use exporter::{ChapterExporter, ChapterSink, EncodeSettings, cleanup_partial_outputs};
pub use grouper::{AudiobookGroup, group_audiobook_files};
pub use probe::{ChapterRecord, ProbeReport, probe_file};
