//! The full downsizing run: scan once, then purge and compress each
//! stylesheet in configured order.
//!
//! ```text
//! settings ─→ scan_templates ─→ patterns
//!                                  │
//!     for css in input_css_files:  ▼
//!         purge_css_file ─→ quiet? ─yes→ compress_purged_file
//!                              └─no──→ report streams, skip
//! ```
//!
//! Progress is reported through [`PipelineEvent`]s handed to a caller-supplied
//! callback, so the CLI prints as it goes and tests can collect the sequence.
//! A failed purge never stops the run; scan, launch, and compression errors do.

use crate::compress::{self, CompressError};
use crate::config::Settings;
use crate::purge::{self, CommandOutput, CommandRunner, PurgeCommand, PurgeError};
use crate::scan::{self, ScanError};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Scan failed: {0}")]
    Scan(#[from] ScanError),
    #[error("{0}")]
    Purge(#[from] PurgeError),
    #[error("Compression failed: {0}")]
    Compress(#[from] CompressError),
}

/// Progress notifications, in the order they happen for each stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Template scan finished.
    Scanned { patterns: Vec<String> },
    /// The stylesheet does not exist; PurgeCSS runs anyway.
    SourceMissing { css_file: String },
    /// About to launch PurgeCSS.
    PurgeStarted { command_line: String },
    /// PurgeCSS produced no output.
    Purged { purged_file: String },
    /// The purged file was gzipped. `path` is the uncompressed file.
    Compressed { path: PathBuf },
    /// PurgeCSS printed something; the file is not compressed.
    PurgeFailed { css_file: String, output: CommandOutput },
}

/// Tally of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub purged: u32,
    pub failed: u32,
}

impl RunSummary {
    pub fn total(&self) -> u32 {
        self.purged + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Purged {} of {} stylesheets", self.purged, self.total())
    }
}

/// Scan the project and process every configured stylesheet.
pub fn run(
    settings: &Settings,
    runner: &dyn CommandRunner,
    on_event: &mut dyn FnMut(PipelineEvent),
) -> Result<RunSummary, PipelineError> {
    let patterns = scan::scan_templates(&settings.django_directory, &settings.apps())?;
    on_event(PipelineEvent::Scanned {
        patterns: patterns.clone(),
    });

    let mut summary = RunSummary::default();
    for css_file in settings.css_files() {
        if process_stylesheet(
            &patterns,
            &css_file,
            &settings.output_directory,
            runner,
            on_event,
        )? {
            summary.purged += 1;
        } else {
            summary.failed += 1;
        }
    }
    Ok(summary)
}

/// Purge one stylesheet and, when PurgeCSS stays quiet, gzip the result.
///
/// Returns whether the purge counted as successful.
pub fn process_stylesheet(
    patterns: &[String],
    css_file: &str,
    output_dir: &Path,
    runner: &dyn CommandRunner,
    on_event: &mut dyn FnMut(PipelineEvent),
) -> Result<bool, PipelineError> {
    let command = PurgeCommand::new(patterns, css_file, output_dir);

    if Path::new(css_file).is_file() {
        on_event(PipelineEvent::PurgeStarted {
            command_line: command.command_line(),
        });
    } else {
        on_event(PipelineEvent::SourceMissing {
            css_file: css_file.to_string(),
        });
    }

    let result = purge::purge_css_file(runner, command)?;

    if !result.output.is_quiet() {
        on_event(PipelineEvent::PurgeFailed {
            css_file: css_file.to_string(),
            output: result.output,
        });
        return Ok(false);
    }

    on_event(PipelineEvent::Purged {
        purged_file: result.purged_file.clone(),
    });
    let path = compress::compress_purged_file(output_dir, &result.purged_file)?;
    on_event(PipelineEvent::Compressed { path });
    Ok(true)
}
