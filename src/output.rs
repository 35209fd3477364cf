//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Running PurgeCSS command: purgecss --css static/main.css --content ... --output out/main-purged.css
//! PurgeCSS command completed successfully.
//! Purged CSS file saved to: main-purged.css
//! Compressed file saved as: out/main-purged.css.gz
//! Error: CSS File static/gone.css does not exist. Please check the file paths.
//! PurgeCSS output:
//!
//! PurgeCSS errors:
//! Error: ENOENT: no such file or directory
//! PurgeCSS exit status: 1
//! Purged 1 of 2 stylesheets
//! ```
//!
//! PurgeCSS streams are printed verbatim, without indentation, so they can be
//! copied straight out of a build log.
//!
//! ## Check
//!
//! ```text
//! Settings
//!     Project: /srv/shop
//!     Output: static/dist
//!     Apps: catalog, checkout
//! Stylesheets
//! 001 static/css/main.css
//! 002 static/css/gone.css (missing)
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::compress::gz_path;
use crate::config::Settings;
use crate::pipeline::PipelineEvent;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Build
// ============================================================================

/// Format a single pipeline event as display lines.
pub fn format_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        // The pattern list only shows up under `scan`.
        PipelineEvent::Scanned { .. } => Vec::new(),
        PipelineEvent::SourceMissing { css_file } => vec![format!(
            "Error: CSS File {} does not exist. Please check the file paths.",
            css_file
        )],
        PipelineEvent::PurgeStarted { command_line } => {
            vec![format!("Running PurgeCSS command: {}", command_line)]
        }
        PipelineEvent::Purged { purged_file } => vec![
            "PurgeCSS command completed successfully.".to_string(),
            format!("Purged CSS file saved to: {}", purged_file),
        ],
        PipelineEvent::Compressed { path } => {
            vec![format!("Compressed file saved as: {}", gz_path(path).display())]
        }
        PipelineEvent::PurgeFailed { output, .. } => {
            let status = match output.status {
                Some(code) => format!("PurgeCSS exit status: {}", code),
                None => "PurgeCSS exit status: terminated by signal".to_string(),
            };
            vec![
                "PurgeCSS output:".to_string(),
                output.stdout.clone(),
                "PurgeCSS errors:".to_string(),
                output.stderr.clone(),
                status,
            ]
        }
    }
}

pub fn print_event(event: &PipelineEvent) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

/// One glob per line; a note when nothing qualified.
pub fn format_scan_output(patterns: &[String]) -> Vec<String> {
    if patterns.is_empty() {
        return vec!["No template directories matched".to_string()];
    }
    patterns.to_vec()
}

pub fn print_scan_output(patterns: &[String]) {
    for line in format_scan_output(patterns) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Settings summary plus each stylesheet with a `(missing)` marker where the
/// file does not exist. `exists` decides presence so the output stays pure.
pub fn format_check_output(settings: &Settings, exists: impl Fn(&str) -> bool) -> Vec<String> {
    let mut lines = vec![
        "Settings".to_string(),
        format!("{}Project: {}", indent(1), settings.django_directory.display()),
        format!("{}Output: {}", indent(1), settings.output_directory.display()),
        format!("{}Apps: {}", indent(1), settings.apps().join(", ")),
        "Stylesheets".to_string(),
    ];
    for (i, css) in settings.css_files().iter().enumerate() {
        if exists(css.as_str()) {
            lines.push(format!("{} {}", format_index(i + 1), css));
        } else {
            lines.push(format!("{} {} (missing)", format_index(i + 1), css));
        }
    }
    lines
}

pub fn print_check_output(settings: &Settings) {
    let lines = format_check_output(settings, |css| std::path::Path::new(css).is_file());
    for line in lines {
        println!("{}", line);
    }
}
