//! Template directory discovery.
//!
//! Walks the project tree once and turns every qualifying directory into a
//! content glob for the purge tool.
//!
//! ## Selection Rules
//!
//! A directory qualifies when all of these hold:
//!
//! - its path contains one of the configured app fragments (plain substring,
//!   not a path-segment match, so `shop` also matches `workshop/`)
//! - its path does not contain `around`
//! - it directly holds at least one file whose name ends in `.html`
//!
//! HTML files further down only count for their own directory.
//!
//! ```text
//! project/
//! ├── shop/templates/        → project/shop/templates/*.html
//! │   ├── list.html
//! │   └── partials/          → project/shop/templates/partials/*.html
//! │       └── row.html
//! ├── shop/static/           (no .html files)
//! ├── shop/around/           (excluded)
//! │   └── hero.html
//! └── billing/templates/     (no matching fragment)
//!     └── invoice.html
//! ```
//!
//! The walk is pre-order with entries sorted by file name, so the pattern
//! list is stable across runs. Symlinked directories are not followed. A
//! project root that does not exist yields no patterns.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directories whose path contains this are never scanned.
pub const EXCLUDED_FRAGMENT: &str = "around";

const HTML_SUFFIX: &str = ".html";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Build one `<dir>/*.html` glob per qualifying directory under `root`.
///
/// An empty result is not an error; the purge tool then gets no content.
pub fn scan_templates(root: &Path, apps: &[String]) -> Result<Vec<String>, ScanError> {
    let mut patterns = Vec::new();

    let root_exists = root.try_exists().map_err(|source| ScanError::Io {
        path: root.to_path_buf(),
        source,
    })?;
    if !root_exists {
        return Ok(patterns);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        let display = dir.display().to_string();
        if !is_candidate(&display, apps) {
            continue;
        }
        if has_direct_html(dir)? {
            patterns.push(glob_for(&display));
        }
    }

    Ok(patterns)
}

/// Path-string filter: matches an app fragment and avoids the excluded one.
pub fn is_candidate(path: &str, apps: &[String]) -> bool {
    apps.iter().any(|app| path.contains(app.as_str())) && !path.contains(EXCLUDED_FRAGMENT)
}

/// Whether `dir` itself contains a `.html` file.
fn has_direct_html(dir: &Path) -> Result<bool, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.path().is_dir() && entry.file_name().to_string_lossy().ends_with(HTML_SUFFIX) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn glob_for(dir: &str) -> String {
    format!("{dir}/*{HTML_SUFFIX}")
}
