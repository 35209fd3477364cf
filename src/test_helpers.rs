//! Shared test utilities for the downsizer test suite.
//!
//! Provides project-tree fixtures, settings builders, and a [`MockRunner`]
//! that stands in for PurgeCSS.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let project = project_tree(&["shop/templates/list.html", "main.css"]);
//! let settings = settings_for(project.path(), &["main.css"], &["shop"]);
//! let runner = MockRunner::new();
//!
//! pipeline::run(&settings, &runner, &mut |_| {}).unwrap();
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

use crate::config::Settings;
use crate::purge::{CommandOutput, CommandRunner, PurgeCommand, PurgeError};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp project containing `files` (paths relative to the root).
///
/// `.html` files get a small template, `.css` files a few rules, anything
/// else is empty. Intermediate directories are created as needed.
pub fn project_tree(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in files {
        let path = tmp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let body = if rel.ends_with(".html") {
            "<nav class=\"menu\"><a class=\"btn\">Home</a></nav>\n"
        } else if rel.ends_with(".css") {
            ".menu{display:flex}\n.btn{color:red}\n.unused{color:blue}\n"
        } else {
            ""
        };
        fs::write(&path, body).unwrap();
    }
    tmp
}

/// Owned app-fragment list.
pub fn apps(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Expected glob for `root/rel`.
pub fn pattern(root: &Path, rel: &str) -> String {
    format!("{}/*.html", root.join(rel).display())
}

/// Settings rooted at `root`, with stylesheets resolved against `root` and
/// output going to a freshly created `root/out`.
pub fn settings_for(root: &Path, css_files: &[&str], app_names: &[&str]) -> Settings {
    let output_directory = root.join("out");
    fs::create_dir_all(&output_directory).unwrap();
    let input_css_files = css_files
        .iter()
        .map(|f| root.join(f).display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Settings {
        django_directory: root.to_path_buf(),
        input_css_files,
        output_directory,
        django_apps: app_names.join(", "),
    }
}

/// Decompress a gzip file fully into memory.
pub fn gunzip(path: &Path) -> Vec<u8> {
    let mut decoder = flate2::read::GzDecoder::new(File::open(path).unwrap());
    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes).unwrap();
    bytes
}

// =========================================================================
// Mock PurgeCSS
// =========================================================================

/// Runner that records commands and replays canned outputs.
///
/// Outputs are consumed in call order; once exhausted every call is quiet.
/// A quiet call writes a small stylesheet to the command's output path,
/// the way PurgeCSS does on success.
pub struct MockRunner {
    outputs: RefCell<VecDeque<CommandOutput>>,
    commands: RefCell<Vec<PurgeCommand>>,
    write_output: bool,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::with_outputs(Vec::new())
    }

    pub fn with_outputs(outputs: Vec<CommandOutput>) -> Self {
        Self {
            outputs: RefCell::new(outputs.into()),
            commands: RefCell::new(Vec::new()),
            write_output: true,
        }
    }

    /// Succeed quietly without producing the purged file.
    pub fn without_writing(mut self) -> Self {
        self.write_output = false;
        self
    }

    /// Command lines seen so far.
    pub fn calls(&self) -> Vec<String> {
        self.commands
            .borrow()
            .iter()
            .map(PurgeCommand::command_line)
            .collect()
    }

    pub fn commands(&self) -> Vec<PurgeCommand> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &PurgeCommand) -> Result<CommandOutput, PurgeError> {
        self.commands.borrow_mut().push(command.clone());
        let output = self.outputs.borrow_mut().pop_front().unwrap_or_default();
        if self.write_output && output.is_quiet() {
            write_purged(&command.output_path);
        }
        Ok(output)
    }
}

fn write_purged(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, ".menu{display:flex}\n.btn{color:red}\n").unwrap();
}
