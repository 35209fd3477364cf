//! PurgeCSS invocation.
//!
//! Builds the `purgecss` command line for one stylesheet and runs it through a
//! [`CommandRunner`]. The selector matching itself belongs to PurgeCSS; this
//! module only decides arguments, output naming, and how the process is
//! launched.
//!
//! ## Command Shape
//!
//! ```text
//! purgecss --css <css file> --content <glob> <glob> ... --output <out>/<name>-purged.css
//! ```
//!
//! Globs are passed unquoted, so the launching shell expands them.
//!
//! ## Launchers
//!
//! | Launcher | Invocation |
//! |----------|------------|
//! | [`ShellRunner::Direct`] | `npx <command>` via `cmd /C` on Windows, `sh -c` elsewhere |
//! | [`ShellRunner::NvmLogin`] | `bash -c 'source $HOME/.nvm/nvm.sh && npx <command>'` |
//!
//! The launcher is picked once at startup ([`ShellRunner::detect`]) and shared
//! by every invocation.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Suffix appended to the stylesheet stem for the purged output.
pub const PURGED_SUFFIX: &str = "-purged.css";

/// nvm bootstrap sourced by [`ShellRunner::NvmLogin`].
pub const NVM_INIT_SCRIPT: &str = "$HOME/.nvm/nvm.sh";

#[derive(Error, Debug)]
pub enum PurgeError {
    #[error("Failed to launch PurgeCSS via {launcher}: {source}")]
    Launch {
        launcher: ShellRunner,
        source: io::Error,
    },
}

/// A fully-resolved `purgecss` invocation for one stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeCommand {
    pub css_file: String,
    pub content: Vec<String>,
    pub output_path: PathBuf,
}

impl PurgeCommand {
    pub fn new(content: &[String], css_file: &str, output_dir: &Path) -> Self {
        Self {
            css_file: css_file.to_string(),
            content: content.to_vec(),
            output_path: output_dir.join(purged_file_name(css_file)),
        }
    }

    /// Render as a single shell command line.
    pub fn command_line(&self) -> String {
        format!(
            "purgecss --css {} --content {} --output {}",
            self.css_file,
            self.content.join(" "),
            self.output_path.display()
        )
    }
}

/// Output file name for a stylesheet: basename up to the first `.css`, plus
/// [`PURGED_SUFFIX`].
///
/// ```text
/// static/css/main.css      → main-purged.css
/// static/css/theme.min.css → theme.min-purged.css
/// static/css/site          → site-purged.css
/// ```
///
/// Only the platform's separators delimit the basename, so a backslash is an
/// ordinary character on Unix.
pub fn purged_file_name(css_file: &str) -> String {
    let basename = css_file
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or(css_file);
    let stem = basename.split(".css").next().unwrap_or(basename);
    format!("{stem}{PURGED_SUFFIX}")
}

/// Captured result of one external process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when terminated by a signal.
    pub status: Option<i32>,
}

impl CommandOutput {
    /// PurgeCSS prints nothing when it succeeds; any output is treated as a
    /// failure. The exit code is not consulted.
    pub fn is_quiet(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

/// Launches a [`PurgeCommand`] and waits for it to finish.
///
/// Implementations must not fail on a non-zero exit; only launch failures
/// are errors.
pub trait CommandRunner {
    fn run(&self, command: &PurgeCommand) -> Result<CommandOutput, PurgeError>;
}

/// Shell front-ends for running `npx purgecss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRunner {
    /// `npx` on the platform shell's `PATH`.
    Direct,
    /// `npx` after sourcing nvm in a bash shell.
    NvmLogin,
}

impl ShellRunner {
    /// `Direct` on Windows, `NvmLogin` everywhere else.
    pub fn detect() -> Self {
        if cfg!(windows) {
            ShellRunner::Direct
        } else {
            ShellRunner::NvmLogin
        }
    }

    /// Program and arguments that run `command_line` under this launcher.
    pub fn wrap(&self, command_line: &str) -> (&'static str, Vec<String>) {
        match self {
            ShellRunner::Direct if cfg!(windows) => {
                ("cmd", vec!["/C".to_string(), format!("npx {command_line}")])
            }
            ShellRunner::Direct => ("sh", vec!["-c".to_string(), format!("npx {command_line}")]),
            ShellRunner::NvmLogin => (
                "bash",
                vec![
                    "-c".to_string(),
                    format!("source {NVM_INIT_SCRIPT} && npx {command_line}"),
                ],
            ),
        }
    }
}

impl fmt::Display for ShellRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellRunner::Direct => write!(f, "npx"),
            ShellRunner::NvmLogin => write!(f, "bash + nvm"),
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &PurgeCommand) -> Result<CommandOutput, PurgeError> {
        let (program, args) = self.wrap(&command.command_line());
        let output = Command::new(program)
            .args(&args)
            .output()
            .map_err(|source| PurgeError::Launch {
                launcher: *self,
                source,
            })?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}

/// Everything known about one stylesheet's purge attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeResult {
    pub command: PurgeCommand,
    pub output: CommandOutput,
    /// File name of the purged stylesheet inside the output directory.
    pub purged_file: String,
}

/// Run PurgeCSS for one stylesheet.
///
/// A missing source is not checked here; callers report it and run anyway,
/// leaving PurgeCSS to complain.
pub fn purge_css_file(
    runner: &dyn CommandRunner,
    command: PurgeCommand,
) -> Result<PurgeResult, PurgeError> {
    let output = runner.run(&command)?;
    let purged_file = command
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(PurgeResult {
        command,
        output,
        purged_file,
    })
}
