//! # CSS Downsizer
//!
//! Shrinks a Django project's stylesheets at build time. The templates of the
//! configured apps are handed to [PurgeCSS](https://purgecss.com) as content,
//! every unused selector is dropped, and each purged stylesheet is gzipped
//! next to itself.
//!
//! # Pipeline
//!
//! ```text
//! 1. Config    settings.cfg   →  Settings        (validated, immutable)
//! 2. Scan      project tree   →  ["<dir>/*.html", ...]
//! 3. Purge     per stylesheet →  <out>/<name>-purged.css
//! 4. Compress  per stylesheet →  <out>/<name>-purged.css.gz
//! ```
//!
//! The scan runs once and its patterns are shared by every purge. Stylesheets
//! are processed one at a time in configured order. A stylesheet whose purge
//! looks unsuccessful is reported and skipped; the run carries on with the
//! next one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `[SETTINGS]` loading, validation, comma-list splitting, stock template |
//! | [`scan`] | Walks the project and builds one content glob per template directory |
//! | [`purge`] | PurgeCSS command line, output naming, launcher strategies |
//! | [`compress`] | Gzip of the purged stylesheet |
//! | [`pipeline`] | Ties the stages together and emits progress events |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Success Means Silence
//!
//! PurgeCSS writes nothing to stdout or stderr when it succeeds, so a purge
//! counts as successful exactly when both streams are empty. The exit status
//! is captured and shown in the failure report but does not change the
//! decision.
//!
//! ## Pluggable Launcher
//!
//! PurgeCSS is a Node tool, usually reached through `npx`. How `npx` is found
//! differs per machine: on Windows it is on `PATH`, on Unix boxes it often
//! lives behind nvm. [`purge::CommandRunner`] abstracts "run this command
//! and capture its streams"; [`purge::ShellRunner`] picks a shell front-end
//! once at startup. Tests swap in a mock runner and never spawn processes.

pub mod compress;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod purge;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
