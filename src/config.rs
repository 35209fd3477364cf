//! Settings file loading and validation.
//!
//! The downsizer reads a single section file with one `[SETTINGS]` section
//! of `key = value` lines. Values are bare text, so lists read naturally as
//! `a.css, b.css`. All four keys are required; there are no defaults and no
//! cascading.
//!
//! ## Config File Format
//!
//! ```ini
//! [SETTINGS]
//! # Root of the Django project to scan for templates
//! django_directory = /srv/shop
//!
//! # Stylesheets to purge, comma separated
//! input_css_files = static/css/main.css, static/css/vendor.css
//!
//! # Where `<name>-purged.css` and `<name>-purged.css.gz` are written
//! output_directory = static/dist
//!
//! # Directory-name fragments selecting the template directories to scan
//! django_apps = catalog, checkout, accounts
//! ```
//!
//! Lines starting with `#` or `;` are comments. Quotes and backslashes are
//! kept as written, so Windows paths need no escaping.
//!
//! A file whose name ends in `.toml` is read as TOML instead, with the same
//! `[SETTINGS]` table holding quoted strings.
//!
//! ## Validation
//!
//! Each key must be present and non-blank. Keys are checked in the order
//! `input_css_files`, `output_directory`, `django_directory`, `django_apps`
//! and the first failure is reported. Extra keys and extra sections are
//! ignored.

use ini::{Ini, ParseOption};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "settings.cfg";

/// Section holding every setting.
const SECTION: &str = "SETTINGS";

/// Every way a settings file can be unusable.
///
/// All variants mean "invalid configuration"; they differ only in the message.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file {0} not found.")]
    NotFound(PathBuf),
    #[error("An error occurred while reading the config file: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Ini(#[from] ini::ParseError),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Missing or empty key {0} in [SETTINGS]")]
    Validation(&'static str),
}

/// Validated settings. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the project tree to scan.
    pub django_directory: PathBuf,
    /// Raw comma-separated list of stylesheet paths.
    pub input_css_files: String,
    /// Destination for purged and compressed stylesheets.
    pub output_directory: PathBuf,
    /// Raw comma-separated list of app-name fragments.
    pub django_apps: String,
}

impl Settings {
    /// Stylesheets to purge, in configured order.
    pub fn css_files(&self) -> Vec<String> {
        split_list(&self.input_css_files)
    }

    /// App-name fragments used to select template directories.
    pub fn apps(&self) -> Vec<String> {
        split_list(&self.django_apps)
    }
}

/// On-disk shape of the settings file before validation.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(rename = "SETTINGS", default)]
    settings: Option<RawSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    django_directory: Option<String>,
    input_css_files: Option<String>,
    output_directory: Option<String>,
    django_apps: Option<String>,
}

impl RawSettings {
    fn from_ini(ini: &Ini) -> Self {
        let Some(section) = ini.section(Some(SECTION)) else {
            return Self::default();
        };
        let get = |key: &str| section.get(key).map(str::to_string);
        Self {
            django_directory: get("django_directory"),
            input_css_files: get("input_css_files"),
            output_directory: get("output_directory"),
            django_apps: get("django_apps"),
        }
    }

    /// Check every required key and build [`Settings`].
    fn validate(self) -> Result<Settings, ConfigError> {
        let input_css_files = required("input_css_files", self.input_css_files)?;
        let output_directory = required("output_directory", self.output_directory)?;
        let django_directory = required("django_directory", self.django_directory)?;
        let django_apps = required("django_apps", self.django_apps)?;
        Ok(Settings {
            django_directory: PathBuf::from(django_directory),
            input_css_files,
            output_directory: PathBuf::from(output_directory),
            django_apps,
        })
    }
}

fn required(key: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::Validation(key)),
    }
}

/// Split a comma-separated value, stripping spaces around each item.
///
/// Empty items are kept: `"a.css,"` yields `["a.css", ""]`.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim_matches(' ').to_string())
        .collect()
}

/// Parse settings from section-file text.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options)?;
    RawSettings::from_ini(&ini).validate()
}

/// Parse settings from TOML text.
pub fn parse_settings_toml(content: &str) -> Result<Settings, ConfigError> {
    let file: SettingsFile = toml::from_str(content)?;
    file.settings.unwrap_or_default().validate()
}

/// Load and validate the settings file at `path`.
///
/// `.toml` files go through [`parse_settings_toml`]; anything else is a
/// section file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io(e),
    })?;
    if path.extension().is_some_and(|ext| ext == "toml") {
        parse_settings_toml(&content)
    } else {
        parse_settings(&content)
    }
}

/// Returns a fully-commented stock settings file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config() -> &'static str {
    r##"# CSS Downsizer Settings
# ======================
# Every key below is required. Lists are comma separated; spaces around
# each item are ignored.

[SETTINGS]
# Root of the Django project. Every directory below it is a candidate
# template directory.
django_directory = .

# Stylesheets to purge, processed one at a time in this order.
# Each produces <output_directory>/<name>-purged.css and a .gz copy.
input_css_files = static/css/main.css

# Destination for the purged and compressed stylesheets.
output_directory = static/dist

# Directory-name fragments. A directory is scanned when its path contains
# one of these, does not contain "around", and directly holds .html files.
django_apps = templates
"##
}
