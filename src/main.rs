use clap::{Parser, Subcommand, ValueEnum};
use css_downsizer::config::{self, Settings};
use css_downsizer::purge::ShellRunner;
use css_downsizer::{output, pipeline, scan};
use std::path::{Path, PathBuf};

/// How `npx purgecss` is launched.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Launcher {
    /// Direct on Windows, nvm elsewhere
    Auto,
    /// `npx` from the platform shell's PATH
    Direct,
    /// Source `$HOME/.nvm/nvm.sh` in bash first
    Nvm,
}

impl Launcher {
    fn runner(self) -> ShellRunner {
        match self {
            Launcher::Auto => ShellRunner::detect(),
            Launcher::Direct => ShellRunner::Direct,
            Launcher::Nvm => ShellRunner::NvmLogin,
        }
    }
}

#[derive(Parser)]
#[command(name = "downsizer")]
#[command(version)]
#[command(about = "Purge unused CSS against Django templates and gzip the result")]
#[command(long_about = "\
Purge unused CSS against Django templates and gzip the result

Template directories are found by walking django_directory. A directory is
used when its path contains one of django_apps, does not contain \"around\",
and directly holds .html files. Each stylesheet in input_css_files is run
through PurgeCSS with those directories as content, then gzipped:

  <output_directory>/<name>-purged.css
  <output_directory>/<name>-purged.css.gz

Run 'downsizer gen-config' to generate a documented settings file.")]
struct Cli {
    /// Settings file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// How to launch PurgeCSS
    #[arg(long, value_enum, default_value_t = Launcher::Auto, global = true)]
    launcher: Launcher,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Purge and compress every configured stylesheet (default)
    Build,
    /// List the template globs that would be passed to PurgeCSS
    Scan,
    /// Validate the settings file without purging
    Check,
    /// Print a stock settings file with all keys documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let Some(settings) = load_settings(&cli.config) else {
                return Ok(());
            };
            let runner = cli.launcher.runner();
            let summary = pipeline::run(&settings, &runner, &mut |event| {
                output::print_event(&event)
            })?;
            println!("{}", summary);
        }
        Command::Scan => {
            let Some(settings) = load_settings(&cli.config) else {
                return Ok(());
            };
            let patterns = scan::scan_templates(&settings.django_directory, &settings.apps())?;
            output::print_scan_output(&patterns);
        }
        Command::Check => {
            let Some(settings) = load_settings(&cli.config) else {
                return Ok(());
            };
            output::print_check_output(&settings);
            println!("==> Settings are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config());
        }
    }

    Ok(())
}

/// Load settings, printing the reason when they are unusable.
fn load_settings(path: &Path) -> Option<Settings> {
    match config::load_settings(path) {
        Ok(settings) => Some(settings),
        Err(e) => {
            eprintln!("Config file set incorrectly: {}", e);
            None
        }
    }
}
