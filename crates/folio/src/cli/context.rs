//! Per-invocation state for folio commands.
//!
//! Command-line flags are layered over `config` by each command, so the context holds only
//! what the files on disk say.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use folio_config::Config;
use tracing::debug;

/// The working directory and the merged `.folio.toml` settings for one run.
pub struct CommandContext {
    /// Directory discovery starts from; `init` also writes here.
    pub cwd: PathBuf,
    /// Merged settings; `Config::default()` when no `.folio.toml` applies.
    pub config: Config,
}

impl CommandContext {
    /// Resolves the working directory and merges every `.folio.toml` that applies to it.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        debug!(sources = config.sources.len(), cwd = %cwd.display(), "loaded configuration");
        Ok(Self { cwd, config })
    }

    /// Resolves the working directory and leaves the config at its defaults.
    ///
    /// `init` uses this so `--force` can replace a `.folio.toml` that no longer parses.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }
}

/// Returns the working directory, reporting failure on stderr.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Merges config for `cwd`; a malformed file aborts the command before any document is read.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
