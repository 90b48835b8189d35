//! Finds the `.folio.toml` files that apply to a directory of textbooks.
//!
//! A shelf of books usually shares one policy file at its top, with per-book overrides below
//! it; the walk from the working directory upward collects both. `root = true` marks a shelf
//! that must not inherit the user's `~/.folio.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// Name of both the project files and the global file in `$HOME`.
pub const CONFIG_FILENAME: &str = ".folio.toml";

/// Lists config files for `cwd`, closest first and `~/.folio.toml` last.
///
/// When `cwd` is inside `$HOME` the walk reaches `~/.folio.toml` on its own, and `folio init`
/// run in `$HOME` writes exactly that file. It is appended only if the walk missed it, so the
/// global file is merged once and reported once by `folio check`.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Path of `~/.folio.toml`, or `None` without a home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is `~/.folio.toml`; `folio check` labels such files as global.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
