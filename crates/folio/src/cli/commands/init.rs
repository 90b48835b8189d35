//! Implementation of `folio init`.
//!
//! Writes a commented-out starter config. Every setting in it is disabled, so a fresh file
//! changes nothing about how folio structures documents until the user uncomments a key.

use std::{fs, path::PathBuf, process::ExitCode};

use folio_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};

use crate::cli::{
    args::InitCommand,
    context::CommandContext,
    output::{dim, subheader},
};

/// Writes `.folio.toml` next to the documents in `cwd`, or to `~/.folio.toml` with `--global`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let Some((config_path, global)) = init_target(ctx, cmd.global) else {
        eprintln!("error: could not determine home directory");
        return ExitCode::FAILURE;
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    // The global template omits `root`, which only makes sense for a project file.
    let template = if global {
        global_template()
    } else {
        local_template()
    };

    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    for line in template.lines() {
        println!("   {}", dim(line));
    }

    ExitCode::SUCCESS
}

/// Picks the file `init` writes and whether it is the global one.
///
/// Running in the home directory targets `~/.folio.toml` even without `--global`: that path is
/// already the global config, so it gets the global template.
fn init_target(ctx: &CommandContext, global: bool) -> Option<(PathBuf, bool)> {
    let global_path = global_config_path();
    let in_home = global_path
        .as_deref()
        .and_then(|p| p.parent())
        .is_some_and(|home| home == ctx.cwd);

    if global || in_home {
        global_path.map(|p| (p, true))
    } else {
        Some((ctx.cwd.join(CONFIG_FILENAME), false))
    }
}
