//! Command implementations and dispatch.

pub mod build;
pub mod check;
pub mod config;
pub mod ingest;
pub mod init;
pub mod inspect;
pub mod patterns;
mod shared;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Build(cmd) => build::run(ctx, &cmd),
        Commands::Inspect(cmd) => inspect::run(ctx, &cmd),
        Commands::Patterns(cmd) => patterns::run(ctx, &cmd),
        Commands::Ingest(cmd) => ingest::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
