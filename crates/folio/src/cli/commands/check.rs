//! Implementation of `folio check`.

use std::process::ExitCode;

use folio_config::{ConfigWarning, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows the merged configuration files and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.sources.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("folio init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config.sources {
        let scope = if is_global_config(path) {
            "global"
        } else {
            "local"
        };
        println!("   {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    println!("{}", subheader("Settings:"));
    println!("   structure.policy   = {}", config.structure.policy);
    println!("   structure.leftover = {}", config.structure.leftover);
    println!("   patterns.threshold = {}", config.patterns.threshold);
    println!("   sink.batch_size    = {}", config.sink.batch_size);
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::ZeroBatchSize => {
                println!("{}", dim("Hint: set [sink] batch_size to 1 or more"));
            }
            ConfigWarning::ZeroPatternThreshold => {
                println!("{}", dim("Hint: raise [patterns] threshold above 0"));
            }
        }
    }
}
