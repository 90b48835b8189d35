//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `sink.batch_size` is zero, so nothing can be written.
    ZeroBatchSize,
    /// `patterns.threshold` is zero, so every heading first word is reported.
    ZeroPatternThreshold,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBatchSize => {
                write!(f, "sink.batch_size is 0; ingest will refuse to run")
            }
            Self::ZeroPatternThreshold => {
                write!(
                    f,
                    "patterns.threshold is 0; every heading first word will be reported"
                )
            }
        }
    }
}

/// Checks a configuration for likely mistakes.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.sink.batch_size == 0 {
        warnings.push(ConfigWarning::ZeroBatchSize);
    }
    if config.patterns.threshold == 0 {
        warnings.push(ConfigWarning::ZeroPatternThreshold);
    }

    warnings
}
