//! Configuration system for folio.
//!
//! folio uses TOML configuration files named `.folio.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.folio.toml` files
//! found, then loading `~/.folio.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use folio_document::{BoundaryPolicy, DEFAULT_PATTERN_THRESHOLD, LeftoverSemantics, StructureOptions};
use folio_sink::DEFAULT_BATCH_SIZE;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawPatternSettings, RawSinkSettings, RawStructureSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for folio.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.folio.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Structuring settings.
    pub structure: StructureSettings,
    /// Pattern detection settings.
    pub patterns: PatternSettings,
    /// Sink settings.
    pub sink: SinkSettings,
    /// Config files that were merged, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.folio.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Returns the structurer options these settings select.
    pub fn structure_options(&self) -> StructureOptions {
        StructureOptions {
            policy: self.structure.policy,
            leftover: self.structure.leftover,
            pattern_threshold: self.patterns.threshold,
        }
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML in `.folio.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            structure: &self.structure,
            patterns: &self.patterns,
            sink: &self.sink,
        };
        toml::to_string_pretty(&serializable).map_err(|source| ConfigError::Serialize { source })
    }
}

/// How headings are mapped onto the textbook hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StructureSettings {
    /// Heading-level boundary mapping.
    pub policy: BoundaryPolicy,
    /// Notes chapter capture rule.
    pub leftover: LeftoverSemantics,
}

/// Frequent heading word detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternSettings {
    /// Count a first word must exceed to be reported.
    pub threshold: usize,
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PATTERN_THRESHOLD,
        }
    }
}

/// Record sink settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkSettings {
    /// Records per sink call.
    pub batch_size: usize,
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Structuring settings.
    structure: &'a StructureSettings,
    /// Pattern detection settings.
    patterns: &'a PatternSettings,
    /// Sink settings.
    sink: &'a SinkSettings,
}
