//! Configuration file parsing.
//!
//! Parses individual `.folio.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use folio_document::{BoundaryPolicy, LeftoverSemantics};
use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Structuring settings section.
    pub structure: Option<RawStructureSettings>,
    /// Pattern detection settings section.
    pub patterns: Option<RawPatternSettings>,
    /// Sink settings section.
    pub sink: Option<RawSinkSettings>,
}

/// Raw structuring settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStructureSettings {
    /// Heading-level boundary mapping.
    pub policy: Option<BoundaryPolicy>,
    /// Notes chapter capture rule.
    pub leftover: Option<LeftoverSemantics>,
}

/// Raw pattern detection settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPatternSettings {
    /// Count a first word must exceed to be reported.
    pub threshold: Option<usize>,
}

/// Raw sink settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSinkSettings {
    /// Records per sink call.
    pub batch_size: Option<usize>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// This is used during discovery to stop traversal at root configs.
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
