//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence rules.
//! The merged config remembers which files contributed so `folio check` can list them.

use std::path::PathBuf;

use crate::{
    Config, ConfigError, PatternSettings, SinkSettings, StructureSettings,
    parse::{RawConfig, RawPatternSettings, RawSinkSettings, RawStructureSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). Each scalar takes the value from the
/// highest-precedence file that defines it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut structure = StructureSettings::default();
    let mut patterns = PatternSettings::default();
    let mut sink = SinkSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.structure {
            apply_raw_structure(&mut structure, raw);
        }
        if let Some(ref raw) = parsed.config.patterns {
            apply_raw_patterns(&mut patterns, raw);
        }
        if let Some(ref raw) = parsed.config.sink {
            apply_raw_sink(&mut sink, raw);
        }
    }

    Ok(Config {
        structure,
        patterns,
        sink,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    })
}

/// Applies raw structure settings, overwriting any present values.
fn apply_raw_structure(result: &mut StructureSettings, raw: &RawStructureSettings) {
    if let Some(v) = raw.policy {
        result.policy = v;
    }
    if let Some(v) = raw.leftover {
        result.leftover = v;
    }
}

/// Applies raw pattern settings.
fn apply_raw_patterns(result: &mut PatternSettings, raw: &RawPatternSettings) {
    if let Some(v) = raw.threshold {
        result.threshold = v;
    }
}

/// Applies raw sink settings.
fn apply_raw_sink(result: &mut SinkSettings, raw: &RawSinkSettings) {
    if let Some(v) = raw.batch_size {
        result.batch_size = v;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_document::{BoundaryPolicy, LeftoverSemantics};

    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.sources.is_empty());
        assert_eq!(config.sink.batch_size, 50);
    }

    #[test]
    fn test_merge_single() {
        let config = merge_configs(&[parsed(
            "/project/.folio.toml",
            "[structure]\npolicy = \"three-level\"\n",
        )])
        .unwrap();

        assert_eq!(config.structure.policy, BoundaryPolicy::ThreeLevel);
        assert_eq!(config.structure.leftover, LeftoverSemantics::RawDuplicate);
        assert_eq!(config.patterns.threshold, 6);
        assert_eq!(config.sources, vec![PathBuf::from("/project/.folio.toml")]);
    }

    #[test]
    fn test_merge_closest_wins_per_field() {
        let local = parsed(
            "/home/user/project/.folio.toml",
            "[structure]\nleftover = \"true-remainder\"\n[sink]\nbatch_size = 10\n",
        );
        let global = parsed(
            "/home/user/.folio.toml",
            "[structure]\npolicy = \"three-level\"\nleftover = \"raw-duplicate\"\n[patterns]\nthreshold = 4\n[sink]\nbatch_size = 100\n",
        );

        let config = merge_configs(&[local, global]).unwrap();

        assert_eq!(config.structure.policy, BoundaryPolicy::ThreeLevel);
        assert_eq!(config.structure.leftover, LeftoverSemantics::TrueRemainder);
        assert_eq!(config.patterns.threshold, 4);
        assert_eq!(config.sink.batch_size, 10);
        assert_eq!(
            config.sources,
            vec![
                PathBuf::from("/home/user/project/.folio.toml"),
                PathBuf::from("/home/user/.folio.toml")
            ]
        );
    }
}
