//! Clap argument definitions for the `folio` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use folio_config::Config;
use folio_document::{BoundaryPolicy, LeftoverSemantics, StructureOptions, parse_knowledge_id};

/// Parse a knowledge identifier, accepting numbers given as text.
fn parse_knowledge_id_arg(s: &str) -> Result<u64, String> {
    parse_knowledge_id(s).map_err(|e| e.to_string())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Structure heading-based documents into textbook chapter records")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// The document a command operates on.
#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Document to structure (.md, .markdown or .txt)
    pub file: PathBuf,

    /// Knowledge identifier attached to the topic and every record
    #[arg(short = 'k', long, default_value = "0", value_parser = parse_knowledge_id_arg)]
    pub knowledge_id: u64,

    /// Topic display name [default: file stem]
    #[arg(long)]
    pub name: Option<String>,
}

/// Structuring overrides for config values.
#[derive(Args, Debug, Clone, Default)]
pub struct StructureArgs {
    /// Heading boundary policy: two-level (# subtopic, ## chapter) or three-level
    /// (# or ## subtopic, ### chapter) [default: two-level]
    #[arg(long)]
    pub policy: Option<BoundaryPolicy>,

    /// Notes chapter capture: raw-duplicate (whole subtopic body) or true-remainder
    /// (text before the first chapter) [default: raw-duplicate]
    #[arg(long)]
    pub leftover: Option<LeftoverSemantics>,

    /// Report heading first words seen more than this many times [default: 6]
    #[arg(long)]
    pub threshold: Option<usize>,
}

impl StructureArgs {
    /// Applies these overrides on top of the configured options.
    pub fn resolve(&self, config: &Config) -> StructureOptions {
        let mut options = config.structure_options();
        if let Some(policy) = self.policy {
            options.policy = policy;
        }
        if let Some(leftover) = self.leftover {
            options.leftover = leftover;
        }
        if let Some(threshold) = self.threshold {
            options.pattern_threshold = threshold;
        }
        options
    }
}

/// Arguments for `folio build`.
#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    #[command(flatten)]
    /// Input document.
    pub document: DocumentArgs,

    #[command(flatten)]
    /// Structuring overrides.
    pub structure: StructureArgs,

    /// Directory for the raw text, structure and records artifacts
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Arguments for `folio inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    #[command(flatten)]
    /// Input document.
    pub document: DocumentArgs,

    #[command(flatten)]
    /// Structuring overrides.
    pub structure: StructureArgs,

    /// Output the structured topic and records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `folio patterns`.
#[derive(Args, Debug, Clone)]
pub struct PatternsCommand {
    /// Document to scan (.md, .markdown or .txt)
    pub file: PathBuf,

    /// Report heading first words seen more than this many times [default: 6]
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `folio ingest`.
#[derive(Args, Debug, Clone)]
pub struct IngestCommand {
    #[command(flatten)]
    /// Input document.
    pub document: DocumentArgs,

    #[command(flatten)]
    /// Structuring overrides.
    pub structure: StructureArgs,

    /// JSON Lines file receiving the records
    #[arg(long)]
    pub sink: PathBuf,

    /// Records per sink write [default: 50]
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Continue a partial run, skipping records already in the sink file
    #[arg(long)]
    pub resume: bool,
}

/// Arguments for `folio init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.folio.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `folio` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Structure a document and write its artifacts
    #[command(after_help = "\
ARTIFACTS:
  <stem>.raw.txt          Copy of the input text
  <stem>.structure.json   Topic tree and frequent heading words
  <stem>.records.json     Flattened chapter records

EXAMPLES:
  folio build algebra.md -k 42
  folio build algebra.txt -k 42 --policy three-level -o out/")]
    Build(BuildCommand),

    /// Show how folio structures a document
    Inspect(InspectCommand),

    /// List frequent heading first words
    Patterns(PatternsCommand),

    /// Write a document's records to a JSON Lines sink in batches
    Ingest(IngestCommand),

    /// Initialize folio configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and diagnose issues
    Check,
}

impl Commands {
    /// Returns whether the command reads the merged configuration.
    ///
    /// `init` must work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}
