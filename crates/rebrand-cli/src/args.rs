use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Add rebranded variable rules to stylesheet trees
#[derive(Parser, Debug)]
#[command(name = "rebrand", version)]
#[command(about = "Synthesize `.marker-class &` rules for migratable stylesheet variables", long_about = None)]
pub struct Args {
    /// Registry of migratable variables (.yaml, .yml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub registry: PathBuf,

    /// Suffix for variables without an explicit new name (e.g. `-s3`)
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub postfix: Option<String>,

    /// Output representation
    #[arg(long, value_enum, default_value_t = EmitFormat::Json)]
    pub emit: EmitFormat,

    /// Write outputs here instead of stdout, mirroring input layout
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Exit with a non-zero status if any input would change; writes nothing
    #[arg(long)]
    pub check: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Stylesheet trees (JSON or YAML) or directories containing them
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitFormat {
    /// Serialized stylesheet tree
    Json,
    /// LESS source text
    Less,
}

impl EmitFormat {
    pub fn extension(self) -> &'static str {
        match self {
            EmitFormat::Json => "json",
            EmitFormat::Less => "less",
        }
    }
}
