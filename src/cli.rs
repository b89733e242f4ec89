//! CLI definition

use clap::Parser;
use std::path::PathBuf;

use crate::signature::Chars;

/// Multibar - render text progress bars
#[derive(Parser, Debug)]
#[command(
    name = "multibar",
    about = "Render a text progress bar for CURRENT out of TOTAL",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Glyphs are positional, in order: fill line start end unfilled_start unfilled_end"
)]
pub struct Cli {
    /// Current progress value
    #[arg(value_name = "CURRENT")]
    pub current: u64,

    /// Progress value of a full bar
    #[arg(value_name = "TOTAL")]
    pub total: u64,

    /// Up to six glyphs: fill line [start end unfilled_start unfilled_end]
    #[arg(value_name = "GLYPH", num_args = 0..=Chars::MAX_GLYPHS)]
    pub glyphs: Vec<String>,

    /// Number of sectors (defaults to the configured length)
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Signature preset name (ignored when glyphs are given)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Report broken contracts on stderr instead of failing
    #[arg(long)]
    pub report_only: bool,
}

/// Output format for the rendered bar
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
