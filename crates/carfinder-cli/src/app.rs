//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carfinder")]
#[command(
    author,
    version,
    about = "Conversational car search over a local catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the assistant a question
    Chat(ChatArgs),

    /// Search the catalog by criteria
    Search(SearchArgs),

    /// Recommend cars for a buyer profile
    Recommend(RecommendArgs),

    /// List the whole catalog
    Ls,

    /// Show catalog and service status
    Status,

    /// Start the JSON-RPC server on stdio
    Serve,
}

#[derive(Args)]
pub struct ChatArgs {
    /// The message to send
    pub message: Vec<String>,

    /// JSON file with prior conversation turns ({role, content} pairs)
    #[arg(long)]
    pub history: Option<PathBuf>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Brand, e.g. "Honda"
    #[arg(long)]
    pub name: Option<String>,

    /// Model, e.g. "Civic"
    #[arg(long)]
    pub model: Option<String>,

    /// City, state or UF, e.g. "São Paulo", "SP"
    #[arg(long)]
    pub location: Option<String>,

    /// Powertrain: electric, hybrid, flex, gasoline, diesel
    #[arg(long)]
    pub powertrain: Option<String>,

    /// Body style: hatch, sedan, suv
    #[arg(long)]
    pub body: Option<String>,

    /// Minimum seat count
    #[arg(long)]
    pub min_seats: Option<u32>,

    /// Minimum price in BRL
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Maximum price in BRL
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Required tag (repeatable, AND semantics)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Maximum results
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct RecommendArgs {
    /// Maximum budget in BRL
    #[arg(long)]
    pub budget: Option<u32>,

    /// City, state or UF
    #[arg(long)]
    pub location: Option<String>,

    /// Primary usage
    #[arg(long, value_enum)]
    pub usage: Option<UsageArg>,

    /// Number of people in the family
    #[arg(long)]
    pub family_size: Option<u32>,

    /// Prefer SUVs
    #[arg(long)]
    pub prefer_suv: bool,

    /// Prefer electric cars
    #[arg(long)]
    pub prefer_ev: bool,

    /// Values technology
    #[arg(long)]
    pub wants_tech: bool,

    /// Needs trunk space
    #[arg(long)]
    pub needs_cargo: bool,

    /// Maximum results
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy)]
pub enum UsageArg {
    City,
    Highway,
    Mixed,
}

impl From<UsageArg> for carfinder_core::Usage {
    fn from(value: UsageArg) -> Self {
        match value {
            UsageArg::City => Self::City,
            UsageArg::Highway => Self::Highway,
            UsageArg::Mixed => Self::Mixed,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Cli,
    Json,
}
