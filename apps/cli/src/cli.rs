//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use printcost_core::parse::DurationFormat;
use printcost_core::{Complexity, ModelVersion};

#[derive(Parser, Debug)]
#[command(name = "printcost", version, about = "3D print cost calculator and quote builder")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PRINTCOST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price one part, optionally adding it to the quote
    Calc(CalcArgs),

    /// Show the quote
    List,

    /// Remove an item from the quote
    Remove {
        /// Item position as shown by `list` (starting at 1)
        position: usize,
    },

    /// Change the quantity of an item
    SetQuantity {
        /// Item position as shown by `list` (starting at 1)
        position: usize,

        /// New quantity (at least 1)
        quantity: u32,
    },

    /// Remove every item from the quote
    Clear,

    /// Write the quote as a client document
    Export(ExportArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the default config file location
    Path,
}

/// Parameters of `calc`.
///
/// Numbers are read leniently: `0,70` and `0.70` are the same, and anything
/// unreadable counts as 0. Omitted values come from the `[defaults]`
/// configuration section.
#[derive(Args, Debug, Clone, Default)]
pub struct CalcArgs {
    /// Filament price per kg
    #[arg(long, short = 'p')]
    pub filament_price: Option<String>,

    /// Filament used, in grams
    #[arg(long, short = 'w')]
    pub weight: Option<String>,

    /// Print time (`2,30` is 2h30 by default; see --duration-format)
    #[arg(long, short = 't')]
    pub time: Option<String>,

    /// Printer power in watts
    #[arg(long)]
    pub power: Option<String>,

    /// Energy tariff per kWh
    #[arg(long)]
    pub energy_rate: Option<String>,

    /// Labor cost per hour
    #[arg(long)]
    pub labor_rate: Option<String>,

    /// Printer purchase value
    #[arg(long)]
    pub printer_value: Option<String>,

    /// Printer lifetime in hours
    #[arg(long)]
    pub depreciation_hours: Option<String>,

    /// Profit margin in percent
    #[arg(long, short = 'm')]
    pub margin: Option<String>,

    /// Cost model: basic or extended
    #[arg(long, default_value_t = ModelVersion::Basic)]
    pub model: ModelVersion,

    /// How to read --time (overrides the configuration)
    #[arg(long)]
    pub duration_format: Option<DurationFormat>,

    /// [extended] Hands-on work time
    #[arg(long)]
    pub active_time: Option<String>,

    /// [extended] Maintenance reserve per printing hour
    #[arg(long)]
    pub maintenance_rate: Option<String>,

    /// [extended] Failed-print rate in percent
    #[arg(long)]
    pub failure_rate: Option<String>,

    /// [extended] Flat post-processing cost
    #[arg(long)]
    pub post_processing: Option<String>,

    /// [extended] simple, moderate, complex, very_complex (or 1.0 - 2.0)
    #[arg(long)]
    pub complexity: Option<Complexity>,

    /// Item name shown on the quote
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Material, e.g. PLA, PETG
    #[arg(long)]
    pub material: Option<String>,

    /// Number of units
    #[arg(long, short = 'q')]
    pub quantity: Option<String>,

    /// The part gets manual painting
    #[arg(long)]
    pub painted: bool,

    /// Add the priced item to the quote
    #[arg(long)]
    pub add: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Client name printed on the document
    #[arg(long, default_value = "")]
    pub client: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Pdf)]
    pub format: ExportFormat,

    /// Output file (default: orcamento_<client>.<ext> in the current directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Text,
}
