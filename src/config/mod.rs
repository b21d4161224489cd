pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fare-card")]
#[command(about = "Drive an in-memory public-transport fare card")]
pub struct CliConfig {
    /// Path to a TOML card configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Commands to run, e.g. "extend 10" "ticket". Read from stdin when omitted
    pub commands: Vec<String>,

    /// Print command results as JSON lines
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
