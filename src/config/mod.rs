pub mod toml_config;

pub use toml_config::AppConfig;

/// Behavior switches handed to `MarketStore::new`. Defaults reproduce the
/// permissive contract of the original prototype; strict modes are opt-in.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Constrain crop and contract status changes to their lifecycle graphs.
    pub strict_transitions: bool,
    /// Require milestone amounts to sum to the contract price.
    pub enforce_milestone_totals: bool,
    pub max_crop_images: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            strict_transitions: false,
            enforce_milestone_totals: false,
            max_crop_images: 5,
        }
    }
}

#[cfg(feature = "cli")]
mod cli {
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "agrilink")]
    #[command(about = "In-memory marketplace store demo: seed data, run the agent flow, export a snapshot")]
    pub struct CliConfig {
        /// Optional TOML config file
        #[arg(long)]
        pub config: Option<String>,

        /// Skip seeding the sample data set
        #[arg(long)]
        pub no_seed: bool,

        /// Write a JSON snapshot of the store to this path before exiting
        #[arg(long)]
        pub export: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
