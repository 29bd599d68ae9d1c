use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default parameter set as YAML
    Defaults {
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Compute the gap-closure plan from a parameters file
    Plan {
        /// Path to parameters YAML (every key optional)
        #[arg(short, long)]
        config: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Run a full pass: plan plus the tier-mix Monte Carlo search
    TierMix {
        /// Path to parameters YAML (every key optional)
        #[arg(short, long)]
        config: String,
        /// Output YAML file; the heatmap lands next to it as <output>.png
        #[arg(short, long)]
        output: String,
        /// RNG seed for a reproducible search
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
