mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use clap::{CommandFactory, Parser};

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::defaults_cmd::defaults_command;
use crate::commands::plan_cmd::plan_command;
use crate::commands::tier_mix_cmd::tier_mix_command;

fn main() {
    env_logger::init();
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Defaults { .. } => defaults_command(cmd),
        cmd @ Commands::Plan { .. } => plan_command(cmd),
        cmd @ Commands::TierMix { .. } => tier_mix_command(cmd),
        Commands::Completions { shell } => {
            let mut cli = CliArgs::command();
            clap_complete::generate(shell, &mut cli, "gapplan", &mut std::io::stdout());
        }
    }
}
