use crate::commands::base_commands::Commands;
use crate::domain::params::PlanParameters;
use crate::services::params_yaml::serialize_params_to_yaml;

pub fn defaults_command(cmd: Commands) {
    if let Commands::Defaults { output } = cmd {
        let mut buffer = Vec::new();
        if let Err(e) = serialize_params_to_yaml(&mut buffer, &PlanParameters::default()) {
            eprintln!("Failed to serialize default parameters: {e:?}");
            return;
        }
        if let Err(e) = std::fs::write(&output, buffer) {
            eprintln!("Failed to write parameters file: {e:?}");
        } else {
            println!("Default parameters written to {output}");
        }
    }
}
