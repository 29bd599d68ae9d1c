use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_plan_summary;
use crate::services::params_yaml::load_params_from_yaml_file;
use crate::services::plan_calculator::compute_plan;
use crate::services::report_types::PlanReport;
use crate::services::report_yaml::serialize_plan_report_to_yaml;

pub fn plan_command(cmd: Commands) {
    if let Commands::Plan { config, output } = cmd {
        let params = match load_params_from_yaml_file(&config) {
            Ok(params) => params,
            Err(e) => {
                eprintln!("Failed to load parameters: {e:?}");
                return;
            }
        };

        let plan = compute_plan(&params);
        let report = PlanReport::from_plan(&plan);

        let mut buffer = Vec::new();
        if let Err(e) = serialize_plan_report_to_yaml(&mut buffer, &report) {
            eprintln!("Failed to serialize plan report: {e:?}");
            return;
        }
        if let Err(e) = std::fs::write(&output, buffer) {
            eprintln!("Failed to write plan report: {e:?}");
            return;
        }

        println!("{}", format_plan_summary(&plan));
        println!();
        println!("Plan report written to {output}");
    }
}
