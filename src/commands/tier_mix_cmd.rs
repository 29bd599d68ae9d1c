use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::{format_plan_summary, format_tier_mix_summary};
use crate::services::heatmap::write_heatmap_png;
use crate::services::params_yaml::load_params_from_yaml_file;
use crate::services::recompute::{recompute, recompute_with_rng};
use crate::services::report_types::{PlanReport, SnapshotReport, TierMixReport};
use crate::services::report_yaml::serialize_snapshot_report_to_yaml;
use crate::services::tier_mix::effective_iterations;

pub fn tier_mix_command(cmd: Commands) {
    if let Commands::TierMix {
        config,
        output,
        seed,
    } = cmd
    {
        let params = match load_params_from_yaml_file(&config) {
            Ok(params) => params,
            Err(e) => {
                eprintln!("Failed to load parameters: {e:?}");
                return;
            }
        };

        let snapshot = match seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                recompute_with_rng(&params, &mut rng)
            }
            None => recompute(&params),
        };
        let Some(snapshot) = snapshot else {
            eprintln!("Recompute pass failed; existing reports were left untouched");
            return;
        };

        let report = SnapshotReport {
            plan: PlanReport::from_plan(&snapshot.plan),
            tier_mix: TierMixReport::from_result(&snapshot.tier_mix),
        };
        let mut buffer = Vec::new();
        if let Err(e) = serialize_snapshot_report_to_yaml(&mut buffer, &report) {
            eprintln!("Failed to serialize tier mix report: {e:?}");
            return;
        }
        if let Err(e) = std::fs::write(&output, buffer) {
            eprintln!("Failed to write tier mix report: {e:?}");
            return;
        }

        let heatmap_path = format!("{output}.png");
        let mut heatmap_written = false;
        if let Some(grid) = &snapshot.tier_mix.grid {
            match write_heatmap_png(&heatmap_path, grid) {
                Ok(()) => heatmap_written = true,
                Err(e) => eprintln!("Failed to render heatmap: {e:?}"),
            }
        }

        println!("{}", format_plan_summary(&snapshot.plan));
        println!();
        println!(
            "{}",
            format_tier_mix_summary(&snapshot.tier_mix, effective_iterations(&params))
        );
        println!();
        println!("Tier mix report written to {output}");
        if heatmap_written {
            println!("Heatmap written to {heatmap_path}");
        }
    }
}
