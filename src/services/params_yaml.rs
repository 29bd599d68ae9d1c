use std::collections::BTreeMap;
use std::io;

use thiserror::Error;

use crate::domain::params::PlanParameters;

#[derive(Error, Debug)]
pub enum ParamsYamlError {
    #[error("failed to read parameters file: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse parameters yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load parameters from a flat YAML mapping.
///
/// Every key is optional; missing keys keep their defaults. A key whose
/// value is not interpretable as a number also keeps its default (with a
/// warning) — field-level problems never fail the load.
pub fn load_params_from_yaml_file(path: &str) -> Result<PlanParameters, ParamsYamlError> {
    let contents = std::fs::read_to_string(path)?;
    params_from_yaml_str(&contents)
}

pub fn params_from_yaml_str(input: &str) -> Result<PlanParameters, ParamsYamlError> {
    let record: Option<BTreeMap<String, serde_yaml::Value>> = serde_yaml::from_str(input)?;
    let mut params = PlanParameters::default();

    for (key, value) in record.unwrap_or_default() {
        match numeric_value(&value) {
            Some(number) => {
                if !apply_field(&mut params, &key, number) {
                    log::warn!("unknown parameter '{key}' ignored");
                }
            }
            None => log::warn!("parameter '{key}' is not numeric, keeping its default"),
        }
    }

    Ok(params)
}

/// Serialize a parameter set as the flat YAML mapping the loader accepts.
pub fn serialize_params_to_yaml<W: io::Write>(
    writer: &mut W,
    params: &PlanParameters,
) -> io::Result<()> {
    let yaml = serde_yaml::to_string(params)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writer.write_all(yaml.as_bytes())
}

fn numeric_value(value: &serde_yaml::Value) -> Option<f64> {
    match value {
        serde_yaml::Value::Number(number) => number.as_f64(),
        serde_yaml::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn apply_field(params: &mut PlanParameters, key: &str, value: f64) -> bool {
    let field = match key {
        "current_arr" => &mut params.current_arr,
        "target_arr" => &mut params.target_arr,
        "customers_present" => &mut params.customers_present,
        "median_mrpu" => &mut params.median_mrpu,
        "median_mrpu_customers" => &mut params.median_mrpu_customers,
        "max_mrpu" => &mut params.max_mrpu,
        "max_mrpu_customers" => &mut params.max_mrpu_customers,
        "reach_rate_present" => &mut params.reach_rate_present,
        "meeting_rate_present" => &mut params.meeting_rate_present,
        "win_rate_present" => &mut params.win_rate_present,
        "icp_present" => &mut params.icp_present,
        "icp_planned" => &mut params.icp_planned,
        "icp_active" => &mut params.icp_active,
        "uplift_weight_reach" => &mut params.uplift_weight_reach,
        "uplift_weight_meeting" => &mut params.uplift_weight_meeting,
        "uplift_weight_win" => &mut params.uplift_weight_win,
        "ndr_target" => &mut params.ndr_target,
        "payback_months_present" => &mut params.payback_months_present,
        "payback_months_target" => &mut params.payback_months_target,
        "customer_lifetime_years" => &mut params.customer_lifetime_years,
        "gm_present" => &mut params.gm_present,
        "gm_target" => &mut params.gm_target,
        "rev_share_infra" => &mut params.rev_share_infra,
        "rev_share_managed" => &mut params.rev_share_managed,
        "tier1_mrpu" => &mut params.tier1_mrpu,
        "tier2_mrpu" => &mut params.tier2_mrpu,
        "tier3_mrpu" => &mut params.tier3_mrpu,
        "gap_tolerance" => &mut params.gap_tolerance,
        "tier_iterations" => &mut params.tier_iterations,
        _ => return false,
    };
    *field = value;
    true
}
