use crate::domain::params::PlanParameters;
use crate::domain::plan::Plan;
use crate::services::plan_calculator::compute_plan;

pub fn default_params() -> PlanParameters {
    PlanParameters::default()
}

/// Plan derived from `params` with the required-customer count pinned, so
/// tier-mix tests can shape the search input directly.
pub fn plan_requiring(params: &PlanParameters, required: f64) -> Plan {
    let mut plan = compute_plan(params);
    plan.required_new_customers = required;
    plan
}
