use serde::Serialize;

use crate::domain::plan::Plan;
use crate::domain::tier_mix::{TierMixResult, TierRecommendation};

/// Serializable view of a [`Plan`].
///
/// Non-finite derived values become `None` so they serialize as nulls and
/// downstream consumers render placeholders instead of bogus numbers.
#[derive(Serialize, Debug, Clone)]
pub struct PlanReport {
    pub generated: String,
    pub gap_arr: Option<f64>,
    pub gap_mrr: Option<f64>,
    pub avg_new_mrpu: Option<f64>,
    pub required_new_customers: Option<f64>,
    pub reach_present: Option<f64>,
    pub meeting_present: Option<f64>,
    pub win_present: Option<f64>,
    pub expected_wins_present_icp: Option<f64>,
    pub expected_wins_planned_icp: Option<f64>,
    pub reach_proposed: Option<f64>,
    pub meeting_proposed: Option<f64>,
    pub win_proposed: Option<f64>,
    pub uplift_factor: Option<f64>,
    pub enough_already: bool,
    pub uplift_infeasible: bool,
    pub expected_wins_proposed: Option<f64>,
    pub icp_present: Option<f64>,
    pub icp_planned: Option<f64>,
    pub icp_active: Option<f64>,
    pub weight_reach: Option<f64>,
    pub weight_meeting: Option<f64>,
    pub weight_win: Option<f64>,
    pub gm_present: Option<f64>,
    pub gm_target: Option<f64>,
    pub ndr_target: Option<f64>,
    pub lifetime_months: Option<f64>,
    pub payback_months_present: Option<f64>,
    pub payback_months_target: Option<f64>,
    pub new_customer_mrr: Option<f64>,
    pub additional_mrr_from_ndr: Option<f64>,
    pub gross_profit_per_customer: Option<f64>,
    pub ltv_per_customer: Option<f64>,
    pub target_cac: Option<f64>,
}

impl PlanReport {
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            generated: generated_stamp(),
            gap_arr: finite(plan.gap_arr),
            gap_mrr: finite(plan.gap_mrr),
            avg_new_mrpu: finite(plan.avg_new_mrpu),
            required_new_customers: finite(plan.required_new_customers),
            reach_present: finite(plan.reach_present),
            meeting_present: finite(plan.meeting_present),
            win_present: finite(plan.win_present),
            expected_wins_present_icp: finite(plan.expected_wins_present_icp),
            expected_wins_planned_icp: finite(plan.expected_wins_planned_icp),
            reach_proposed: finite(plan.reach_proposed),
            meeting_proposed: finite(plan.meeting_proposed),
            win_proposed: finite(plan.win_proposed),
            uplift_factor: finite(plan.uplift_factor),
            enough_already: plan.enough_already,
            uplift_infeasible: plan.uplift_infeasible,
            expected_wins_proposed: finite(plan.expected_wins_proposed),
            icp_present: finite(plan.icp_present),
            icp_planned: finite(plan.icp_planned),
            icp_active: finite(plan.icp_active),
            weight_reach: finite(plan.weight_reach),
            weight_meeting: finite(plan.weight_meeting),
            weight_win: finite(plan.weight_win),
            gm_present: finite(plan.gm_present),
            gm_target: finite(plan.gm_target),
            ndr_target: finite(plan.ndr_target),
            lifetime_months: finite(plan.lifetime_months),
            payback_months_present: finite(plan.payback_months_present),
            payback_months_target: finite(plan.payback_months_target),
            new_customer_mrr: finite(plan.new_customer_mrr),
            additional_mrr_from_ndr: finite(plan.additional_mrr_from_ndr),
            gross_profit_per_customer: finite(plan.gross_profit_per_customer),
            ltv_per_customer: finite(plan.ltv_per_customer),
            target_cac: finite(plan.target_cac),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TierRecommendationRecord {
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub close_probability: f64,
    pub mean_avg_mrpu: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct TierMixGridRecord {
    pub f1_values: Vec<f64>,
    pub f2_values: Vec<f64>,
    /// Rows indexed by f2; invalid cells serialize as nulls.
    pub rows: Vec<Vec<Option<f64>>>,
}

#[derive(Serialize, Debug, Clone)]
pub struct TierMixReport {
    pub generated: String,
    pub n_new: u64,
    pub tolerance: f64,
    pub recommended: Option<TierRecommendationRecord>,
    pub grid: Option<TierMixGridRecord>,
}

impl TierMixReport {
    pub fn from_result(result: &TierMixResult) -> Self {
        Self {
            generated: generated_stamp(),
            n_new: result.n_new,
            tolerance: result.tolerance,
            recommended: result.recommended.as_ref().map(recommendation_record),
            grid: result.grid.as_ref().map(|grid| TierMixGridRecord {
                f1_values: grid.f1_values.clone(),
                f2_values: grid.f2_values.clone(),
                rows: grid
                    .cells
                    .iter()
                    .map(|row| row.iter().copied().map(finite).collect())
                    .collect(),
            }),
        }
    }
}

/// Combined output of one recomputation pass.
#[derive(Serialize, Debug, Clone)]
pub struct SnapshotReport {
    pub plan: PlanReport,
    pub tier_mix: TierMixReport,
}

fn recommendation_record(recommended: &TierRecommendation) -> TierRecommendationRecord {
    TierRecommendationRecord {
        f1: recommended.f1,
        f2: recommended.f2,
        f3: recommended.f3,
        close_probability: recommended.close_probability,
        mean_avg_mrpu: recommended.mean_avg_mrpu,
    }
}

fn generated_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
