/// Deterministic output of the gap/funnel calculator.
///
/// Derived fields may be non-finite when the inputs degenerate (zero average
/// price, zero expected wins); consumers render those as placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub gap_arr: f64,
    pub gap_mrr: f64,
    /// Blended average monthly price across the median/max clusters.
    pub avg_new_mrpu: f64,
    /// `f64::INFINITY` when the blended average price is zero.
    pub required_new_customers: f64,

    // Present funnel rates after clamping into [0, 1].
    pub reach_present: f64,
    pub meeting_present: f64,
    pub win_present: f64,

    pub expected_wins_present_icp: f64,
    pub expected_wins_planned_icp: f64,

    // Proposed rates for the planning year, each capped at 0.95.
    pub reach_proposed: f64,
    pub meeting_proposed: f64,
    pub win_proposed: f64,
    /// NaN when expected wins are zero or the required count is non-finite.
    pub uplift_factor: f64,
    /// Present rates already deliver the required wins; no uplift proposed.
    pub enough_already: bool,
    /// The uplift ran into the per-stage cap and the capped rates still fall
    /// short of the required wins.
    pub uplift_infeasible: bool,
    pub expected_wins_proposed: f64,

    pub icp_present: f64,
    pub icp_planned: f64,
    pub icp_active: f64,

    // Uplift weights normalized to sum to 1.
    pub weight_reach: f64,
    pub weight_meeting: f64,
    pub weight_win: f64,

    // Unit economics.
    pub gm_present: f64,
    pub gm_target: f64,
    pub ndr_target: f64,
    pub lifetime_months: f64,
    pub payback_months_present: f64,
    pub payback_months_target: f64,
    pub new_customer_mrr: f64,
    pub additional_mrr_from_ndr: f64,
    pub gross_profit_per_customer: f64,
    pub ltv_per_customer: f64,
    pub target_cac: f64,
}
