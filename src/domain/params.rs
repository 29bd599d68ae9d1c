use serde::Serialize;

/// Flat set of named planning inputs.
///
/// Every field has a documented default; a config file may override any
/// subset of them. Rates and counts are not validated here — the calculator
/// clamps them into range instead of rejecting input.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlanParameters {
    /// Exit ARR of the present year (EUR).
    pub current_arr: f64,
    /// Target exit ARR of the planning year (EUR).
    pub target_arr: f64,
    pub customers_present: f64,
    /// Monthly revenue per customer in the median cluster (EUR).
    pub median_mrpu: f64,
    pub median_mrpu_customers: f64,
    /// Monthly revenue per customer in the max cluster (EUR).
    pub max_mrpu: f64,
    pub max_mrpu_customers: f64,

    // Present (status-quo) funnel rates, each in [0, 1].
    pub reach_rate_present: f64,
    pub meeting_rate_present: f64,
    pub win_rate_present: f64,

    // Addressable ICP account counts.
    pub icp_present: f64,
    pub icp_planned: f64,
    pub icp_active: f64,

    // Weights distributing the funnel uplift across reach/meeting/win.
    pub uplift_weight_reach: f64,
    pub uplift_weight_meeting: f64,
    pub uplift_weight_win: f64,

    // Unit-economics assumptions.
    /// Net dollar retention target (1.10 = 110%).
    pub ndr_target: f64,
    pub payback_months_present: f64,
    pub payback_months_target: f64,
    pub customer_lifetime_years: f64,
    pub gm_present: f64,
    pub gm_target: f64,
    pub rev_share_infra: f64,
    pub rev_share_managed: f64,

    // Tier prices for the mix recommendation (monthly EUR).
    pub tier1_mrpu: f64,
    pub tier2_mrpu: f64,
    pub tier3_mrpu: f64,

    // Monte Carlo tuning.
    /// Band around the gap MRR counted as "gap closed", as a fraction.
    pub gap_tolerance: f64,
    /// Iterations per grid cell; floored at 2000 by the recommender.
    pub tier_iterations: f64,
}

impl Default for PlanParameters {
    fn default() -> Self {
        Self {
            current_arr: 4_200_000.0,
            target_arr: 6_500_000.0,
            customers_present: 54.0,
            median_mrpu: 7_500.0,
            median_mrpu_customers: 49.0,
            max_mrpu: 30_000.0,
            max_mrpu_customers: 2.0,
            reach_rate_present: 0.50,
            meeting_rate_present: 0.25,
            win_rate_present: 0.09,
            icp_present: 1_000.0,
            icp_planned: 300.0,
            icp_active: 150.0,
            uplift_weight_reach: 1.0,
            uplift_weight_meeting: 1.0,
            uplift_weight_win: 1.0,
            ndr_target: 1.10,
            payback_months_present: 14.0,
            payback_months_target: 10.0,
            customer_lifetime_years: 3.0,
            gm_present: 0.07,
            gm_target: 0.10,
            rev_share_infra: 0.95,
            rev_share_managed: 0.05,
            tier1_mrpu: 35_000.0,
            tier2_mrpu: 12_500.0,
            tier3_mrpu: 6_000.0,
            gap_tolerance: 0.07,
            tier_iterations: 5_000.0,
        }
    }
}
