use crate::domain::params::PlanParameters;
use crate::domain::plan::Plan;

/// Per-stage ceiling for proposed funnel rates; no stage is ever certain.
const STAGE_RATE_CAP: f64 = 0.95;

/// Compute the gap-closure plan from a parameter snapshot.
///
/// Pure and deterministic. Out-of-range numeric input is clamped, never
/// rejected; degenerate arithmetic (zero average price, zero expected wins)
/// surfaces as non-finite values on the affected fields.
pub fn compute_plan(params: &PlanParameters) -> Plan {
    let current_arr = finite_or(params.current_arr, 0.0);
    let target_arr = finite_or(params.target_arr, 0.0);
    let gap_arr = (target_arr - current_arr).max(0.0);
    let gap_mrr = gap_arr / 12.0;

    let median_mrpu = finite_or(params.median_mrpu, 0.0);
    let median_n = finite_or(params.median_mrpu_customers, 0.0).max(0.0);
    let max_mrpu = finite_or(params.max_mrpu, 0.0);
    let max_n = finite_or(params.max_mrpu_customers, 0.0).max(0.0);

    let cluster_total = median_n + max_n;
    let avg_new_mrpu = if cluster_total > 0.0 {
        (median_mrpu * median_n + max_mrpu * max_n) / cluster_total
    } else {
        median_mrpu
    };

    let required_new_customers = if avg_new_mrpu > 0.0 {
        gap_mrr / avg_new_mrpu
    } else {
        f64::INFINITY
    };

    let reach_present = clamp_rate(params.reach_rate_present);
    let meeting_present = clamp_rate(params.meeting_rate_present);
    let win_present = clamp_rate(params.win_rate_present);
    let icp_present = finite_or(params.icp_present, 0.0).max(0.0);
    let icp_planned = finite_or(params.icp_planned, 0.0).max(0.0);
    let icp_active = finite_or(params.icp_active, 0.0).max(0.0);

    let present_funnel_prob = reach_present * meeting_present * win_present;
    let expected_wins_present_icp = icp_present * present_funnel_prob;
    let expected_wins_planned_icp = icp_planned * present_funnel_prob;

    let raw_weight_reach = finite_or(params.uplift_weight_reach, 1.0).max(0.0);
    let raw_weight_meeting = finite_or(params.uplift_weight_meeting, 1.0).max(0.0);
    let raw_weight_win = finite_or(params.uplift_weight_win, 1.0).max(0.0);
    let weight_sum = raw_weight_reach + raw_weight_meeting + raw_weight_win;
    let (weight_reach, weight_meeting, weight_win) = if weight_sum <= 0.0 {
        (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
    } else {
        (
            raw_weight_reach / weight_sum,
            raw_weight_meeting / weight_sum,
            raw_weight_win / weight_sum,
        )
    };

    let mut reach_proposed = reach_present;
    let mut meeting_proposed = meeting_present;
    let mut win_proposed = win_present;
    let mut uplift_factor = 1.0;
    let mut enough_already = false;
    let mut uplift_applied = false;

    if expected_wins_planned_icp <= 0.0 || !required_new_customers.is_finite() {
        uplift_factor = f64::NAN;
    } else if expected_wins_planned_icp >= required_new_customers {
        enough_already = true;
    } else {
        let scalar = required_new_customers / expected_wins_planned_icp;
        uplift_factor = scalar;
        uplift_applied = true;
        reach_proposed = (reach_present * scalar.powf(weight_reach)).min(STAGE_RATE_CAP);
        meeting_proposed = (meeting_present * scalar.powf(weight_meeting)).min(STAGE_RATE_CAP);
        win_proposed = (win_present * scalar.powf(weight_win)).min(STAGE_RATE_CAP);
    }

    let proposed_funnel_prob = reach_proposed * meeting_proposed * win_proposed;
    let expected_wins_proposed = icp_planned * proposed_funnel_prob;

    // The per-stage cap can leave the product of all three proposed rates
    // short of the required wins even though each stage maxed out.
    let uplift_infeasible =
        uplift_applied && expected_wins_proposed < required_new_customers * (1.0 - 1e-9);

    let gm_target = finite_or(params.gm_target, 0.0).max(0.0);
    let gm_present = finite_or(params.gm_present, 0.0).max(0.0);
    let ndr_target = finite_or(params.ndr_target, 1.0).max(0.0);

    let lifetime_years = finite_or(params.customer_lifetime_years, 0.0).max(0.0);
    let lifetime_months = lifetime_years * 12.0;

    let payback_months_target = finite_or(params.payback_months_target, 0.0).max(0.0);
    let payback_months_present = finite_or(params.payback_months_present, 0.0).max(0.0);

    let new_customer_mrr = if required_new_customers.is_finite() && avg_new_mrpu.is_finite() {
        required_new_customers * avg_new_mrpu
    } else {
        0.0
    };

    let additional_mrr_from_ndr = if ndr_target > 1.0 && new_customer_mrr.is_finite() {
        new_customer_mrr * (ndr_target - 1.0)
    } else {
        0.0
    };

    let gross_profit_per_customer = avg_new_mrpu * gm_target;

    let ltv_per_customer = if gross_profit_per_customer.is_finite() && lifetime_months > 0.0 {
        gross_profit_per_customer * lifetime_months
    } else {
        0.0
    };

    let target_cac = if gross_profit_per_customer.is_finite() && payback_months_target > 0.0 {
        gross_profit_per_customer * payback_months_target
    } else {
        0.0
    };

    Plan {
        gap_arr,
        gap_mrr,
        avg_new_mrpu,
        required_new_customers,
        reach_present,
        meeting_present,
        win_present,
        expected_wins_present_icp,
        expected_wins_planned_icp,
        reach_proposed,
        meeting_proposed,
        win_proposed,
        uplift_factor,
        enough_already,
        uplift_infeasible,
        expected_wins_proposed,
        icp_present,
        icp_planned,
        icp_active,
        weight_reach,
        weight_meeting,
        weight_win,
        gm_present,
        gm_target,
        ndr_target,
        lifetime_months,
        payback_months_present,
        payback_months_target,
        new_customer_mrr,
        additional_mrr_from_ndr,
        gross_profit_per_customer,
        ltv_per_customer,
        target_cac,
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn clamp_rate(value: f64) -> f64 {
    finite_or(value, 0.0).clamp(0.0, 1.0)
}
