use crate::domain::plan::Plan;
use crate::domain::tier_mix::TierMixResult;

/// Plain-text summary of a computed plan; fields that could not be computed
/// print as "n/a".
pub fn format_plan_summary(plan: &Plan) -> String {
    let mut lines = Vec::new();
    lines.push("Gap Closure Plan".to_string());
    lines.push(format!("Gap ARR (annual): {}", format_eur(plan.gap_arr)));
    lines.push(format!("Gap MRR (monthly): {}", format_eur(plan.gap_mrr)));
    lines.push(format!("Avg new MRPU: {}", format_eur(plan.avg_new_mrpu)));
    lines.push(format!(
        "Required new customers: {}",
        format_count(plan.required_new_customers)
    ));
    lines.push(format!(
        "Expected wins at present rates (planned ICP): {}",
        format_count(plan.expected_wins_planned_icp)
    ));

    if plan.enough_already {
        lines.push("Funnel verdict: present rates already deliver the required wins".to_string());
    } else {
        lines.push(format!(
            "Funnel verdict: uplift factor {}",
            format_factor(plan.uplift_factor)
        ));
        lines.push(format!(
            "Proposed rates (reach / meeting / win): {} / {} / {}",
            format_pct(plan.reach_proposed),
            format_pct(plan.meeting_proposed),
            format_pct(plan.win_proposed)
        ));
        lines.push(format!(
            "Normalized uplift weights (reach / meeting / win): {:.2} / {:.2} / {:.2}",
            plan.weight_reach, plan.weight_meeting, plan.weight_win
        ));
        if plan.uplift_infeasible {
            lines.push(
                "Warning: stages cap at 95%; capped rates still fall short of the required wins"
                    .to_string(),
            );
        }
    }

    lines.push(format!(
        "Expected wins at proposed rates: {}",
        format_count(plan.expected_wins_proposed)
    ));
    lines.push(String::new());
    lines.push("Unit economics".to_string());
    lines.push(format!(
        "New-customer MRR (before NDR): {}",
        format_eur(plan.new_customer_mrr)
    ));
    lines.push(format!(
        "Additional MRR from NDR: {}",
        format_eur(plan.additional_mrr_from_ndr)
    ));
    lines.push(format!(
        "Gross profit per customer per month: {}",
        format_eur(plan.gross_profit_per_customer)
    ));
    lines.push(format!(
        "LTV per customer: {} (over {:.0} months)",
        format_eur(plan.ltv_per_customer),
        plan.lifetime_months
    ));
    lines.push(format!(
        "Target CAC per customer: {} (for {:.0}-month payback)",
        format_eur(plan.target_cac),
        plan.payback_months_target
    ));

    lines.join("\n")
}

/// Plain-text summary of the tier-mix search outcome.
pub fn format_tier_mix_summary(result: &TierMixResult, iterations: usize) -> String {
    let mut lines = Vec::new();
    lines.push("Tier Mix Recommendation".to_string());

    let Some(recommended) = &result.recommended else {
        lines.push(
            "No recommendation: required new customers is zero or not computable".to_string(),
        );
        return lines.join("\n");
    };

    lines.push(format!(
        "Split (tier 1 / tier 2 / tier 3): {:.0}% / {:.0}% / {:.0}%",
        recommended.f1 * 100.0,
        recommended.f2 * 100.0,
        recommended.f3 * 100.0
    ));
    lines.push(format!(
        "P(close gap within ±{:.1}%): {}",
        result.tolerance * 100.0,
        format_pct(recommended.close_probability)
    ));
    lines.push(format!(
        "Mean simulated avg MRPU: {}",
        format_eur(recommended.mean_avg_mrpu)
    ));
    lines.push(format!(
        "Mean new MRR at this mix: {}",
        format_eur(recommended.mean_avg_mrpu * result.n_new as f64)
    ));
    lines.push(format!("Customers simulated: {}", result.n_new));
    lines.push(format!("Iterations per cell: {iterations}"));

    lines.join("\n")
}

fn format_eur(value: f64) -> String {
    if value.is_finite() {
        format!("EUR {:.0}", value.round())
    } else {
        "n/a".to_string()
    }
}

fn format_pct(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value * 100.0)
    } else {
        "n/a".to_string()
    }
}

fn format_count(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}")
    } else {
        "n/a".to_string()
    }
}

fn format_factor(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}x")
    } else {
        "n/a".to_string()
    }
}
