use std::panic::{self, AssertUnwindSafe};

use rand::Rng;

use crate::domain::params::PlanParameters;
use crate::domain::plan::Plan;
use crate::domain::tier_mix::TierMixResult;
use crate::services::plan_calculator::compute_plan;
use crate::services::tier_mix::tier_mix_search_with_rng;

/// One full recomputation pass over a parameter snapshot.
#[derive(Debug, Clone)]
pub struct PlanSnapshot {
    pub plan: Plan,
    pub tier_mix: TierMixResult,
}

/// Run a full pass (calculator, then recommender) with the platform RNG.
pub fn recompute(params: &PlanParameters) -> Option<PlanSnapshot> {
    let mut rng = rand::thread_rng();
    recompute_with_rng(params, &mut rng)
}

/// Run a full pass with a caller-supplied RNG.
///
/// Any panic inside the pass is caught here and logged; the caller receives
/// `None` and keeps whatever output it rendered before. A snapshot is either
/// complete or absent, never partial.
pub fn recompute_with_rng<R: Rng + ?Sized>(
    params: &PlanParameters,
    rng: &mut R,
) -> Option<PlanSnapshot> {
    run_guarded("recompute", || {
        let plan = compute_plan(params);
        log::debug!(
            "recomputed plan: gap_mrr={:.2}, required_new={:.2}",
            plan.gap_mrr,
            plan.required_new_customers
        );
        let tier_mix = tier_mix_search_with_rng(params, &plan, rng);
        PlanSnapshot { plan, tier_mix }
    })
}

fn run_guarded<T>(label: &str, pass: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(pass)) {
        Ok(value) => Some(value),
        Err(payload) => {
            log::error!("{label} pass failed: {}", panic_message(payload.as_ref()));
            None
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
