/// The grid cell the Monte Carlo search recommends.
#[derive(Debug, Clone, PartialEq)]
pub struct TierRecommendation {
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub close_probability: f64,
    /// Mean simulated average monthly price per customer for this cell.
    pub mean_avg_mrpu: f64,
}

/// Probability-of-closing-gap per (f1, f2) cell.
///
/// `cells` is indexed `[f2][f1]`; cells where `f1 + f2 > 1` hold `f64::NAN`
/// and are never candidates for the recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct TierMixGrid {
    pub f1_values: Vec<f64>,
    pub f2_values: Vec<f64>,
    pub cells: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierMixResult {
    pub recommended: Option<TierRecommendation>,
    pub grid: Option<TierMixGrid>,
    /// Required new customers, rounded to the nearest whole customer.
    pub n_new: u64,
    /// Effective tolerance after clamping into [0, 0.5].
    pub tolerance: f64,
}

impl TierMixResult {
    /// Result for the degenerate case where no customers are required.
    pub fn empty() -> Self {
        Self {
            recommended: None,
            grid: None,
            n_new: 0,
            tolerance: 0.0,
        }
    }
}
