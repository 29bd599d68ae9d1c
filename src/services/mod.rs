pub mod heatmap;
pub mod params_yaml;
pub mod plan_calculator;
pub mod recompute;
pub mod report_types;
pub mod report_yaml;
pub mod tier_mix;
