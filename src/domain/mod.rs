pub mod params;
pub mod plan;
pub mod tier_mix;
