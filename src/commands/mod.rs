pub mod base_commands;
pub mod defaults_cmd;
pub mod plan_cmd;
pub mod report_format;
pub mod tier_mix_cmd;
