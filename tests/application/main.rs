#[path = "../common/mod.rs"]
mod common;

mod brief_exporter_test;
mod brief_generator_test;
mod retry_policy_test;
