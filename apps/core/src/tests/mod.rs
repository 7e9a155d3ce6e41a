//! Test Module
//!
//! Cross-module test suites for the keyword engine.
//!
//! ## Test Categories
//! - `engine_tests`: classification, scoring and aggregation properties
//! - `catalog_tests`: catalog CRUD, filtering, batch recompute, write serialization
//! - `config_tests`: environment and file based configuration
//! - `integration_tests`: configured engine driving the catalog end to end

pub mod engine_tests;
