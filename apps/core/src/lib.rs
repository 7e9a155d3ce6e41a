//! Keyword classification and AI-Overview adaptability scoring.
//!
//! The `engine` module holds the pure rules: priority tiers from search volume,
//! a four-factor adaptability score from keyword text, and population
//! distribution statistics. The `catalog` module is the in-memory keyword
//! store that calls into the engine and serializes all record mutations.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod samples;

#[cfg(test)]
mod tests;

pub use catalog::CatalogHandle;
pub use config::EngineConfig;
pub use engine::KeywordEngine;
pub use error::AppError;
