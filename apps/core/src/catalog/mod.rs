//! # Catalog Module
//!
//! Owns keyword records and calls into the engine on create, update and
//! recompute. All mutations are routed through one task, which gives every
//! record a single writer.

pub mod messages;
pub mod store;
pub mod supervisor;
pub mod traits;

pub use messages::CatalogError;
pub use store::InMemoryKeywordStore;
pub use supervisor::CatalogHandle;
pub use traits::KeywordStore;
