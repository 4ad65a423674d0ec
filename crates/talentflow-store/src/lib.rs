//! talentflow-store — Assessment and response persistence.
//!
//! Implements the `AssessmentStore` trait with an in-memory backend and a
//! JSON-directory backend, and loads the `talentflow.toml` configuration
//! that picks between them.

pub mod config;
pub mod error;
pub mod json;
pub mod memory;
pub mod traits;

pub use config::{create_store, load_config, Backend, IdStrategy, TalentflowConfig};
pub use error::StoreError;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use traits::AssessmentStore;
