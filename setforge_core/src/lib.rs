#![forbid(unsafe_code)]

//! Core domain model for the Setforge workout builder.
//!
//! This crate provides:
//! - The workout object graph (workouts, intervals, exercises)
//! - The training-method codec (sum type to flat storage record and back)
//! - The workout store (CRUD, cascade delete, sorted retrieval)
//! - Identity-keyed expansion state for collapsible lists

pub mod error;
pub mod method;
pub mod expansion;
pub mod types;
pub mod store;
pub mod catalog;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use method::{CodecOptions, MethodFields, MethodKind, TrainingMethod};
pub use expansion::{find_by_identity, find_by_identity_mut, ExpansionState, Identified};
pub use store::WorkoutStore;
pub use catalog::{default_catalog, find_catalog_ref};
pub use config::Config;
