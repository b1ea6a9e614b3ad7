//! Core systems for the Strata layout engine.
//!
//! This crate provides the foundational components shared by the engine:
//!
//! - **Entity Registry**: arena-backed, key-ordered storage for layout
//!   entities with stable [`EntityId`] handles
//! - **Errors**: the structural error taxonomy (duplicate and missing keys)
//! - **Logging**: `tracing` target constants for subsystem filtering
//!
//! # Registry Example
//!
//! ```
//! use strata_core::EntityRegistry;
//!
//! let mut registry: EntityRegistry<i32, &str> = EntityRegistry::new();
//!
//! registry.insert(2, "two").unwrap();
//! registry.insert(1, "one").unwrap();
//!
//! // Iteration is ordered by key.
//! let keys: Vec<i32> = registry.keys().collect();
//! assert_eq!(keys, vec![1, 2]);
//!
//! // Duplicate keys are a structural error.
//! assert!(registry.insert(1, "again").is_err());
//! ```

mod error;
pub mod logging;
pub mod registry;

pub use error::{RegistryError, Result};
pub use registry::{EntityId, EntityRegistry};
