//! Umbra ECS -- dense per-type component storage with generational entities.
//!
//! This crate provides the entity/component substrate for the Umbra physics
//! core. Entities are generational IDs; each component type lives in its own
//! [`ComponentStore`](store::ComponentStore) whose iteration order is the
//! insertion order. That ordering is a contract, not an accident: the physics
//! step defines pair enumeration, follower tiers, and collision sign
//! conventions in terms of it.
//!
//! # Quick Start
//!
//! ```
//! use umbra_ecs::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Health(u32);
//!
//! let mut alloc = EntityAllocator::new();
//! let mut healths: ComponentStore<Health> = ComponentStore::new();
//!
//! let e = alloc.allocate();
//! healths.insert(e, Health(100));
//!
//! assert!(healths.has(e));
//! assert_eq!(healths.get(e), Some(&Health(100)));
//! ```

#![deny(unsafe_code)]

pub mod entity;
pub mod store;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by ECS operations.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    /// The entity does not exist (stale generation or never allocated).
    #[error("entity {entity} does not exist (stale or never allocated)")]
    StaleEntity {
        /// The offending handle.
        entity: entity::EntityId,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::entity::{EntityAllocator, EntityId};
    pub use crate::store::ComponentStore;
    pub use crate::EcsError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
