//! # umbra-physics
//!
//! A deterministic 2D physics and collision core for a top-down action game
//! built on [`umbra_ecs`]. Each frame, [`step::PhysicsSystem::step`] performs
//! kinematic integration, projects entity shadows away from the scene's light
//! source, detects collisions (AABB broad-phase, polygon narrow-phase), and
//! snaps follower entities to their owners. Collisions come back to the
//! caller as a per-frame list of directed [`components::CollisionEvent`]s.
//!
//! Determinism is a hard guarantee: results depend only on the world state
//! and the elapsed time. All pair enumeration and resolution runs in
//! component-store insertion order, and nothing in the crate touches a clock
//! or a random source.
//!
//! ## Quick start
//!
//! ```
//! use glam::Vec2;
//! use umbra_physics::prelude::*;
//!
//! let mut world = GameWorld::new();
//!
//! let player = world.spawn();
//! world.positions.insert(
//!     player,
//!     Position::new(Vec2::new(600.0, 400.0), Vec2::splat(40.0)),
//! );
//! world.velocities.insert(player, Velocity::new(120.0, 0.0));
//! world.collidables.insert(player, Collidable);
//! world.meshes.insert(player, Mesh::unit_square());
//! world.players.insert(player, Player);
//!
//! let system = PhysicsSystem::new(PhysicsConfig::default());
//! let events = system.step(&mut world, 500.0).expect("physics step");
//! assert!(events.is_empty());
//! assert_eq!(
//!     world.positions.get(player).unwrap().position,
//!     Vec2::new(660.0, 400.0),
//! );
//! ```

#![deny(unsafe_code)]

pub mod broadphase;
pub mod components;
pub mod config;
pub mod follower;
pub mod narrowphase;
pub mod shadow;
pub mod step;
pub mod world;

pub use umbra_ecs;

use thiserror::Error;
use umbra_ecs::entity::EntityId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the physics step.
///
/// These are precondition violations on the caller's side (malformed world
/// state), not recoverable runtime conditions: a collidable entity must carry
/// a mesh and a position, and a world with shadows must have a light source.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhysicsError {
    /// A collidable pair reached narrow-phase but one side has no mesh.
    #[error("entity {entity} is collidable but has no collision mesh")]
    MissingMesh {
        /// The offending entity.
        entity: EntityId,
    },

    /// A collidable pair reached narrow-phase but one side has no position.
    #[error("entity {entity} is collidable but has no position")]
    MissingPosition {
        /// The offending entity.
        entity: EntityId,
    },

    /// Shadows exist but the world has neither a life orb nor a player to
    /// act as the light source.
    #[error("shadows are present but no light source entity exists")]
    MissingLightSource,
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with the physics core.
pub mod prelude {
    pub use crate::components::{
        Collidable, CollisionEvent, DeathTimer, ExitDoor, Follower, LifeOrb, Mesh, Player,
        Position, SecondaryFollower, Shadow, Terrain, Velocity,
    };
    pub use crate::config::PhysicsConfig;
    pub use crate::step::PhysicsSystem;
    pub use crate::world::GameWorld;
    pub use crate::PhysicsError;
    pub use umbra_ecs::entity::EntityId;
}
