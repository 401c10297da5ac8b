//! The per-frame physics step.
//!
//! [`PhysicsSystem::step`] advances the whole simulation by one frame:
//!
//! 1. Kinematic integration: `position += velocity * dt` for every entity
//!    holding both, recording `prev_position` first.
//! 2. Shadow projection against the current light source.
//! 3. Broad-phase: linear pairwise AABB scan over collidables, with domain
//!    pair exclusion.
//! 4. Narrow-phase: polygon resolution of surviving pairs, emitting directed
//!    collision events.
//! 5. Follower position correction, first tier then second.
//!
//! The entire step is skipped -- including shadows, collision, and
//! followers -- while any entity holds a death timer (global freeze-frame on
//! death). Collision events are the step's return value: a per-frame output
//! list for gameplay logic to drain, not a persistent component.
//!
//! Everything runs synchronously on the caller's thread. Ordering within the
//! step follows component store insertion order, which is what makes the
//! narrow-phase sign convention and follower tiering deterministic.

use tracing::{debug, trace};

use crate::components::CollisionEvent;
use crate::config::PhysicsConfig;
use crate::world::GameWorld;
use crate::{broadphase, follower, narrowphase, shadow, PhysicsError};

// ---------------------------------------------------------------------------
// PhysicsSystem
// ---------------------------------------------------------------------------

/// The physics step function, carrying its configuration.
#[derive(Debug, Clone, Default)]
pub struct PhysicsSystem {
    config: PhysicsConfig,
}

impl PhysicsSystem {
    /// Create a physics system with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// The configuration this system was built with.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advance the simulation by `elapsed_ms` milliseconds.
    ///
    /// Returns the collision events recorded this frame. The list is a
    /// multiset: both directions of each contact, and repeated contacts of
    /// the same entity, each appear separately.
    ///
    /// # Errors
    ///
    /// Propagates precondition violations from the passes: a collidable pair
    /// reaching narrow-phase without meshes or positions, or shadows without
    /// any light source. Expected absences (an entity missing Velocity or
    /// Position, a follower whose owner is gone) are silent skips.
    pub fn step(
        &self,
        world: &mut GameWorld,
        elapsed_ms: f32,
    ) -> Result<Vec<CollisionEvent>, PhysicsError> {
        // Global freeze-frame: any death timer halts physics entirely.
        if !world.death_timers.is_empty() {
            trace!(
                timers = world.death_timers.len(),
                "death freeze active, skipping physics step"
            );
            return Ok(Vec::new());
        }

        integrate(world, elapsed_ms);
        shadow::project_shadows(world, &self.config)?;
        let events = self.scan_collisions(world)?;
        follower::correct_followers(world);

        if !events.is_empty() {
            debug!(events = events.len(), "collision events this frame");
        }
        Ok(events)
    }

    /// Broad-phase pair enumeration plus narrow-phase resolution.
    fn scan_collisions(&self, world: &GameWorld) -> Result<Vec<CollisionEvent>, PhysicsError> {
        let mut events = Vec::new();
        let collidables = world.collidables.entities();

        for i in 0..collidables.len() {
            let a = collidables[i];
            for &b in &collidables[i + 1..] {
                if broadphase::should_ignore(world, a, b) {
                    continue;
                }
                let pos_a = world
                    .positions
                    .get(a)
                    .ok_or(PhysicsError::MissingPosition { entity: a })?;
                let pos_b = world
                    .positions
                    .get(b)
                    .ok_or(PhysicsError::MissingPosition { entity: b })?;
                if broadphase::aabb_overlaps(pos_a, pos_b) {
                    if self.config.debug {
                        debug!(a = %a, b = %b, "broad-phase candidate pair");
                    }
                    narrowphase::resolve_pair(world, a, b, &mut events)?;
                }
            }
        }
        Ok(events)
    }
}

/// Advance every entity holding both Position and Velocity, recording the
/// pre-step position in `prev_position`. Entities missing either component
/// are silently skipped.
fn integrate(world: &mut GameWorld, elapsed_ms: f32) {
    let step_seconds = elapsed_ms / 1000.0;
    for (entity, velocity) in world.velocities.iter() {
        if let Some(position) = world.positions.get_mut(entity) {
            position.prev_position = position.position;
            position.position += velocity.velocity * step_seconds;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
