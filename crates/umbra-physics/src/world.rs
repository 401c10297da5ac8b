//! The [`GameWorld`] owns the entity allocator and one component store per
//! component type the physics step touches.
//!
//! Store fields are public on purpose: level setup and gameplay systems are
//! external collaborators that populate and consume them directly. The world
//! only adds the cross-store operations -- spawn, despawn with a
//! remove-from-every-store sweep, and the scene queries that resolve the
//! player and light-source singletons.

use umbra_ecs::entity::{EntityAllocator, EntityId};
use umbra_ecs::store::ComponentStore;
use umbra_ecs::EcsError;

use crate::components::{
    Collidable, DeathTimer, ExitDoor, Follower, LifeOrb, Mesh, Player, Position,
    SecondaryFollower, Shadow, Terrain, Velocity,
};

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

/// Container for all entities and their physics-relevant components.
#[derive(Debug, Default)]
pub struct GameWorld {
    allocator: EntityAllocator,
    /// Transform state for every placed entity.
    pub positions: ComponentStore<Position>,
    /// Linear velocities of moving entities.
    pub velocities: ComponentStore<Velocity>,
    /// Entities participating in pairwise collision scanning.
    pub collidables: ComponentStore<Collidable>,
    /// Level geometry markers.
    pub terrain: ComponentStore<Terrain>,
    /// Level-exit markers.
    pub exit_doors: ComponentStore<ExitDoor>,
    /// The player character marker (expected singleton).
    pub players: ComponentStore<Player>,
    /// Life-orb light markers.
    pub life_orbs: ComponentStore<LifeOrb>,
    /// Shadow records, one per shadow entity.
    pub shadows: ComponentStore<Shadow>,
    /// First-tier position-corrected dependents.
    pub followers: ComponentStore<Follower>,
    /// Second-tier position-corrected dependents.
    pub secondary_followers: ComponentStore<SecondaryFollower>,
    /// Death freeze timers.
    pub death_timers: ComponentStore<DeathTimer>,
    /// Polygon outlines for narrow-phase candidates.
    pub meshes: ComponentStore<Mesh>,
}

impl GameWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity with no components.
    pub fn spawn(&mut self) -> EntityId {
        self.allocator.allocate()
    }

    /// Returns `true` if `entity` is currently alive.
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Number of currently alive entities.
    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Despawn an entity, detaching it from every component store.
    ///
    /// Returns [`EcsError::StaleEntity`] if the handle is stale or was never
    /// allocated.
    pub fn despawn(&mut self, entity: EntityId) -> Result<(), EcsError> {
        if !self.allocator.deallocate(entity) {
            return Err(EcsError::StaleEntity { entity });
        }
        self.remove_all_components_of(entity);
        Ok(())
    }

    /// Detach `entity` from every component store without touching the
    /// allocator. [`despawn`](Self::despawn) runs this as its sweep; hosts
    /// can call it directly to strip a live entity bare.
    pub fn remove_all_components_of(&mut self, entity: EntityId) {
        self.positions.remove(entity);
        self.velocities.remove(entity);
        self.collidables.remove(entity);
        self.terrain.remove(entity);
        self.exit_doors.remove(entity);
        self.players.remove(entity);
        self.life_orbs.remove(entity);
        self.shadows.remove(entity);
        self.followers.remove(entity);
        self.secondary_followers.remove(entity);
        self.death_timers.remove(entity);
        self.meshes.remove(entity);
    }

    // -- scene queries ------------------------------------------------------

    /// The player entity, if one exists (first by insertion order).
    pub fn player(&self) -> Option<EntityId> {
        self.players.entities().first().copied()
    }

    /// The shadow-casting light source: the first life-orb light if one
    /// exists, else the player.
    pub fn light_source(&self) -> Option<EntityId> {
        self.life_orbs
            .entities()
            .first()
            .copied()
            .or_else(|| self.player())
    }

    /// Spawn a shadow entity attached to `owner`, mirroring the owner's
    /// footprint. The shadow's transform is recomputed every step, so its
    /// initial position is just the owner's.
    ///
    /// Returns `None` if the owner has no [`Position`].
    pub fn spawn_shadow(&mut self, owner: EntityId) -> Option<EntityId> {
        let owner_pos = self.positions.get(owner)?.clone();
        let entity = self.spawn();
        self.positions.insert(
            entity,
            Position::new(owner_pos.position, owner_pos.scale),
        );
        self.shadows.insert(
            entity,
            Shadow {
                owner,
                active: true,
                original_size: owner_pos.scale.abs(),
            },
        );
        Some(entity)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
