//! Component types consumed and produced by the physics step.
//!
//! These are plain data records. They own no behavior beyond small accessors;
//! the step functions in [`crate::step`] and its pass modules do all the work.
//! Every component is serde-serializable so hosts can save and restore scene
//! state.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use umbra_ecs::entity::EntityId;

// ---------------------------------------------------------------------------
// Transform state
// ---------------------------------------------------------------------------

/// Per-entity transform state.
///
/// `scale` doubles as the entity's visual footprint; a negative component
/// encodes facing/mirroring, so bounding-box math must use the magnitude
/// (see [`Position::bounding_box`]). `prev_position` is written once per
/// integration step, before the position advances, and is readable history
/// for any consumer (interpolation, overlap rollback).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// World-space position of the entity's center.
    pub position: Vec2,
    /// Orientation in radians.
    pub angle: f32,
    /// Footprint size; sign of each component encodes mirroring.
    pub scale: Vec2,
    /// Where the entity was before the last integration step.
    pub prev_position: Vec2,
}

impl Position {
    /// Construct a position with the given center and footprint, no rotation.
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self {
            position,
            angle: 0.0,
            scale,
            prev_position: position,
        }
    }

    /// The local bounding box extents: scale magnitude, ignoring mirroring.
    pub fn bounding_box(&self) -> Vec2 {
        self.scale.abs()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            scale: Vec2::new(10.0, 10.0),
            prev_position: Vec2::ZERO,
        }
    }
}

/// Per-entity velocity in units per second. Written by gameplay systems,
/// read-only inside the physics step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Linear velocity vector.
    pub velocity: Vec2,
}

impl Velocity {
    /// Construct a velocity from components.
    pub fn new(dx: f32, dy: f32) -> Self {
        Self {
            velocity: Vec2::new(dx, dy),
        }
    }
}

// ---------------------------------------------------------------------------
// Collision markers
// ---------------------------------------------------------------------------

/// Marker: consider this entity for pairwise collision scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collidable;

/// Level geometry marker. `moveable` distinguishes pushable obstacles from
/// static walls; two non-moveable terrain entities are never tested against
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Terrain {
    /// Whether this terrain piece can be displaced by collisions.
    pub moveable: bool,
}

/// Marker: level-exit entity. Doors are not blocked by walls, so
/// terrain-door pairs are excluded from collision consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExitDoor;

// ---------------------------------------------------------------------------
// Scene singletons
// ---------------------------------------------------------------------------

/// Marker: the player character. The scene is expected to hold exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Player;

/// Marker: a life-orb light. When present, it takes precedence over the
/// player as the shadow-casting light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifeOrb;

/// A timer attached to a dying entity. While any entity holds one, the whole
/// physics step is skipped (global freeze-frame on death).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathTimer {
    /// Remaining freeze duration in milliseconds.
    pub timer_ms: f32,
}

impl Default for DeathTimer {
    fn default() -> Self {
        Self { timer_ms: 2700.0 }
    }
}

// ---------------------------------------------------------------------------
// Dependent entities
// ---------------------------------------------------------------------------

/// A shadow cast by `owner`. The shadow entity's own [`Position`] is
/// recomputed every frame from the owner and the light source; it is never
/// independently simulated. `owner` is a non-owning handle -- if the owner
/// despawns, the shadow destroys itself on the next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// The entity this shadow is cast by.
    pub owner: EntityId,
    /// Advisory flag for the renderer: false when the shadow is farther than
    /// the light radius from the light source.
    pub active: bool,
    /// Footprint of the shadow sprite before distance falloff scaling.
    pub original_size: Vec2,
}

/// First-tier dependent entity: snapped onto `owner.position + offset` after
/// physics settles. All followers resolve before any
/// [`SecondaryFollower`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follower {
    /// The entity this follower is attached to.
    pub owner: EntityId,
    /// Horizontal attachment offset.
    pub x_offset: f32,
    /// Vertical attachment offset.
    pub y_offset: f32,
}

/// Second-tier dependent entity, resolved strictly after every [`Follower`]
/// so a dependent-of-dependent sees the already-corrected attachment point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryFollower {
    /// The entity this follower is attached to (typically itself a follower).
    pub owner: EntityId,
    /// Horizontal attachment offset.
    pub x_offset: f32,
    /// Vertical attachment offset.
    pub y_offset: f32,
}

// ---------------------------------------------------------------------------
// Mesh geometry
// ---------------------------------------------------------------------------

/// Polygon outline of an entity's visual footprint, in local/untransformed
/// coordinates. Required on any entity that can reach narrow-phase
/// resolution. `vertex_indices` carries the render topology and is unused by
/// the collision test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Extents of the vertex set before any scaling.
    pub original_size: Vec2,
    /// Polygon outline vertices, in order.
    pub vertices: Vec<Vec2>,
    /// Index topology for rendering.
    pub vertex_indices: Vec<u16>,
}

impl Mesh {
    /// Build a mesh from an ordered vertex outline, computing
    /// `original_size` as the bounding extents of the vertices.
    pub fn new(vertices: Vec<Vec2>, vertex_indices: Vec<u16>) -> Self {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in &vertices {
            min = min.min(*v);
            max = max.max(*v);
        }
        let original_size = if vertices.is_empty() {
            Vec2::ONE
        } else {
            max - min
        };
        Self {
            original_size,
            vertices,
            vertex_indices,
        }
    }

    /// A unit square outline centered on the origin (half-extent 0.5),
    /// counter-clockwise. Scaled to world size by the entity's
    /// [`Position::scale`].
    pub fn unit_square() -> Self {
        Self::new(
            vec![
                Vec2::new(-0.5, -0.5),
                Vec2::new(0.5, -0.5),
                Vec2::new(0.5, 0.5),
                Vec2::new(-0.5, 0.5),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }
}

// ---------------------------------------------------------------------------
// Collision events
// ---------------------------------------------------------------------------

/// A directed collision record emitted by narrow-phase resolution.
///
/// Events are a per-step multiset: both directions of a colliding pair are
/// recorded separately, and an entity contacting several others in one frame
/// appears several times. `displacement` is the accumulated push-out vector
/// for `entity` (already sign-adjusted for direction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionEvent {
    /// The entity this record belongs to.
    pub entity: EntityId,
    /// The other entity involved in the contact.
    pub other: EntityId,
    /// Displacement that separates `entity` from `other`.
    pub displacement: Vec2,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
