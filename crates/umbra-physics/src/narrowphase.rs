//! Narrow-phase collision resolution: polygon-edge intersection producing a
//! penetration displacement vector per colliding pair.
//!
//! For a candidate pair (A, B) the test runs two passes, A-against-B then
//! B-against-A. In each pass, every vertex of "this" entity is transformed to
//! world space by its own position (`position + vertex * scale`, rotation
//! ignored -- a known simplification), and the segment from this entity's
//! center to that vertex is intersected against every edge of the other
//! polygon. The displacements of all edges the segment crosses are
//! accumulated as `(1 - t) * (vertex - center)`, where `t` is the
//! intersection parameter along the center-to-vertex segment.
//!
//! Resolution stops at the first vertex that produces any intersection; it is
//! not a minimum-penetration search. Ties fall to iteration order (vertex
//! index, then edge index), which makes resolution depth under complex
//! overlaps order-dependent. That is the shipped behavior, retained exactly;
//! see DESIGN.md before treating it as load-bearing.

use glam::Vec2;
use tracing::trace;
use umbra_ecs::entity::EntityId;

use crate::components::{CollisionEvent, Position};
use crate::world::GameWorld;
use crate::PhysicsError;

/// Transform a local mesh vertex into world space by an entity's position.
/// Rotation is intentionally not applied.
#[inline]
fn world_transform(vertex: Vec2, position: &Position) -> Vec2 {
    vertex * position.scale + position.position
}

/// Parametric segment-segment intersection.
///
/// Returns `Some(t)` when the probe segment (center to vertex) crosses the
/// edge, where `t` is the parameter along the probe. Both parameters are
/// half-open (`[0, 1)`), so a probe that only grazes an endpoint does not
/// count. Parallel segments divide by zero into NaN, which fails every
/// comparison and is correctly rejected.
#[inline]
fn segment_intersection(
    probe_start: Vec2,
    probe_end: Vec2,
    edge_start: Vec2,
    edge_end: Vec2,
) -> Option<f32> {
    let h = (edge_end.x - edge_start.x) * (probe_start.y - probe_end.y)
        - (probe_start.x - probe_end.x) * (edge_end.y - edge_start.y);
    let t = ((edge_start.y - edge_end.y) * (probe_start.x - edge_start.x)
        + (edge_end.x - edge_start.x) * (probe_start.y - edge_start.y))
        / h;
    let r = ((probe_start.y - probe_end.y) * (probe_start.x - edge_start.x)
        + (probe_end.x - probe_start.x) * (probe_start.y - edge_start.y))
        / h;
    if (0.0..1.0).contains(&t) && (0.0..1.0).contains(&r) {
        Some(t)
    } else {
        None
    }
}

/// Resolve a broad-phase candidate pair, appending a pair of directed
/// [`CollisionEvent`]s to `events` if the polygons intersect.
///
/// Sign convention: in the first pass entity `a` is the penetrating object,
/// so `a`'s recorded displacement is negated (pulling `a` back out of `b`)
/// and `b` receives the raw vector; the second pass mirrors this.
///
/// # Errors
///
/// [`PhysicsError::MissingMesh`] if either entity lacks a mesh outline, and
/// [`PhysicsError::MissingPosition`] if either lacks a position. Both are
/// checked at the boundary before any vertex math.
pub fn resolve_pair(
    world: &GameWorld,
    a: EntityId,
    b: EntityId,
    events: &mut Vec<CollisionEvent>,
) -> Result<(), PhysicsError> {
    for &entity in &[a, b] {
        if !world.meshes.has(entity) {
            return Err(PhysicsError::MissingMesh { entity });
        }
        if !world.positions.has(entity) {
            return Err(PhysicsError::MissingPosition { entity });
        }
    }

    for obj in 0..2 {
        let (this, other) = if obj == 0 { (a, b) } else { (b, a) };

        // Presence was checked above; a despawn cannot happen mid-pair.
        let Some(this_mesh) = world.meshes.get(this) else {
            continue;
        };
        let Some(other_mesh) = world.meshes.get(other) else {
            continue;
        };
        let Some(this_pos) = world.positions.get(this) else {
            continue;
        };
        let Some(other_pos) = world.positions.get(other) else {
            continue;
        };

        for vertex in &this_mesh.vertices {
            let probe_start = this_pos.position;
            let probe_end = world_transform(*vertex, this_pos);

            let mut displacement = Vec2::ZERO;
            let mut hit = false;

            let n = other_mesh.vertices.len();
            for j in 0..n {
                let edge_start = world_transform(other_mesh.vertices[j], other_pos);
                let edge_end = world_transform(other_mesh.vertices[(j + 1) % n], other_pos);

                if let Some(t) = segment_intersection(probe_start, probe_end, edge_start, edge_end)
                {
                    displacement += (1.0 - t) * (probe_end - probe_start);
                    hit = true;
                }
            }

            if hit {
                trace!(
                    entity_a = %a,
                    entity_b = %b,
                    pass = obj,
                    dx = displacement.x,
                    dy = displacement.y,
                    "narrow-phase contact"
                );
                // The penetrating object is pulled back; the other is pushed
                // away. `a` penetrates in pass 0, `b` in pass 1.
                let a_displacement = if obj == 0 { -displacement } else { displacement };
                events.push(CollisionEvent {
                    entity: a,
                    other: b,
                    displacement: a_displacement,
                });
                events.push(CollisionEvent {
                    entity: b,
                    other: a,
                    displacement: -a_displacement,
                });
                return Ok(());
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
