//! Broad-phase collision filtering: pair exclusion rules and the AABB
//! overlap test.
//!
//! The broad phase is a linear pairwise scan (i < j over the collidable
//! store's insertion order, driven by [`crate::step`]). This module supplies
//! the two predicates that scan applies to each pair: the domain exclusion
//! rule and the axis-aligned bounding-box overlap test. Rotation is ignored;
//! the box extents come straight from the scale magnitude.

use crate::components::Position;
use crate::world::GameWorld;
use umbra_ecs::entity::EntityId;

/// Domain-specific pair exclusion.
///
/// A pair is ignored when both entities are non-moveable terrain (static
/// geometry never needs mutual collision), or when one is terrain of any
/// kind and the other is an exit door (doors are not blocked by walls).
pub fn should_ignore(world: &GameWorld, a: EntityId, b: EntityId) -> bool {
    if world.terrain.has(a) && world.terrain.has(b) {
        let a_moveable = world.terrain.get(a).map(|t| t.moveable).unwrap_or(false);
        let b_moveable = world.terrain.get(b).map(|t| t.moveable).unwrap_or(false);
        return !(a_moveable || b_moveable);
    }
    if (world.terrain.has(a) && world.exit_doors.has(b))
        || (world.exit_doors.has(a) && world.terrain.has(b))
    {
        return true;
    }
    false
}

/// Axis-aligned bounding-box overlap test.
///
/// Extents are `position +/- |scale| / 2`; comparisons are inclusive, so
/// exactly touching boxes count as overlapping and proceed to narrow-phase
/// (which rejects endpoint grazes on its own).
pub fn aabb_overlaps(a: &Position, b: &Position) -> bool {
    let a_half = a.bounding_box() / 2.0;
    let b_half = b.bounding_box() / 2.0;

    let a_left = a.position.x - a_half.x;
    let a_right = a.position.x + a_half.x;
    let a_top = a.position.y - a_half.y;
    let a_bottom = a.position.y + a_half.y;
    let b_left = b.position.x - b_half.x;
    let b_right = b.position.x + b_half.x;
    let b_top = b.position.y - b_half.y;
    let b_bottom = b.position.y + b_half.y;

    a_left <= b_right && a_right >= b_left && a_bottom >= b_top && a_top <= b_bottom
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
