//! Follower position correction: snap dependent entities onto their owner.
//!
//! Runs strictly after narrow-phase, as position *correction* rather than
//! simulation -- followers have no velocity and take no part in collision
//! response. Two priority tiers: every [`Follower`](crate::components::Follower)
//! resolves before any [`SecondaryFollower`](crate::components::SecondaryFollower),
//! so a dependent-of-dependent (an icon on a health bar on an enemy) sees the
//! already-corrected primary attachment point. The tiers never interleave.

use glam::Vec2;

use crate::world::GameWorld;

/// Snap all followers (first tier, then second tier) onto
/// `owner.position + offset`.
///
/// A follower whose owner lacks a position, or which lacks a position
/// itself, is skipped -- an expected absence, not an error.
pub fn correct_followers(world: &mut GameWorld) {
    // Tier 1.
    let corrections: Vec<_> = world
        .followers
        .iter()
        .map(|(entity, f)| (entity, f.owner, Vec2::new(f.x_offset, f.y_offset)))
        .collect();
    apply_corrections(world, &corrections);

    // Tier 2, strictly after every tier-1 snap.
    let corrections: Vec<_> = world
        .secondary_followers
        .iter()
        .map(|(entity, f)| (entity, f.owner, Vec2::new(f.x_offset, f.y_offset)))
        .collect();
    apply_corrections(world, &corrections);
}

fn apply_corrections(
    world: &mut GameWorld,
    corrections: &[(umbra_ecs::entity::EntityId, umbra_ecs::entity::EntityId, Vec2)],
) {
    for &(entity, owner, offset) in corrections {
        let Some(owner_position) = world.positions.get(owner).map(|p| p.position) else {
            continue;
        };
        if let Some(pos) = world.positions.get_mut(entity) {
            pos.position = owner_position + offset;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
