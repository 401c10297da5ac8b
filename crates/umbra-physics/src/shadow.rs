//! Shadow projection: recompute each shadow entity's transform from its
//! owner and the scene's light source.
//!
//! Runs once per step, after integration. The light source is the first
//! life-orb light if one exists, else the player. A shadow whose owner has
//! despawned destroys itself (removed from every store and the allocator) --
//! that is the mechanism by which shadows self-clean. `active` is advisory
//! state for the renderer: false once the shadow drifts beyond the light
//! radius in normalized screen space.

use std::f32::consts::FRAC_PI_2;

use tracing::warn;
use umbra_ecs::entity::EntityId;

use crate::config::PhysicsConfig;
use crate::world::GameWorld;
use crate::PhysicsError;

/// Project every shadow in the world against the current light source.
///
/// # Errors
///
/// [`PhysicsError::MissingLightSource`] when shadows exist but the scene has
/// neither a positioned life orb nor a positioned player. Worlds without
/// shadows never resolve a light source at all.
pub fn project_shadows(world: &mut GameWorld, config: &PhysicsConfig) -> Result<(), PhysicsError> {
    if world.shadows.is_empty() {
        return Ok(());
    }

    let light_entity = world
        .light_source()
        .ok_or(PhysicsError::MissingLightSource)?;
    let light = world
        .positions
        .get(light_entity)
        .ok_or(PhysicsError::MissingLightSource)?
        .position;

    // Snapshot the entity list: self-destruction mutates the shadow store
    // mid-pass.
    let shadow_entities: Vec<EntityId> = world.shadows.entities().to_vec();

    for entity in shadow_entities {
        let Some(shadow) = world.shadows.get(entity) else {
            continue;
        };
        let owner = shadow.owner;

        let Some(owner_pos) = world.positions.get(owner).cloned() else {
            // Owner despawned: the shadow cleans itself up, allocator slot
            // included, so it stops counting as a live entity.
            warn!(shadow = %entity, owner = %owner, "shadow owner gone, destroying shadow");
            world.despawn(entity).ok();
            continue;
        };

        let Some(shadow_pos) = world.positions.get(entity).cloned() else {
            continue;
        };

        // Distance check uses the shadow's pre-snap position, normalized to
        // screen space.
        let normalized_dist = config
            .normalized(shadow_pos.position)
            .distance(config.normalized(light));
        let active = normalized_dist <= config.light_radius;
        if let Some(shadow) = world.shadows.get_mut(entity) {
            shadow.active = active;
        }

        // Snap to the owner and point directly away from the light.
        let mut position = owner_pos.position;
        let angle = (owner_pos.position.y - light.y).atan2(owner_pos.position.x - light.x)
            + FRAC_PI_2;

        // Linear falloff of scale with distance, elongated along y.
        let max_dist = config.max_shadow_distance();
        let dist = owner_pos.position.distance(light);
        let mut scale = owner_pos.scale * (max_dist - dist) / max_dist;
        scale.y *= 1.5;

        // Anchor the near edge to the owner's base: slide along the shadow's
        // own direction by half its height, plus half the owner's height
        // straight down.
        position.x += (angle - FRAC_PI_2).cos() * (scale.y / 2.0);
        position.y += owner_pos.scale.y / 2.0 + scale.y / 2.0 * (angle - FRAC_PI_2).sin();

        if let Some(pos) = world.positions.get_mut(entity) {
            pos.position = position;
            pos.angle = angle;
            pos.scale = scale;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LifeOrb, Player, Position};
    use glam::Vec2;

    fn world_with_player(at: Vec2) -> (GameWorld, EntityId) {
        let mut world = GameWorld::new();
        let player = world.spawn();
        world.players.insert(player, Player);
        world
            .positions
            .insert(player, Position::new(at, Vec2::new(50.0, 100.0)));
        (world, player)
    }

    #[test]
    fn empty_shadow_store_needs_no_light() {
        let mut world = GameWorld::new();
        let config = PhysicsConfig::default();
        // No player, no orb: fine as long as there are no shadows.
        assert!(project_shadows(&mut world, &config).is_ok());
    }

    #[test]
    fn missing_light_source_is_an_error() {
        let mut world = GameWorld::new();
        let owner = world.spawn();
        world
            .positions
            .insert(owner, Position::new(Vec2::ZERO, Vec2::splat(10.0)));
        world.spawn_shadow(owner).unwrap();

        let config = PhysicsConfig::default();
        assert!(matches!(
            project_shadows(&mut world, &config),
            Err(PhysicsError::MissingLightSource)
        ));
    }

    #[test]
    fn shadow_points_away_from_light() {
        let (mut world, player) = world_with_player(Vec2::new(600.0, 400.0));
        let owner = world.spawn();
        world
            .positions
            .insert(owner, Position::new(Vec2::new(700.0, 400.0), Vec2::splat(40.0)));
        let shadow = world.spawn_shadow(owner).unwrap();

        let config = PhysicsConfig::default();
        project_shadows(&mut world, &config).unwrap();

        // Owner is due east of the light, so the raw direction is 0 and the
        // shadow angle is rotated a quarter turn to stand upright.
        let pos = world.positions.get(shadow).unwrap();
        assert!((pos.angle - FRAC_PI_2).abs() < 1e-6);
        // Light source itself still where it was.
        assert_eq!(
            world.positions.get(player).unwrap().position,
            Vec2::new(600.0, 400.0)
        );
    }

    #[test]
    fn scale_falls_off_with_distance() {
        let (mut world, _player) = world_with_player(Vec2::new(0.0, 0.0));

        let near_owner = world.spawn();
        world
            .positions
            .insert(near_owner, Position::new(Vec2::new(50.0, 0.0), Vec2::splat(40.0)));
        let near = world.spawn_shadow(near_owner).unwrap();

        let far_owner = world.spawn();
        world
            .positions
            .insert(far_owner, Position::new(Vec2::new(500.0, 0.0), Vec2::splat(40.0)));
        let far = world.spawn_shadow(far_owner).unwrap();

        let config = PhysicsConfig::default();
        project_shadows(&mut world, &config).unwrap();

        let near_scale = world.positions.get(near).unwrap().scale.x.abs();
        let far_scale = world.positions.get(far).unwrap().scale.x.abs();
        assert!(
            near_scale > far_scale,
            "shadow scale must shrink with distance: near={near_scale}, far={far_scale}"
        );
    }

    #[test]
    fn y_scale_is_elongated() {
        let (mut world, _player) = world_with_player(Vec2::ZERO);
        let owner = world.spawn();
        world
            .positions
            .insert(owner, Position::new(Vec2::new(100.0, 0.0), Vec2::splat(40.0)));
        let shadow = world.spawn_shadow(owner).unwrap();

        let config = PhysicsConfig::default();
        project_shadows(&mut world, &config).unwrap();

        let scale = world.positions.get(shadow).unwrap().scale;
        assert!((scale.y / scale.x - 1.5).abs() < 1e-5);
    }

    #[test]
    fn distant_shadow_goes_inactive() {
        let (mut world, _player) = world_with_player(Vec2::ZERO);
        let owner = world.spawn();
        // Farther than 0.7 of the normalized screen from the light.
        world.positions.insert(
            owner,
            Position::new(Vec2::new(1150.0, 780.0), Vec2::splat(40.0)),
        );
        let shadow = world.spawn_shadow(owner).unwrap();

        let config = PhysicsConfig::default();
        project_shadows(&mut world, &config).unwrap();

        assert!(!world.shadows.get(shadow).unwrap().active);
    }

    #[test]
    fn nearby_shadow_stays_active() {
        let (mut world, _player) = world_with_player(Vec2::new(600.0, 400.0));
        let owner = world.spawn();
        world
            .positions
            .insert(owner, Position::new(Vec2::new(650.0, 400.0), Vec2::splat(40.0)));
        let shadow = world.spawn_shadow(owner).unwrap();

        let config = PhysicsConfig::default();
        project_shadows(&mut world, &config).unwrap();

        assert!(world.shadows.get(shadow).unwrap().active);
    }

    #[test]
    fn orphaned_shadow_destroys_itself() {
        let (mut world, _player) = world_with_player(Vec2::ZERO);
        let owner = world.spawn();
        world
            .positions
            .insert(owner, Position::new(Vec2::new(100.0, 100.0), Vec2::splat(40.0)));
        let shadow = world.spawn_shadow(owner).unwrap();

        world.despawn(owner).unwrap();

        let config = PhysicsConfig::default();
        project_shadows(&mut world, &config).unwrap();

        assert!(!world.shadows.has(shadow), "shadow record removed");
        assert!(!world.positions.has(shadow), "shadow position removed");
        assert!(!world.is_alive(shadow), "allocator slot freed");
    }

    #[test]
    fn life_orb_overrides_player_light() {
        let (mut world, _player) = world_with_player(Vec2::ZERO);
        let orb = world.spawn();
        world.life_orbs.insert(orb, LifeOrb);
        world
            .positions
            .insert(orb, Position::new(Vec2::new(200.0, 0.0), Vec2::splat(10.0)));

        let owner = world.spawn();
        world
            .positions
            .insert(owner, Position::new(Vec2::new(100.0, 0.0), Vec2::splat(40.0)));
        let shadow = world.spawn_shadow(owner).unwrap();

        let config = PhysicsConfig::default();
        project_shadows(&mut world, &config).unwrap();

        // Owner is west of the orb: raw direction is pi, shadow angle is
        // pi + pi/2. Were the player (at the origin, east side) the light,
        // the angle would be pi/2 instead.
        let angle = world.positions.get(shadow).unwrap().angle;
        assert!((angle - (std::f32::consts::PI + FRAC_PI_2)).abs() < 1e-5);
    }
}
