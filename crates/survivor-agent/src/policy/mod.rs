//! Guard and action library plus the prioritized tree built from it.
//!
//! Guards have the shape `(config, ctx, host, blackboard) -> bool` and actions
//! `(config, ctx, host, blackboard) -> BtStatus`. A fact that cannot be read
//! from the blackboard makes the leaf fail; it never panics.

pub mod actions;
pub mod conditions;
mod tree;

pub use tree::build_tree;

use survivor_nav::Vec2;

use crate::facts::{EnemyInfo, EnemyKind, ItemInfo, ItemKind};

/// The enemy to deal with first: the nearest runner, or the nearest enemy
/// when no runner is in view.
pub fn enemy_by_priority(from: Vec2, enemies: &[EnemyInfo]) -> Option<&EnemyInfo> {
    let nearest = |kind: Option<EnemyKind>| {
        enemies
            .iter()
            .filter(|e| kind.map_or(true, |k| e.kind == k))
            .min_by(|a, b| {
                from.distance_squared(a.location)
                    .total_cmp(&from.distance_squared(b.location))
            })
    };
    nearest(Some(EnemyKind::Runner)).or_else(|| nearest(None))
}

pub fn closest_item(from: Vec2, items: &[ItemInfo]) -> Option<&ItemInfo> {
    items.iter().min_by(|a, b| {
        from.distance_squared(a.location)
            .total_cmp(&from.distance_squared(b.location))
    })
}

pub fn closest_item_of_kind(from: Vec2, items: &[ItemInfo], kind: ItemKind) -> Option<&ItemInfo> {
    items.iter().filter(|i| i.kind == kind).min_by(|a, b| {
        from.distance_squared(a.location)
            .total_cmp(&from.distance_squared(b.location))
    })
}

/// Whether a ray from `origin` along `dir` passes through the circle.
///
/// Only hits in front of the origin count; grazing contact does not.
pub fn ray_hits_circle(origin: Vec2, dir: Vec2, center: Vec2, radius: f32) -> bool {
    let dir = dir.normalize_or_zero();
    if dir == Vec2::ZERO {
        return false;
    }
    let to_center = center - origin;
    let along = to_center.dot(dir);
    let closest_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq >= radius_sq {
        return false;
    }
    // Inside the circle already, or the circle lies ahead.
    to_center.length_squared() < radius_sq || along > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::EntityId;

    fn enemy(id: u64, kind: EnemyKind, x: f32) -> EnemyInfo {
        EnemyInfo {
            entity: EntityId(id),
            kind,
            location: Vec2::new(x, 0.0),
            linear_velocity: Vec2::ZERO,
            size: 1.0,
        }
    }

    #[test]
    fn runners_take_priority_over_closer_enemies() {
        let enemies = [
            enemy(1, EnemyKind::Normal, 2.0),
            enemy(2, EnemyKind::Runner, 9.0),
            enemy(3, EnemyKind::Runner, 6.0),
        ];
        let picked = enemy_by_priority(Vec2::ZERO, &enemies).map(|e| e.entity);
        assert_eq!(picked, Some(EntityId(3)));
    }

    #[test]
    fn nearest_enemy_without_runners() {
        let enemies = [enemy(1, EnemyKind::Heavy, 5.0), enemy(2, EnemyKind::Normal, -3.0)];
        let picked = enemy_by_priority(Vec2::ZERO, &enemies).map(|e| e.entity);
        assert_eq!(picked, Some(EntityId(2)));
        assert!(enemy_by_priority(Vec2::ZERO, &[]).is_none());
    }

    #[test]
    fn ray_circle_hits_ahead_only() {
        let center = Vec2::new(0.0, -10.0);
        assert!(ray_hits_circle(Vec2::ZERO, Vec2::new(0.0, -1.0), center, 1.0));
        assert!(!ray_hits_circle(Vec2::ZERO, Vec2::new(0.0, 1.0), center, 1.0));
        assert!(!ray_hits_circle(Vec2::ZERO, Vec2::new(1.0, 0.0), center, 1.0));
        // Tangent ray.
        assert!(!ray_hits_circle(Vec2::new(1.0, 0.0), Vec2::new(0.0, -1.0), center, 1.0));
    }
}
