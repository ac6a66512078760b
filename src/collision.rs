//! Contact detection and resolution: merges between particles, absorption
//! into the anchor.
//!
//! One scan over unordered pairs in arena order. Handles marked for removal
//! are collected in a set and applied as a single batch afterwards, so the
//! scan never observes a half-filtered arena.
//!
//! Contact is a plain radius-sum test at the post-move positions. Fast bodies
//! can pass through each other between ticks without touching.

use std::collections::HashSet;

use crate::body::BodyId;
use crate::state::BodySet;

/// One particle-particle merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub survivor: BodyId,
    pub absorbed: BodyId,
    /// Survivor mass after the merge.
    pub mass: f64,
}

/// Everything the collision pass did during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub merges: Vec<MergeEvent>,
    /// Particles removed on contact with the anchor.
    pub absorbed_by_anchor: Vec<BodyId>,
}

impl CollisionReport {
    pub fn removed_count(&self) -> usize {
        self.merges.len() + self.absorbed_by_anchor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merges.is_empty() && self.absorbed_by_anchor.is_empty()
    }
}

/// Detects and resolves every contact among the bodies in `set`.
///
/// - A particle touching the anchor is removed; the anchor is unchanged.
/// - Two touching particles merge into the heavier one (the earlier one on a
///   tie). The survivor's updated mass and radius apply to the rest of the scan.
pub fn resolve_collisions(set: &mut BodySet) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut removed: HashSet<BodyId> = HashSet::new();
    let n = set.len();

    for i in 0..n {
        if removed.contains(&set.bodies()[i].id) {
            continue;
        }
        for j in (i + 1)..n {
            let bodies = set.bodies();
            let (a, b) = (&bodies[i], &bodies[j]);
            if removed.contains(&b.id) || !a.overlaps(b) {
                continue;
            }

            if a.is_anchor || b.is_anchor {
                let victim = if a.is_anchor { b.id } else { a.id };
                removed.insert(victim);
                report.absorbed_by_anchor.push(victim);
                if victim == a.id {
                    break;
                }
                continue;
            }

            let (survivor, absorbed) = if a.mass >= b.mass { (i, j) } else { (j, i) };
            set.merge_at(survivor, absorbed);

            let bodies = set.bodies();
            let event = MergeEvent {
                survivor: bodies[survivor].id,
                absorbed: bodies[absorbed].id,
                mass: bodies[survivor].mass,
            };
            removed.insert(event.absorbed);
            report.merges.push(event);

            if absorbed == i {
                break;
            }
        }
    }

    set.remove(&removed);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COLOR_SUN;
    use bevy::math::DVec2;

    fn sun_far_away() -> BodySet {
        BodySet::with_anchor(DVec2::new(-10_000.0, 0.0), 1000.0, 20.0, COLOR_SUN, 10)
    }

    #[test]
    fn separated_bodies_do_not_collide() {
        let mut set = sun_far_away();
        set.spawn(DVec2::new(0.0, 0.0), DVec2::ZERO, 1.0);
        set.spawn(DVec2::new(4.0, 0.0), DVec2::ZERO, 1.0);
        // radii 2 + 2 == distance 4: contact requires strictly less
        let report = resolve_collisions(&mut set);
        assert!(report.is_empty());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn heavier_body_survives_merge() {
        let mut set = sun_far_away();
        let light = set.spawn(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), 2.0);
        let heavy = set.spawn(DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0), 6.0);

        let report = resolve_collisions(&mut set);

        assert_eq!(
            report.merges,
            vec![MergeEvent {
                survivor: heavy,
                absorbed: light,
                mass: 8.0
            }]
        );
        assert!(set.get(light).is_none());
        let survivor = set.get(heavy).unwrap();
        assert!((survivor.velocity - DVec2::new(0.25, 0.75)).length() < 1e-12);
    }

    #[test]
    fn merge_appends_absorbed_trail_and_keeps_the_newest_points() {
        // sun_far_away() trails hold 10 points
        let mut set = sun_far_away();
        let light = set.spawn(DVec2::new(0.0, 0.0), DVec2::ZERO, 2.0);
        let heavy = set.spawn(DVec2::new(1.0, 0.0), DVec2::ZERO, 6.0);

        let heavy_points: Vec<DVec2> = (0..7).map(|i| DVec2::new(i as f64, 100.0)).collect();
        let light_points: Vec<DVec2> = (0..6).map(|i| DVec2::new(i as f64, -100.0)).collect();
        for body in set.bodies_mut() {
            let points = if body.id == heavy {
                &heavy_points
            } else if body.id == light {
                &light_points
            } else {
                continue;
            };
            for &p in points {
                body.trail.push(p);
            }
        }

        resolve_collisions(&mut set);

        let expected: Vec<DVec2> = heavy_points[3..]
            .iter()
            .chain(light_points.iter())
            .copied()
            .collect();
        let trail: Vec<DVec2> = set.get(heavy).unwrap().trail.iter().collect();
        assert_eq!(trail, expected);
    }

    #[test]
    fn equal_masses_keep_the_earlier_body() {
        let mut set = sun_far_away();
        let first = set.spawn(DVec2::new(0.0, 0.0), DVec2::ZERO, 3.0);
        let second = set.spawn(DVec2::new(1.0, 0.0), DVec2::ZERO, 3.0);
        let report = resolve_collisions(&mut set);
        assert_eq!(report.merges[0].survivor, first);
        assert_eq!(report.merges[0].absorbed, second);
    }

    #[test]
    fn anchor_contact_removes_particle_and_leaves_anchor_alone() {
        let mut set = BodySet::with_anchor(DVec2::ZERO, 500.0, 20.0, COLOR_SUN, 10);
        let p = set.spawn(DVec2::new(5.0, 0.0), DVec2::new(3.0, 3.0), 9.0);

        let report = resolve_collisions(&mut set);

        assert_eq!(report.absorbed_by_anchor, vec![p]);
        assert!(report.merges.is_empty());
        assert_eq!(set.len(), 1);
        assert_eq!(set.anchor().mass, 500.0);
        assert_eq!(set.anchor().velocity, DVec2::ZERO);
    }

    #[test]
    fn absorbed_body_is_not_reconsidered_in_the_same_pass() {
        let mut set = sun_far_away();
        // a absorbs b; b also overlaps c but must not merge with it afterwards
        let a = set.spawn(DVec2::new(0.0, 0.0), DVec2::ZERO, 8.0);
        let b = set.spawn(DVec2::new(3.0, 0.0), DVec2::ZERO, 1.0);
        let c = set.spawn(DVec2::new(6.5, 0.0), DVec2::ZERO, 1.0);

        let report = resolve_collisions(&mut set);

        assert_eq!(report.merges.len(), 1);
        assert_eq!(report.merges[0].absorbed, b);
        assert!(set.get(a).is_some());
        assert!(set.get(c).is_some());
    }

    #[test]
    fn outer_body_absorbed_stops_its_scan() {
        let mut set = sun_far_away();
        let small = set.spawn(DVec2::new(0.0, 0.0), DVec2::ZERO, 1.0);
        let big = set.spawn(DVec2::new(2.0, 0.0), DVec2::ZERO, 9.0);
        // within reach of `small` only
        let other = set.spawn(DVec2::new(-3.0, 0.0), DVec2::ZERO, 1.0);

        let report = resolve_collisions(&mut set);

        assert_eq!(report.merges.len(), 1);
        assert_eq!(report.merges[0].survivor, big);
        assert_eq!(report.merges[0].absorbed, small);
        assert!(set.get(other).is_some());
    }

    #[test]
    fn grown_survivor_can_merge_again_in_the_same_pass() {
        let mut set = sun_far_away();
        let a = set.spawn(DVec2::new(0.0, 0.0), DVec2::ZERO, 15.0);
        set.spawn(DVec2::new(4.0, 0.0), DVec2::ZERO, 10.0);
        // out of reach of a at radius 3, inside reach once a grows to mass 25 (radius 5)
        let c = set.spawn(DVec2::new(6.5, 0.0), DVec2::ZERO, 1.0);

        let report = resolve_collisions(&mut set);

        assert_eq!(report.merges.len(), 2);
        assert_eq!(report.merges[1].absorbed, c);
        assert_eq!(set.get(a).unwrap().mass, 26.0);
        assert_eq!(set.len(), 2);
    }
}
