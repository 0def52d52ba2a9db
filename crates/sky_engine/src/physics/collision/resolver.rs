//! Collision response for the player capsule
//!
//! Classifies the combined contact as floor or wall, slides the velocity
//! along walls, pushes the capsule out of penetration, and respawns a
//! capsule that fell out of the world.

use super::{Capsule, Contact};
use crate::foundation::math::Vec3;
use crate::spatial::Octree;

/// Outcome of one resolve pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// The capsule is supported by an upward-facing surface
    pub on_floor: bool,
    /// Combined contact that was resolved, if any
    pub contact: Option<Contact>,
    /// The capsule fell below the world and was reset to the spawn pose
    pub respawned: bool,
}

/// Resolves the player capsule against the static world
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    spawn: Capsule,
    fall_threshold: f32,
    floor_normal_threshold: f32,
}

impl CollisionResolver {
    /// Create a resolver
    ///
    /// * `spawn` - pose restored when the capsule falls out of the world
    /// * `fall_threshold` - height below which the lowest endpoint triggers a respawn
    /// * `floor_normal_threshold` - contacts whose normal has `y` above this count as floor
    pub fn new(spawn: Capsule, fall_threshold: f32, floor_normal_threshold: f32) -> Self {
        Self {
            spawn,
            fall_threshold,
            floor_normal_threshold,
        }
    }

    /// Spawn pose
    pub fn spawn(&self) -> &Capsule {
        &self.spawn
    }

    /// Respawn height
    pub fn fall_threshold(&self) -> f32 {
        self.fall_threshold
    }

    /// Whether a contact normal counts as ground support
    pub fn is_floor(&self, normal: &Vec3) -> bool {
        normal.y > self.floor_normal_threshold
    }

    /// Resolve the capsule in place and adjust the velocity
    ///
    /// With no contact the capsule is left untouched and `on_floor` is
    /// false; that is ordinary free fall.
    pub fn resolve(&self, capsule: &mut Capsule, velocity: &mut Vec3, world: &Octree) -> Resolution {
        let contact = world.capsule_intersect(capsule);
        let mut on_floor = false;

        if let Some(contact) = contact {
            on_floor = self.is_floor(&contact.normal);

            if !on_floor {
                let inward = contact.normal.dot(velocity);
                if inward < 0.0 {
                    *velocity -= contact.normal * inward;
                }
            }

            log::debug!(
                "Contact normal {:?} depth {:.4} floor {}",
                contact.normal,
                contact.depth,
                on_floor
            );
            capsule.translate(contact.correction());
        }

        let respawned = capsule.lowest_y() < self.fall_threshold;
        if respawned {
            log::warn!(
                "Player fell below {:.1} (at {:.1}), respawning",
                self.fall_threshold,
                capsule.lowest_y()
            );
            *capsule = self.spawn;
            velocity.y = 0.0;
            on_floor = false;
        }

        Resolution {
            on_floor,
            contact,
            respawned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::Triangle;
    use crate::spatial::OctreeConfig;
    use approx::assert_relative_eq;

    fn spawn() -> Capsule {
        Capsule::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 11.0, 0.0), 0.35).unwrap()
    }

    fn resolver() -> CollisionResolver {
        CollisionResolver::new(spawn(), -100.0, 0.0)
    }

    fn floor_world() -> Octree {
        Octree::build(
            vec![Triangle::new(
                Vec3::new(-1000.0, 0.0, -1000.0),
                Vec3::new(-1000.0, 0.0, 3000.0),
                Vec3::new(3000.0, 0.0, -1000.0),
            )],
            OctreeConfig::default(),
        )
    }

    /// Vertical wall in the plane x = 1 facing -X
    fn wall_world() -> Octree {
        Octree::build(
            vec![Triangle::new(
                Vec3::new(1.0, -50.0, -50.0),
                Vec3::new(1.0, -50.0, 150.0),
                Vec3::new(1.0, 150.0, -50.0),
            )],
            OctreeConfig::default(),
        )
    }

    #[test]
    fn test_empty_world_leaves_capsule_alone() {
        let world = Octree::empty();
        for y in [-50.0, 0.0, 0.1, 1000.0] {
            let mut capsule = Capsule::new(Vec3::new(3.0, y, -2.0), Vec3::new(3.0, y + 1.0, -2.0), 0.35).unwrap();
            let original = capsule;
            let mut velocity = Vec3::new(1.0, -2.0, 3.0);

            let resolution = resolver().resolve(&mut capsule, &mut velocity, &world);

            assert!(!resolution.on_floor);
            assert!(resolution.contact.is_none());
            assert_eq!(capsule, original);
            assert_eq!(velocity, Vec3::new(1.0, -2.0, 3.0));
        }
    }

    #[test]
    fn test_floor_contact_lifts_capsule() {
        let world = floor_world();
        let mut capsule = Capsule::new(Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.0, 1.2, 0.0), 0.35).unwrap();
        let mut velocity = Vec3::new(0.0, -5.0, 0.0);

        let resolution = resolver().resolve(&mut capsule, &mut velocity, &world);

        assert!(resolution.on_floor);
        assert_relative_eq!(capsule.start().y, 0.35, epsilon = 1e-6);
        // Floor contacts keep the velocity; ground damping bleeds it off
        assert_eq!(velocity, Vec3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn test_wall_contact_slides() {
        let world = wall_world();
        let mut capsule = Capsule::new(Vec3::new(0.8, 0.0, 0.0), Vec3::new(0.8, 1.0, 0.0), 0.35).unwrap();
        let mut velocity = Vec3::new(4.0, -1.0, 2.0);

        let resolution = resolver().resolve(&mut capsule, &mut velocity, &world);
        let contact = resolution.contact.unwrap();

        assert!(!resolution.on_floor);
        assert_relative_eq!(contact.normal, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
        assert!(velocity.dot(&contact.normal) >= 0.0);
        assert_relative_eq!(velocity, Vec3::new(0.0, -1.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(capsule.start().x, 0.65, epsilon = 1e-5);
    }

    #[test]
    fn test_wall_contact_keeps_outward_velocity() {
        let world = wall_world();
        let mut capsule = Capsule::new(Vec3::new(0.8, 0.0, 0.0), Vec3::new(0.8, 1.0, 0.0), 0.35).unwrap();
        let mut velocity = Vec3::new(-3.0, 0.0, 1.0);

        resolver().resolve(&mut capsule, &mut velocity, &world);
        assert_eq!(velocity, Vec3::new(-3.0, 0.0, 1.0));
    }

    #[test]
    fn test_respawn_below_fall_threshold() {
        let resolver = resolver();
        for world in [Octree::empty(), floor_world()] {
            for depth in [-100.5, -250.0, -10_000.0] {
                let mut capsule = Capsule::new(
                    Vec3::new(7.0, depth, 7.0),
                    Vec3::new(7.0, depth + 1.0, 7.0),
                    0.35,
                )
                .unwrap();
                let mut velocity = Vec3::new(2.0, -40.0, 1.0);

                let resolution = resolver.resolve(&mut capsule, &mut velocity, &world);

                assert!(resolution.respawned);
                assert!(!resolution.on_floor);
                assert_eq!(capsule, spawn());
                assert_eq!(velocity.y, 0.0);
                assert_eq!(velocity.x, 2.0);
            }
        }
    }

    #[test]
    fn test_floor_threshold_is_configurable() {
        let steep = CollisionResolver::new(spawn(), -100.0, 0.7);
        let slope = Vec3::new(0.8, 0.6, 0.0);

        assert!(resolver().is_floor(&slope));
        assert!(!steep.is_floor(&slope));
        assert!(!resolver().is_floor(&Vec3::new(1.0, 0.0, 0.0)));
    }
}
