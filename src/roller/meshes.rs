//! Die mesh and collider construction

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::roller::resolver::FaceAssignment;

/// Edge length of a d6 in world units
pub const DIE_SIZE: f32 = 0.6;

/// Build the cube mesh, matching collider and face assignment for one d6.
pub fn create_d6() -> (Mesh, Collider, FaceAssignment) {
    let mesh = Mesh::from(Cuboid::new(DIE_SIZE, DIE_SIZE, DIE_SIZE));
    let collider = Collider::cuboid(DIE_SIZE / 2.0, DIE_SIZE / 2.0, DIE_SIZE / 2.0);

    (mesh, collider, FaceAssignment::standard())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d6_assignment_is_standard() {
        let (_, _, assignment) = create_d6();
        assert_eq!(assignment, FaceAssignment::standard());
    }
}
