//! Scene setup system
//!
//! Spawns the camera, lights, the crystal dice box and the dice themselves,
//! plus the results text overlay.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::roller::meshes::{create_d6, DIE_SIZE};
use crate::roller::textures::PipTextureCache;
use crate::roller::types::*;

/// Half extent of the box floor in X and Z
pub const BOX_HALF: f32 = 2.0;
pub const WALL_HEIGHT: f32 = 1.5;
pub const WALL_THICKNESS: f32 = 0.15;

/// Edge length of the pip quad glued onto each face
const PIP_QUAD_SIZE: f32 = 0.42;

/// Main setup system - initializes the entire 3D scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut pip_cache: ResMut<PipTextureCache>,
    style: Res<DiceStyle>,
    zoom_state: Res<ZoomState>,
) {
    // Camera - distance from zoom state, looking at the box center
    let camera_distance = zoom_state.get_distance();
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, camera_distance * 0.7, camera_distance * 0.7)
            .looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    // Light
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    // Crystal/glass material for the walls
    let crystal_mat = materials.add(StandardMaterial {
        base_color: Color::srgba(0.7, 0.85, 0.95, 0.3),
        alpha_mode: AlphaMode::Blend,
        reflectance: 0.8,
        perceptual_roughness: 0.1,
        metallic: 0.0,
        ..default()
    });

    // Floor - receives the fetched backdrop texture once it arrives
    let floor_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.12, 0.32, 0.16),
        perceptual_roughness: 0.9,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(BOX_HALF * 2.0, 0.3, BOX_HALF * 2.0))),
        MeshMaterial3d(floor_mat),
        Transform::from_xyz(0.0, -0.15, 0.0),
        Collider::cuboid(BOX_HALF, 0.15, BOX_HALF),
        RigidBody::Fixed,
        Restitution::coefficient(0.2),
        Friction::coefficient(0.8),
        DiceBox,
        TableSurface,
    ));

    // Walls - tall enough that thrown dice stay contained
    for (pos, size) in [
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, -BOX_HALF),
            Vec3::new(
                BOX_HALF * 2.0 + WALL_THICKNESS * 2.0,
                WALL_HEIGHT,
                WALL_THICKNESS,
            ),
        ),
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, BOX_HALF),
            Vec3::new(
                BOX_HALF * 2.0 + WALL_THICKNESS * 2.0,
                WALL_HEIGHT,
                WALL_THICKNESS,
            ),
        ),
        (
            Vec3::new(-BOX_HALF, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, BOX_HALF * 2.0),
        ),
        (
            Vec3::new(BOX_HALF, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, BOX_HALF * 2.0),
        ),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(crystal_mat.clone()),
            Transform::from_translation(pos),
            Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
            RigidBody::Fixed,
            Restitution::coefficient(0.2),
            Friction::coefficient(0.8),
            DiceBox,
        ));
    }

    // Invisible ceiling to keep dice from bouncing out
    commands.spawn((
        Collider::cuboid(BOX_HALF + 0.5, 0.2, BOX_HALF + 0.5),
        Transform::from_xyz(0.0, WALL_HEIGHT - 0.1, 0.0),
        RigidBody::Fixed,
        Restitution::coefficient(0.05),
        Friction::coefficient(0.3),
        DiceBox,
    ));

    // Dice
    for i in 0..style.count {
        let position = calculate_dice_position(i, style.count);
        spawn_die(
            &mut commands,
            &mut meshes,
            &mut materials,
            &mut images,
            &mut pip_cache,
            &style,
            position,
        );
    }

    // Results text in the top-left corner
    commands.spawn((
        Text::new("Click or tap to roll | A/D orbit, W/S zoom, R reset"),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            max_width: Val::Px(420.0),
            ..default()
        },
        ResultsText,
    ));
}

/// Calculate the spawn position for a die based on its index
pub fn calculate_dice_position(index: usize, total: usize) -> Vec3 {
    let cols = ((total as f32).sqrt().ceil() as usize).max(1);
    let rows = (total + cols - 1) / cols;
    let row = index / cols;
    let col = index % cols;

    // Shrink spacing for large counts so the grid stays clear of the walls.
    let usable = 2.0 * (BOX_HALF - DIE_SIZE);
    let span = (cols.max(rows) - 1).max(1) as f32;
    let spacing = (usable / span).min(0.8);

    let start_x = -((cols - 1) as f32 * spacing) / 2.0;
    let start_z = -((rows - 1) as f32 * spacing) / 2.0;

    Vec3::new(
        start_x + col as f32 * spacing,
        1.0, // inside the box, below the ceiling
        start_z + row as f32 * spacing,
    )
}

/// Spawn a single die with physics and pip-textured face quads
pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    images: &mut ResMut<Assets<Image>>,
    pip_cache: &mut ResMut<PipTextureCache>,
    style: &DiceStyle,
    position: Vec3,
) {
    let (mesh, collider, assignment) = create_d6();

    let die_material = materials.add(StandardMaterial {
        base_color: style.die_color,
        perceptual_roughness: 0.35,
        reflectance: 0.6,
        ..default()
    });

    let mut rng = rand::thread_rng();
    let start_rotation = Quat::from_euler(
        EulerRot::XYZ,
        rng.gen_range(0.0..std::f32::consts::TAU),
        rng.gen_range(0.0..std::f32::consts::TAU),
        rng.gen_range(0.0..std::f32::consts::TAU),
    );

    let pip_quad = meshes.add(Rectangle::new(PIP_QUAD_SIZE, PIP_QUAD_SIZE));
    let faces = *assignment.faces();

    commands
        .spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(die_material),
            Transform::from_translation(position).with_rotation(start_rotation),
            RigidBody::Dynamic,
            collider,
            Velocity::zero(),
            ExternalImpulse::default(),
            Restitution::coefficient(0.15),
            Friction::coefficient(0.7),
            ColliderMassProperties::Density(1.5),
            Die { assignment },
        ))
        .with_children(|parent| {
            for (normal, value) in faces {
                let texture =
                    pip_cache.get_or_create(value, style.pip_color, style.die_color, images);
                let face_material = materials.add(StandardMaterial {
                    base_color: Color::WHITE,
                    base_color_texture: Some(texture),
                    perceptual_roughness: 0.6,
                    ..default()
                });

                parent.spawn((
                    Mesh3d(pip_quad.clone()),
                    MeshMaterial3d(face_material),
                    Transform::from_translation(normal * (DIE_SIZE / 2.0 + 0.001))
                        .with_rotation(face_rotation(normal)),
                ));
            }
        });
}

/// Rotation aligning a pip quad (which faces +Z) with an outward face normal.
fn face_rotation(normal: Vec3) -> Quat {
    // The Y faces hit the degenerate case of from_rotation_arc, so handle
    // them explicitly.
    if normal.y.abs() > 0.99 {
        if normal.y > 0.0 {
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)
        } else {
            Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)
        }
    } else {
        Quat::from_rotation_arc(Vec3::Z, normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_positions_inside_box() {
        for total in 1..=40 {
            for i in 0..total {
                let pos = calculate_dice_position(i, total);
                assert!(
                    pos.x.abs() <= BOX_HALF - DIE_SIZE + 1e-4,
                    "x too close to wall for {} dice: {:?}",
                    total,
                    pos
                );
                assert!(
                    pos.z.abs() <= BOX_HALF - DIE_SIZE + 1e-4,
                    "z too close to wall for {} dice: {:?}",
                    total,
                    pos
                );
                assert!(pos.y > 0.0 && pos.y < WALL_HEIGHT);
            }
        }
    }

    #[test]
    fn test_dice_grid_spacing_shrinks_for_large_counts() {
        // Two dice keep the comfortable default gap.
        let gap = (calculate_dice_position(1, 2) - calculate_dice_position(0, 2)).length();
        assert!((gap - 0.8).abs() < 1e-4);

        // Thirty dice pack tighter instead of spilling past the walls.
        let gap = (calculate_dice_position(1, 30) - calculate_dice_position(0, 30)).length();
        assert!(gap < 0.8);
        assert!(gap > DIE_SIZE * 0.5);
    }

    #[test]
    fn test_face_rotation_points_quad_along_normal() {
        for normal in [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ] {
            let rotated = face_rotation(normal) * Vec3::Z;
            assert!(
                (rotated - normal).length() < 1e-5,
                "quad for {:?} faces {:?}",
                normal,
                rotated
            );
        }
    }
}
