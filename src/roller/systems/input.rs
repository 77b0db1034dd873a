//! Input handling and roll initiation
//!
//! A left click or touch start becomes a discrete RollRequested message; the
//! roll system consumes it and applies the throw to every die. R resets the
//! dice to rest on the floor without rolling.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::roller::types::*;

use super::setup::calculate_dice_position;

/// Turn pointer/touch input into roll requests
pub fn handle_input(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut roll_state: ResMut<RollState>,
    mut roll_requests: MessageWriter<RollRequested>,
    mut reset_query: Query<(&mut Transform, &mut Velocity), With<Die>>,
    mut dice_results: ResMut<DiceResults>,
) {
    let clicked = mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed();

    if clicked && !roll_state.rolling {
        roll_requests.write(RollRequested);
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        // Cancel any roll in flight so the settle check cannot finish it
        // against the reset pose and announce a result.
        roll_state.rolling = false;
        roll_state.settle_timer = 0.0;
        roll_state.roll_timer = 0.0;
        dice_results.values.clear();

        let total = reset_query.iter().count();
        for (i, (mut transform, mut velocity)) in reset_query.iter_mut().enumerate() {
            let mut pos = calculate_dice_position(i, total);
            pos.y = 0.3; // rest on the floor
            transform.translation = pos;
            transform.rotation = Quat::IDENTITY;
            velocity.linvel = Vec3::ZERO;
            velocity.angvel = Vec3::ZERO;
        }
    }
}

/// Apply the throw to every die for each requested roll.
///
/// Per die: move to a jittered start pose above the floor, zero both
/// velocities, then apply one random linear impulse and one random torque
/// impulse. The randomness only needs to keep repeated rolls from looking
/// identical.
pub fn start_requested_rolls(
    mut roll_requests: MessageReader<RollRequested>,
    mut roll_state: ResMut<RollState>,
    mut dice_results: ResMut<DiceResults>,
    tuning: Res<RollTuning>,
    mut dice_query: Query<
        (&mut Transform, &mut Velocity, &mut ExternalImpulse),
        With<Die>,
    >,
) {
    if roll_requests.read().next().is_none() {
        return;
    }
    if roll_state.rolling {
        return;
    }

    roll_state.rolling = true;
    roll_state.settle_timer = 0.0;
    roll_state.roll_timer = 0.0;
    dice_results.values.clear();

    let mut rng = rand::thread_rng();
    let total = dice_query.iter().count();

    for (i, (mut transform, mut velocity, mut impulse)) in dice_query.iter_mut().enumerate() {
        let position = calculate_dice_position(i, total);
        transform.translation = position
            + Vec3::new(
                rng.gen_range(-0.3..0.3),
                rng.gen_range(0.0..0.3),
                rng.gen_range(-0.3..0.3),
            );
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
        );

        velocity.linvel = Vec3::ZERO;
        velocity.angvel = Vec3::ZERO;

        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let magnitude = rng.gen_range(tuning.impulse_min..tuning.impulse_max);
        impulse.impulse = Vec3::new(
            angle.cos() * magnitude,
            -0.3 * magnitude,
            angle.sin() * magnitude,
        );
        impulse.torque_impulse = Vec3::new(
            rng.gen_range(-tuning.torque_strength..tuning.torque_strength),
            rng.gen_range(-tuning.torque_strength..tuning.torque_strength),
            rng.gen_range(-tuning.torque_strength..tuning.torque_strength),
        );
    }
}
