//! Settle tracking and result determination
//!
//! Each frame of an active roll the dice velocities are checked against the
//! rest thresholds; once every die has been at rest for the configured hold
//! duration (zero by default, so a single settled frame finishes the roll),
//! each die's upward face is resolved and published.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::roller::resolver::{is_settled, resolve_face};
use crate::roller::types::*;

/// Throw impulses are applied by the next physics step, so a freshly thrown
/// die still reads zero velocity for a frame. Rest checks wait this long.
const MIN_FLIGHT_SECS: f32 = 0.25;

/// System to check whether the dice have settled and determine results
pub fn check_dice_settled(
    mut roll_state: ResMut<RollState>,
    mut dice_results: ResMut<DiceResults>,
    dice_query: Query<(&Die, &Velocity, &Transform)>,
    tuning: Res<RollTuning>,
    time: Res<Time>,
) {
    if !roll_state.rolling {
        return;
    }

    roll_state.roll_timer += time.delta_secs();
    if roll_state.roll_timer < MIN_FLIGHT_SECS {
        return;
    }

    let all_settled = dice_query
        .iter()
        .all(|(_, vel, _)| is_settled(vel.linvel.length(), vel.angvel.length(), &tuning.rest));

    if all_settled {
        roll_state.settle_timer += time.delta_secs();
    } else {
        roll_state.settle_timer = 0.0;
    }

    let finished = all_settled && roll_state.settle_timer >= tuning.settle_hold_secs;
    let timed_out = roll_state.roll_timer > tuning.roll_timeout_secs;

    if finished || timed_out {
        if timed_out && !all_settled {
            warn!(
                "roll did not settle within {:.0}s, reading faces anyway",
                tuning.roll_timeout_secs
            );
        }

        roll_state.rolling = false;
        roll_state.settle_timer = 0.0;
        roll_state.roll_timer = 0.0;

        dice_results.values.clear();
        for (die, _, transform) in dice_query.iter() {
            dice_results
                .values
                .push(resolve_face(transform.rotation, &die.assignment));
        }

        info!(
            "rolled {:?} (total {})",
            dice_results.values,
            dice_results.total()
        );
    }
}

/// System to update the results text overlay
pub fn update_results_display(
    dice_results: Res<DiceResults>,
    roll_state: Res<RollState>,
    mut text_query: Query<&mut Text, With<ResultsText>>,
) {
    for mut text in text_query.iter_mut() {
        if roll_state.rolling {
            text.0 = String::from("Rolling...");
        } else if dice_results.values.is_empty() {
            text.0 = String::from("Click or tap to roll | A/D orbit, W/S zoom, R reset");
        } else {
            let values: Vec<String> = dice_results.values.iter().map(|v| v.to_string()).collect();
            text.0 = format!(
                "You rolled {} = {}\nClick or tap to roll again",
                values.join(" + "),
                dice_results.total()
            );
        }
    }
}
