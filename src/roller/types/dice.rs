//! Dice-related types, components and resources
//!
//! This module contains the Die component, the roll lifecycle resources
//! (RollState, DiceResults, RollTuning) and the RollRequested message.

use bevy::prelude::*;

use crate::roller::resolver::{FaceAssignment, RestThresholds};

/// Component attached to each die entity
#[derive(Component)]
pub struct Die {
    pub assignment: FaceAssignment,
}

/// Marker component for the box geometry the dice tumble inside
#[derive(Component)]
pub struct DiceBox;

/// Marker for the table floor whose material receives the backdrop texture
#[derive(Component)]
pub struct TableSurface;

/// Marker for the results text in the top-left corner
#[derive(Component)]
pub struct ResultsText;

/// Discrete "roll requested" event produced by the input layer
#[derive(Message)]
pub struct RollRequested;

/// Resource storing the face values of the last finished roll
#[derive(Resource, Default)]
pub struct DiceResults {
    pub values: Vec<u32>,
}

impl DiceResults {
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }
}

/// Resource tracking the current roll lifecycle
#[derive(Resource, Default)]
pub struct RollState {
    pub rolling: bool,
    /// How long every die has continuously satisfied the rest predicate
    pub settle_timer: f32,
    /// How long the current roll has been in flight (for timeout detection)
    pub roll_timer: f32,
}

/// Tunable roll behavior, assembled from settings + CLI in `main`.
#[derive(Resource, Clone)]
pub struct RollTuning {
    pub rest: RestThresholds,
    /// How long the rest predicate must hold before a roll counts as
    /// finished. 0.0 reproduces the instantaneous single-frame predicate;
    /// anything larger is an explicit hysteresis opt-in.
    pub settle_hold_secs: f32,
    /// Force-finish a roll after this long, so a die balancing on an edge
    /// cannot keep the toy in the rolling state forever.
    pub roll_timeout_secs: f32,
    /// Linear impulse magnitude range for a throw
    pub impulse_min: f32,
    pub impulse_max: f32,
    /// Per-axis torque impulse bound for a throw
    pub torque_strength: f32,
}

impl Default for RollTuning {
    fn default() -> Self {
        Self {
            rest: RestThresholds::default(),
            settle_hold_secs: 0.0,
            roll_timeout_secs: 12.0,
            impulse_min: 2.0,
            impulse_max: 5.0,
            torque_strength: 0.8,
        }
    }
}

/// Visual configuration for the spawned dice
#[derive(Resource, Clone)]
pub struct DiceStyle {
    pub count: usize,
    pub die_color: Color,
    pub pip_color: Color,
}

impl Default for DiceStyle {
    fn default() -> Self {
        Self {
            count: 2,
            die_color: Color::srgb(0.92, 0.9, 0.85),
            pip_color: Color::srgb(0.08, 0.08, 0.1),
        }
    }
}
