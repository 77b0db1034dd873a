//! Application settings and persistence
//!
//! Settings live in a RON file next to the binary (or wherever `--settings`
//! points). A missing file means defaults; a malformed file is reported and
//! ignored rather than aborting the toy.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::roller::resolver::RestThresholds;
use crate::roller::types::{DiceStyle, RollTuning};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Number of dice to spawn
    pub dice: usize,
    /// CSS color strings, parsed with csscolorparser ("ivory", "#202028", ...)
    pub die_color: String,
    pub pip_color: String,
    pub linear_threshold: f32,
    pub angular_threshold: f32,
    /// Hysteresis on the rest predicate; 0.0 keeps it instantaneous
    pub settle_hold_secs: f32,
    pub roll_timeout_secs: f32,
    pub impulse_min: f32,
    pub impulse_max: f32,
    pub torque_strength: f32,
    /// Remote backdrop sources, tried in order before the generated fallback
    pub backdrop_urls: Vec<String>,
    /// Skip remote backdrop providers entirely
    pub offline: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dice: 2,
            die_color: String::from("ivory"),
            pip_color: String::from("#15151a"),
            linear_threshold: 0.1,
            angular_threshold: 0.1,
            settle_hold_secs: 0.0,
            roll_timeout_secs: 12.0,
            impulse_min: 2.0,
            impulse_max: 5.0,
            torque_strength: 0.8,
            backdrop_urls: vec![String::from(
                "https://raw.githubusercontent.com/edgarhsanchez/tumbledice/main/assets/felt.png",
            )],
            offline: false,
        }
    }
}

impl AppSettings {
    /// Load settings from a RON file, falling back to defaults when the file
    /// is absent or unreadable. Runs before the Bevy app exists, so failures
    /// report via stderr rather than the log plugin.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                eprintln!(
                    "Warning: could not read settings file {}: {}. Using defaults.",
                    path.display(),
                    err
                );
                return Self::default();
            }
        };

        match ron::from_str(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!(
                    "Warning: could not parse settings file {}: {}. Using defaults.",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn to_tuning(&self) -> RollTuning {
        RollTuning {
            rest: RestThresholds {
                linear: self.linear_threshold,
                angular: self.angular_threshold,
            },
            settle_hold_secs: self.settle_hold_secs,
            roll_timeout_secs: self.roll_timeout_secs,
            impulse_min: self.impulse_min,
            // gen_range needs a non-empty range
            impulse_max: self.impulse_max.max(self.impulse_min + 0.01),
            torque_strength: self.torque_strength.max(0.01),
        }
    }

    pub fn to_style(&self) -> Result<DiceStyle, String> {
        Ok(DiceStyle {
            count: self.dice.max(1),
            die_color: parse_css_color(&self.die_color)?,
            pip_color: parse_css_color(&self.pip_color)?,
        })
    }
}

/// Parse a CSS color string into a Bevy color
pub fn parse_css_color(s: &str) -> Result<Color, String> {
    let color = csscolorparser::parse(s).map_err(|e| format!("invalid color '{}': {}", s, e))?;
    let [r, g, b, a] = color.to_array();
    Ok(Color::srgba(r, g, b, a))
}
