//! Camera types

use bevy::prelude::*;

/// Marker component for the orbiting main camera
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking camera zoom (0.0 = closest, 1.0 = farthest)
#[derive(Resource)]
pub struct ZoomState {
    pub level: f32,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self { level: 0.4 }
    }
}

impl ZoomState {
    const MIN_DISTANCE: f32 = 4.0;
    const MAX_DISTANCE: f32 = 12.0;

    pub fn get_distance(&self) -> f32 {
        Self::MIN_DISTANCE + self.level * (Self::MAX_DISTANCE - Self::MIN_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_distance_range() {
        assert_eq!(ZoomState { level: 0.0 }.get_distance(), 4.0);
        assert_eq!(ZoomState { level: 1.0 }.get_distance(), 12.0);
    }
}
