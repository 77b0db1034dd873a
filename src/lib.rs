//! Tumbledice - click-to-roll 3D dice toy
//!
//! Renders d6 dice inside a transparent box with Bevy, simulates them with
//! Rapier, and reads the upward face of each die once it settles. The pure
//! face-resolution core lives in [`roller::resolver`].

pub mod roller;
