//! Types for the dice roller

pub mod camera;
pub mod dice;
pub mod settings;

pub use camera::*;
pub use dice::*;
pub use settings::*;
