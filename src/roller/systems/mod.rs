//! Systems for the dice roller

pub mod backdrop;
pub mod camera;
pub mod dice;
pub mod input;
pub mod setup;

pub use backdrop::*;
pub use camera::*;
pub use dice::*;
pub use input::*;
pub use setup::*;
