pub mod fetch;
pub mod meshes;
pub mod resolver;
pub mod systems;
pub mod textures;
pub mod types;

pub use fetch::*;
pub use meshes::*;
pub use resolver::*;
pub use systems::*;
pub use textures::*;
pub use types::*;
