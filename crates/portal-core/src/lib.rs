pub mod constants;
pub mod controller;
pub mod easing;
pub mod entity;
pub mod error;
pub mod generator;
pub mod multiverse;
pub mod registry;
pub mod scene;
pub mod state;
pub mod universe;

pub use constants::*;
pub use controller::*;
pub use entity::*;
pub use error::UniverseError;
pub use generator::*;
pub use multiverse::*;
pub use registry::*;
pub use scene::*;
pub use state::*;
pub use universe::*;
