//! Static world layout: obstacles and decoration

pub mod layout;
pub mod objects;

pub use layout::WorldLayout;
pub use objects::{GrassTuft, Leaf, Obstacle};
