//! Thor: The Guardian - escort a family home through a hostile forest

pub mod audio;
pub mod core;
pub mod entity;
pub mod narration;
pub mod render;
pub mod simulation;
pub mod spatial;
pub mod ui;
pub mod world;
