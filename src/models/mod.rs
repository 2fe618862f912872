// src/models/mod.rs

pub mod collection;
pub mod motion;
pub mod satellite;

pub use collection::{Collection, Image, TimeWindow};
pub use motion::{pointing_at, MotionModel, OrbitalMotion};
pub use satellite::{LastShot, Position, Satellite};
