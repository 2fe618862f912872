// src/math/mod.rs

pub mod geometry;

pub use geometry::conflicts;
pub use geometry::distance_squared;
pub use geometry::in_range;
