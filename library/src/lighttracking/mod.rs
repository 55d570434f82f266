//! Light-tracking subsystem: spherical light-position ↔ UV mapping.
//!
//! Self-contained trigonometry, independent from the combiner sync engine.

pub mod tracker;
pub mod uv;

pub use tracker::LightTracker;
pub use uv::{UvCoords, Vec3, compute_light_position, compute_uv};
