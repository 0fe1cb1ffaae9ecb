// extensions/mod.rs
//
// Stateless helpers shared by scenes and systems.

pub mod smoothing;

pub use smoothing::{lerp, lerp_vec2, smooth_toward};
