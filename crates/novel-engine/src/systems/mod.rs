pub mod audio;
pub mod dialogue;
pub mod particles;
pub mod render;
pub mod rng;
pub mod text;
