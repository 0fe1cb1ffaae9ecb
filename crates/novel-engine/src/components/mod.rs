pub mod layer;
pub mod quad;
pub mod texture;
