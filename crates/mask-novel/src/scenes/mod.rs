pub mod common;
pub mod ending;
pub mod fin;
pub mod intro;
pub mod story;
pub mod title;
