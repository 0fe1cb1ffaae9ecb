pub mod host;
pub mod manager;
pub mod stage;
pub mod time;
pub mod timer;
