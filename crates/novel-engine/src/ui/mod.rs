pub mod config_panel;
pub mod credit;
pub mod gallery;
pub mod gear;
pub mod layer;
pub mod screen;
pub mod widget;
