pub mod camera;
pub mod command;
pub mod config;
pub mod consts;
pub mod gui;
pub mod hud;
pub mod math;
pub mod orrery;
pub mod texture;
