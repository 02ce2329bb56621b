pub mod bitmap;
pub mod core;
pub mod error;
pub mod main;
pub mod observed;
pub mod ranking;
pub mod render;
pub mod run_effect;
