pub mod config;
pub mod data;
pub mod net;
pub mod render;
pub mod engine;
