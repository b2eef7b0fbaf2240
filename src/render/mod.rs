pub mod layout;
pub mod entity;
pub mod registry;
pub mod camera;
pub mod animator;
pub mod paint;
