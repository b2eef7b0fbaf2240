pub mod pipeline;
pub mod selection;
pub mod panel;
pub mod session;
