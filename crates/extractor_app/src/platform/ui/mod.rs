pub mod commands;
pub mod layout;
pub mod render;
