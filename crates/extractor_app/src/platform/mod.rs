mod app;
mod effects;
mod logging;
mod picker;
mod ui;

pub use app::run_app;
