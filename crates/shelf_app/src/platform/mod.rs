mod app;
mod input;
mod logging;
mod settings;
mod ui;
mod wedge;

pub use app::run_app;
