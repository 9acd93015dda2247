pub mod app;
pub mod effects;
pub mod settings;
pub mod ui;
