//! Editor window: egui/eframe shell, preview surface and control panel

pub mod app;
pub mod components;
pub mod constants;

pub use app::run_gui;
