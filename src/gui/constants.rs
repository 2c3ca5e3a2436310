//! GUI-specific constants for layout, status colors and intervals

use eframe::egui;

pub const APP_NAME: &str = "Gradient Fader";

/// Editor window dimensions
pub const WINDOW_MIN_WIDTH: f32 = 340.0;
pub const WINDOW_MIN_HEIGHT: f32 = 640.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// How often to look for finished storage operations while one is pending
pub const PERSISTENCE_POLL_INTERVAL_MS: u64 = 50;
