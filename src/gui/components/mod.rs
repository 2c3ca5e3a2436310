//! Reusable editor widgets

pub mod control_panel;
