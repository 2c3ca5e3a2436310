//! Gradient Fader: interactive editor for a three-channel gradient shader
//!
//! The [`store`] holds the shader inputs and is only changed through typed
//! actions. [`persistence`] saves and restores them, [`render`] turns them
//! into shader uniforms and [`gui`] wires everything into an eframe window.

#![deny(unsafe_code)]

pub mod config;
pub mod constants;
pub mod gui;
pub mod persistence;
pub mod render;
pub mod store;
