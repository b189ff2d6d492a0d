//! Ember engine crate.
//!
//! Event taxonomy and dispatcher, the key/button input cache, and the
//! winit/wgpu runtime that feeds them.

pub mod core;
pub mod device;
pub mod event;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
