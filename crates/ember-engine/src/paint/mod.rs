//! Color values used for clearing and vertex colors.

mod color;

pub use color::Color;
