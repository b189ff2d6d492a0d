//! Input subsystem.
//!
//! `InputState` is the frame-persistent key/button cache. It is written only by
//! the dispatcher subscribers installed with [`subscribe_input`] and read by
//! application code during the update phase.

mod codes;
mod state;
mod subscribers;

pub use codes::{KeyCode, MouseButtonCode};
pub use state::{InputState, SharedInput};
pub use subscribers::subscribe_input;
