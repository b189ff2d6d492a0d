//! Frame timing, independent of the runtime so it can be tested directly.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
