//! GPU device + surface management.
//!
//! Stands in for the native graphics context of the window: one wgpu device
//! and surface per window, reconfigured on resize.

mod frame;
mod gpu;
mod init;

pub use frame::{GpuFrame, SurfaceErrorAction};
pub use gpu::Gpu;
pub use init::GpuInit;
