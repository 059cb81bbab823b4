//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame
//! to obtain the delta handed to the application.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
