//! Trigon engine crate.
//!
//! This crate owns the platform loop, the OpenGL context bootstrap, and the
//! GPU resource wrappers the demo binary draws with.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod logging;
pub mod paint;
