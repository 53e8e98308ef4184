//! Spincube engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo:
//! device/surface management, the windowed frame loop, frame timing, and
//! logging setup.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
