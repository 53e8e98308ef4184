//! Windowed runtime.
//!
//! Owns the winit event loop and drives the application's frame callback.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
