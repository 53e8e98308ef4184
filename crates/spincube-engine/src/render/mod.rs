//! Renderer-facing context types.
//!
//! Renderers receive a [`RenderCtx`] (device/queue + formats + viewport) and
//! a [`RenderTarget`] (encoder + attachment views) each frame and record
//! their passes into the target.

mod ctx;
mod viewport;

pub use ctx::{RenderCtx, RenderTarget};
pub use viewport::Viewport;
