use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the demo layer.
///
/// The runtime calls `on_frame` once per scheduled frame, passing the current
/// frame time and GPU handles. Once running, the loop only stops when the
/// host tears the window down or the app returns [`AppControl::Exit`].
pub trait App {
    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
