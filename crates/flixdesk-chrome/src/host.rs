//! The native window as seen by the chrome controller

use crate::style::ChromeStyle;
use flixdesk_core::types::{Bounds, Monitor, Point, ResizeMode, WindowState, WindowStyle};
use flixdesk_core::ShellResult;

/// Window manager operations the controller drives.
///
/// All methods are called on the UI thread. Geometry is in physical screen
/// pixels. Implementations apply each call immediately; any follow-up the
/// OS performs (resize events, repaint) arrives later through the event loop.
pub trait WindowHost {
    fn state(&self) -> WindowState;
    fn set_state(&mut self, state: WindowState);

    fn style(&self) -> WindowStyle;
    fn set_style(&mut self, style: WindowStyle);

    fn resize_mode(&self) -> ResizeMode;
    fn set_resize_mode(&mut self, mode: ResizeMode);

    /// Outer bounds of the window
    fn bounds(&self) -> Bounds;
    fn set_bounds(&mut self, bounds: Bounds);

    fn set_always_on_top(&mut self, on_top: bool);

    /// Monitor containing `point`, if any
    fn monitor_at(&self, point: Point) -> Option<Monitor>;

    /// Monitor the window is currently on
    fn current_monitor(&self) -> Option<Monitor>;

    /// Start the OS drag-move loop. Only valid while the primary button is held.
    fn drag_move(&mut self) -> ShellResult<()>;

    /// Redraw the custom frame
    fn apply_chrome(&mut self, style: &ChromeStyle);
}
