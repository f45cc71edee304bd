//! Window chrome controller
//!
//! Owns the custom frame's view of the window: maximize/restore from the
//! title bar buttons, double-click and drag on the title bar, and the corner
//! styling that follows the window state. The fullscreen transitions live in
//! `fullscreen.rs` and share this state.

use crate::deferred::{DeferredSlot, PendingTask};
use crate::host::WindowHost;
use crate::placement;
use crate::style::ChromeStyle;
use flixdesk_core::config::WindowConfig;
use flixdesk_core::types::{Point, WindowLayoutSnapshot, WindowState};
use serde::Deserialize;

/// Primary-button press on the title bar
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TitleBarPress {
    /// 1 for a single click, 2 for a double click
    pub click_count: u32,
    /// Pointer position in screen coordinates
    pub screen: Point,
    /// Pointer x relative to the window's left edge
    pub local_x: f64,
}

pub struct ChromeController {
    pub(crate) metrics: WindowConfig,
    /// Layout captured on entering fullscreen; `Some` while fullscreen
    pub(crate) snapshot: Option<WindowLayoutSnapshot>,
    pub(crate) deferred: DeferredSlot,
}

impl ChromeController {
    pub fn new(metrics: WindowConfig) -> Self {
        Self {
            metrics,
            snapshot: None,
            deferred: DeferredSlot::new(),
        }
    }

    pub fn metrics(&self) -> &WindowConfig {
        &self.metrics
    }

    /// Replace the metrics, e.g. after the window moved to a monitor with a
    /// different scale factor. Takes effect on the next restore or drag-out.
    pub fn set_metrics(&mut self, metrics: WindowConfig) {
        self.metrics = metrics;
    }

    /// Style for the given state under the current fullscreen phase
    pub fn style_for(&self, state: WindowState) -> ChromeStyle {
        ChromeStyle::for_window(state, self.is_fullscreen(), &self.metrics)
    }

    /// Maximize button
    pub fn on_maximize_toggle_requested<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        if self.is_fullscreen() {
            log::debug!("Ignoring maximize toggle while fullscreen");
            return;
        }
        self.deferred.advance();

        if host.state() == WindowState::Maximized {
            host.set_state(WindowState::Normal);
            let monitor = host.current_monitor();
            let bounds = placement::centered_default(
                monitor.as_ref(),
                host.bounds(),
                self.metrics.default_size,
            );
            host.set_bounds(bounds);
        } else {
            host.set_state(WindowState::Maximized);
        }
    }

    /// Minimize button
    pub fn on_minimize_requested<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        if self.is_fullscreen() {
            return;
        }
        self.deferred.advance();
        host.set_state(WindowState::Minimized);
    }

    /// Primary-button press on the title bar
    pub fn on_title_bar_press<H: WindowHost + ?Sized>(&mut self, host: &mut H, press: TitleBarPress) {
        if self.is_fullscreen() {
            log::debug!("Ignoring title bar press while fullscreen");
            return;
        }
        self.deferred.advance();

        match press.click_count {
            2 => {
                let target = if host.state() == WindowState::Maximized {
                    WindowState::Normal
                } else {
                    WindowState::Maximized
                };
                host.set_state(target);
            }
            1 if host.state() == WindowState::Maximized => {
                let maximized = host.bounds();
                let work_area = host.monitor_at(press.screen).map(|m| m.work_area);
                let bounds = placement::drag_out_bounds(
                    press.screen,
                    press.local_x,
                    maximized.width,
                    self.metrics.default_size,
                    self.metrics.drag_grab_offset,
                    work_area,
                );

                host.set_state(WindowState::Normal);
                host.set_bounds(bounds);
                // The drag loop has to start from the restored geometry.
                self.deferred.schedule(PendingTask::BeginDrag);
            }
            1 => begin_drag(host),
            other => log::debug!("Ignoring title bar press with click count {}", other),
        }
    }

    /// Reapply corner styling after any state change. Idempotent.
    pub fn on_window_state_changed<H: WindowHost + ?Sized>(&self, host: &mut H) {
        let style = self.style_for(host.state());
        host.apply_chrome(&style);
    }

    pub fn has_pending(&self) -> bool {
        self.deferred.is_pending()
    }

    /// Run the deferred continuation, if it is still current. Call once the
    /// event loop has processed the events caused by the last mutation.
    pub fn run_pending<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        match self.deferred.take_current() {
            Some(PendingTask::BeginDrag) => begin_drag(host),
            Some(PendingTask::ApplyBounds(bounds)) => {
                host.set_bounds(bounds);
                self.on_window_state_changed(host);
            }
            None => {}
        }
    }
}

fn begin_drag<H: WindowHost + ?Sized>(host: &mut H) {
    if let Err(e) = host.drag_move() {
        log::debug!("Drag-move not started: {}", e);
    }
}
