//! Fullscreen bridge
//!
//! Couples the content view's fullscreen element signal to the native window.
//! Entering captures the current layout and covers the whole monitor,
//! taskbar included; exiting restores the captured layout.

use crate::controller::ChromeController;
use crate::deferred::PendingTask;
use crate::host::WindowHost;
use crate::placement;
use flixdesk_core::types::{ResizeMode, WindowLayoutSnapshot, WindowState, WindowStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenPhase {
    Windowed,
    Fullscreen,
}

impl ChromeController {
    pub fn phase(&self) -> FullscreenPhase {
        if self.snapshot.is_some() {
            FullscreenPhase::Fullscreen
        } else {
            FullscreenPhase::Windowed
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.phase() == FullscreenPhase::Fullscreen
    }

    /// Layout that will be restored on exit, while fullscreen
    pub fn snapshot(&self) -> Option<&WindowLayoutSnapshot> {
        self.snapshot.as_ref()
    }

    /// The content view gained or lost its fullscreen element. Repeated
    /// signals with the same value are ignored.
    pub fn on_fullscreen_changed<H: WindowHost + ?Sized>(&mut self, host: &mut H, active: bool) {
        match (self.phase(), active) {
            (FullscreenPhase::Windowed, true) => self.enter_fullscreen(host),
            (FullscreenPhase::Fullscreen, false) => self.exit_fullscreen(host),
            (phase, _) => log::debug!("Fullscreen signal {} ignored in {:?}", active, phase),
        }
    }

    fn enter_fullscreen<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        self.deferred.advance();

        let snapshot = WindowLayoutSnapshot {
            state: host.state(),
            style: host.style(),
            resize_mode: host.resize_mode(),
            bounds: host.bounds(),
        };
        log::info!("Entering fullscreen from {:?}", snapshot.state);

        let monitor = host.current_monitor();

        host.set_style(WindowStyle::Borderless);
        host.set_state(WindowState::Normal);
        host.set_resize_mode(ResizeMode::NoResize);
        match monitor {
            Some(monitor) => host.set_bounds(monitor.bounds),
            None => log::warn!("No monitor found for fullscreen, keeping current bounds"),
        }

        self.snapshot = Some(snapshot);
        let style = self.style_for(WindowState::Normal);
        host.apply_chrome(&style);

        // Last, so the first topmost paint already has the final bounds.
        host.set_always_on_top(true);
    }

    fn exit_fullscreen<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };
        self.deferred.advance();
        log::info!("Leaving fullscreen, restoring {:?}", snapshot.state);

        host.set_always_on_top(false);
        let style = self.style_for(snapshot.state);
        host.apply_chrome(&style);

        host.set_style(snapshot.style);
        host.set_resize_mode(snapshot.resize_mode);

        if snapshot.state == WindowState::Maximized {
            host.set_state(WindowState::Maximized);
        } else {
            host.set_state(WindowState::Normal);
            let monitor = host.monitor_at(snapshot.bounds.center());
            let fallback = host.current_monitor();
            let bounds = placement::restored_bounds(
                snapshot.bounds,
                monitor.as_ref(),
                fallback.as_ref(),
                self.metrics.default_size,
            );
            self.deferred.schedule(PendingTask::ApplyBounds(bounds));
        }

        self.on_window_state_changed(host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{primary, FakeHost, HostCall};
    use flixdesk_core::config::WindowConfig;
    use flixdesk_core::types::Bounds;

    fn controller() -> ChromeController {
        ChromeController::new(WindowConfig::default())
    }

    #[test]
    fn test_enter_covers_whole_monitor() {
        let mut host = FakeHost::normal(Bounds::new(100.0, 100.0, 1400.0, 900.0));
        let mut chrome = controller();

        chrome.on_fullscreen_changed(&mut host, true);

        assert!(chrome.is_fullscreen());
        assert_eq!(host.bounds, primary().bounds);
        assert_eq!(host.state, WindowState::Normal);
        assert_eq!(host.style, WindowStyle::Borderless);
        assert_eq!(host.resize_mode, ResizeMode::NoResize);
        assert!(host.on_top);

        let chrome_style = host.chrome.last().unwrap();
        assert!(!chrome_style.title_bar_visible);
        assert_eq!(chrome_style.title_bar_height, 0.0);
    }

    #[test]
    fn test_enter_sets_topmost_after_geometry() {
        let mut host = FakeHost::normal(Bounds::new(100.0, 100.0, 1400.0, 900.0));
        controller().on_fullscreen_changed(&mut host, true);

        let bounds_at = host
            .calls
            .iter()
            .position(|c| matches!(c, HostCall::SetBounds(_)))
            .unwrap();
        let topmost_at = host
            .calls
            .iter()
            .position(|c| *c == HostCall::SetAlwaysOnTop(true))
            .unwrap();
        assert!(bounds_at < topmost_at);
        assert_eq!(host.calls.last(), Some(&HostCall::SetAlwaysOnTop(true)));
    }

    #[test]
    fn test_round_trip_from_normal_restores_exact_bounds() {
        let original = Bounds::new(100.0, 100.0, 1400.0, 900.0);
        let mut host = FakeHost::normal(original);
        host.style = WindowStyle::Framed;
        let mut chrome = controller();

        chrome.on_fullscreen_changed(&mut host, true);
        chrome.on_fullscreen_changed(&mut host, false);

        assert!(!chrome.is_fullscreen());
        assert!(!host.on_top);
        assert_eq!(host.style, WindowStyle::Framed);
        assert_eq!(host.resize_mode, ResizeMode::CanResize);
        assert_eq!(host.state, WindowState::Normal);

        // Geometry waits for the layout pass.
        assert!(chrome.has_pending());
        chrome.run_pending(&mut host);
        assert_eq!(host.bounds, original);

        let chrome_style = host.chrome.last().unwrap();
        assert!(chrome_style.title_bar_visible);
        assert_eq!(chrome_style.title_bar_height, 42.0);
        assert_eq!(chrome_style.window_radius, 12.0);
    }

    #[test]
    fn test_round_trip_from_maximized_restores_maximized() {
        let mut host = FakeHost::normal(Bounds::new(100.0, 100.0, 1400.0, 900.0));
        host.set_state(WindowState::Maximized);
        let mut chrome = controller();

        chrome.on_fullscreen_changed(&mut host, true);
        assert_eq!(chrome.snapshot().unwrap().state, WindowState::Maximized);
        assert_eq!(host.bounds, primary().bounds);

        chrome.on_fullscreen_changed(&mut host, false);
        assert_eq!(host.state, WindowState::Maximized);
        assert_eq!(host.bounds, primary().work_area);
        assert!(!chrome.has_pending());
        assert_eq!(host.chrome.last().unwrap().window_radius, 0.0);
    }

    #[test]
    fn test_repeated_enter_keeps_first_snapshot() {
        let original = Bounds::new(100.0, 100.0, 1400.0, 900.0);
        let mut host = FakeHost::normal(original);
        let mut chrome = controller();

        chrome.on_fullscreen_changed(&mut host, true);
        chrome.on_fullscreen_changed(&mut host, true);
        assert_eq!(chrome.snapshot().unwrap().bounds, original);

        chrome.on_fullscreen_changed(&mut host, false);
        chrome.run_pending(&mut host);
        assert_eq!(host.bounds, original);
    }

    #[test]
    fn test_exit_while_windowed_is_a_no_op() {
        let mut host = FakeHost::normal(Bounds::new(100.0, 100.0, 1400.0, 900.0));
        controller().on_fullscreen_changed(&mut host, false);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_title_bar_is_inert_while_fullscreen() {
        let mut host = FakeHost::normal(Bounds::new(100.0, 100.0, 1400.0, 900.0));
        let mut chrome = controller();
        chrome.on_fullscreen_changed(&mut host, true);

        chrome.on_maximize_toggle_requested(&mut host);
        chrome.on_minimize_requested(&mut host);
        assert_eq!(host.state, WindowState::Normal);
        assert_eq!(host.bounds, primary().bounds);

        chrome.on_window_state_changed(&mut host);
        assert!(!host.chrome.last().unwrap().title_bar_visible);
    }

    #[test]
    fn test_lost_monitor_falls_back_to_centered_default() {
        let mut host = FakeHost::normal(Bounds::new(2200.0, 200.0, 800.0, 600.0));
        let mut chrome = controller();

        chrome.on_fullscreen_changed(&mut host, true);
        host.monitors.truncate(1);
        host.bounds = primary().bounds;
        chrome.on_fullscreen_changed(&mut host, false);
        chrome.run_pending(&mut host);

        assert_eq!(host.bounds, Bounds::new(260.0, 70.0, 1400.0, 900.0));
    }

    #[test]
    fn test_state_change_before_layout_pass_supersedes_restore() {
        let mut host = FakeHost::normal(Bounds::new(100.0, 100.0, 1400.0, 900.0));
        let mut chrome = controller();

        chrome.on_fullscreen_changed(&mut host, true);
        chrome.on_fullscreen_changed(&mut host, false);
        chrome.on_maximize_toggle_requested(&mut host);
        chrome.run_pending(&mut host);

        assert_eq!(host.state, WindowState::Maximized);
        assert_eq!(host.bounds, primary().work_area);
    }

    #[test]
    fn test_reenter_before_layout_pass_drops_restore() {
        let mut host = FakeHost::normal(Bounds::new(100.0, 100.0, 1400.0, 900.0));
        let mut chrome = controller();

        chrome.on_fullscreen_changed(&mut host, true);
        chrome.on_fullscreen_changed(&mut host, false);
        chrome.on_fullscreen_changed(&mut host, true);
        chrome.run_pending(&mut host);

        assert!(chrome.is_fullscreen());
        assert_eq!(host.bounds, primary().bounds);
    }
}
