//! Platform-specific pieces the toolkit does not cover
//!
//! tao reports monitor bounds but not the work area, browser command-line
//! arguments only exist for WebView2, and only DWM can round the corners of
//! the native child views.

#[cfg(target_os = "windows")]
mod windows;

use flixdesk_chrome::ChromeStyle;
use flixdesk_core::types::{Bounds, Monitor};
use tao::window::Window;
use wry::WebViewBuilder;

/// Convert a toolkit monitor into the controller's view of it
pub fn monitor_info(handle: &tao::monitor::MonitorHandle) -> Monitor {
    let position = handle.position();
    let size = handle.size();
    let bounds = Bounds::new(
        position.x as f64,
        position.y as f64,
        size.width as f64,
        size.height as f64,
    );

    match work_area(bounds) {
        Some(work_area) => Monitor { bounds, work_area },
        None => Monitor::without_reserved_area(bounds),
    }
}

#[cfg(target_os = "windows")]
fn work_area(bounds: Bounds) -> Option<Bounds> {
    self::windows::work_area_at(bounds.center())
}

#[cfg(not(target_os = "windows"))]
fn work_area(_bounds: Bounds) -> Option<Bounds> {
    None
}

/// Whether the OS frame should round the window for this style
pub fn wants_rounded_corners(style: &ChromeStyle) -> bool {
    style.window_radius > 0.0
}

/// Frame attributes applied once after the window is created
#[cfg(target_os = "windows")]
pub fn init_window_frame(window: &Window) {
    self::windows::enable_transitions(window);
}

#[cfg(not(target_os = "windows"))]
pub fn init_window_frame(_window: &Window) {}

/// Match the OS frame's corners to the chrome style
#[cfg(target_os = "windows")]
pub fn apply_native_corners(window: &Window, style: &ChromeStyle) {
    self::windows::set_rounded_corners(window, wants_rounded_corners(style));
}

#[cfg(not(target_os = "windows"))]
pub fn apply_native_corners(_window: &Window, _style: &ChromeStyle) {}

/// Pass extra command-line arguments to the browser process
#[cfg(target_os = "windows")]
pub fn with_browser_arguments<'a>(builder: WebViewBuilder<'a>, arguments: &str) -> WebViewBuilder<'a> {
    use wry::WebViewBuilderExtWindows;

    if arguments.is_empty() {
        return builder;
    }
    builder.with_additional_browser_args(arguments)
}

#[cfg(not(target_os = "windows"))]
pub fn with_browser_arguments<'a>(builder: WebViewBuilder<'a>, arguments: &str) -> WebViewBuilder<'a> {
    if !arguments.is_empty() {
        log::debug!("Browser arguments not supported on this platform: {}", arguments);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use flixdesk_core::config::WindowConfig;
    use flixdesk_core::types::WindowState;

    fn style(state: WindowState, fullscreen: bool) -> ChromeStyle {
        ChromeStyle::for_window(state, fullscreen, &WindowConfig::default())
    }

    #[test]
    fn test_native_corners_follow_window_state() {
        assert!(wants_rounded_corners(&style(WindowState::Normal, false)));
        assert!(!wants_rounded_corners(&style(WindowState::Maximized, false)));
        assert!(!wants_rounded_corners(&style(WindowState::Normal, true)));
        assert!(!wants_rounded_corners(&style(WindowState::Maximized, true)));
    }

    #[test]
    fn test_monitor_without_work_area_off_windows() {
        if cfg!(target_os = "windows") {
            return;
        }
        assert_eq!(work_area(Bounds::new(0.0, 0.0, 1920.0, 1080.0)), None);
    }
}
