//! The tao window and its two webviews as a [`WindowHost`]

use crate::ipc;
use crate::platform;
use flixdesk_chrome::{ChromeStyle, WindowHost};
use flixdesk_core::types::{Bounds, Monitor, Point, ResizeMode, WindowState, WindowStyle};
use flixdesk_core::{ShellError, ShellResult};
use tao::dpi::{LogicalPosition, LogicalSize, PhysicalPosition, PhysicalSize};
use tao::window::Window;
use wry::{Rect, WebView};

/// Borrowed view of the native window for one batch of controller calls
pub struct TaoWindowHost<'a> {
    window: &'a Window,
    chrome: Option<&'a WebView>,
    content: Option<&'a WebView>,
}

impl<'a> TaoWindowHost<'a> {
    pub fn new(window: &'a Window, chrome: Option<&'a WebView>, content: Option<&'a WebView>) -> Self {
        Self {
            window,
            chrome,
            content,
        }
    }
}

impl WindowHost for TaoWindowHost<'_> {
    fn state(&self) -> WindowState {
        if self.window.is_minimized() {
            WindowState::Minimized
        } else if self.window.is_maximized() {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }

    fn set_state(&mut self, state: WindowState) {
        match state {
            WindowState::Minimized => self.window.set_minimized(true),
            WindowState::Maximized => {
                self.window.set_minimized(false);
                self.window.set_maximized(true);
            }
            WindowState::Normal => {
                self.window.set_minimized(false);
                self.window.set_maximized(false);
            }
        }
    }

    fn style(&self) -> WindowStyle {
        if self.window.is_decorated() {
            WindowStyle::Framed
        } else {
            WindowStyle::Borderless
        }
    }

    fn set_style(&mut self, style: WindowStyle) {
        self.window.set_decorations(style == WindowStyle::Framed);
    }

    fn resize_mode(&self) -> ResizeMode {
        if self.window.is_resizable() {
            ResizeMode::CanResize
        } else {
            ResizeMode::NoResize
        }
    }

    fn set_resize_mode(&mut self, mode: ResizeMode) {
        self.window.set_resizable(mode == ResizeMode::CanResize);
    }

    fn bounds(&self) -> Bounds {
        let position = self.window.outer_position().unwrap_or_default();
        let size = self.window.outer_size();
        Bounds::new(
            position.x as f64,
            position.y as f64,
            size.width as f64,
            size.height as f64,
        )
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.window.set_outer_position(PhysicalPosition::new(
            bounds.left.round() as i32,
            bounds.top.round() as i32,
        ));
        // Borderless, so the inner size is the outer size.
        self.window.set_inner_size(PhysicalSize::new(
            bounds.width.round().max(1.0) as u32,
            bounds.height.round().max(1.0) as u32,
        ));
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        self.window.set_always_on_top(on_top);
    }

    fn monitor_at(&self, point: Point) -> Option<Monitor> {
        self.window
            .monitor_from_point(point.x, point.y)
            .map(|handle| platform::monitor_info(&handle))
    }

    fn current_monitor(&self) -> Option<Monitor> {
        self.window
            .current_monitor()
            .map(|handle| platform::monitor_info(&handle))
    }

    fn drag_move(&mut self) -> ShellResult<()> {
        self.window
            .drag_window()
            .map_err(|e| ShellError::window(format!("drag failed: {}", e)))
    }

    fn apply_chrome(&mut self, style: &ChromeStyle) {
        if let Some(chrome) = self.chrome {
            match serde_json::to_string(style) {
                Ok(json) => {
                    if let Err(e) = chrome.evaluate_script(&ipc::apply_chrome_script(&json)) {
                        log::debug!("Failed to style title bar: {}", e);
                    }
                }
                Err(e) => log::warn!("Failed to serialize chrome style: {}", e),
            }
        }
        platform::apply_native_corners(self.window, style);
        apply_layout(self.window, self.chrome, self.content, style.title_bar_height);
    }
}

/// Title bar view behind the whole window, content view below the title bar
pub fn apply_layout(
    window: &Window,
    chrome: Option<&WebView>,
    content: Option<&WebView>,
    title_bar_height: f64,
) {
    let scale = window.scale_factor();
    let window_size = window.inner_size();
    let width = window_size.width as f64 / scale;
    let height = window_size.height as f64 / scale;
    let title_bar_height = title_bar_height.clamp(0.0, height);

    if let Some(chrome) = chrome {
        let chrome_rect = Rect {
            position: LogicalPosition::new(0, 0).into(),
            size: LogicalSize::new(width, height).into(),
        };
        if let Err(e) = chrome.set_bounds(chrome_rect) {
            log::debug!("Failed to lay out title bar: {}", e);
        }
    }

    if let Some(content) = content {
        let content_rect = Rect {
            position: LogicalPosition::new(0.0, title_bar_height).into(),
            size: LogicalSize::new(width, height - title_bar_height).into(),
        };
        if let Err(e) = content.set_bounds(content_rect) {
            log::debug!("Failed to lay out content: {}", e);
        }
    }
}
