//! In-memory window host for controller tests

use crate::host::WindowHost;
use crate::style::ChromeStyle;
use flixdesk_core::types::{Bounds, Monitor, Point, ResizeMode, WindowState, WindowStyle};
use flixdesk_core::{ShellError, ShellResult};

pub fn primary() -> Monitor {
    Monitor {
        bounds: Bounds::new(0.0, 0.0, 1920.0, 1080.0),
        work_area: Bounds::new(0.0, 0.0, 1920.0, 1040.0),
    }
}

pub fn secondary() -> Monitor {
    Monitor {
        bounds: Bounds::new(1920.0, 0.0, 2560.0, 1440.0),
        work_area: Bounds::new(1920.0, 0.0, 2560.0, 1400.0),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetState(WindowState),
    SetStyle(WindowStyle),
    SetResizeMode(ResizeMode),
    SetBounds(Bounds),
    SetAlwaysOnTop(bool),
    DragMove,
    ApplyChrome,
}

/// Behaves like a desktop window manager: maximizing fills the work area of
/// the window's monitor and restoring brings back the last normal bounds.
pub struct FakeHost {
    pub state: WindowState,
    pub style: WindowStyle,
    pub resize_mode: ResizeMode,
    pub bounds: Bounds,
    pub normal_bounds: Bounds,
    pub on_top: bool,
    pub monitors: Vec<Monitor>,
    pub chrome: Vec<ChromeStyle>,
    pub drags: usize,
    pub drag_fails: bool,
    pub calls: Vec<HostCall>,
}

impl FakeHost {
    pub fn normal(bounds: Bounds) -> Self {
        Self {
            state: WindowState::Normal,
            style: WindowStyle::Borderless,
            resize_mode: ResizeMode::CanResize,
            bounds,
            normal_bounds: bounds,
            on_top: false,
            monitors: vec![primary(), secondary()],
            chrome: Vec::new(),
            drags: 0,
            drag_fails: false,
            calls: Vec::new(),
        }
    }
}

impl WindowHost for FakeHost {
    fn state(&self) -> WindowState {
        self.state
    }

    fn set_state(&mut self, state: WindowState) {
        self.calls.push(HostCall::SetState(state));
        match state {
            WindowState::Maximized => {
                if let Some(monitor) = self.current_monitor() {
                    self.bounds = monitor.work_area;
                }
            }
            WindowState::Normal => self.bounds = self.normal_bounds,
            WindowState::Minimized => {}
        }
        self.state = state;
    }

    fn style(&self) -> WindowStyle {
        self.style
    }

    fn set_style(&mut self, style: WindowStyle) {
        self.calls.push(HostCall::SetStyle(style));
        self.style = style;
    }

    fn resize_mode(&self) -> ResizeMode {
        self.resize_mode
    }

    fn set_resize_mode(&mut self, mode: ResizeMode) {
        self.calls.push(HostCall::SetResizeMode(mode));
        self.resize_mode = mode;
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.calls.push(HostCall::SetBounds(bounds));
        self.bounds = bounds;
        if self.state == WindowState::Normal {
            self.normal_bounds = bounds;
        }
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        self.calls.push(HostCall::SetAlwaysOnTop(on_top));
        self.on_top = on_top;
    }

    fn monitor_at(&self, point: Point) -> Option<Monitor> {
        self.monitors.iter().copied().find(|m| m.bounds.contains(point))
    }

    fn current_monitor(&self) -> Option<Monitor> {
        self.monitor_at(self.bounds.center())
            .or_else(|| self.monitors.first().copied())
    }

    fn drag_move(&mut self) -> ShellResult<()> {
        self.calls.push(HostCall::DragMove);
        self.drags += 1;
        if self.drag_fails {
            Err(ShellError::window("button released"))
        } else {
            Ok(())
        }
    }

    fn apply_chrome(&mut self, style: &ChromeStyle) {
        self.calls.push(HostCall::ApplyChrome);
        self.chrome.push(*style);
    }
}
