//! Window geometry and state types shared by the chrome controller and the host

use serde::{Deserialize, Serialize};

/// Native window state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}

/// Native frame style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStyle {
    /// OS-drawn frame and caption
    Framed,
    /// No OS frame; the title bar is drawn by the shell itself
    Borderless,
}

/// Whether the user can resize the window by its edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    CanResize,
    NoResize,
}

/// A point in screen coordinates (physical pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair (physical pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Screen rectangle with the origin at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// A rectangle of `size` centered inside `self`
    pub fn centered(&self, size: Size) -> Bounds {
        Bounds::new(
            self.left + (self.width - size.width) / 2.0,
            self.top + (self.height - size.height) / 2.0,
            size.width,
            size.height,
        )
    }

    /// Shift `self` so its top-left corner lies inside `area` and, where it fits,
    /// its far edges do too. The size is never changed.
    pub fn clamped_into(&self, area: &Bounds) -> Bounds {
        let max_left = (area.right() - self.width).max(area.left);
        let max_top = (area.bottom() - self.height).max(area.top);
        Bounds::new(
            self.left.clamp(area.left, max_left),
            self.top.clamp(area.top, max_top),
            self.width,
            self.height,
        )
    }
}

/// A display and the part of it not covered by the taskbar/dock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub bounds: Bounds,
    pub work_area: Bounds,
}

impl Monitor {
    /// A monitor without reserved space, used where the platform cannot
    /// report a work area
    pub fn without_reserved_area(bounds: Bounds) -> Self {
        Self {
            bounds,
            work_area: bounds,
        }
    }
}

/// Window layout captured right before entering fullscreen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowLayoutSnapshot {
    pub state: WindowState,
    pub style: WindowStyle,
    pub resize_mode: ResizeMode,
    pub bounds: Bounds,
}
