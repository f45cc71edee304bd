//! Chrome styling derived from the window state

use flixdesk_core::config::WindowConfig;
use flixdesk_core::types::WindowState;
use serde::Serialize;

/// Per-corner radii, clockwise from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub const SQUARE: CornerRadii = CornerRadii::uniform(0.0);

    pub const fn uniform(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Rounded top corners only
    pub const fn top(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: 0.0,
            bottom_left: 0.0,
        }
    }
}

/// Everything the host needs to draw the custom frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeStyle {
    /// Corner radius of the outer window border
    pub window_radius: f64,
    /// Corner radii of the title bar container
    pub title_bar_radius: CornerRadii,
    /// Height of the title bar row; zero collapses it
    pub title_bar_height: f64,
    pub title_bar_visible: bool,
}

impl ChromeStyle {
    /// Style for a window in `state`. Fullscreen hides the title bar and
    /// squares every corner regardless of state.
    pub fn for_window(state: WindowState, fullscreen: bool, metrics: &WindowConfig) -> Self {
        if fullscreen {
            return Self {
                window_radius: 0.0,
                title_bar_radius: CornerRadii::SQUARE,
                title_bar_height: 0.0,
                title_bar_visible: false,
            };
        }

        match state {
            WindowState::Maximized => Self {
                window_radius: 0.0,
                title_bar_radius: CornerRadii::SQUARE,
                title_bar_height: metrics.title_bar_height,
                title_bar_visible: true,
            },
            WindowState::Normal | WindowState::Minimized => Self {
                window_radius: metrics.corner_radius,
                title_bar_radius: CornerRadii::top(metrics.corner_radius),
                title_bar_height: metrics.title_bar_height,
                title_bar_visible: true,
            },
        }
    }
}
