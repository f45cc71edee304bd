//! Win32 monitor queries and DWM frame attributes

use flixdesk_core::types::{Bounds, Point};
use std::ffi::c_void;
use tao::platform::windows::WindowExtWindows;
use tao::window::Window;
use windows::Win32::Foundation::{BOOL, HWND, POINT};
use windows::Win32::Graphics::Dwm::{
    DwmSetWindowAttribute, DWMWA_TRANSITIONS_FORCEDISABLED, DWMWA_WINDOW_CORNER_PREFERENCE,
    DWMWCP_DONOTROUND, DWMWCP_ROUND, DWM_WINDOW_CORNER_PREFERENCE,
};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromPoint, MONITORINFO, MONITOR_DEFAULTTONEAREST,
};

/// Work area of the monitor nearest to `point`, excluding the taskbar
pub fn work_area_at(point: Point) -> Option<Bounds> {
    let pt = POINT {
        x: point.x.round() as i32,
        y: point.y.round() as i32,
    };
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: `info` is a properly sized MONITORINFO living for the call.
    let found = unsafe {
        let monitor = MonitorFromPoint(pt, MONITOR_DEFAULTTONEAREST);
        GetMonitorInfoW(monitor, &mut info).as_bool()
    };
    if !found {
        tracing::debug!("GetMonitorInfoW failed at ({}, {})", pt.x, pt.y);
        return None;
    }

    let rect = info.rcWork;
    Some(Bounds::new(
        rect.left as f64,
        rect.top as f64,
        (rect.right - rect.left) as f64,
        (rect.bottom - rect.top) as f64,
    ))
}

fn hwnd(window: &Window) -> HWND {
    HWND(window.hwnd() as _)
}

/// Keep the minimize/maximize animations on for the borderless window
pub fn enable_transitions(window: &Window) {
    let disabled = BOOL::from(false);
    // SAFETY: the attribute value is a BOOL that outlives the call.
    let result = unsafe {
        DwmSetWindowAttribute(
            hwnd(window),
            DWMWA_TRANSITIONS_FORCEDISABLED,
            &disabled as *const BOOL as *const c_void,
            std::mem::size_of::<BOOL>() as u32,
        )
    };
    if let Err(e) = result {
        tracing::debug!("Failed to enable DWM transitions: {}", e);
    }
}

pub(super) fn corner_preference(rounded: bool) -> DWM_WINDOW_CORNER_PREFERENCE {
    if rounded {
        DWMWCP_ROUND
    } else {
        DWMWCP_DONOTROUND
    }
}

/// Ask DWM to clip the whole window, child views included, to rounded corners.
/// Unsupported before Windows 11; the failure is only logged.
pub fn set_rounded_corners(window: &Window, rounded: bool) {
    let preference = corner_preference(rounded);
    // SAFETY: the attribute value is a DWM_WINDOW_CORNER_PREFERENCE that outlives the call.
    let result = unsafe {
        DwmSetWindowAttribute(
            hwnd(window),
            DWMWA_WINDOW_CORNER_PREFERENCE,
            &preference as *const DWM_WINDOW_CORNER_PREFERENCE as *const c_void,
            std::mem::size_of::<DWM_WINDOW_CORNER_PREFERENCE>() as u32,
        )
    };
    if let Err(e) = result {
        tracing::debug!("Failed to set DWM corner preference: {}", e);
    }
}
