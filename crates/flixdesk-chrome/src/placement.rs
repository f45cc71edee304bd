//! Pure geometry for restoring and dragging the window

use flixdesk_core::types::{Bounds, Monitor, Point, Size};

/// Horizontal grab position is kept within this fraction of the width so the
/// pointer never ends up on a window edge
const MIN_GRAB_RATIO: f64 = 0.1;
const MAX_GRAB_RATIO: f64 = 0.9;

/// Default-sized bounds centered in the monitor's work area. Without a
/// monitor the current top-left corner is kept.
pub fn centered_default(monitor: Option<&Monitor>, current: Bounds, size: Size) -> Bounds {
    match monitor {
        Some(monitor) => monitor.work_area.centered(size),
        None => Bounds::new(current.left, current.top, size.width, size.height),
    }
}

/// Where a maximized window lands when the user drags it by the title bar.
///
/// The pointer keeps its relative horizontal position inside the restored
/// window and sits `grab_offset` below its top edge; the result is then
/// clamped into `work_area`.
pub fn drag_out_bounds(
    pointer: Point,
    local_x: f64,
    maximized_width: f64,
    size: Size,
    grab_offset: f64,
    work_area: Option<Bounds>,
) -> Bounds {
    let ratio = if maximized_width > 0.0 {
        (local_x / maximized_width).clamp(MIN_GRAB_RATIO, MAX_GRAB_RATIO)
    } else {
        0.5
    };

    let bounds = Bounds::new(
        pointer.x - size.width * ratio,
        pointer.y - grab_offset,
        size.width,
        size.height,
    );

    match work_area {
        Some(area) => bounds.clamped_into(&area),
        None => bounds,
    }
}

/// Geometry to restore after fullscreen for a window that was not
/// maximized. The captured bounds are reused while they are still visible on
/// `monitor`, otherwise the default size is centered on `fallback`.
pub fn restored_bounds(
    captured: Bounds,
    monitor: Option<&Monitor>,
    fallback: Option<&Monitor>,
    default_size: Size,
) -> Bounds {
    match monitor {
        Some(m) if !captured.is_empty() && m.work_area.intersects(&captured) => captured,
        _ => centered_default(fallback, captured, default_size),
    }
}
