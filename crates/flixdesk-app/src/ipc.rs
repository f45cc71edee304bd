//! IPC between the webviews and the Rust side
//!
//! The title bar view is our own page and may send any window command. The
//! content view runs the remote site, so only its fullscreen notification is
//! honoured.

use serde::Deserialize;

/// IPC message from JavaScript to Rust
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum IpcMessage {
    /// The title bar page finished loading and can receive styling
    TitleBarReady,
    /// Primary-button press on the title bar drag area (CSS pixels)
    TitleBarPress {
        click_count: u32,
        screen_x: f64,
        screen_y: f64,
        local_x: f64,
    },
    WindowMinimize,
    WindowToggleMaximize,
    WindowClose,
    ToggleHardwareAcceleration,
    /// The content document gained or lost its fullscreen element
    FullscreenChanged {
        active: bool,
    },
}

impl IpcMessage {
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str(body) {
            Ok(message) => Some(message),
            Err(e) => {
                log::warn!("Invalid IPC message {:?}: {}", body, e);
                None
            }
        }
    }

    /// Messages the content view is allowed to send
    pub fn allowed_from_content(&self) -> bool {
        matches!(self, IpcMessage::FullscreenChanged { .. })
    }
}

/// The title bar page, loaded into the chrome view
pub const TITLE_BAR_HTML: &str = include_str!("ui/titlebar.html");

/// Injected into the content view: reports fullscreen element changes
pub const FULLSCREEN_BRIDGE: &str = r#"
(function() {
    if (window.__flixdeskFullscreenBridge) return;
    window.__flixdeskFullscreenBridge = true;

    let last = false;
    function report() {
        const active = !!(document.fullscreenElement || document.webkitFullscreenElement);
        if (active === last) return;
        last = active;
        window.ipc.postMessage(JSON.stringify({ cmd: 'fullscreen_changed', active }));
    }

    document.addEventListener('fullscreenchange', report);
    document.addEventListener('webkitfullscreenchange', report);
})();
"#;

/// Script applying a chrome style in the title bar view
pub fn apply_chrome_script(style_json: &str) -> String {
    format!(
        "if(window.flixdesk) {{ flixdesk.applyChrome({}); }}",
        style_json
    )
}

/// Script updating the hardware acceleration indicator
pub fn acceleration_script(enabled: bool) -> String {
    format!(
        "if(window.flixdesk) {{ flixdesk.setAcceleration({}); }}",
        enabled
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flixdesk_chrome::ChromeStyle;
    use flixdesk_core::config::WindowConfig;
    use flixdesk_core::types::WindowState;
    use serde_json::Value;

    #[test]
    fn test_parse_title_bar_press() {
        let message = IpcMessage::parse(
            r#"{"cmd":"title_bar_press","click_count":2,"screen_x":300.5,"screen_y":12,"local_x":280}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            IpcMessage::TitleBarPress {
                click_count: 2,
                screen_x: 300.5,
                screen_y: 12.0,
                local_x: 280.0,
            }
        );
    }

    #[test]
    fn test_parse_unit_commands() {
        assert_eq!(
            IpcMessage::parse(r#"{"cmd":"window_toggle_maximize"}"#),
            Some(IpcMessage::WindowToggleMaximize)
        );
        assert_eq!(
            IpcMessage::parse(r#"{"cmd":"toggle_hardware_acceleration"}"#),
            Some(IpcMessage::ToggleHardwareAcceleration)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed() {
        assert_eq!(IpcMessage::parse(r#"{"cmd":"open_devtools"}"#), None);
        assert_eq!(IpcMessage::parse("window_close"), None);
    }

    #[test]
    fn test_content_may_only_report_fullscreen() {
        let fullscreen = IpcMessage::parse(r#"{"cmd":"fullscreen_changed","active":true}"#).unwrap();
        assert!(fullscreen.allowed_from_content());
        assert!(!IpcMessage::WindowClose.allowed_from_content());
        assert!(!IpcMessage::ToggleHardwareAcceleration.allowed_from_content());
    }

    /// Every field the chrome style serializes must be read by the page
    /// under the same name and shape.
    #[test]
    fn test_title_bar_page_reads_chrome_style_as_serialized() {
        let style = ChromeStyle::for_window(WindowState::Normal, false, &WindowConfig::default());
        let json = serde_json::to_value(style).unwrap();
        let fields = json.as_object().unwrap();

        for (key, value) in fields {
            let path = format!("style.{}", key);
            assert!(TITLE_BAR_HTML.contains(&path), "page never reads {}", path);

            match value {
                Value::Object(corners) => {
                    for corner in corners.keys().filter(|c| c.starts_with("top")) {
                        let corner_path = format!("{}.{}", path, corner);
                        assert!(TITLE_BAR_HTML.contains(&corner_path), "page never reads {}", corner_path);
                    }
                }
                _ => {
                    let member = format!("{}.", path);
                    assert!(
                        !TITLE_BAR_HTML.contains(&member),
                        "page reads {} as an object but it serializes as {}",
                        path,
                        value
                    );
                }
            }
        }
    }

    #[test]
    fn test_title_bar_page_switches_glyph_on_square_corners() {
        let maximized = ChromeStyle::for_window(WindowState::Maximized, false, &WindowConfig::default());
        assert_eq!(serde_json::to_value(maximized).unwrap()["windowRadius"], 0.0);
        assert!(TITLE_BAR_HTML.contains("style.windowRadius === 0"));
    }

    #[test]
    fn test_title_bar_page_posts_known_commands() {
        for cmd in [
            "title_bar_ready",
            "title_bar_press",
            "window_minimize",
            "window_toggle_maximize",
            "window_close",
            "toggle_hardware_acceleration",
        ] {
            let body = if cmd == "title_bar_press" {
                format!(r#"{{"cmd":"{}","click_count":1,"screen_x":0,"screen_y":0,"local_x":0}}"#, cmd)
            } else {
                format!(r#"{{"cmd":"{}"}}"#, cmd)
            };
            assert!(TITLE_BAR_HTML.contains(&format!("'{}'", cmd)), "page never sends {}", cmd);
            assert!(IpcMessage::parse(&body).is_some(), "{} does not parse", cmd);
        }
    }

    #[test]
    fn test_scripts() {
        assert_eq!(
            acceleration_script(false),
            "if(window.flixdesk) { flixdesk.setAcceleration(false); }"
        );
        assert!(apply_chrome_script("{}").contains("applyChrome({})"));
    }
}
