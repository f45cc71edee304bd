//! Shell configuration

use crate::error::ShellResult;
use crate::types::Size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Folder name used under the per-user data and config directories
pub const APP_FOLDER: &str = "NetflixForDesktop";

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Page loaded at startup and after a blocked navigation
    pub home_url: String,

    /// Hosts the content view may navigate to (exact or dot-suffix match)
    pub allowed_domains: Vec<String>,

    /// Window chrome metrics
    pub window: WindowConfig,

    /// Settings store location and key
    pub settings: SettingsConfig,

    /// Rich presence integration
    pub presence: PresenceConfig,

    /// Profile directory handed to the embedded web engine
    pub user_data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title shown in the taskbar
    pub title: String,

    /// Size used when restoring from maximized or fullscreen
    pub default_size: Size,

    /// Height of the custom title bar row
    pub title_bar_height: f64,

    /// Corner radius of the window when not maximized
    pub corner_radius: f64,

    /// Vertical distance between the pointer and the window top when a
    /// maximized window is dragged out of its maximized state
    pub drag_grab_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Per-user namespace holding the settings file
    pub namespace: String,

    /// Value name of the hardware acceleration flag
    pub hardware_acceleration_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Enable rich presence
    pub enabled: bool,

    /// Application identifier registered with the presence peer
    pub application_id: String,

    pub large_image_key: String,

    pub large_image_text: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home_url: "https://www.netflix.com/".to_string(),
            allowed_domains: [
                "netflix.com",
                "www.netflix.com",
                "accounts.google.com",
                "ssl.gstatic.com",
                "fonts.googleapis.com",
                "fonts.gstatic.com",
                "assets.nflxext.com",
                "codex.nflxext.com",
            ]
            .iter()
            .map(|domain| domain.to_string())
            .collect(),
            window: WindowConfig::default(),
            settings: SettingsConfig::default(),
            presence: PresenceConfig::default(),
            user_data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_FOLDER)
                .join("UserData"),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Netflix".to_string(),
            default_size: Size::new(1400.0, 900.0),
            title_bar_height: 42.0,
            corner_radius: 12.0,
            drag_grab_offset: 21.0,
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            namespace: APP_FOLDER.to_string(),
            hardware_acceleration_key: "HardwareAcceleration".to_string(),
        }
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            application_id: "1468319689997418517".to_string(),
            large_image_key: "netflix".to_string(),
            large_image_text: "Netflix For Desktop".to_string(),
        }
    }
}

impl ShellConfig {
    /// Directory holding `shell.json` and the settings file
    pub fn config_dir(namespace: &str) -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(namespace)
    }

    /// Read an override file. Fields missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> ShellResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load `shell.json` from the default config directory, falling back to
    /// defaults when it is missing or invalid.
    pub fn load_or_default() -> Self {
        let path = Self::config_dir(APP_FOLDER).join("shell.json");
        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded shell config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring invalid shell config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.home_url, "https://www.netflix.com/");
        assert_eq!(config.allowed_domains.len(), 8);
        assert_eq!(config.window.default_size, Size::new(1400.0, 900.0));
        assert_eq!(config.window.title_bar_height, 42.0);
        assert_eq!(config.settings.hardware_acceleration_key, "HardwareAcceleration");
        assert!(config.user_data_dir.ends_with("UserData"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shell.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "presence": {{ "enabled": false }}, "window": {{ "corner_radius": 8.0 }} }}"#)
            .unwrap();

        let config = ShellConfig::from_file(&path).unwrap();
        assert!(!config.presence.enabled);
        assert_eq!(config.presence.application_id, "1468319689997418517");
        assert_eq!(config.window.corner_radius, 8.0);
        assert_eq!(config.window.title_bar_height, 42.0);
        assert_eq!(config.home_url, "https://www.netflix.com/");
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shell.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(ShellConfig::from_file(&path).is_err());
    }
}
