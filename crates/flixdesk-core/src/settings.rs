//! Per-user settings store and the hardware acceleration flag
//!
//! The store is a flat JSON object in the user's config directory. Reads
//! never fail from the caller's point of view: a missing file, a missing key
//! or an unreadable value all yield the default. Writes are best-effort.

use crate::config::{SettingsConfig, ShellConfig};
use crate::error::{ShellError, ShellResult};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Browser arguments applied when hardware acceleration is turned off
pub const DISABLE_ACCELERATION_ARGS: &str =
    "--disable-gpu --disable-accelerated-2d-canvas --disable-accelerated-video-decode";

/// Key-value access to a per-user settings namespace
pub trait SettingsStore {
    /// Read a raw value. `Ok(None)` means the value is absent.
    fn read_value(&self, name: &str) -> ShellResult<Option<Value>>;

    /// Write a raw value, preserving the other values in the namespace
    fn write_value(&mut self, name: &str, value: Value) -> ShellResult<()>;
}

/// Settings namespace backed by a JSON object file
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/<namespace>/settings.json`
    pub fn for_namespace(namespace: &str) -> Self {
        Self::new(ShellConfig::config_dir(namespace).join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> ShellResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(map) => Ok(map),
            other => Err(ShellError::settings(format!(
                "expected an object in {}, found {}",
                self.path.display(),
                other
            ))),
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    fn read_value(&self, name: &str) -> ShellResult<Option<Value>> {
        Ok(self.read_map()?.get(name).cloned())
    }

    fn write_value(&mut self, name: &str, value: Value) -> ShellResult<()> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(name.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Interpret a stored value as a boolean. Strings are parsed
/// case-insensitively so values written by hand (`"False"`) still count.
fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// The persisted hardware acceleration flag
pub struct AccelerationSetting<S: SettingsStore> {
    store: S,
    key: String,
}

impl<S: SettingsStore> AccelerationSetting<S> {
    pub fn new(store: S, config: &SettingsConfig) -> Self {
        Self {
            store,
            key: config.hardware_acceleration_key.clone(),
        }
    }

    /// Read the flag. Defaults to `true` on absence or any failure.
    pub fn load(&self) -> bool {
        match self.store.read_value(&self.key) {
            Ok(Some(value)) => parse_bool(&value).unwrap_or_else(|| {
                log::debug!("Unparsable {} value {}, using default", self.key, value);
                true
            }),
            Ok(None) => true,
            Err(e) => {
                log::debug!("Settings read failed, using default: {}", e);
                true
            }
        }
    }

    /// Persist the flag. Failures are ignored.
    pub fn save(&mut self, enabled: bool) {
        if let Err(e) = self.store.write_value(&self.key, Value::Bool(enabled)) {
            log::debug!("Settings write failed: {}", e);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// What the caller should do after the user answered the restart prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The new value was persisted; relaunch the process to apply it
    Restart,
    /// The in-memory value was reverted; nothing was persisted
    Reverted,
    /// No toggle was pending
    Idle,
}

/// In-memory hardware acceleration flag plus the pending-restart workflow.
///
/// The in-memory and persisted values differ only between `begin_toggle`
/// and the matching `confirm`/`decline`.
pub struct AccelerationToggle<S: SettingsStore> {
    setting: AccelerationSetting<S>,
    enabled: bool,
    pending: bool,
}

impl<S: SettingsStore> AccelerationToggle<S> {
    /// Load the persisted value once
    pub fn load(setting: AccelerationSetting<S>) -> Self {
        let enabled = setting.load();
        log::info!(
            "Hardware acceleration: {}",
            if enabled { "ON" } else { "OFF" }
        );
        Self {
            setting,
            enabled,
            pending: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Extra browser arguments for the current in-memory value
    pub fn browser_arguments(&self) -> &'static str {
        if self.enabled {
            ""
        } else {
            DISABLE_ACCELERATION_ARGS
        }
    }

    /// Flip the in-memory value and wait for the restart decision.
    /// Returns the new in-memory value.
    pub fn begin_toggle(&mut self) -> bool {
        if !self.pending {
            self.enabled = !self.enabled;
            self.pending = true;
        }
        self.enabled
    }

    /// The user accepted the restart
    pub fn confirm(&mut self) -> ToggleOutcome {
        if !self.pending {
            return ToggleOutcome::Idle;
        }
        self.pending = false;
        self.setting.save(self.enabled);
        ToggleOutcome::Restart
    }

    /// The user declined the restart
    pub fn decline(&mut self) -> ToggleOutcome {
        if !self.pending {
            return ToggleOutcome::Idle;
        }
        self.pending = false;
        self.enabled = !self.enabled;
        ToggleOutcome::Reverted
    }

    pub fn setting(&self) -> &AccelerationSetting<S> {
        &self.setting
    }
}
