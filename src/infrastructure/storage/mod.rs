//! File-based settings storage

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use crate::application::errors::SettingsError;
use crate::domain::entities::{AutoType, Settings, Toggle};

/// Settings mirrored to a JSON file.
///
/// Reads come from memory. Every mutation is written through to disk
/// before returning; a failed write is logged and the in-memory value is
/// kept.
pub struct SettingsManager {
    path: PathBuf,
    settings: RwLock<Settings>,
}

impl SettingsManager {
    /// Load settings from `path`, merged key by key over the defaults.
    ///
    /// A missing file is created with the defaults. An unreadable file or
    /// one that is not a JSON object is left alone and the defaults are used
    /// instead. A known key holding a bad value keeps its default.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = if path.exists() {
            match Self::read_file(&path) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to load settings from {}: {}, using defaults", path.display(), e);
                    Settings::default()
                }
            }
        } else {
            let settings = Settings::default();
            if let Err(e) = Self::write_file(&path, &settings) {
                tracing::error!("Error saving settings: {}", e);
            }
            settings
        };

        Self {
            path,
            settings: RwLock::new(settings),
        }
    }

    fn read_file(path: &Path) -> Result<Settings, SettingsError> {
        let data = std::fs::read_to_string(path)?;
        let file: Map<String, Value> = serde_json::from_str(&data)?;

        let mut merged = match serde_json::to_value(Settings::default())? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in file {
            if let Err(e) = validate(&key, &value) {
                tracing::warn!("Ignoring setting in {}: {}", path.display(), e);
                continue;
            }
            merged.insert(key, value);
        }

        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    fn write_file(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.settings.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Write the current settings to disk
    pub fn save(&self) -> Result<(), SettingsError> {
        let settings = self.read();
        Self::write_file(&self.path, &settings)
    }

    pub fn snapshot(&self) -> Settings {
        self.read().clone()
    }

    /// Raw value for `key` as it would appear in the file
    pub fn get(&self, key: &str) -> Option<Value> {
        let value = serde_json::to_value(&*self.read()).ok()?;
        value.get(key).cloned()
    }

    /// Set `key` to `value` and persist.
    ///
    /// Known keys must carry a value of the right type; unknown keys take
    /// anything.
    pub fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        validate(key, &value)?;
        {
            let mut settings = self.settings.write().map_err(|_| SettingsError::Poisoned)?;

            let mut raw = serde_json::to_value(&*settings)?;
            if let Value::Object(map) = &mut raw {
                map.insert(key.to_string(), value);
            }
            let updated: Settings = serde_json::from_value(raw).map_err(|e| SettingsError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
            *settings = updated;
        }

        if let Err(e) = self.save() {
            tracing::error!("Error saving settings: {}", e);
        }
        Ok(())
    }

    pub fn prefix(&self) -> String {
        self.read().prefix.clone()
    }

    pub fn owner(&self) -> String {
        self.read().owner.clone()
    }

    pub fn bot_name(&self) -> String {
        self.read().bot_name.clone()
    }

    pub fn autotype(&self) -> AutoType {
        self.read().autotype
    }

    pub fn toggle(&self, toggle: Toggle) -> bool {
        let settings = self.read();
        match toggle {
            Toggle::AutoRead => settings.autoread,
            Toggle::AntiBadWord => settings.antibadword,
            Toggle::Welcome => settings.welcome,
        }
    }

    pub fn is_owner(&self, jid: &str) -> bool {
        self.read().owner == jid
    }

    pub fn set_prefix(&self, prefix: &str) -> Result<(), SettingsError> {
        self.set("prefix", Value::from(prefix))
    }

    pub fn set_autotype(&self, mode: AutoType) -> Result<(), SettingsError> {
        self.set("autotype", Value::from(mode.as_str()))
    }

    pub fn set_toggle(&self, toggle: Toggle, enabled: bool) -> Result<(), SettingsError> {
        self.set(toggle.key(), Value::from(enabled))
    }
}

/// Check a value against the type its key expects. Unknown keys take anything.
fn validate(key: &str, value: &Value) -> Result<(), SettingsError> {
    let reason = match key {
        "prefix" if value.as_str() == Some("") => "prefix cannot be empty".to_string(),
        "prefix" | "owner" | "botName" if !value.is_string() => format!("expected a string, got {}", value),
        "autotype" => match serde_json::from_value::<AutoType>(value.clone()) {
            Ok(_) => return Ok(()),
            Err(_) => format!("expected one of all/pm/group/off, got {}", value),
        },
        "autoread" | "antibadword" | "welcome" if !value.is_boolean() => {
            format!("expected true or false, got {}", value)
        }
        _ => return Ok(()),
    };

    Err(SettingsError::InvalidValue {
        key: key.to_string(),
        reason,
    })
}
