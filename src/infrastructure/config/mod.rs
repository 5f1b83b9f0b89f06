//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot runtime configuration.
///
/// This is the static part; prefix, owner and the feature toggles live in
/// the JSON settings file and can change while the bot runs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub settings_path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Chat the console pretends to type into
    pub chat_jid: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "kevo-bot".to_string(),
                settings_path: PathBuf::from("./data/settings.json"),
            },
            adapters: AdaptersConfig {
                console: Some(ConsoleConfig {
                    enabled: true,
                    chat_jid: "94701234567@s.whatsapp.net".to_string(),
                }),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.settings_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("bot.settings-path is empty".to_string()));
        }
        if let Some(console) = &self.adapters.console {
            if console.enabled && !console.chat_jid.contains('@') {
                return Err(ConfigError::InvalidValue(format!(
                    "adapters.console.chat-jid is not a JID: {}",
                    console.chat_jid
                )));
            }
        }
        Ok(())
    }

    /// The console chat JID, if the console adapter is enabled
    pub fn console_chat(&self) -> Option<&str> {
        self.adapters
            .console
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.chat_jid.as_str())
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(path) = std::env::var("KEVO_SETTINGS_PATH") {
            config.bot.settings_path = PathBuf::from(path);
        }

        if let Ok(jid) = std::env::var("KEVO_CHAT_JID") {
            if let Some(ref mut console) = config.adapters.console {
                console.chat_jid = jid;
            }
        }

        config
    }
}
