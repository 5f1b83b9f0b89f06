use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::message::ChatKind;

/// When the bot shows a typing indicator before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AutoType {
    All,
    Pm,
    Group,
    #[default]
    Off,
}

impl AutoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoType::All => "all",
            AutoType::Pm => "pm",
            AutoType::Group => "group",
            AutoType::Off => "off",
        }
    }

    pub fn applies_to(&self, kind: ChatKind) -> bool {
        match self {
            AutoType::All => true,
            AutoType::Pm => kind == ChatKind::Private,
            AutoType::Group => kind == ChatKind::Group,
            AutoType::Off => false,
        }
    }
}

impl FromStr for AutoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(AutoType::All),
            "pm" => Ok(AutoType::Pm),
            "group" => Ok(AutoType::Group),
            "off" => Ok(AutoType::Off),
            other => Err(format!("expected one of all/pm/group/off, got '{}'", other)),
        }
    }
}

impl fmt::Display for AutoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted bot settings.
///
/// Missing keys take their defaults on load; keys this type does not know
/// about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub prefix: String,
    pub owner: String,
    pub bot_name: String,
    pub autotype: AutoType,
    pub autoread: bool,
    pub antibadword: bool,
    pub welcome: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: ".".to_string(),
            owner: "94701234567@s.whatsapp.net".to_string(),
            bot_name: "KEVO-MD".to_string(),
            autotype: AutoType::Off,
            autoread: true,
            antibadword: false,
            welcome: true,
            extra: Map::new(),
        }
    }
}

/// Boolean feature toggles addressable by key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    AutoRead,
    AntiBadWord,
    Welcome,
}

impl Toggle {
    pub fn key(&self) -> &'static str {
        match self {
            Toggle::AutoRead => "autoread",
            Toggle::AntiBadWord => "antibadword",
            Toggle::Welcome => "welcome",
        }
    }
}
