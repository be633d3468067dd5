//! `alertlift.toml` configuration.
//!
//! Every field is optional; an absent file means defaults.
//!
//! # Example
//!
//! ```toml
//! [alerts]
//! marker = "alert-message"                              # class substring marking an alert
//! tags = ["a", "div"]                                   # elements that may be alerts
//! wrapper_tag = "div"
//! wrapper_classes = ["post-alerts", "no-external-indicators"]
//! layouts = ["post", "project"]                         # layouts the hook acts on
//! strip_trailing_hr = true
//! token_match = false                                   # whole class token instead of substring
//! default_layout = "post"                               # layout assumed by the CLI
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::alerts::AlertOptions;
use crate::error::ConfigError;
use crate::log;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "alertlift.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub alerts: AlertOptions,
}

impl Config {
    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        for field in &ignored {
            log!("warning"; "unknown config field `{}` ignored", field);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load `path`. With `required` unset a missing file yields defaults.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::Io(path.to_path_buf(), err)),
        };
        Self::from_str(&content)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let alerts = &self.alerts;
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.to_owned()));

        if alerts.marker.trim().is_empty() {
            return invalid("alerts.marker must not be empty");
        }
        if alerts.tags.is_empty() {
            return invalid("alerts.tags must name at least one element");
        }
        if let Some(tag) = alerts.tags.iter().find(|t| !is_element_name(t)) {
            return Err(ConfigError::Validation(format!(
                "alerts.tags: `{tag}` is not an element name"
            )));
        }
        if !is_element_name(&alerts.wrapper_tag) {
            return Err(ConfigError::Validation(format!(
                "alerts.wrapper_tag: `{}` is not an element name",
                alerts.wrapper_tag
            )));
        }
        if alerts.wrapper_classes.is_empty() {
            return invalid("alerts.wrapper_classes must contain at least one class");
        }
        if alerts
            .wrapper_classes
            .iter()
            .any(|c| c.is_empty() || c.contains(|ch: char| ch.is_whitespace() || ch == '"'))
        {
            return invalid("alerts.wrapper_classes entries must be single class names");
        }
        Ok(())
    }
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
