//! Settings documents - load a tracking configuration from JSON.
//!
//! Hosts that keep their deployment configuration on disk deserialize a
//! [`TrackingSettings`] document and convert it into a validated
//! [`TrackingConfig`]. The document is a thin serde shape; every value still
//! flows through the same setters and validators as the option table, so
//! the two surfaces cannot drift apart.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::base::error::ConfigError;
use crate::config::{expiry, CookieStyle, TrackingConfig};

/// Serializable tracking settings.
///
/// Absent fields keep their defaults; unknown fields are configuration
/// errors.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct TrackingSettings {
    pub tracking: Option<bool>,
    pub style: Option<String>,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub ip_header: Option<String>,
    /// Raw seconds or a compound `[plus] {N unit}...` expression.
    pub expires: Option<String>,
    pub send_header: Option<bool>,
    pub header_name: Option<String>,
    pub note_name: Option<String>,
    pub generated_note_name: Option<String>,
    pub dnt_value: Option<String>,
    pub set_dnt_cookie: Option<bool>,
    pub comply_with_dnt: Option<bool>,
    pub dnt_exempt: Vec<String>,
    pub dnt_exempt_browsers: Vec<String>,
    pub max_value_length: Option<usize>,
}

impl TrackingSettings {
    /// Decode a settings document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::SettingsDecode)
    }

    /// Read and decode a settings document from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(ConfigError::SettingsIo)?;
        Self::from_json(&json)
    }

    /// Validate and convert into a [`TrackingConfig`].
    pub fn into_config(self) -> Result<TrackingConfig, ConfigError> {
        let mut config = TrackingConfig::new();

        if let Some(tracking) = self.tracking {
            config.enabled = tracking;
        }
        if let Some(style) = self.style.as_deref() {
            config.style = CookieStyle::parse(style)?;
        }
        if let Some(name) = self.name.as_deref() {
            config.set_cookie_name(name)?;
        }
        if let Some(domain) = self.domain.as_deref() {
            config.set_cookie_domain(domain)?;
        }
        if let Some(ip_header) = self.ip_header.as_deref() {
            config.set_ip_header(ip_header)?;
        }
        if let Some(expires) = self.expires.as_deref() {
            config.expires = expiry::parse_expiry(expires)?;
        }
        if let Some(send_header) = self.send_header {
            config.send_header = send_header;
        }
        if let Some(header_name) = self.header_name.as_deref() {
            config.set_header_name(header_name)?;
        }
        if let Some(note_name) = self.note_name {
            if note_name.is_empty() {
                return Err(ConfigError::EmptySetting("note name"));
            }
            config.note_name = note_name;
        }
        if let Some(generated_note_name) = self.generated_note_name {
            if generated_note_name.is_empty() {
                return Err(ConfigError::EmptySetting("generated note name"));
            }
            config.generated_note_name = generated_note_name;
        }
        if let Some(dnt_value) = self.dnt_value {
            if dnt_value.is_empty() {
                return Err(ConfigError::EmptySetting("dnt value"));
            }
            config.dnt_value = dnt_value;
        }
        if let Some(set_dnt_cookie) = self.set_dnt_cookie {
            config.set_dnt_cookie = set_dnt_cookie;
        }
        if let Some(comply_with_dnt) = self.comply_with_dnt {
            config.comply_with_dnt = comply_with_dnt;
        }
        for value in &self.dnt_exempt {
            config.push_dnt_exempt(value)?;
        }
        for pattern in &self.dnt_exempt_browsers {
            config.push_dnt_exempt_browser(pattern)?;
        }
        if let Some(max_value_length) = self.max_value_length {
            config.max_value_length = max_value_length;
        }

        Ok(config)
    }
}
