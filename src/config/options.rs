//! String-keyed configuration option table.
//!
//! Hosts that carry configuration as name/value directive pairs apply them
//! here. The table maps each option name to a typed setter with its
//! validation, built once; unknown names and malformed values are fatal
//! configuration errors.

use crate::base::error::ConfigError;
use crate::config::{expiry, CookieStyle, TrackingConfig};

type Setter = fn(&mut TrackingConfig, &str) -> Result<(), ConfigError>;

/// Option names, in the order they are documented to hosts.
const OPTIONS: &[(&str, Setter)] = &[
    ("tracking", |config, value| {
        config.enabled = parse_flag(value)?;
        Ok(())
    }),
    ("style", |config, value| {
        config.style = CookieStyle::parse(value)?;
        Ok(())
    }),
    ("name", |config, value| config.set_cookie_name(value)),
    ("domain", |config, value| config.set_cookie_domain(value)),
    ("ip_header", |config, value| config.set_ip_header(value)),
    ("expires", |config, value| {
        config.expires = expiry::parse_expiry(value)?;
        Ok(())
    }),
    ("send_header", |config, value| {
        config.send_header = parse_flag(value)?;
        Ok(())
    }),
    ("header_name", |config, value| config.set_header_name(value)),
    ("note_name", |config, value| {
        config.note_name = required(value, "note name")?;
        Ok(())
    }),
    ("generated_note_name", |config, value| {
        config.generated_note_name = required(value, "generated note name")?;
        Ok(())
    }),
    ("dnt_value", |config, value| {
        config.dnt_value = required(value, "dnt value")?;
        Ok(())
    }),
    ("set_dnt_cookie", |config, value| {
        config.set_dnt_cookie = parse_flag(value)?;
        Ok(())
    }),
    ("comply_with_dnt", |config, value| {
        config.comply_with_dnt = parse_flag(value)?;
        Ok(())
    }),
    ("dnt_exempt", |config, value| config.push_dnt_exempt(value)),
    ("dnt_exempt_browsers", |config, value| {
        config.push_dnt_exempt_browser(value)
    }),
    ("max_value_length", |config, value| {
        config.max_value_length = value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(value.to_string()))?;
        Ok(())
    }),
];

/// Apply one named option to the configuration.
///
/// Names are matched case-insensitively. List options (`dnt_exempt`,
/// `dnt_exempt_browsers`) append; everything else replaces.
pub fn apply_option(
    config: &mut TrackingConfig,
    name: &str,
    value: &str,
) -> Result<(), ConfigError> {
    for (option, setter) in OPTIONS {
        if option.eq_ignore_ascii_case(name) {
            return setter(config, value);
        }
    }
    Err(ConfigError::UnknownSetting(name.to_string()))
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    const TRUE: &[&str] = &["on", "true", "1", "yes"];
    const FALSE: &[&str] = &["off", "false", "0", "no"];

    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(value)) {
        Ok(true)
    } else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(value)) {
        Ok(false)
    } else {
        Err(ConfigError::InvalidFlag(value.to_string()))
    }
}

fn required(value: &str, setting: &'static str) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptySetting(setting));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_every_option() {
        let mut config = TrackingConfig::new();
        apply_option(&mut config, "tracking", "on").unwrap();
        apply_option(&mut config, "style", "Cookie2").unwrap();
        apply_option(&mut config, "name", "visitor").unwrap();
        apply_option(&mut config, "domain", ".example.com").unwrap();
        apply_option(&mut config, "ip_header", "X-Forwarded-For").unwrap();
        apply_option(&mut config, "expires", "plus 2 weeks").unwrap();
        apply_option(&mut config, "send_header", "true").unwrap();
        apply_option(&mut config, "header_name", "X-Visitor").unwrap();
        apply_option(&mut config, "note_name", "visitor_note").unwrap();
        apply_option(&mut config, "generated_note_name", "visitor_new").unwrap();
        apply_option(&mut config, "dnt_value", "OPTOUT").unwrap();
        apply_option(&mut config, "set_dnt_cookie", "off").unwrap();
        apply_option(&mut config, "comply_with_dnt", "no").unwrap();
        apply_option(&mut config, "dnt_exempt", "OPTOUT").unwrap();
        apply_option(&mut config, "dnt_exempt_browsers", "MSIE 10\\.0").unwrap();
        apply_option(&mut config, "max_value_length", "64").unwrap();

        assert!(config.enabled);
        assert_eq!(config.style, CookieStyle::Cookie2);
        assert_eq!(config.cookie_name(), "visitor");
        assert_eq!(config.expires, 2 * 7 * 86400);
        assert!(config.send_header);
        assert!(!config.set_dnt_cookie);
        assert!(!config.comply_with_dnt);
        assert_eq!(config.dnt_exempt, vec!["OPTOUT"]);
        assert_eq!(config.dnt_exempt_browsers().len(), 1);
        assert_eq!(config.max_value_length, 64);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let mut config = TrackingConfig::new();
        apply_option(&mut config, "TRACKING", "On").unwrap();
        assert!(config.enabled);
    }

    #[test]
    fn test_list_options_append() {
        let mut config = TrackingConfig::new();
        apply_option(&mut config, "dnt_exempt", "OPTOUT").unwrap();
        apply_option(&mut config, "dnt_exempt", "NOTRACK").unwrap();
        assert_eq!(config.dnt_exempt, vec!["OPTOUT", "NOTRACK"]);
    }

    #[test]
    fn test_unknown_setting() {
        let mut config = TrackingConfig::new();
        assert!(matches!(
            apply_option(&mut config, "colour", "blue"),
            Err(ConfigError::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_bad_flag() {
        let mut config = TrackingConfig::new();
        assert!(matches!(
            apply_option(&mut config, "tracking", "maybe"),
            Err(ConfigError::InvalidFlag(_))
        ));
    }

    #[test]
    fn test_empty_string_rejected() {
        let mut config = TrackingConfig::new();
        assert!(apply_option(&mut config, "note_name", "").is_err());
        assert!(apply_option(&mut config, "dnt_value", "").is_err());
    }
}
