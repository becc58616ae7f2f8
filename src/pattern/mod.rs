//! Compiled cookie extraction pattern and raw header scanning.
//!
//! The tracking cookie is pulled out of the raw `Cookie` header with a
//! pattern compiled once per configuration, not per request. The pattern
//! matches the cookie either at the start of the header or after a `;` or
//! `,` delimiter, and captures the value up to the next delimiter. Header
//! grammar predating RFC 6265 allowed comma-separated cookie pairs, so both
//! delimiters are honored on input.

use crate::base::error::ConfigError;
use regex::Regex;

/// Name of the single capture group carrying the cookie value.
const VALUE_GROUP: &str = "value";

/// A cookie-name-specific extraction pattern.
///
/// Compiled at configuration time; immutable and shareable across
/// concurrent requests afterwards. Must be recompiled whenever the
/// configured cookie name changes.
#[derive(Debug, Clone)]
pub struct CookiePattern {
    name: String,
    source: String,
    regex: Regex,
}

impl CookiePattern {
    /// Compile the extraction pattern for `cookie_name`.
    ///
    /// Every non-alphanumeric ASCII character of the name is escaped before
    /// being pasted into the pattern, so names like `my.id` match literally.
    /// Compilation failure or an unexpected capture layout is a fatal
    /// configuration error.
    pub fn compile(cookie_name: &str) -> Result<Self, ConfigError> {
        if cookie_name.is_empty() {
            return Err(ConfigError::EmptySetting("cookie name"));
        }

        let escaped = escape_name(cookie_name);
        let source = format!(
            r"(?:^|[;,][ \t]*){name}=(?P<{group}>[^;,]+)",
            name = escaped,
            group = VALUE_GROUP,
        );
        let regex = Regex::new(&source).map_err(|source| ConfigError::PatternCompile {
            name: cookie_name.to_string(),
            source,
        })?;

        // Exactly the whole match plus the value group; anything else means
        // the name smuggled a capture group past the escaping.
        let has_value_group = regex
            .capture_names()
            .flatten()
            .any(|group| group == VALUE_GROUP);
        if regex.captures_len() != 2 || !has_value_group {
            return Err(ConfigError::PatternCaptures(cookie_name.to_string()));
        }

        Ok(Self {
            name: cookie_name.to_string(),
            source,
            regex,
        })
    }

    /// The cookie name this pattern was compiled for.
    pub fn cookie_name(&self) -> &str {
        &self.name
    }

    /// The pattern text, kept for diagnostics.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Extract the current tracking value from a raw `Cookie` header.
    ///
    /// Attempts exactly one match against the full header string; the first
    /// occurrence of the cookie name wins and later occurrences are ignored.
    /// No match is a normal, silent `None` - malformed headers are not an
    /// error.
    pub fn extract<'h>(&self, header: &'h str) -> Option<&'h str> {
        self.regex
            .captures(header)
            .and_then(|caps| caps.name(VALUE_GROUP))
            .map(|m| m.as_str())
    }
}

/// Escape every non-alphanumeric ASCII character with a backslash.
///
/// Non-ASCII characters carry no pattern meaning and are passed through.
fn escape_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii() && !c.is_ascii_alphanumeric() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
