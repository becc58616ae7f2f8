//! Cookie wire-format rendering and side-effect application.
//!
//! Renders the outgoing cookie attribute string in the dialect the scope is
//! configured for, then dual-writes the result: the response header
//! (`Set-Cookie` or `Set-Cookie2`), an inbound echo when the request
//! arrived without the cookie, the side-channel notes for access logging,
//! and optionally the mirrored header on both sides.
//!
//! Dialect rules:
//! - Netscape: `; expires=<Www, DD-Mon-YY hh:mm:ss GMT>`
//! - RFC 2109 (`Cookie`) and RFC 2965 (`Cookie2`): `; max-age=<seconds>`
//! - a zero lifetime renders no expiration attribute at all (session
//!   cookie), in every dialect, even under DNT

use std::fmt::Write;

use http::header::{HeaderName, HeaderValue, COOKIE};
use time::macros::format_description;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::config::{CookieStyle, TrackingConfig};
use crate::filter::RequestParts;

/// A rendered outgoing cookie: the response header to add it under and the
/// full attribute string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCookie {
    pub header: HeaderName,
    pub text: String,
}

/// Render the outgoing cookie attribute string.
///
/// `use_dnt_expiration` selects the fixed DNT expiration point over the
/// rolling one; a rolling expiry on a refusal marker would itself allow
/// tracking by expiry date.
pub fn render(
    config: &TrackingConfig,
    value: &str,
    use_dnt_expiration: bool,
    now: OffsetDateTime,
) -> RenderedCookie {
    let mut text = format!("{}={}; path=/", config.cookie_name(), value);

    if config.expires > 0 {
        if config.style.uses_max_age() {
            let max_age = if use_dnt_expiration {
                config.dnt_max_age - now.unix_timestamp()
            } else {
                config.expires
            };
            let _ = write!(text, "; max-age={max_age}");
        } else if use_dnt_expiration {
            let _ = write!(text, "; expires={}", config.dnt_expires);
        } else {
            let expires_at = now + Duration::seconds(config.expires);
            let _ = write!(text, "; expires={}", format_expires(expires_at));
        }
    }

    if let Some(domain) = config.cookie_domain() {
        let _ = write!(text, "; domain={domain}");
        if config.style == CookieStyle::Cookie2 {
            text.push_str("; version=1");
        }
    }

    RenderedCookie {
        header: config.style.response_header(),
        text,
    }
}

/// Apply the side effects for a determined tracking value.
///
/// Returns `false` - with zero side effects - when the value cannot form a
/// legal header value; the filter downgrades such a request to Declined.
///
/// `was_generated` drives the generation note; `had_inbound` suppresses the
/// inbound echo so a request that already carried the cookie never ends up
/// with two inbound copies of it.
pub fn apply(
    config: &TrackingConfig,
    parts: &mut RequestParts,
    rendered: &RenderedCookie,
    value: &str,
    was_generated: bool,
    had_inbound: bool,
) -> bool {
    let Ok(cookie_value) = HeaderValue::from_str(&rendered.text) else {
        tracing::warn!(cookie = %rendered.text, "rendered cookie is not a legal header value");
        return false;
    };
    let Ok(raw_value) = HeaderValue::from_str(value) else {
        tracing::warn!(value = %value, "tracking value is not a legal header value");
        return false;
    };

    // Outbound, additive: never replaces cookies set by other stages.
    parts
        .headers_out
        .append(rendered.header.clone(), cookie_value.clone());

    // Echo into the inbound header so downstream handlers observe the
    // cookie without a round trip; only when none was there, or the app
    // would see the same name twice with old and new values.
    if !had_inbound {
        parts.headers_in.append(COOKIE, cookie_value);
    }

    parts.notes.insert(
        config.generated_note_name.clone(),
        if was_generated { "1" } else { "0" }.to_string(),
    );
    parts
        .notes
        .insert(config.note_name.clone(), value.to_string());

    if config.send_header {
        parts
            .headers_in
            .append(config.header_name.clone(), raw_value.clone());
        parts
            .headers_out
            .append(config.header_name.clone(), raw_value);
    }

    true
}

/// Netscape expiration date: `Www, DD-Mon-YY hh:mm:ss GMT`.
fn format_expires(at: OffsetDateTime) -> String {
    let format = format_description!(
        "[weekday repr:short], [day]-[month repr:short]-[year repr:last_two] [hour]:[minute]:[second] GMT"
    );
    at.to_offset(UtcOffset::UTC)
        .format(format)
        .expect("expires format should not fail")
}
