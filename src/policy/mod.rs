//! Do Not Track and exemption policy evaluation.
//!
//! One decision per request: given the inbound tracking value and the DNT
//! and User-Agent headers, pick the action the filter takes. The decision
//! table, in order of precedence: exempt values are never touched; a
//! complying request either withholds the cookie or sets the refusal
//! marker; everything else re-presents the inbound value or mints a fresh
//! identifier.

use crate::config::TrackingConfig;

/// The evaluator's verdict for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyAction {
    /// The inbound value is on the exempt list; leave the request untouched,
    /// with no side effects at all. Exempt values (an opt-out marker, say)
    /// may carry a lifespan set by some other process that this filter's
    /// expiry policy would clobber.
    Exempt,
    /// Complying with DNT and configured not to set a refusal marker:
    /// nothing is set this request.
    Withhold,
    /// Complying with DNT: set the configured refusal marker with the fixed
    /// DNT expiration.
    SetDntMarker,
    /// Re-present the inbound value, already truncated to the length bound.
    Reuse(String),
    /// No usable inbound value (absent, or a stale refusal marker from a
    /// previously complying request): mint a fresh identifier.
    Generate,
}

/// Evaluate the policy for one request.
///
/// `dnt_header` and `user_agent` are the raw header texts, absent when the
/// request did not carry them.
pub fn evaluate(
    config: &TrackingConfig,
    current_value: Option<&str>,
    dnt_header: Option<&str>,
    user_agent: Option<&str>,
) -> PolicyAction {
    // Exempt values win over everything, including DNT.
    if let Some(value) = current_value {
        if !config.dnt_exempt.is_empty()
            && config
                .dnt_exempt
                .iter()
                .any(|exempt| exempt.eq_ignore_ascii_case(value))
        {
            tracing::debug!(value = %value, "exempt tracking value, not modifying");
            return PolicyAction::Exempt;
        }
    }

    // DNT is requested if the header is present and not explicitly disabled
    // by the user with a literal "0".
    let dnt_requested = dnt_header.is_some_and(|v| v != "0");

    // A deployment may choose to ignore the DNT settings of browsers known
    // to ship with DNT enabled by default. First pattern in declaration
    // order wins.
    let mut browser_exempt = false;
    if dnt_requested && !config.dnt_exempt_browsers().is_empty() {
        if let Some(ua) = user_agent {
            if let Some(position) = config
                .dnt_exempt_browsers()
                .iter()
                .position(|pattern| pattern.is_match(ua))
            {
                tracing::debug!(user_agent = %ua, position, "browser is DNT exempt");
                browser_exempt = true;
            }
        }
    }

    let complying = dnt_requested && config.comply_with_dnt && !browser_exempt;

    if complying {
        if !config.set_dnt_cookie {
            return PolicyAction::Withhold;
        }
        return PolicyAction::SetDntMarker;
    }

    match current_value {
        // A leftover refusal marker from a previously complying request is
        // not a usable identifier; regenerate.
        Some(value) if value.eq_ignore_ascii_case(&config.dnt_value) => PolicyAction::Generate,
        Some(value) => {
            PolicyAction::Reuse(bound_value(value, config.max_value_length).to_string())
        }
        None => PolicyAction::Generate,
    }
}

/// Truncate a candidate value to the configured maximum length.
///
/// The single length policy for every value this filter sets: truncate,
/// never reject. Truncation backs off to a character boundary so a
/// multi-byte sequence is never split.
pub fn bound_value(value: &str, max_length: usize) -> &str {
    if value.len() <= max_length {
        return value;
    }
    let mut end = max_length;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
