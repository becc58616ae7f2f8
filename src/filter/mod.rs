//! The per-request orchestrator.
//!
//! One invocation per top-level request, synchronous, single-pass:
//! scan the inbound cookie header, evaluate DNT/exemption policy, mint an
//! identifier if needed, render and dual-write the result. Failures
//! downgrade to [`Disposition::Declined`] rather than erroring the request;
//! a declined request has zero observable side effects.

pub mod request;

pub use request::RequestParts;

use std::sync::Arc;

use http::header::{COOKIE, USER_AGENT};

use crate::config::TrackingConfig;
use crate::ident::{self, AddressTimestampGenerator, IdentifierGenerator};
use crate::policy::{self, PolicyAction};
use crate::render;

/// What the filter did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No action taken: filter disabled, sub-request, exempt value, DNT
    /// withholding, or a value that could not be written.
    Declined,
    /// A tracking cookie was set and all side effects applied.
    Handled,
}

/// The tracking filter for one routing scope.
///
/// Holds the immutable scope configuration and the identifier-generation
/// capability; concurrent requests share it read-only.
pub struct TrackingFilter {
    config: TrackingConfig,
    generator: Arc<dyn IdentifierGenerator>,
}

impl TrackingFilter {
    /// A filter with the default address-and-timestamp generator.
    pub fn new(config: TrackingConfig) -> Self {
        Self::with_generator(config, Arc::new(AddressTimestampGenerator))
    }

    /// A filter with a custom identifier generator.
    pub fn with_generator(config: TrackingConfig, generator: Arc<dyn IdentifierGenerator>) -> Self {
        Self { config, generator }
    }

    /// The scope configuration.
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Process one request.
    ///
    /// Must run before any other stage reads cookies; only the first
    /// physical `Cookie` header instance is scanned.
    pub fn process(&self, parts: &mut RequestParts) -> Disposition {
        if !self.config.enabled || parts.is_subrequest {
            return Disposition::Declined;
        }

        let current = parts
            .headers_in
            .get(COOKIE)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| self.config.pattern().extract(header))
            .map(str::to_owned);
        if let Some(value) = &current {
            tracing::debug!(value = %value, "existing tracking cookie");
        }

        let dnt = parts
            .headers_in
            .get("dnt")
            .and_then(|header| header.to_str().ok());
        let user_agent = parts
            .headers_in
            .get(USER_AGENT)
            .and_then(|header| header.to_str().ok());

        let action = policy::evaluate(&self.config, current.as_deref(), dnt, user_agent);

        let (value, use_dnt_expiration, was_generated) = match action {
            PolicyAction::Exempt => return Disposition::Declined,
            PolicyAction::Withhold => {
                tracing::debug!("complying with DNT, withholding cookie");
                return Disposition::Declined;
            }
            PolicyAction::SetDntMarker => (self.config.dnt_value.clone(), true, false),
            PolicyAction::Reuse(value) => (value, false, false),
            PolicyAction::Generate => {
                let forwarded = self
                    .config
                    .ip_header
                    .as_ref()
                    .and_then(|name| parts.headers_in.get(name))
                    .and_then(|header| header.to_str().ok());
                let address = ident::client_address(forwarded, &parts.peer_addr);
                let micros = (parts.time.unix_timestamp_nanos() / 1_000) as i64;
                let token = self.generator.generate(address, micros);
                let value = policy::bound_value(&token, self.config.max_value_length).to_string();
                (value, false, true)
            }
        };

        let rendered = render::render(&self.config, &value, use_dnt_expiration, parts.time);
        tracing::debug!(cookie = %rendered.text, generated = was_generated, "setting tracking cookie");

        let had_inbound = current.is_some();
        if !render::apply(
            &self.config,
            parts,
            &rendered,
            &value,
            was_generated,
            had_inbound,
        ) {
            return Disposition::Declined;
        }

        Disposition::Handled
    }
}
