//! The host-facing request surface.

use std::collections::HashMap;

use http::HeaderMap;
use time::OffsetDateTime;

/// The narrow slice of a request the filter consumes and mutates.
///
/// Hosts build one per inbound request from their own request object,
/// invoke the filter, and copy the mutations back (or hand the maps to the
/// filter directly when their model allows it). Nothing here is shared
/// across requests; each invocation exclusively owns its parts.
#[derive(Debug)]
pub struct RequestParts {
    /// Inbound request headers. The filter reads `Cookie`, `DNT`,
    /// `User-Agent`, and the configured forwarded-address header, and may
    /// append an echoed `Cookie` and the mirrored header.
    pub headers_in: HeaderMap,

    /// Outbound response headers. The filter only appends, never replaces.
    pub headers_out: HeaderMap,

    /// Side-channel notes for consumption by access logging.
    pub notes: HashMap<String, String>,

    /// Transport-level peer address.
    pub peer_addr: String,

    /// Request arrival time: wall-clock for expiration math, microsecond
    /// resolution for identifier uniqueness.
    pub time: OffsetDateTime,

    /// Whether this is an internally generated sub-request. The filter
    /// only acts on top-level requests.
    pub is_subrequest: bool,
}

impl RequestParts {
    /// Parts for a top-level request arriving now.
    pub fn new(peer_addr: impl Into<String>) -> Self {
        Self {
            headers_in: HeaderMap::new(),
            headers_out: HeaderMap::new(),
            notes: HashMap::new(),
            peer_addr: peer_addr.into(),
            time: OffsetDateTime::now_utc(),
            is_subrequest: false,
        }
    }

    /// Pin the request time, for hosts with their own clock.
    pub fn at(mut self, time: OffsetDateTime) -> Self {
        self.time = time;
        self
    }

    /// Mark as an internally generated sub-request.
    pub fn subrequest(mut self) -> Self {
        self.is_subrequest = true;
        self
    }
}
