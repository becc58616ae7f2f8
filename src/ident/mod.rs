//! Identifier generation and client address resolution.
//!
//! New tracking identifiers are minted from the resolved client address and
//! the request timestamp. The generator is a capability: deployments with
//! their own identifier scheme swap it on the filter without touching
//! policy or rendering.

/// Capability for minting new tracking identifiers.
///
/// Implementations receive the resolved client address and the request
/// timestamp in microseconds, and return an opaque ASCII token. The filter
/// bounds the token to the configured maximum length afterwards, so
/// implementations need not worry about it.
pub trait IdentifierGenerator: Send + Sync {
    fn generate(&self, address: &str, timestamp_micros: i64) -> String;
}

/// The default generator: `<address>.<microsecond timestamp>`.
///
/// Unique enough for tracking purposes - two requests from the same address
/// in the same microsecond collapse into one visitor, which is acceptable
/// for log correlation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressTimestampGenerator;

impl IdentifierGenerator for AddressTimestampGenerator {
    fn generate(&self, address: &str, timestamp_micros: i64) -> String {
        format!("{address}.{timestamp_micros}")
    }
}

/// Resolve the client address for identifier generation.
///
/// When a forwarded-for-style header is configured and present, the last
/// comma-delimited entry is the address the nearest proxy appended; it is
/// trimmed and used. Otherwise the transport peer address stands.
pub fn client_address<'r>(forwarded: Option<&'r str>, peer_addr: &'r str) -> &'r str {
    match forwarded {
        Some(header) => {
            let last = header.rsplit(',').next().unwrap_or(header).trim();
            if last.is_empty() {
                peer_addr
            } else {
                last
            }
        }
        None => peer_addr,
    }
}
