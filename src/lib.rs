//! # tracknet
//!
//! A request-stage visitor tracking filter for Rust HTTP servers.
//!
//! `tracknet` assigns, reads, and maintains an opaque tracking identifier
//! carried in an HTTP cookie, running once per top-level request before any
//! other handler touches the cookie header. It honors Do Not Track browser
//! signals and per-deployment exemption policies, and renders the outgoing
//! cookie in any of the three legacy expiration dialects.
//!
//! ## Features
//!
//! - **Cookie Scanning**: first-occurrence extraction from the raw `Cookie`
//!   header via a pattern compiled once per configuration
//! - **DNT Policy**: comply, withhold, or set a refusal marker; exempt values
//!   and exempt browsers override compliance
//! - **Three Dialects**: Netscape `expires=` plus RFC 2109 and RFC 2965
//!   `max-age=` rendering, with `Set-Cookie2` support
//! - **Dual-Write**: outbound header, inbound echo for downstream handlers,
//!   side-channel notes for access logging, optional mirrored header
//! - **Pluggable Identifiers**: swap the identifier generator without
//!   touching policy or rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use tracknet::config::TrackingConfig;
//! use tracknet::filter::{Disposition, RequestParts, TrackingFilter};
//!
//! let mut config = TrackingConfig::new();
//! config.enabled = true;
//! config.expires = 600;
//!
//! let filter = TrackingFilter::new(config);
//! let mut parts = RequestParts::new("203.0.113.5");
//! let disposition = filter.process(&mut parts);
//!
//! assert_eq!(disposition, Disposition::Handled);
//! assert!(parts.headers_out.contains_key(http::header::SET_COOKIE));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core types and error definitions
//! - [`config`] - Per-scope configuration, option table, settings documents
//! - [`pattern`] - Compiled cookie extraction pattern and header scanning
//! - [`policy`] - DNT and exemption evaluation
//! - [`ident`] - Identifier generation and client address resolution
//! - [`render`] - Cookie wire-format rendering and side-effect application
//! - [`filter`] - The per-request orchestrator
//!
//! ## Ordering Contract
//!
//! The filter must run before any other stage reads cookies: it may inject
//! the freshly set cookie into the inbound header so downstream handlers
//! observe it without a round trip. Hosts should invoke
//! [`filter::TrackingFilter::process`] at their earliest request hook, and
//! only for top-level requests.

pub mod base;
pub mod config;
pub mod filter;
pub mod ident;
pub mod pattern;
pub mod policy;
pub mod render;
