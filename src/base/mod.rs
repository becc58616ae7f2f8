//! Base types and error handling.
//!
//! Provides the configuration-time error taxonomy. Per-request code paths
//! never surface errors: anomalies have defined fallbacks and policy
//! declines are a normal [`Disposition`](crate::filter::Disposition).

pub mod error;
