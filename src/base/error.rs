use thiserror::Error;

/// Configuration-load errors.
///
/// All of these are fatal at setup time: a scope must not start serving
/// requests with an invalid tracking configuration. Nothing on the
/// per-request path produces an error; the worst per-request outcome is
/// "no tracking cookie is set", which is always safe.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cookie pattern for {name:?} failed to compile")]
    PatternCompile {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("cookie pattern for {0:?} has an unexpected capture layout")]
    PatternCaptures(String),
    #[error("cookie domain {0:?} must begin with a dot")]
    DomainLeadingDot(String),
    #[error("cookie domain {0:?} must contain at least one embedded dot")]
    DomainEmbeddedDot(String),
    #[error("{0} may not be empty")]
    EmptySetting(&'static str),
    #[error("unknown setting {0:?}")]
    UnknownSetting(String),
    #[error("invalid cookie style {0:?}")]
    InvalidStyle(String),
    #[error("invalid flag value {0:?}")]
    InvalidFlag(String),
    #[error("invalid numeric value {0:?}")]
    InvalidNumber(String),
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),
    #[error("bad expires code {0:?}: numeric value expected")]
    ExpiresNumberExpected(String),
    #[error("bad expires code: missing unit after {0:?}")]
    ExpiresMissingUnit(String),
    #[error("bad expires code: unrecognized unit {0:?}")]
    ExpiresUnknownUnit(String),
    #[error("browser exemption pattern {pattern:?} failed to compile")]
    BrowserPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("settings document could not be read")]
    SettingsIo(#[source] std::io::Error),
    #[error("settings document could not be decoded")]
    SettingsDecode(#[source] serde_json::Error),
}
