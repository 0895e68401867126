//! Unified error types for the background process.

use std::fmt;

// ---------------------------------------------------------------------------
// ColorError
// ---------------------------------------------------------------------------

/// Errors parsing color strings.
///
/// This is the one hard failure in the pipeline: a color string without
/// enough channels cannot be formatted as hex, so callers get an `Err`
/// instead of a degraded value.
#[derive(Debug, PartialEq, Eq)]
pub enum ColorError {
    /// Fewer than three numeric groups were found in the input.
    TooFewComponents { found: usize },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewComponents { found } => {
                write!(f, "expected 3 color components, found {found}")
            }
        }
    }
}

impl std::error::Error for ColorError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// HostError
// ---------------------------------------------------------------------------

/// Errors crossing the browser-host boundary.
#[derive(Debug)]
pub enum HostError {
    /// The transport to the extension shim is gone (stdin closed, writer
    /// task ended).
    Disconnected,
    /// The shim reported a failure for a capability call.
    Remote(String),
    /// A frame or response payload could not be encoded/decoded.
    Codec(serde_json::Error),
    /// Reading or writing the wire failed.
    Io(std::io::Error),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "host transport disconnected"),
            Self::Remote(msg) => write!(f, "host call failed: {msg}"),
            Self::Codec(e) => write!(f, "codec: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<serde_json::Error> for HostError {
    fn from(e: serde_json::Error) -> Self {
        Self::Codec(e)
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ResolveError — per-event
// ---------------------------------------------------------------------------

/// Failure of a single tab-event resolution.
///
/// These are caught and logged by the dispatcher; they never abort the
/// event loop or reach the user.
#[derive(Debug)]
pub enum ResolveError {
    /// Could not read the tab's info from the host.
    TabQuery(HostError),
    /// Could not read the content color scheme preference.
    Preference(HostError),
    /// Could not sample the page's body background color.
    ScriptInjection(HostError),
    /// Pushing the theme to the chrome failed.
    ThemeUpdate(HostError),
    /// The sampled or supplied color string was malformed.
    Color(ColorError),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TabQuery(e) => write!(f, "tab query: {e}"),
            Self::Preference(e) => write!(f, "scheme preference: {e}"),
            Self::ScriptInjection(e) => write!(f, "script injection: {e}"),
            Self::ThemeUpdate(e) => write!(f, "theme update: {e}"),
            Self::Color(e) => write!(f, "color: {e}"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<ColorError> for ResolveError {
    fn from(e: ColorError) -> Self {
        Self::Color(e)
    }
}
