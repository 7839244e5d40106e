//! Probe error types.

use thiserror::Error;

/// Result type alias for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while configuring or running the probe.
///
/// Configuration problems (`Config`, `InvalidUri`, `TrustBundle`) are detected
/// before any network attempt; `Driver` covers everything raised during session
/// establishment or the round trip itself (authentication, TLS handshake,
/// network unreachability, timeout), reported uniformly as its display text.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Environment configuration is missing or unparsable.
    #[error("config error: {0}")]
    Config(String),

    /// The connection string was rejected before any network attempt.
    #[error("invalid connection uri: {0}")]
    InvalidUri(String),

    /// The CA trust bundle path does not point at a readable file.
    #[error("trust bundle error: {0}")]
    TrustBundle(String),

    /// The driver failed during session setup or the probe round trip.
    #[error("driver error: {0}")]
    Driver(#[from] mongodb::error::Error),
}
