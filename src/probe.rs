//! The connect-and-list probe.
//!
//! One attempt, no retries: parse the connection string, construct a client,
//! and issue a single list-collections round trip against the target database.
//! The configured timeouts are the only bound on how long the attempt may block.

use std::time::{Duration, Instant};

use mongodb::options::{ClientOptions, Tls, TlsOptions};
use mongodb::Client;
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::error::{ProbeError, ProbeResult};

/// Result of a successful probe round trip.
#[derive(Debug)]
pub struct ProbeOutcome {
    /// Collection names found in the target database (may be empty).
    pub collections: Vec<String>,
    /// Wall time of the round trip.
    pub latency: Duration,
}

/// Runs the probe once against the configured endpoint.
///
/// Configuration and URI problems surface before any network attempt; every
/// failure during session establishment or the round trip maps to
/// [`ProbeError::Driver`]. The client is dropped at scope end, closing the
/// session implicitly.
pub async fn run(config: &ProbeConfig) -> ProbeResult<ProbeOutcome> {
    config.validate()?;

    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(|e| ProbeError::InvalidUri(e.to_string()))?;

    options.connect_timeout = Some(Duration::from_millis(config.connect_timeout_ms));
    options.server_selection_timeout = Some(Duration::from_millis(config.selection_timeout_ms));
    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }
    if let Some(ca_file) = &config.ca_file {
        options.tls = Some(Tls::Enabled(
            TlsOptions::builder().ca_file_path(ca_file.clone()).build(),
        ));
    }

    let client = Client::with_options(options)?;
    debug!(database = %config.database, "client constructed, issuing round trip");

    let start = Instant::now();
    let collections = client
        .database(&config.database)
        .list_collection_names()
        .await?;
    let latency = start.elapsed();

    info!(
        database = %config.database,
        count = collections.len(),
        latency_ms = latency.as_millis() as u64,
        "probe round trip complete"
    );
    Ok(ProbeOutcome {
        collections,
        latency,
    })
}
