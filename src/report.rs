//! Probe result reporting.
//!
//! Converts a probe outcome or error into the single console line the process
//! emits: a success-labeled list of collection names, or a failure-labeled
//! error description. A JSON rendering of the same report is available for
//! machine consumers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ProbeError;
use crate::probe::ProbeOutcome;

/// Prefix of the success line.
pub const SUCCESS_LABEL: &str = "connection ok";
/// Prefix of the failure line.
pub const FAILURE_LABEL: &str = "connection failed";

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single human-readable line (default).
    Text,
    /// Single JSON object line.
    Json,
}

impl OutputFormat {
    /// Best-effort read of `PROBE_FORMAT`, falling back to text.
    ///
    /// Used on the configuration-failure path so a machine consumer that asked
    /// for JSON still gets a parsable failure line.
    pub fn from_env_lossy() -> Self {
        std::env::var("PROBE_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::Text)
    }
}

impl FromStr for OutputFormat {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ProbeError::Config(format!(
                "unknown output format: {}",
                other
            ))),
        }
    }
}

/// Report of one probe run.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    /// Target database name (absent when configuration failed before it was known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Whether the round trip succeeded.
    pub success: bool,
    /// Round trip latency in milliseconds (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Collection names found (present on success, may be empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
    /// Error description (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Report timestamp.
    pub timestamp: DateTime<Utc>,
}

impl ProbeReport {
    /// Builds a success report from a probe outcome.
    pub fn success(database: impl Into<String>, outcome: ProbeOutcome) -> Self {
        Self {
            database: Some(database.into()),
            success: true,
            latency_ms: Some(outcome.latency.as_millis() as u64),
            collections: Some(outcome.collections),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// Builds a failure report from an error description.
    pub fn failure(database: Option<String>, error: impl Into<String>) -> Self {
        Self {
            database,
            success: false,
            latency_ms: None,
            collections: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }

    /// Renders the report in the requested format, always a single line.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|_| self.render_text())
            }
        }
    }

    /// Renders the labeled console line.
    pub fn render_text(&self) -> String {
        if self.success {
            let names = match &self.collections {
                Some(names) => names.join(", "),
                None => String::new(),
            };
            format!("{}: [{}]", SUCCESS_LABEL, names)
        } else {
            format!(
                "{}: {}",
                FAILURE_LABEL,
                self.error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn outcome(collections: &[&str]) -> ProbeOutcome {
        ProbeOutcome {
            collections: collections.iter().map(|s| s.to_string()).collect(),
            latency: Duration::from_millis(42),
        }
    }

    #[test]
    fn test_success_line_lists_collections() {
        let report = ProbeReport::success("appdb", outcome(&["users", "sessions"]));
        assert_eq!(report.render_text(), "connection ok: [users, sessions]");
    }

    #[test]
    fn test_success_line_with_empty_database() {
        let report = ProbeReport::success("appdb", outcome(&[]));
        assert_eq!(report.render_text(), "connection ok: []");
    }

    #[test]
    fn test_failure_line_carries_error_text() {
        let report = ProbeReport::failure(Some("appdb".into()), "server selection timed out");
        assert_eq!(
            report.render_text(),
            "connection failed: server selection timed out"
        );
    }

    #[test]
    fn test_json_render_is_a_single_line() {
        let report = ProbeReport::success("appdb", outcome(&["users"]));
        let line = report.render(OutputFormat::Json);
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["database"], "appdb");
        assert_eq!(value["latency_ms"], 42);
        assert_eq!(value["collections"][0], "users");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_failure_json_omits_success_fields() {
        let report = ProbeReport::failure(None, "config error: PROBE_URI is not set");
        let value: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json)).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("collections").is_none());
        assert!(value.get("latency_ms").is_none());
        assert!(value.get("database").is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_from_env_lossy_honors_requested_format() {
        temp_env::with_var("PROBE_FORMAT", Some("json"), || {
            assert_eq!(OutputFormat::from_env_lossy(), OutputFormat::Json);
        });
    }

    #[test]
    fn test_from_env_lossy_falls_back_to_text() {
        temp_env::with_var("PROBE_FORMAT", None::<&str>, || {
            assert_eq!(OutputFormat::from_env_lossy(), OutputFormat::Text);
        });
        temp_env::with_var("PROBE_FORMAT", Some("yaml"), || {
            assert_eq!(OutputFormat::from_env_lossy(), OutputFormat::Text);
        });
    }
}
