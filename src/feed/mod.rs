use crate::config::FeedConfig;
use crate::event::FeedEvent;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::warn;

/// HTTP client for the zoo's telemetry feed endpoint.
///
/// The feed is a single GET endpoint returning a JSON array of events. The
/// client is built once and reused across polls for connection pooling; the
/// request timeout is the only cancellation semantic a pass has.
pub struct FeedClient {
    url: String,
    client: reqwest::Client,
}

impl FeedClient {
    /// Create a feed client from configuration
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("paddock/0.1")
            .build()
            .context("Failed to build feed HTTP client")?;

        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }

    /// Fetch the current event batch.
    ///
    /// A request failure, non-2xx status, or a body that is not a JSON array
    /// is a fetch error: the whole pass aborts and retries on the next
    /// trigger. Individual entries that fail to decode (unknown kind,
    /// missing field) are skipped with a warning so one bad producer cannot
    /// blank the batch.
    pub async fn fetch_events(&self) -> Result<Vec<FeedEvent>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Feed request failed")?
            .error_for_status()
            .context("Feed returned error status")?;

        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .context("Feed body is not a JSON array")?;

        Ok(decode_entries(raw))
    }
}

/// Decode raw feed entries, dropping ones that don't parse
pub fn decode_entries(raw: Vec<serde_json::Value>) -> Vec<FeedEvent> {
    let mut events = Vec::with_capacity(raw.len());

    for entry in raw {
        match serde_json::from_value::<FeedEvent>(entry) {
            Ok(event) => events.push(event),
            Err(e) => {
                warn!(error = %e, "Failed to decode feed entry, skipping");
            }
        }
    }

    events
}
