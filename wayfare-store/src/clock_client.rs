use crate::ClientError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use wayfare_core::ClockSource;

/// Wire shape of the time endpoint
#[derive(Debug, Deserialize)]
struct TimeResponse {
    iso: String,
}

impl TimeResponse {
    fn into_instant(self) -> Result<DateTime<Utc>, ClientError> {
        DateTime::parse_from_rfc3339(&self.iso)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| ClientError::Malformed(format!("bad timestamp {:?}: {}", self.iso, e)))
    }
}

/// HTTP client for the authoritative time service
pub struct ClockClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClockClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ClockSource for ClockClient {
    async fn now(&self) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{}/api/time", self.base_url);
        let body: TimeResponse = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::Transport)?
            .error_for_status()
            .map_err(ClientError::Transport)?
            .json()
            .await
            .map_err(ClientError::Transport)?;

        Ok(body.into_instant()?)
    }
}
