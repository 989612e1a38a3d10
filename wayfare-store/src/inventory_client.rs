use crate::ClientError;
use async_trait::async_trait;
use serde::Deserialize;
use wayfare_core::InventoryService;
use wayfare_shared::{PackageRef, TimeSlot};

/// Wire shape of the availability endpoint
#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
}

impl AvailabilityResponse {
    /// A non-success flag or a `data` that is not a list means "no
    /// departures for this date", not a fault. Malformed entries inside
    /// a list are a parse failure.
    fn into_slots(self) -> Result<Vec<TimeSlot>, ClientError> {
        if !self.success {
            return Ok(Vec::new());
        }
        match self.data {
            serde_json::Value::Array(_) => serde_json::from_value(self.data)
                .map_err(|e| ClientError::Malformed(e.to_string())),
            _ => Ok(Vec::new()),
        }
    }
}

/// HTTP client for the inventory query service
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl InventoryService for InventoryClient {
    async fn slots_for_date(
        &self,
        package: &PackageRef,
        date: &str,
    ) -> Result<Vec<TimeSlot>, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!(
            "{}/api/availability/{}/{}",
            self.base_url, package.package_type, package.package_id
        );
        tracing::debug!(%url, date, "fetching availability");

        let response = self
            .http
            .get(&url)
            .query(&[("date", date)])
            .send()
            .await
            .map_err(ClientError::Transport)?
            .error_for_status()
            .map_err(ClientError::Transport)?;

        let body: AvailabilityResponse =
            response.json().await.map_err(ClientError::Transport)?;
        Ok(body.into_slots()?)
    }
}
