//! KoboToolbox forms API client.
//!
//! Fetches raw submission records for the two form streams. Any failure
//! here is terminal for the current render cycle: the dashboard shows an
//! error instead of partial data, and no retry is attempted.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use caredesk_common::config::KoboConfig;

use crate::cache::RawSnapshot;

const USER_AGENT: &str = "CareDesk/0.1.0";

/// Forms API client errors
#[derive(Debug, Error)]
pub enum KoboError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One form's data payload: `{ "results": [...] }`.
///
/// An absent or empty `results` array means zero records, never an error.
#[derive(Debug, Deserialize)]
struct FormData {
    #[serde(default)]
    results: Vec<Value>,
}

/// KoboToolbox API client
pub struct KoboClient {
    http_client: reqwest::Client,
    config: KoboConfig,
}

impl KoboClient {
    pub fn new(config: KoboConfig) -> Result<Self, KoboError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| KoboError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Fetch all submissions of one form.
    async fn fetch_form(&self, form_id: &str) -> Result<Vec<Value>, KoboError> {
        let url = format!(
            "{}/api/v2/assets/{}/data.json",
            self.config.base_url.trim_end_matches('/'),
            form_id
        );

        tracing::debug!(form_id = %form_id, url = %url, "Fetching form submissions");

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Token {}", self.config.api_token))
            .send()
            .await
            .map_err(|e| KoboError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(KoboError::Api(status.as_u16(), error_text));
        }

        let data: FormData = response
            .json()
            .await
            .map_err(|e| KoboError::Parse(e.to_string()))?;

        tracing::info!(
            form_id = %form_id,
            records = data.results.len(),
            "Fetched form submissions"
        );

        Ok(data.results)
    }

    /// Fetch both form streams into one raw snapshot.
    ///
    /// The two fetches are independent and run concurrently; the pipeline
    /// only needs both results before normalization begins.
    pub async fn fetch_snapshot(&self) -> Result<RawSnapshot, KoboError> {
        let (registrations, followups) = tokio::try_join!(
            self.fetch_form(&self.config.registration_form_id),
            self.fetch_form(&self.config.followup_form_id),
        )?;

        Ok(RawSnapshot::new(registrations, followups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> KoboConfig {
        KoboConfig {
            base_url: "https://kf.example.org".to_string(),
            api_token: "token".to_string(),
            registration_form_id: "aFormA".to_string(),
            followup_form_id: "aFormB".to_string(),
        }
    }

    #[test]
    fn client_creation() {
        assert!(KoboClient::new(test_config()).is_ok());
    }

    #[test]
    fn absent_results_means_zero_records() {
        let data: FormData = serde_json::from_str("{}").unwrap();
        assert!(data.results.is_empty());

        let data: FormData = serde_json::from_str(r#"{"count": 0, "results": []}"#).unwrap();
        assert!(data.results.is_empty());
    }
}
