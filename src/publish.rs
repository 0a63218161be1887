//! Result publisher: POST the three-day payload to the update endpoint.

use std::time::Duration;

use daycycle_core::Payload;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::PublishConfig;

const API_KEY_HEADER: &str = "api-key";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Update failed with status {status}, response: {body}")]
    Status { status: u16, body: String },

    #[error("Network or API error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub struct Publisher {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl Publisher {
    pub fn new(config: &PublishConfig, timeout: Duration) -> Result<Self, PublishError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Publisher {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Send the payload once. Any non-2xx status is a failure.
    pub async fn publish(&self, payload: &Payload) -> Result<(), PublishError> {
        info!(endpoint = %self.endpoint, ?payload, "Sending POST");

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "Failed to read API response body");
                String::new()
            }
        };
        debug!(status = status.as_u16(), %body, "API response");

        if !status.is_success() {
            return Err(PublishError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(status = status.as_u16(), "Day cycle updated successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{closed_port_url, serve_once, serve_truncated};
    use daycycle_core::{ScheduleLetter, ScheduleResult};

    fn payload() -> Payload {
        Payload {
            today: ScheduleResult::Cycle {
                day: 3,
                letter: Some(ScheduleLetter::B),
            },
            tomorrow: ScheduleResult::NotAvailable,
            next_day: ScheduleResult::Cycle {
                day: 4,
                letter: None,
            },
        }
    }

    fn publisher(endpoint: &str) -> Publisher {
        let config = PublishConfig {
            endpoint: endpoint.to_string(),
            api_key: "test-key".to_string(),
        };
        Publisher::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_publish_sends_json_with_api_key() {
        let server = serve_once("200 OK", "{\"message\":\"Day cycle updated\"}").await;

        publisher(&server.url).publish(&payload()).await.unwrap();

        let request = server.request().await;
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST / HTTP/1.1"));
        assert!(lower.contains("api-key: test-key"));
        assert!(lower.contains("content-type: application/json"));

        let body = request.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"today": "3B", "tomorrow": "N/A", "next_day": "4"})
        );
    }

    #[tokio::test]
    async fn test_publish_accepts_any_2xx() {
        let server = serve_once("204 No Content", "").await;
        assert!(publisher(&server.url).publish(&payload()).await.is_ok());
    }

    #[tokio::test]
    async fn test_publish_reports_rejection() {
        let server = serve_once("403 Forbidden", "{\"error\":\"Invalid API key\"}").await;

        let err = publisher(&server.url)
            .publish(&payload())
            .await
            .unwrap_err();

        match err {
            PublishError::Status { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_keeps_status_when_body_is_unreadable() {
        let server = serve_truncated("500 Internal Server Error").await;

        let err = publisher(&server.url)
            .publish(&payload())
            .await
            .unwrap_err();

        match err {
            PublishError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.is_empty());
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_reports_transport_error() {
        let url = closed_port_url().await;

        let err = publisher(&url).publish(&payload()).await.unwrap_err();

        assert!(matches!(err, PublishError::Transport(_)));
    }
}
