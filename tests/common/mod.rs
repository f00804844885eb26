//! Shared test utilities

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use switchbot_power::client::{ApiRequest, ApiResponse, Transport};
use switchbot_power::{CredentialSource, Result};
use tokio::sync::Mutex;

/// Transport that records requests and answers with scripted statuses
///
/// Answers `200 OK` once the script runs out.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<ApiRequest>>>,
    statuses: Arc<Mutex<VecDeque<StatusCode>>>,
}

impl RecordingTransport {
    /// Transport answering with `statuses` in order
    pub fn answering(statuses: &[StatusCode]) -> Self {
        Self {
            sent: Arc::default(),
            statuses: Arc::new(Mutex::new(statuses.iter().copied().collect())),
        }
    }

    /// Requests sent so far
    pub async fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.sent.lock().await.push(request);
        let status = self
            .statuses
            .lock()
            .await
            .pop_front()
            .unwrap_or(StatusCode::OK);
        Ok(ApiResponse {
            status,
            reason: None,
        })
    }
}

/// In-memory credential source standing in for the environment
#[derive(Default)]
pub struct FixtureSource(HashMap<String, String>);

impl FixtureSource {
    /// Source defining `entries`
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }
}

impl CredentialSource for FixtureSource {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.get(key).cloned())
    }
}
