use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::{Alarm, NewAlarm};
use crate::types::AlarmId;

/// Failure talking to the alarm store. The controller treats every variant
/// the same way: fall back to the local copy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store returned {0}")]
    Status(StatusCode),
}

/// The store as seen by the controller. One method per endpoint; no retries,
/// no timeouts, no cancellation of in-flight requests.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Alarm>, StoreError>;
    async fn create(&self, alarm: &NewAlarm) -> Result<Alarm, StoreError>;
    async fn update(&self, id: AlarmId, alarm: &Alarm) -> Result<Alarm, StoreError>;
    async fn delete(&self, id: AlarmId) -> Result<(), StoreError>;
}

/// HTTP client for the alarm store service.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpStore {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn alarms_url(&self) -> String {
        format!("{}/api/alarms", self.base_url)
    }

    fn alarm_url(&self, id: AlarmId) -> String {
        format!("{}/api/alarms/{}", self.base_url, id)
    }
}

fn check_status(status: StatusCode) -> Result<(), StoreError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(StoreError::Status(status))
    }
}

#[async_trait]
impl StoreBackend for HttpStore {
    async fn list(&self) -> Result<Vec<Alarm>, StoreError> {
        let response = self.client.get(self.alarms_url()).send().await?;
        check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn create(&self, alarm: &NewAlarm) -> Result<Alarm, StoreError> {
        let response = self
            .client
            .post(self.alarms_url())
            .json(alarm)
            .send()
            .await?;
        check_status(response.status())?;
        let created: Alarm = response.json().await?;
        debug!("store assigned id {} to alarm at {}", created.id, created.time);
        Ok(created)
    }

    async fn update(&self, id: AlarmId, alarm: &Alarm) -> Result<Alarm, StoreError> {
        let response = self
            .client
            .put(self.alarm_url(id))
            .json(alarm)
            .send()
            .await?;
        check_status(response.status())?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: AlarmId) -> Result<(), StoreError> {
        let response = self.client.delete(self.alarm_url(id)).send().await?;
        check_status(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_the_api_path() {
        let store = HttpStore::new("http://127.0.0.1:5000");
        assert_eq!(store.alarms_url(), "http://127.0.0.1:5000/api/alarms");
        assert_eq!(store.alarm_url(42), "http://127.0.0.1:5000/api/alarms/42");
    }

    #[test]
    fn non_success_status_is_an_error() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(StoreError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        ));
    }
}
