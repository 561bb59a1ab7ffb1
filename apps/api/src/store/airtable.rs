//! Airtable REST client — the `TableStore` used in production.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::store::{StoreError, StoredRecord, TableStore};

const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<StoredRecord>,
}

#[derive(Debug, Deserialize)]
struct AirtableError {
    error: AirtableErrorBody,
}

// The error payload is either a bare code ({"error": "NOT_FOUND"}) or an
// object ({"error": {"type": ..., "message": ...}}) depending on endpoint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AirtableErrorBody {
    Code(String),
    Detail { message: String },
}

impl AirtableErrorBody {
    fn message(self) -> String {
        match self {
            AirtableErrorBody::Code(code) => code,
            AirtableErrorBody::Detail { message } => message,
        }
    }
}

/// REST client bound to one base and table.
pub struct AirtableClient {
    client: Client,
    api_key: String,
    base_id: String,
    table_id: String,
    view_id: Option<String>,
}

impl AirtableClient {
    pub fn new(
        api_key: String,
        base_id: String,
        table_id: String,
        view_id: Option<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_id,
            table_id,
            view_id,
        }
    }

    fn table_url(&self) -> String {
        format!("{AIRTABLE_API_URL}/{}/{}", self.base_id, self.table_id)
    }

    fn record_url(&self, record_id: &str) -> String {
        format!("{}/{record_id}", self.table_url())
    }

    /// Maps a non-success response to `StoreError::Api`, extracting the
    /// Airtable error message best-effort.
    async fn api_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<AirtableError>(&body)
            .map(|e| e.error.message())
            .unwrap_or(body);
        StoreError::Api { status, message }
    }
}

#[async_trait]
impl TableStore for AirtableClient {
    async fn get_record(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
        let response = self
            .client
            .get(self.record_url(id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let record: StoredRecord = response.json().await?;
        Ok(Some(record))
    }

    async fn create_record(&self, fields: Map<String, Value>) -> Result<StoredRecord, StoreError> {
        let response = self
            .client
            .post(self.table_url())
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let record: StoredRecord = response.json().await?;
        debug!("Created store record {}", record.id);
        Ok(record)
    }

    async fn update_record(&self, id: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.record_url(id))
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        debug!("Updated store record {id}");
        Ok(())
    }

    async fn first_record(&self) -> Result<Option<StoredRecord>, StoreError> {
        let mut request = self
            .client
            .get(self.table_url())
            .bearer_auth(&self.api_key)
            .query(&[("maxRecords", "1")]);
        if let Some(view) = &self.view_id {
            request = request.query(&[("view", view.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let page: RecordPage = response.json().await?;
        Ok(page.records.into_iter().next())
    }
}
