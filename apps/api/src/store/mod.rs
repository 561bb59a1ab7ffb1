//! Record store — the adapter between the pipeline's canonical job fields
//! and the external tabular store's REST API.
//!
//! Store failures are the one error class the pipeline does not swallow:
//! they mean losing the system's only durable output, so they abort the job.

pub mod airtable;
pub mod fields;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::info;

use crate::models::job::JobRecord;
use crate::store::fields::{CanonicalField, FieldMapping};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One raw record as the store returns it: opaque id plus column → value.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Low-level store verbs. Implemented by `AirtableClient` in production and
/// by an in-memory table in tests.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch by id. Ok(None) when no such record exists.
    async fn get_record(&self, id: &str) -> Result<Option<StoredRecord>, StoreError>;
    async fn create_record(&self, fields: Map<String, Value>) -> Result<StoredRecord, StoreError>;
    async fn update_record(&self, id: &str, fields: Map<String, Value>) -> Result<(), StoreError>;
    /// One sample record, for field-mapping discovery.
    async fn first_record(&self) -> Result<Option<StoredRecord>, StoreError>;
}

/// The content fields mirrored into the store for every job.
pub fn content_fields(job: &JobRecord) -> Vec<(CanonicalField, Value)> {
    vec![
        (CanonicalField::Url, json!(job.url)),
        (CanonicalField::Title, json!(job.title)),
        (CanonicalField::Description, json!(job.description)),
        (CanonicalField::Budget, json!(job.budget)),
        (CanonicalField::HourlyRange, json!(job.hourly_range)),
        (CanonicalField::EstimatedTime, json!(job.estimated_time)),
        (CanonicalField::Skills, json!(job.skills)),
    ]
}

/// Find-or-create plus canonical-field updates over a `TableStore`.
pub struct RecordStore {
    table: Arc<dyn TableStore>,
    mapping: Arc<FieldMapping>,
}

impl RecordStore {
    pub fn new(table: Arc<dyn TableStore>, mapping: Arc<FieldMapping>) -> Self {
        Self { table, mapping }
    }

    /// Ensures a record exists for this job and returns its identifier.
    ///
    /// An empty or unknown inbound id creates a record seeded with the job's
    /// content fields. The store-assigned id, which may differ from the one
    /// requested, is the identity every subsequent write uses.
    pub async fn find_or_create(
        &self,
        record_id: &str,
        job: &JobRecord,
    ) -> Result<String, StoreError> {
        if !record_id.is_empty() {
            if let Some(existing) = self.table.get_record(record_id).await? {
                info!("Found existing record: {}", existing.id);
                return Ok(existing.id);
            }
            info!("Record {record_id} not found, creating a new one");
        }

        let fields = self.mapping.translate(&content_fields(job));
        let created = self.table.create_record(fields).await?;
        if !record_id.is_empty() && created.id != record_id {
            info!(
                "Store assigned record id {} (requested {record_id}), tracking the assigned id",
                created.id
            );
        } else {
            info!("Created new record: {}", created.id);
        }
        Ok(created.id)
    }

    /// Merges canonical-field values into a record, translated through the
    /// resolved mapping.
    pub async fn update_fields(
        &self,
        record_id: &str,
        values: &[(CanonicalField, Value)],
    ) -> Result<(), StoreError> {
        self.table
            .update_record(record_id, self.mapping.translate(values))
            .await
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }
}
