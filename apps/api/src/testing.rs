//! Shared test fakes: a scripted completion service and an in-memory table
//! store with fault injection. Compiled only for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::llm_client::{ChatCompletion, CompletionParams, LlmError};
use crate::models::job::JobRecord;
use crate::state::AppState;
use crate::store::fields::FieldMapping;
use crate::store::{RecordStore, StoreError, StoredRecord, TableStore};

/// Replays a fixed queue of completion replies in call order; errors once
/// the queue runs dry.
pub struct ScriptedCompletions {
    replies: Mutex<VecDeque<String>>,
    pub calls: AtomicUsize,
}

impl ScriptedCompletions {
    pub fn new<const N: usize>(replies: [&str; N]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChatCompletion for ScriptedCompletions {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _params: CompletionParams,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyContent)
    }
}

/// Always fails, as if the completion service were down.
pub struct FailingCompletions;

#[async_trait]
impl ChatCompletion for FailingCompletions {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _params: CompletionParams,
    ) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "completion service offline (scripted)".to_string(),
        })
    }
}

/// In-memory `TableStore`. Records are keyed by generated ids ("recM0001",
/// ...). `failing_update_at` makes the nth update call across the table
/// fail, for exercising mid-batch store outages.
pub struct MemTable {
    records: Mutex<HashMap<String, Map<String, Value>>>,
    insertion_order: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    update_calls: AtomicUsize,
    fail_update_at: Option<usize>,
}

impl MemTable {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            insertion_order: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            update_calls: AtomicUsize::new(0),
            fail_update_at: None,
        }
    }

    pub fn failing_update_at(call: usize) -> Self {
        Self {
            fail_update_at: Some(call),
            ..Self::new()
        }
    }

    /// Pre-populates a record, as if it existed before the batch arrived.
    pub fn seed(&self, id: &str, fields: Map<String, Value>) {
        self.records.lock().unwrap().insert(id.to_string(), fields);
        self.insertion_order.lock().unwrap().push(id.to_string());
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Record ids in creation order.
    pub fn ids(&self) -> Vec<String> {
        self.insertion_order.lock().unwrap().clone()
    }

    pub fn fields_of(&self, id: &str) -> Option<Map<String, Value>> {
        self.records.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl TableStore for MemTable {
    async fn get_record(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.records.lock().unwrap().get(id).map(|fields| StoredRecord {
            id: id.to_string(),
            fields: fields.clone(),
        }))
    }

    async fn create_record(&self, fields: Map<String, Value>) -> Result<StoredRecord, StoreError> {
        let id = format!("recM{:04}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.records.lock().unwrap().insert(id.clone(), fields.clone());
        self.insertion_order.lock().unwrap().push(id.clone());
        Ok(StoredRecord { id, fields })
    }

    async fn update_record(&self, id: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let call = self.update_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_update_at == Some(call) {
            return Err(StoreError::Api {
                status: 503,
                message: "table store offline (scripted)".to_string(),
            });
        }

        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(id) else {
            return Err(StoreError::Api {
                status: 404,
                message: format!("record {id} not found"),
            });
        };
        for (column, value) in fields {
            record.insert(column, value);
        }
        Ok(())
    }

    async fn first_record(&self) -> Result<Option<StoredRecord>, StoreError> {
        let order = self.insertion_order.lock().unwrap();
        let records = self.records.lock().unwrap();
        Ok(order.first().map(|id| StoredRecord {
            id: id.clone(),
            fields: records.get(id).cloned().unwrap_or_default(),
        }))
    }
}

/// `AppState` over the fakes, with the default field mapping.
pub fn state_with(llm: Arc<dyn ChatCompletion>, table: Arc<MemTable>) -> AppState {
    AppState {
        llm,
        store: Arc::new(RecordStore::new(table, Arc::new(FieldMapping::default()))),
    }
}

/// Minimal valid webhook payload element.
pub fn job_json(title: &str, description: &str) -> Value {
    json!({
        "airtable_record_id": "",
        "created_time": "2024-11-20T10:30:00Z",
        "url": "https://www.upwork.com/jobs/~014a2b3c",
        "title": title,
        "description": description,
        "budget": "$500",
        "hourly_range": "$50-$75",
        "estimated_time": "Less than 1 month",
        "skills": "Make.com, Airtable, API Integration",
        "created_date": "2024-11-20T10:30:00Z"
    })
}

/// One fully populated job for pipeline-level tests.
pub fn sample_job() -> JobRecord {
    serde_json::from_value(job_json(
        "Make.com automation expert",
        "Build scenarios syncing Airtable with our CRM",
    ))
    .unwrap()
}
