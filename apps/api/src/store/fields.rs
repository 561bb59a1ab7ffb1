//! Canonical job fields and their mapping to the store's actual column names.
//!
//! Deployments rename columns freely, so the mapping is resolved once at
//! startup from a sample record and is read-only afterwards.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::store::{StoreError, TableStore};

/// Deployment-independent names for the attributes the pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Url,
    Title,
    Description,
    Budget,
    HourlyRange,
    EstimatedTime,
    Skills,
    Score,
    Proposal,
    Created,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 10] = [
        CanonicalField::Url,
        CanonicalField::Title,
        CanonicalField::Description,
        CanonicalField::Budget,
        CanonicalField::HourlyRange,
        CanonicalField::EstimatedTime,
        CanonicalField::Skills,
        CanonicalField::Score,
        CanonicalField::Proposal,
        CanonicalField::Created,
    ];

    /// Column name in the reference base; used when discovery finds no match.
    pub fn default_column(self) -> &'static str {
        match self {
            CanonicalField::Url => "url",
            CanonicalField::Title => "title",
            CanonicalField::Description => "description",
            CanonicalField::Budget => "budget",
            CanonicalField::HourlyRange => "hourlyRange",
            CanonicalField::EstimatedTime => "estimatedTime",
            CanonicalField::Skills => "skills",
            CanonicalField::Score => "Score",
            CanonicalField::Proposal => "Proposal",
            CanonicalField::Created => "Created",
        }
    }
}

/// Canonical field → actual store column. Built once at startup, never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    columns: HashMap<CanonicalField, String>,
}

impl Default for FieldMapping {
    /// The hardcoded reference mapping.
    fn default() -> Self {
        let columns = CanonicalField::ALL
            .iter()
            .map(|&field| (field, field.default_column().to_string()))
            .collect();
        Self { columns }
    }
}

impl FieldMapping {
    /// Re-resolves each canonical field against a sample record's columns,
    /// matching case-insensitively. Fields with no match keep their default.
    pub fn from_sample(fields: &Map<String, Value>) -> Self {
        let mut mapping = Self::default();
        for field in CanonicalField::ALL {
            let wanted = field.default_column().to_lowercase();
            if let Some(actual) = fields.keys().find(|k| k.to_lowercase() == wanted) {
                mapping.columns.insert(field, actual.clone());
            }
        }
        mapping
    }

    /// Pulls one sample record from the store and resolves column names from
    /// it. An empty table falls back to the default mapping; a store error
    /// aborts startup, since no later write could succeed either.
    pub async fn discover(table: &dyn TableStore) -> Result<Self, StoreError> {
        match table.first_record().await? {
            Some(record) => {
                info!("Resolved field mapping from sample record {}", record.id);
                Ok(Self::from_sample(&record.fields))
            }
            None => {
                warn!("No records in table, using default field mapping");
                Ok(Self::default())
            }
        }
    }

    /// The actual column name for a canonical field.
    pub fn column(&self, field: CanonicalField) -> &str {
        self.columns
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.default_column())
    }

    /// Translates canonical pairs into a store-ready field map.
    pub fn translate(&self, values: &[(CanonicalField, Value)]) -> Map<String, Value> {
        values
            .iter()
            .map(|(field, value)| (self.column(*field).to_string(), value.clone()))
            .collect()
    }

    /// Reads a canonical field's value out of a raw record, if present.
    /// Read-back path; the pipeline itself only writes.
    #[allow(dead_code)]
    pub fn value<'a>(
        &self,
        fields: &'a Map<String, Value>,
        field: CanonicalField,
    ) -> Option<&'a Value> {
        fields.get(self.column(field))
    }
}
