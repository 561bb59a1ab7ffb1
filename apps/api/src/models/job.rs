use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel written to the store and interpolated into prompts when a posting
/// does not carry the field.
pub const NOT_AVAILABLE: &str = "N/A";

fn default_not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// One incoming job posting, as delivered by the marketplace webhook.
///
/// `record_id` may arrive empty; the store adapter then creates the record
/// and the pipeline tracks the store-assigned id instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(
        rename = "airtable_record_id",
        alias = "external_record_id",
        default
    )]
    pub record_id: String,
    pub created_time: DateTime<Utc>,
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_not_available")]
    pub budget: String,
    #[serde(default = "default_not_available")]
    pub hourly_range: String,
    #[serde(default = "default_not_available")]
    pub estimated_time: String,
    #[serde(default)]
    pub skills: String,
    pub created_date: DateTime<Utc>,
    /// Inbound echo of a previously generated proposal; carried, never read.
    #[serde(default)]
    pub proposal: String,
}

impl JobRecord {
    /// Required-field check run on every batch element before any job is
    /// processed.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must be a non-empty string".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description must be a non-empty string".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> serde_json::Value {
        json!({
            "airtable_record_id": "recABC123",
            "created_time": "2024-11-20T10:30:00Z",
            "url": "https://www.upwork.com/jobs/~012345",
            "title": "Make.com automation expert",
            "description": "Build scenarios syncing Airtable with our CRM",
            "budget": "$500",
            "hourly_range": "$50-$75",
            "estimated_time": "1 to 3 months",
            "skills": "Make.com, Airtable, API Integration",
            "created_date": "2024-11-20T10:30:00Z",
            "proposal": ""
        })
    }

    #[test]
    fn test_full_payload_deserializes() {
        let job: JobRecord = serde_json::from_value(full_payload()).unwrap();
        assert_eq!(job.record_id, "recABC123");
        assert_eq!(job.title, "Make.com automation expert");
        assert_eq!(job.hourly_range, "$50-$75");
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_missing_optionals_default_to_sentinels() {
        let job: JobRecord = serde_json::from_value(json!({
            "created_time": "2024-11-20T10:30:00Z",
            "url": "https://www.upwork.com/jobs/~012345",
            "title": "Data entry",
            "description": "Copy rows between spreadsheets",
            "created_date": "2024-11-20T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(job.record_id, "");
        assert_eq!(job.budget, NOT_AVAILABLE);
        assert_eq!(job.hourly_range, NOT_AVAILABLE);
        assert_eq!(job.estimated_time, NOT_AVAILABLE);
        assert_eq!(job.skills, "");
        assert_eq!(job.proposal, "");
    }

    #[test]
    fn test_external_record_id_alias_accepted() {
        let mut payload = full_payload();
        let obj = payload.as_object_mut().unwrap();
        obj.remove("airtable_record_id");
        obj.insert("external_record_id".to_string(), json!("recXYZ789"));

        let job: JobRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(job.record_id, "recXYZ789");
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("title");
        assert!(serde_json::from_value::<JobRecord>(payload).is_err());
    }

    #[test]
    fn test_unparsable_timestamp_is_rejected() {
        let mut payload = full_payload();
        payload
            .as_object_mut()
            .unwrap()
            .insert("created_time".to_string(), json!("yesterday-ish"));
        assert!(serde_json::from_value::<JobRecord>(payload).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        let mut job: JobRecord = serde_json::from_value(full_payload()).unwrap();
        job.description = "   ".to_string();
        let err = job.validate().unwrap_err();
        assert!(err.contains("description"));

        let mut job: JobRecord = serde_json::from_value(full_payload()).unwrap();
        job.title = String::new();
        let err = job.validate().unwrap_err();
        assert!(err.contains("title"));
    }
}
