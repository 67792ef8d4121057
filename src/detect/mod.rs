// src/detect/mod.rs
use serde::{Deserialize, Serialize};

pub mod classifier;
pub mod extract;
pub mod normalize;
pub mod orchestrator;
pub mod rules;

pub use orchestrator::{Detector, DetectorHandle, DetectorState};
pub use rules::SiteId;

/// Best-effort snapshot of the job posting shown on the current page.
///
/// All fields are plain text, whitespace-collapsed and trimmed. A field the
/// detector could not fill is the empty string, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
}

impl JobInfo {
    /// True when detection found at least a title or a company, which is
    /// what the query path waits for.
    pub fn has_identity(&self) -> bool {
        !self.job_title.is_empty() || !self.company.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.job_title.is_empty() && self.company.is_empty() && self.location.is_empty()
    }
}

/// Inbound message from the submission UI: `{"action": "getJobInfo"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetJobInfo,
}

/// Outbound reply: `{"jobInfo": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub job_info: JobInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request: Request = serde_json::from_str(r#"{"action":"getJobInfo"}"#)
            .expect("request should deserialize");
        assert!(matches!(request, Request::GetJobInfo));
    }

    #[test]
    fn test_response_wire_format() {
        let response = Response {
            job_info: JobInfo {
                job_title: "Staff Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Berlin".to_string(),
            },
        };
        let json = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(json["jobInfo"]["job_title"], "Staff Engineer");
        assert_eq!(json["jobInfo"]["company"], "Acme");
    }

    #[test]
    fn test_has_identity() {
        assert!(!JobInfo::default().has_identity());
        let titled = JobInfo {
            job_title: "Data Analyst".to_string(),
            ..Default::default()
        };
        assert!(titled.has_identity());
        let located = JobInfo {
            location: "Remote".to_string(),
            ..Default::default()
        };
        assert!(!located.has_identity());
        assert!(!located.is_empty());
    }
}
