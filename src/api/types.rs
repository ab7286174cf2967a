// src/api/types.rs
// =============================================================================
// Payloads exchanged with the archive service.
//
// Field names follow the service's JSON exactly. Most fields are optional
// on the wire, so they default instead of failing the whole response.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Where a capture job stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Running,
    Success,
    Error,
}

impl JobState {
    /// Success and Error both end the job
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Success | JobState::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_fetched: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Response of `GET /api/archive/{job_id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: JobState,
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub details: Option<JobDetails>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl JobStatus {
    // Pages fetched so far. Older servers report count_fetched instead.
    pub fn pages(&self) -> u64 {
        self.details
            .as_ref()
            .and_then(|d| d.pages.or(d.count_fetched))
            .unwrap_or(0)
    }

    // One progress line, e.g. "running (40% | 24/60 pages)"
    pub fn describe(&self) -> String {
        let state = match self.status {
            JobState::Running => "running",
            JobState::Success => "success",
            JobState::Error => "error",
        };
        let limit = self
            .details
            .as_ref()
            .and_then(|d| d.limit)
            .map(|l| l.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            "{} ({}% | {}/{} pages)",
            state,
            self.progress.unwrap_or(0),
            self.pages(),
            limit
        )
    }
}

/// Response of `POST /api/archive`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JobCreated {
    pub job_id: String,
}

/// Request body of `POST /api/archive`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ArchiveRequest<'a> {
    pub url: &'a str,
    pub depth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
}

/// One row of `GET /api/sites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSummary {
    pub host: String,
    #[serde(default)]
    pub snapshots: usize,
    #[serde(default)]
    pub last_ts: Option<String>,
    #[serde(default)]
    pub last_started: Option<String>,
}

/// One capture in `GET /api/site/{host}/snapshots`, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub host: String,
    pub ts: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
    #[serde(default)]
    pub root_url: Option<String>,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub count_fetched: u64,
    #[serde(default)]
    pub bytes_stored: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_running_status() {
        let status: JobStatus = serde_json::from_str(
            r#"{"status": "running", "progress": 40, "host": "a.com",
                "details": {"pages": 24, "bytes": 1000, "limit": 60}}"#,
        )
        .unwrap();
        assert_eq!(status.status, JobState::Running);
        assert!(!status.status.is_terminal());
        assert_eq!(status.describe(), "running (40% | 24/60 pages)");
    }

    #[test]
    fn test_status_with_count_fetched_and_no_limit() {
        let status: JobStatus =
            serde_json::from_str(r#"{"status": "success", "details": {"count_fetched": 7}}"#).unwrap();
        assert!(status.status.is_terminal());
        assert_eq!(status.pages(), 7);
        assert_eq!(status.describe(), "success (0% | 7/? pages)");
    }

    #[test]
    fn test_error_status_keeps_message() {
        let status: JobStatus =
            serde_json::from_str(r#"{"status": "error", "error": "connection refused"}"#).unwrap();
        assert!(status.status.is_terminal());
        assert_eq!(status.error.as_deref(), Some("connection refused"));
        assert_eq!(status.pages(), 0);
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<JobStatus>(r#"{"status": "paused"}"#).is_err());
    }

    #[test]
    fn test_archive_request_omits_missing_max_pages() {
        let body = serde_json::to_value(ArchiveRequest {
            url: "https://a.com",
            depth: 1,
            max_pages: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"url": "https://a.com", "depth": 1}));
    }

    #[test]
    fn test_parse_listings() {
        let sites: Vec<SiteSummary> = serde_json::from_str(
            r#"[{"host": "a.com", "snapshots": 2, "last_ts": "20240101T000000Z", "last_started": null}]"#,
        )
        .unwrap();
        assert_eq!(sites[0].snapshots, 2);
        assert_eq!(sites[0].last_started, None);

        let snaps: Vec<SnapshotInfo> = serde_json::from_str(
            r#"[{"host": "a.com", "started_at": "2024-01-01T00:00:00Z", "finished_at": null,
                 "root_url": "https://a.com", "depth": 1, "count_fetched": 12,
                 "bytes_stored": 4096, "status": "success", "error": null,
                 "ts": "20240101T000000Z"}]"#,
        )
        .unwrap();
        assert_eq!(snaps[0].ts, "20240101T000000Z");
        assert_eq!(snaps[0].count_fetched, 12);
    }
}
