use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;

use crate::error::LinkError;
use crate::models::RequestLogEntry;

use super::AnchorLink;

impl AnchorLink {
    pub(super) fn try_log_request(&self, entry: &RequestLogEntry) {
        let Some(path) = &self.request_log else {
            return;
        };
        if let Ok(serialized) = serde_json::to_string(entry) {
            let mut line = serialized;
            line.push('\n');
            let _ = append_line(path, &line);
        }
    }

    pub(super) fn log_request_status(
        &self,
        request_id: String,
        operation: &str,
        status: &str,
        started: Instant,
        target: Option<String>,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: status.to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            target,
            error_code: None,
            error_message: None,
            details,
        });
    }

    pub(super) fn log_request_error(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        target: Option<String>,
        err: &LinkError,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: "error".to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            target,
            error_code: Some(err.code().to_string()),
            error_message: Some(err.to_string()),
            details,
        });
    }

    pub(super) fn log_request_warning(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        target: Option<String>,
        warning_message: &str,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: "warning".to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            target,
            error_code: None,
            error_message: Some(warning_message.to_string()),
            details,
        });
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())
}
