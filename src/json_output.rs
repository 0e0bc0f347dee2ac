//! JSON output format for smoke runs

use crate::smoke::SmokeReport;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Write-phase section of the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonWritePhase {
    /// Raw fd of the write handle (diagnostic only)
    pub fd: i32,
    pub bytes_written: u64,
}

/// Read-phase section of the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReadPhase {
    /// Raw fd of the read handle (diagnostic only)
    pub fd: i32,
    pub bytes_read: u64,
    /// Number of reads it took to drain the stream
    pub chunks: u64,
    /// Echoed contents (lossy UTF-8)
    pub content: String,
}

/// Full report for one smoke run, one JSON document per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSmokeReport {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write: Option<JsonWritePhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<JsonReadPhase>,
}

impl JsonSmokeReport {
    /// Build a report from phase summaries plus the captured echo bytes
    pub fn from_report(path: &Path, report: &SmokeReport, echoed: &[u8]) -> Self {
        Self {
            path: path.display().to_string(),
            write: report.write.map(|w| JsonWritePhase {
                fd: w.fd,
                bytes_written: w.bytes_written,
            }),
            read: report.read.map(|r| JsonReadPhase {
                fd: r.fd,
                bytes_read: r.bytes_read,
                chunks: r.chunks,
                content: String::from_utf8_lossy(echoed).into_owned(),
            }),
        }
    }

    /// Render as pretty-printed JSON
    pub fn render(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoke::{ReadSummary, WriteSummary};
    use std::path::PathBuf;

    fn sample_report() -> SmokeReport {
        SmokeReport {
            write: Some(WriteSummary {
                fd: 3,
                bytes_written: 13,
            }),
            read: Some(ReadSummary {
                fd: 3,
                bytes_read: 13,
                chunks: 1,
            }),
        }
    }

    #[test]
    fn test_report_captures_content() {
        let report = JsonSmokeReport::from_report(
            &PathBuf::from("/tmp/mp/new.txt"),
            &sample_report(),
            b"Hello, World!",
        );
        assert_eq!(report.path, "/tmp/mp/new.txt");
        assert_eq!(report.read.as_ref().unwrap().content, "Hello, World!");
        assert_eq!(report.write.as_ref().unwrap().bytes_written, 13);
    }

    #[test]
    fn test_render_is_valid_json() {
        let report =
            JsonSmokeReport::from_report(&PathBuf::from("/tmp/t"), &sample_report(), b"hi");
        let rendered = report.render().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["read"]["chunks"], 1);
    }

    #[test]
    fn test_skipped_phases_are_omitted() {
        let report = JsonSmokeReport::from_report(
            &PathBuf::from("/tmp/t"),
            &SmokeReport::default(),
            b"",
        );
        let rendered = report.render().unwrap();
        assert!(!rendered.contains("\"write\""));
        assert!(!rendered.contains("\"read\""));
    }
}
