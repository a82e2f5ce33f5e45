//! Report formatting.
//!
//! Human output walks through the round trip step by step, the way an
//! operator would read it in a terminal. JSON output is for scripts.

use archivist_core::smoke::{SmokeReport, Stage, NEXT_STEPS, REMEDIATION_HINTS};
use serde::Serialize;
use std::fmt::Write;

/// JSON envelope for a smoke report.
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub passed: bool,
    pub marker_read_back: bool,
    #[serde(flatten)]
    pub report: &'a SmokeReport,
    /// Present only when the round trip failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<&'static [&'static str]>,
}

pub fn banner() -> &'static str {
    "🔥 Testing datastore connection...\n"
}

/// Formats a report as pretty-printed JSON.
pub fn format_json(report: &SmokeReport) -> serde_json::Result<String> {
    let output = JsonOutput {
        passed: report.passed(),
        marker_read_back: report.marker_read_back(),
        report,
        hints: (!report.passed()).then_some(&REMEDIATION_HINTS as &'static [&'static str]),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a report for terminal output.
pub fn format_human(report: &SmokeReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Backend: {}", report.backend);
    let _ = writeln!(out, "Collection: {}\n", report.collection);

    let _ = writeln!(out, "1️⃣ Testing write operation...");
    match (&report.written, &report.failure) {
        (Some(id), _) => {
            let _ = writeln!(out, "✅ Write successful! Doc ID: {}", id);
        }
        (None, Some(failure)) => {
            let _ = writeln!(out, "❌ Write failed: {}", failure.error);
        }
        (None, None) => {}
    }

    let read_failed = matches!(&report.failure, Some(f) if f.stage == Stage::Read);
    if report.written.is_some() {
        let _ = writeln!(out, "\n2️⃣ Testing read operation...");
        if let Some(failure) = report.failure.as_ref().filter(|_| read_failed) {
            let _ = writeln!(out, "❌ Read failed: {}", failure.error);
        } else {
            let _ = writeln!(
                out,
                "✅ Read successful! Found {} documents",
                report.documents.len()
            );
            for doc in &report.documents {
                let _ = writeln!(out, "  - {} : {}", doc.id, doc.fields_summary());
            }
        }
    }

    if report.passed() {
        let _ = writeln!(out, "\n🎉 Datastore is fully operational!");
        let _ = writeln!(out, "\nNext steps:");
        write_numbered(&mut out, &NEXT_STEPS);
    } else {
        let _ = writeln!(out, "\n❌ Datastore test failed.");
        let _ = writeln!(out, "\nTroubleshooting:");
        write_numbered(&mut out, &REMEDIATION_HINTS);
    }

    out.trim_end().to_string()
}

fn write_numbered(out: &mut String, lines: &[&str]) {
    for (i, line) in lines.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, line);
    }
}
