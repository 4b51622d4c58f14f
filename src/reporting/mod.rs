pub mod formatter;

pub use formatter::{format_diagnosis_summary, format_report_markdown, DiagnosisReport, REPORT_FILE_NAME};
