use chrono::{DateTime, Utc};
use crate::clients::strip_bold;
use crate::models::ClassificationResult;
use crate::prompts::DISCLAIMER;

pub const REPORT_FILE_NAME: &str = "skin-lesion-report.md";

pub struct DiagnosisReport<'a> {
    pub diagnosis: &'a ClassificationResult,
    pub analysis: &'a str,
    pub generated_at: DateTime<Utc>,
}

pub fn format_diagnosis_summary(diagnosis: &ClassificationResult) -> String {
    let condition = match diagnosis.category() {
        Some(category) => format!("{} ({})", diagnosis.display_label(), category.full_name()),
        None => diagnosis.display_label().to_string(),
    };
    let mut summary = format!(
        "## Analysis Results\n\n| Field | Value |\n|---|---|\n| Predicted Condition | {} |\n| Confidence | {:.2}% |\n",
        condition, diagnosis.confidence
    );
    if !diagnosis.is_identifiable() {
        summary.push_str(
            "\nThe uploaded image is not within the scope of the 7 trained diagnoses. Either there is no cancer, or the image does not fall within the 7 primary types used by Oncoscopic.\n",
        );
    }
    summary
}

pub fn format_report_markdown(report: &DiagnosisReport<'_>) -> String {
    format!(
        "# Skin Lesion Analysis Report\n\n_Generated {}_\n\n{}\n## Detailed Analysis\n\n{}\n\n---\n\n_{}_\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        format_diagnosis_summary(report.diagnosis),
        strip_bold(report.analysis.trim()),
        DISCLAIMER,
    )
}
