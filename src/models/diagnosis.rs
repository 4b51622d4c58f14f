use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display value for labels outside the trained categories.
pub const UNIDENTIFIABLE: &str = "Unidentifiable";

/// The seven lesion categories the classifier was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisCategory {
    /// Actinic keratoses
    Akiec,
    /// Basal cell carcinoma
    Bcc,
    /// Benign keratosis-like lesions
    Bkl,
    /// Dermatofibroma
    Df,
    /// Melanoma
    Mel,
    /// Melanocytic nevi
    Nv,
    /// Vascular lesions
    Vasc,
}

impl DiagnosisCategory {
    pub const ALL: [DiagnosisCategory; 7] = [
        Self::Akiec,
        Self::Bcc,
        Self::Bkl,
        Self::Df,
        Self::Mel,
        Self::Nv,
        Self::Vasc,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == label)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Akiec => "akiec",
            Self::Bcc => "bcc",
            Self::Bkl => "bkl",
            Self::Df => "df",
            Self::Mel => "mel",
            Self::Nv => "nv",
            Self::Vasc => "vasc",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Akiec => "Actinic keratoses",
            Self::Bcc => "Basal cell carcinoma",
            Self::Bkl => "Benign keratosis-like lesions",
            Self::Df => "Dermatofibroma",
            Self::Mel => "Melanoma",
            Self::Nv => "Melanocytic nevi",
            Self::Vasc => "Vascular lesions",
        }
    }
}

impl std::fmt::Display for DiagnosisCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Output of the external classifier for one accepted image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub predicted_class: String,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn new(predicted_class: &str, confidence: f64) -> Self {
        Self { predicted_class: predicted_class.to_string(), confidence }
    }

    pub fn category(&self) -> Option<DiagnosisCategory> {
        DiagnosisCategory::from_label(&self.predicted_class)
    }

    pub fn is_identifiable(&self) -> bool {
        self.category().is_some()
    }

    /// Label shown to users. Untrained labels become "Unidentifiable";
    /// the confidence value is never altered.
    pub fn display_label(&self) -> &str {
        match self.category() {
            Some(category) => category.code(),
            None => UNIDENTIFIABLE,
        }
    }

    pub fn confidence_in_range(&self) -> bool {
        self.confidence.is_finite() && (0.0..=100.0).contains(&self.confidence)
    }
}

/// Diagnosis used to ground follow-up questions: either the last successful
/// classification of a session, or a label the caller declared explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisContext {
    pub predicted_class: String,
    /// `None` when the label was declared by the caller rather than classified.
    pub confidence: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl DiagnosisContext {
    pub fn new(diagnosis: ClassificationResult) -> Self {
        Self {
            predicted_class: diagnosis.predicted_class,
            confidence: Some(diagnosis.confidence),
            recorded_at: Utc::now(),
        }
    }

    pub fn declared(label: &str) -> Self {
        Self {
            predicted_class: label.trim().to_string(),
            confidence: None,
            recorded_at: Utc::now(),
        }
    }

    pub fn label(&self) -> &str {
        &self.predicted_class
    }

    pub fn display_label(&self) -> &str {
        match DiagnosisCategory::from_label(&self.predicted_class) {
            Some(category) => category.code(),
            None => UNIDENTIFIABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_trained_labels_resolve() {
        for label in ["bkl", "bcc", "akiec", "vasc", "nv", "mel", "df"] {
            let category = DiagnosisCategory::from_label(label).unwrap();
            assert_eq!(category.code(), label);
        }
        assert_eq!(DiagnosisCategory::ALL.len(), 7);
    }

    #[test]
    fn test_label_match_is_exact() {
        assert!(DiagnosisCategory::from_label("MEL").is_none());
        assert!(DiagnosisCategory::from_label(" mel").is_none());
        assert!(DiagnosisCategory::from_label("").is_none());
    }

    #[test]
    fn test_unknown_label_displays_unidentifiable() {
        let result = ClassificationResult::new("unknown", 42.25);
        assert!(!result.is_identifiable());
        assert_eq!(result.display_label(), UNIDENTIFIABLE);
        assert_eq!(result.confidence, 42.25);
        assert_eq!(result.predicted_class, "unknown");
    }

    #[test]
    fn test_known_label_displays_code() {
        let result = ClassificationResult::new("mel", 87.5);
        assert_eq!(result.display_label(), "mel");
        assert_eq!(result.category(), Some(DiagnosisCategory::Mel));
        assert_eq!(result.category().unwrap().full_name(), "Melanoma");
    }

    #[test]
    fn test_confidence_range() {
        assert!(ClassificationResult::new("nv", 0.0).confidence_in_range());
        assert!(ClassificationResult::new("nv", 100.0).confidence_in_range());
        assert!(!ClassificationResult::new("nv", 100.5).confidence_in_range());
        assert!(!ClassificationResult::new("nv", -1.0).confidence_in_range());
        assert!(!ClassificationResult::new("nv", f64::NAN).confidence_in_range());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&DiagnosisCategory::Akiec).unwrap();
        assert_eq!(json, "\"akiec\"");
        let parsed: DiagnosisCategory = serde_json::from_str("\"vasc\"").unwrap();
        assert_eq!(parsed, DiagnosisCategory::Vasc);
    }

    #[test]
    fn test_classification_result_from_service_body() {
        let body = r#"{"predicted_class": "bcc", "confidence": 91.2, "extra": true}"#;
        let parsed: ClassificationResult = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, ClassificationResult::new("bcc", 91.2));
    }

    #[test]
    fn test_context_label() {
        let context = DiagnosisContext::new(ClassificationResult::new("df", 55.0));
        assert_eq!(context.label(), "df");
        assert_eq!(context.confidence, Some(55.0));
    }

    #[test]
    fn test_declared_context() {
        let context = DiagnosisContext::declared("  melanoma ");
        assert_eq!(context.label(), "melanoma");
        assert_eq!(context.display_label(), UNIDENTIFIABLE);
        assert!(context.confidence.is_none());
    }
}
