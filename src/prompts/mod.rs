pub mod language;

pub use language::Language;

/// Compliance text attached to every prediction response, success or failure.
pub const DISCLAIMER: &str = "Note: Our system is currently trained to diagnose only 7 common types of skin cancer. While you can upload any image, including non-cancerous skin conditions, please be aware that results may not be accurate for non-diagnostic images or other types of skin conditions. Always consult with a healthcare professional for medical advice.";

pub const VALIDATION_PROMPT: &str = "You are a dermatology image validation expert. Analyze this image and determine if it's suitable for skin cancer analysis. Consider:
1. Is this clearly a photo of human skin or a body part?
2. Is the image quality sufficient (not too blurry, well-lit, focused)?
3. Does it show a close-up view of the area of concern?

Reply with EXACTLY one word: either 'VALID' or 'INVALID'.";

const EXPERT_PROMPT: &str = "You are a skin cancer expert that will provide actionable advice for the user at home based on their skin cancer diagnoses. You will also provide information about the skin cancer and the best way to treat it at home.";

const GROUNDING_TEMPLATE: &str = "The user has been diagnosed with {{DIAGNOSIS}}. Only answer questions strictly in the context of this diagnosis. If the question is unrelated, politely decline.";

const EXPLANATION_TEMPLATE: &str = "I have a dermoscopic image that the model predicts is {{DIAGNOSIS}}. Based on this specific image:

1. Predicted class justification
   - Describe exactly why this lesion matches {{DIAGNOSIS}}, referencing its color, shape, border, size, texture, or other visual cues.

2. Cancer type & differentiation
   - Explain what type of skin cancer {{DIAGNOSIS}} is, and how it differs from other common types (e.g. basal cell carcinoma, squamous cell carcinoma).

3. Symptoms
   - List the typical symptoms patients experience with this cancer.

4. Risk factors
   - Identify the major risk factors (genetic, environmental, behavioral).

5. Mortality rate
   - Provide the overall 5-year mortality rate, and note any variation by stage.

6. Treatment options
   - Detail standard treatments (surgery, radiation, systemic therapies) and any new or targeted approaches.

7. Prognosis
   - Summarize expected outcomes and factors that influence prognosis.

8. Visual lesion description
   - Give a vivid, case-specific description of the lesion's current appearance and what changes (e.g. increased redness, growth in diameter, uneven borders) to watch for.

9. Urgency of care
   - Advise how urgently to seek medical attention (e.g. immediately, within 48 hours, routine dermatologist referral).

10. Mortality rate
    - State the mortality rate for patients diagnosed with this type of cancer.

11. Severity & immediacy
    - Emphasize the severity and any time-sensitive risks, with clear guidance on \"when to go to the ER\" vs. \"schedule a dermatologist visit.\"

12. Specific recommendations
    - Offer concrete next steps: referrals, diagnostic tests, lifestyle or sun-protection changes, follow-up intervals, and support resources.";

fn interpolate(template: &str, diagnosis: &str) -> String {
    template.replace("{{DIAGNOSIS}}", diagnosis)
}

pub fn system_prompt(lang: Language) -> String {
    format!("{} Respond in {}.", EXPERT_PROMPT, lang.english_name())
}

pub fn grounding_clause(diagnosis: &str) -> String {
    interpolate(GROUNDING_TEMPLATE, diagnosis)
}

pub fn explanation_prompt(diagnosis: &str) -> String {
    interpolate(EXPLANATION_TEMPLATE, diagnosis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclaimer_mentions_seven_categories() {
        assert!(DISCLAIMER.contains("only 7 common types of skin cancer"));
        assert!(DISCLAIMER.ends_with("for medical advice."));
    }

    #[test]
    fn test_validation_prompt_requests_single_token() {
        assert!(VALIDATION_PROMPT.contains("EXACTLY one word"));
        assert!(VALIDATION_PROMPT.contains("'VALID' or 'INVALID'"));
    }

    #[test]
    fn test_system_prompt_language() {
        assert!(system_prompt(Language::En).ends_with("Respond in English."));
        assert!(system_prompt(Language::De).ends_with("Respond in German."));
    }

    #[test]
    fn test_grounding_clause_names_diagnosis() {
        let clause = grounding_clause("bcc");
        assert!(clause.starts_with("The user has been diagnosed with bcc."));
        assert!(clause.contains("politely decline"));
    }

    #[test]
    fn test_explanation_prompt_interpolates_every_placeholder() {
        let prompt = explanation_prompt("mel");
        assert!(!prompt.contains("{{DIAGNOSIS}}"));
        assert!(prompt.matches("mel").count() >= 3);
        assert!(prompt.contains("12. Specific recommendations"));
    }
}
