use serde::{Deserialize, Serialize};

/// Response languages offered by the site. Unknown codes fall back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Zh,
    Ja,
    Ko,
    Ar,
}

impl Language {
    pub const ALL: [Language; 11] = [
        Self::En, Self::Es, Self::Fr, Self::De, Self::It, Self::Pt,
        Self::Ru, Self::Zh, Self::Ja, Self::Ko, Self::Ar,
    ];

    /// Resolve a locale code such as `fr` or `pt-BR`; `None` and unknown codes give English.
    pub fn from_code(code: Option<&str>) -> Self {
        let Some(code) = code else { return Self::En };
        let primary = code.trim().split(['-', '_']).next().unwrap_or("").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.code() == primary)
            .unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Pt => "pt",
            Self::Ru => "ru",
            Self::Zh => "zh",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Ar => "ar",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::De => "German",
            Self::It => "Italian",
            Self::Pt => "Portuguese",
            Self::Ru => "Russian",
            Self::Zh => "Chinese",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
            Self::Ar => "Arabic",
        }
    }
}
