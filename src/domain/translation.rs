use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TranslatedTerm {
    pub original: String,
    pub translated: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TranslationResult {
    #[serde(default)]
    pub original_text: String,
    pub translated_text: String,
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
    #[serde(default)]
    pub terms_translated: Vec<TranslatedTerm>,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default)]
    pub note: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GlossaryTerm {
    pub english: String,
    pub urdu: String,
}

/// Language codes accepted by the translation form.
pub const LANGUAGES: &[&str] = &["auto", "en", "ur"];
