use serde::Deserialize;
use validator::Validate;

use crate::domain::translation::{LANGUAGES, TranslationRequest};
use crate::domain::types::NonEmptyString;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Text submitted for translation.
pub struct TranslateForm {
    #[validate(length(max = 10000))]
    pub text: String,
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
}

fn language(code: &str) -> Result<String, FormError> {
    let code = code.trim();
    if code.is_empty() {
        return Ok("auto".to_string());
    }
    if LANGUAGES.contains(&code) {
        Ok(code.to_string())
    } else {
        Err(FormError::InvalidLanguage(code.to_string()))
    }
}

impl TryFrom<&TranslateForm> for TranslationRequest {
    type Error = FormError;

    fn try_from(form: &TranslateForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let text = NonEmptyString::new(form.text.as_str()).map_err(|_| FormError::EmptyMessage)?;
        Ok(TranslationRequest {
            text: text.into_inner(),
            source_lang: language(&form.source_lang)?,
            target_lang: language(&form.target_lang)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_auto_detection() {
        let form = TranslateForm {
            text: "bail".into(),
            ..TranslateForm::default()
        };
        let request = TranslationRequest::try_from(&form).unwrap();
        assert_eq!(request.source_lang, "auto");
        assert_eq!(request.target_lang, "auto");
    }

    #[test]
    fn rejects_unknown_language_and_empty_text() {
        let form = TranslateForm {
            text: "bail".into(),
            target_lang: "de".into(),
            ..TranslateForm::default()
        };
        assert!(TranslationRequest::try_from(&form).is_err());
        assert!(TranslationRequest::try_from(&TranslateForm::default()).is_err());
    }
}
