//! English/Urdu legal translation with glossary.

use crate::backend::TranslationApi;
use crate::domain::translation::TranslationRequest;
use crate::dto::pages::TranslationPageData;
use crate::forms::translation::TranslateForm;
use crate::models::session::SessionContext;
use crate::services::{ServiceResult, or_default};

pub async fn load_translation<R>(
    backend: &R,
    session: &SessionContext,
) -> ServiceResult<TranslationPageData>
where
    R: TranslationApi + ?Sized,
{
    Ok(TranslationPageData {
        glossary: or_default(backend.glossary(session).await, "glossary")?,
        source_lang: "auto".to_string(),
        target_lang: "auto".to_string(),
        ..TranslationPageData::default()
    })
}

/// Translates the submitted text; the form values are echoed back.
pub async fn translate<R>(
    backend: &R,
    session: &SessionContext,
    form: TranslateForm,
) -> ServiceResult<TranslationPageData>
where
    R: TranslationApi + ?Sized,
{
    let request = TranslationRequest::try_from(&form)?;
    let result = backend.translate(session, &request).await?;
    let glossary = or_default(backend.glossary(session).await, "glossary")?;

    Ok(TranslationPageData {
        glossary,
        result: Some(result),
        text: form.text,
        source_lang: request.source_lang,
        target_lang: request.target_lang,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::domain::translation::{GlossaryTerm, TranslationResult};

    #[tokio::test]
    async fn translation_echoes_form() {
        let mut backend = MockBackend::new();
        backend
            .expect_translate()
            .withf(|_, request| request.target_lang == "ur")
            .returning(|_, request| {
                Ok(TranslationResult {
                    translated_text: format!("[{}]", request.text),
                    ..TranslationResult::default()
                })
            });
        backend.expect_glossary().returning(|_| {
            Ok(vec![GlossaryTerm {
                english: "bail".into(),
                urdu: "ضمانت".into(),
            }])
        });
        let form = TranslateForm {
            text: "bail".into(),
            source_lang: "en".into(),
            target_lang: "ur".into(),
        };

        let data = translate(&backend, &SessionContext::anonymous("v"), form)
            .await
            .unwrap();

        assert_eq!(data.result.unwrap().translated_text, "[bail]");
        assert_eq!(data.text, "bail");
        assert_eq!(data.glossary.len(), 1);
    }
}
