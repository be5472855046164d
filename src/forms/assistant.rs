use serde::Deserialize;
use validator::Validate;

use crate::domain::assistant::ChatRequest;
use crate::domain::types::{NonEmptyString, RecordId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Message typed into the assistant chat box.
pub struct ChatForm {
    #[validate(length(max = 4000))]
    pub message: String,
    pub session_id: Option<String>,
    pub language: Option<String>,
}

impl TryFrom<ChatForm> for ChatRequest {
    type Error = FormError;

    fn try_from(form: ChatForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let message = NonEmptyString::new(form.message).map_err(|_| FormError::EmptyMessage)?;
        let session_id = form
            .session_id
            .filter(|id| !id.trim().is_empty())
            .and_then(|id| RecordId::new(id).ok())
            .map(|id| id.as_str().to_string());
        let language = match form.language.as_deref().map(str::trim) {
            None | Some("") | Some("auto") => "auto".to_string(),
            Some(code @ ("en" | "ur")) => code.to_string(),
            Some(other) => return Err(FormError::InvalidLanguage(other.to_string())),
        };
        Ok(ChatRequest {
            message: message.into_inner(),
            session_id,
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_message_is_rejected() {
        let form = ChatForm {
            message: "   ".into(),
            session_id: None,
            language: None,
        };
        assert!(matches!(ChatRequest::try_from(form), Err(FormError::EmptyMessage)));
    }

    #[test]
    fn keeps_valid_session() {
        let request = ChatRequest::try_from(ChatForm {
            message: " What is khula? ".into(),
            session_id: Some("65A1B2C3D4E5F60718293A4B".into()),
            language: Some("ur".into()),
        })
        .unwrap();
        assert_eq!(request.message, "What is khula?");
        assert_eq!(request.session_id.as_deref(), Some("65a1b2c3d4e5f60718293a4b"));
        assert_eq!(request.language, "ur");
    }

    #[test]
    fn unknown_language_is_rejected() {
        let form = ChatForm {
            message: "hi".into(),
            session_id: None,
            language: Some("fr".into()),
        };
        assert!(matches!(
            ChatRequest::try_from(form),
            Err(FormError::InvalidLanguage(_))
        ));
    }
}
