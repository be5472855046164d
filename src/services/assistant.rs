//! AI assistant chat with a session sidebar.

use crate::backend::AssistantApi;
use crate::domain::assistant::{ChatReply, ChatRequest, STARTER_PROMPTS};
use crate::domain::types::RecordId;
use crate::dto::pages::{AssistantPageData, MessageView};
use crate::forms::assistant::ChatForm;
use crate::models::session::SessionContext;
use crate::services::{ServiceError, ServiceResult, or_default, parse_id};

/// Loads the sidebar and, when `active` names a session, its messages.
pub async fn load_assistant<R>(
    backend: &R,
    session: &SessionContext,
    active: Option<&str>,
) -> ServiceResult<AssistantPageData>
where
    R: AssistantApi + ?Sized,
{
    let sessions = or_default(backend.list_sessions(session).await, "chat sessions")?;

    let mut notice = None;
    let active = match active.filter(|id| !id.trim().is_empty()) {
        None => None,
        Some(raw) => match parse_id(raw) {
            Ok(id) => match backend.get_session(session, &id).await {
                Ok(chat) => Some(chat),
                Err(err) => match ServiceError::from(err) {
                    ServiceError::Unauthorized => return Err(ServiceError::Unauthorized),
                    ServiceError::NotFound => {
                        notice = Some("That conversation no longer exists.".to_string());
                        None
                    }
                    other => {
                        log::warn!("Failed to load chat session {id}: {other}");
                        notice = Some("Could not load the conversation.".to_string());
                        None
                    }
                },
            },
            Err(_) => {
                notice = Some("That conversation no longer exists.".to_string());
                None
            }
        },
    };

    let messages = active
        .as_ref()
        .map(|chat| chat.messages.iter().cloned().map(MessageView::from).collect())
        .unwrap_or_default();

    Ok(AssistantPageData {
        sessions,
        active,
        messages,
        starter_prompts: STARTER_PROMPTS,
        notice,
    })
}

/// Sends a message; the reply names the session to show next.
pub async fn send_message<R>(
    backend: &R,
    session: &SessionContext,
    form: ChatForm,
) -> ServiceResult<ChatReply>
where
    R: AssistantApi + ?Sized,
{
    let request = ChatRequest::try_from(form)?;
    let reply = backend.chat(session, &request).await?;
    let session_id = RecordId::new(reply.session_id.as_str())?;
    Ok(ChatReply {
        session_id: session_id.to_string(),
        ..reply
    })
}

pub async fn delete_session<R>(backend: &R, session: &SessionContext, id: &str) -> ServiceResult<()>
where
    R: AssistantApi + ?Sized,
{
    let id = parse_id(id)?;
    backend.delete_session(session, &id).await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::backend::errors::BackendError;
    use crate::backend::mock::MockBackend;
    use crate::domain::assistant::{ChatMessage, ChatSession};

    const CHAT_ID: &str = "65a1b2c3d4e5f60718293a4b";

    fn session() -> SessionContext {
        SessionContext::signed_in("viewer", "jwt", "Clerk")
    }

    #[tokio::test]
    async fn new_conversation_offers_starters() {
        let mut backend = MockBackend::new();
        backend.expect_list_sessions().returning(|_| Ok(vec![]));
        backend.expect_get_session().times(0);

        let data = load_assistant(&backend, &session(), None).await.unwrap();

        assert!(data.active.is_none());
        assert_eq!(data.starter_prompts.len(), STARTER_PROMPTS.len());
    }

    #[tokio::test]
    async fn active_session_messages_are_rendered() {
        let mut backend = MockBackend::new();
        backend.expect_list_sessions().returning(|_| Ok(vec![]));
        backend.expect_get_session().returning(|_, _| {
            Ok(ChatSession {
                id: CHAT_ID.into(),
                title: "Bail".into(),
                messages: vec![
                    ChatMessage {
                        role: "user".into(),
                        content: "bail?".into(),
                        ..ChatMessage::default()
                    },
                    ChatMessage {
                        role: "assistant".into(),
                        content: "## Bail".into(),
                        ..ChatMessage::default()
                    },
                ],
            })
        });

        let data = load_assistant(&backend, &session(), Some(CHAT_ID)).await.unwrap();

        assert_eq!(data.messages.len(), 2);
        assert!(data.messages[1].html.is_some());
    }

    #[tokio::test]
    async fn deleted_session_shows_notice() {
        let mut backend = MockBackend::new();
        backend.expect_list_sessions().returning(|_| Ok(vec![]));
        backend
            .expect_get_session()
            .returning(|_, _| Err(BackendError::NotFound));

        let data = load_assistant(&backend, &session(), Some(CHAT_ID)).await.unwrap();

        assert!(data.active.is_none());
        assert!(data.notice.is_some());
    }

    #[tokio::test]
    async fn reply_with_malformed_session_is_rejected() {
        let mut backend = MockBackend::new();
        backend.expect_chat().returning(|_, _| {
            Ok(ChatReply {
                session_id: "../admin".into(),
                response: "hello".into(),
                ..ChatReply::default()
            })
        });
        let form = ChatForm {
            message: "hi".into(),
            session_id: None,
            language: None,
        };

        let result = send_message(&backend, &session(), form).await;

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let mut backend = MockBackend::new();
        backend.expect_chat().times(0);
        let form = ChatForm {
            message: " ".into(),
            session_id: None,
            language: None,
        };

        let result = send_message(&backend, &session(), form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
