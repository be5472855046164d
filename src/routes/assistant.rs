use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::domain::types::RecordId;
use crate::forms::assistant::ChatForm;
use crate::models::session::AuthenticatedSession;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::assistant::{delete_session, load_assistant, send_message};

#[derive(Deserialize)]
pub struct AssistantParams {
    session: Option<String>,
}

#[get("/assistant")]
pub async fn show_assistant(
    params: web::Query<AssistantParams>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let active = params.session.as_deref();
    let data = match load_assistant(backend.get_ref(), &context, active).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "assistant");
    page.insert("assistant", &data);
    render_template(&tera, "assistant/index.html", &page)
}

#[post("/assistant")]
pub async fn submit_message(
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    web::Form(form): web::Form<ChatForm>,
) -> impl Responder {
    let back_to = match form.session_id.as_deref().and_then(|id| RecordId::new(id).ok()) {
        Some(id) => format!("/assistant?session={id}"),
        None => "/assistant".to_string(),
    };
    match send_message(backend.get_ref(), &context, form).await {
        Ok(reply) => redirect(&format!("/assistant?session={}", reply.session_id)),
        Err(err) => service_error_response(err, &session, &views, &context, &back_to),
    }
}

#[post("/assistant/sessions/{chat_id}/delete")]
pub async fn remove_session(
    chat_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
) -> impl Responder {
    match delete_session(backend.get_ref(), &context, &chat_id).await {
        Ok(()) => redirect("/assistant"),
        Err(err) => service_error_response(err, &session, &views, &context, "/assistant"),
    }
}
