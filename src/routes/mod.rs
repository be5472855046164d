//! HTTP handlers and the helpers they share.

use actix_session::Session;
use actix_web::{HttpResponse, http::header};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::session::SessionContext;
use crate::services::{ListViews, ServiceError};

pub mod analytics;
pub mod assistant;
pub mod auth;
pub mod cases;
pub mod documents;
pub mod lawyers;
pub mod legal_templates;
pub mod notifications;
pub mod profile;
pub mod scraper;
pub mod translation;

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Context every page template expects: alerts, navigation state and user.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    session: &SessionContext,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("signed_in", &session.is_authenticated());
    context.insert("current_user", &session.user_name);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Forgets the browser's token and list state and sends it to the login page.
pub fn expire_session(session: &Session, views: &ListViews, context: &SessionContext) -> HttpResponse {
    views.discard(&context.view_key);
    session.purge();
    FlashMessage::warning("Your session has expired. Please sign in again.").send();
    redirect("/login")
}

/// Answers a failed service call with a flash message and a redirect to `back_to`.
pub fn service_error_response(
    err: ServiceError,
    session: &Session,
    views: &ListViews,
    context: &SessionContext,
    back_to: &str,
) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => expire_session(session, views, context),
        ServiceError::NotFound => {
            FlashMessage::error("The requested record was not found.").send();
            redirect(back_to)
        }
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            FlashMessage::error(message).send();
            redirect(back_to)
        }
        ServiceError::Backend(err) => {
            log::error!("Backend request failed: {err}");
            FlashMessage::error(err.user_message()).send();
            redirect(back_to)
        }
    }
}

