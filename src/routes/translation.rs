use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::translation::TranslateForm;
use crate::models::session::SessionContext;
use crate::routes::{base_context, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::translation::{load_translation, translate};

#[get("/translation")]
pub async fn show_translation(
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_translation(backend.get_ref(), &context).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "translation");
    page.insert("translation", &data);
    render_template(&tera, "translation/index.html", &page)
}

#[post("/translation")]
pub async fn submit_translation(
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<TranslateForm>,
) -> impl Responder {
    let data = match translate(backend.get_ref(), &context, form).await {
        Ok(data) => data,
        Err(err) => {
            return service_error_response(err, &session, &views, &context, "/translation");
        }
    };

    let mut page = base_context(&flash_messages, &context, "translation");
    page.insert("translation", &data);
    render_template(&tera, "translation/index.html", &page)
}
