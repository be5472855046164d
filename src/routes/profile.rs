use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::profile::ProfileForm;
use crate::models::session::{AuthenticatedSession, SessionContext};
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::profile::{load_profile, update_profile};

#[get("/profile")]
pub async fn show_profile(
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_profile(backend.get_ref(), &context).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "profile");
    page.insert("account", &data);
    render_template(&tera, "profile/index.html", &page)
}

#[post("/profile")]
pub async fn save_profile(
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    web::Form(form): web::Form<ProfileForm>,
) -> impl Responder {
    let profile = match update_profile(backend.get_ref(), &context, form).await {
        Ok(profile) => profile,
        Err(err) => return service_error_response(err, &session, &views, &context, "/profile"),
    };

    let name = profile.display_name();
    if !name.is_empty() {
        if let Err(err) = SessionContext::store_user_name(&session, &name) {
            log::error!("Failed to store user name in session: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }
    FlashMessage::success("Profile updated.").send();
    redirect("/profile")
}
