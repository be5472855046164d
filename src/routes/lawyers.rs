use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::filters::LawyerFilterForm;
use crate::forms::lawyers::ReviewForm;
use crate::models::session::{AuthenticatedSession, SessionContext};
use crate::query::ListQuery;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::lawyers::{list_lawyers, review_lawyer, show_lawyer};

#[get("/lawyers")]
pub async fn show_lawyers(
    params: web::Query<LawyerFilterForm>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::from(params.into_inner());
    let data = match list_lawyers(backend.get_ref(), &views.lawyers, &context, query).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "lawyers");
    page.insert("lawyers", &data);
    render_template(&tera, "lawyers/index.html", &page)
}

#[get("/lawyers/{lawyer_id}")]
pub async fn show_lawyer_detail(
    lawyer_id: web::Path<String>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match show_lawyer(backend.get_ref(), &context, &lawyer_id).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/lawyers"),
    };

    let mut page = base_context(&flash_messages, &context, "lawyers");
    page.insert("detail", &data);
    render_template(&tera, "lawyers/show.html", &page)
}

#[post("/lawyers/{lawyer_id}/review")]
pub async fn submit_review(
    lawyer_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    web::Form(form): web::Form<ReviewForm>,
) -> impl Responder {
    let back_to = format!("/lawyers/{lawyer_id}");
    match review_lawyer(backend.get_ref(), &context, &lawyer_id, form).await {
        Ok(accepted) => {
            let message = if accepted.message.is_empty() {
                "Review submitted.".to_string()
            } else {
                accepted.message
            };
            FlashMessage::success(message).send();
            redirect(&back_to)
        }
        Err(err) => service_error_response(err, &session, &views, &context, &back_to),
    }
}
