use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::filters::AnalyticsFilterForm;
use crate::models::session::SessionContext;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::analytics::{load_analytics, load_dashboard};

#[get("/")]
pub async fn show_dashboard(
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_dashboard(backend.get_ref(), &context).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/cases"),
    };

    let mut page = base_context(&flash_messages, &context, "dashboard");
    page.insert("dashboard", &data);
    render_template(&tera, "dashboard/index.html", &page)
}

#[get("/analytics")]
pub async fn show_analytics(
    params: web::Query<AnalyticsFilterForm>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let year = match params.year() {
        Ok(year) => year,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/analytics");
        }
    };

    let data = match load_analytics(backend.get_ref(), &context, year).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "analytics");
    page.insert("analytics", &data);
    render_template(&tera, "analytics/index.html", &page)
}
