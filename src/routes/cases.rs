use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::cases::CaseDetailQuery;
use crate::forms::filters::{CaseFilterForm, SearchFilterForm};
use crate::models::session::SessionContext;
use crate::query::ListQuery;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::cases::{list_cases, load_case_panel, search_cases, show_case};

#[get("/cases")]
pub async fn show_cases(
    params: web::Query<CaseFilterForm>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = match ListQuery::try_from(params.into_inner()) {
        Ok(query) => query,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/cases");
        }
    };

    let view = match list_cases(backend.get_ref(), &views.cases, &context, query).await {
        Ok(view) => view,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "cases");
    page.insert("view", &view);
    render_template(&tera, "cases/index.html", &page)
}

#[get("/cases/{case_id}")]
pub async fn show_case_detail(
    case_id: web::Path<String>,
    params: web::Query<CaseDetailQuery>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match show_case(backend.get_ref(), &context, &case_id).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/cases"),
    };

    let panel = match params.panel() {
        Some(panel) => match load_case_panel(backend.get_ref(), &context, &case_id, panel).await {
            Ok(panel) => Some(panel),
            Err(err) => return service_error_response(err, &session, &views, &context, "/cases"),
        },
        None => None,
    };

    let mut page = base_context(&flash_messages, &context, "cases");
    page.insert("detail", &data);
    page.insert("panel", &panel);
    render_template(&tera, "cases/show.html", &page)
}

#[get("/search")]
pub async fn show_search(
    params: web::Query<SearchFilterForm>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = match ListQuery::try_from(params.into_inner()) {
        Ok(query) => query,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/search");
        }
    };

    let data = match search_cases(backend.get_ref(), &views.search, &context, query).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "search");
    page.insert("search", &data);
    render_template(&tera, "search/index.html", &page)
}
