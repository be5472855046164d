use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::filters::JobFilterForm;
use crate::forms::scraper::ScraperRunForm;
use crate::models::session::AuthenticatedSession;
use crate::query::ListQuery;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::scraper::{list_jobs, run_scraper};

#[get("/scraper")]
pub async fn show_scraper(
    params: web::Query<JobFilterForm>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::from(params.into_inner());
    let data = match list_jobs(backend.get_ref(), &views.jobs, &context, query).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "scraper");
    page.insert("scraper", &data);
    render_template(&tera, "scraper/index.html", &page)
}

#[post("/scraper/run")]
pub async fn start_run(
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    web::Form(form): web::Form<ScraperRunForm>,
) -> impl Responder {
    match run_scraper(backend.get_ref(), &context, form).await {
        Ok(accepted) => {
            FlashMessage::success(format!("Scraper job {} queued.", accepted.job_id)).send();
            redirect("/scraper?retry=1")
        }
        Err(err) => service_error_response(err, &session, &views, &context, "/scraper"),
    }
}
