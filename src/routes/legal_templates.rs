use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::filters::TemplateFilterForm;
use crate::forms::legal_templates::GenerateForm;
use crate::models::session::SessionContext;
use crate::query::ListQuery;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::legal_templates::{generate_document, list_templates, show_template};

#[get("/legal-templates")]
pub async fn show_templates(
    params: web::Query<TemplateFilterForm>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::from(params.into_inner());
    let data = match list_templates(backend.get_ref(), &views.templates, &context, query).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "legal_templates");
    page.insert("templates", &data);
    render_template(&tera, "legal_templates/index.html", &page)
}

#[get("/legal-templates/{template_id}")]
pub async fn show_template_detail(
    template_id: web::Path<String>,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match show_template(backend.get_ref(), &context, &template_id).await {
        Ok(data) => data,
        Err(err) => {
            return service_error_response(err, &session, &views, &context, "/legal-templates");
        }
    };

    let mut page = base_context(&flash_messages, &context, "legal_templates");
    page.insert("detail", &data);
    render_template(&tera, "legal_templates/show.html", &page)
}

/// Fills the template and renders the generated text below the form.
#[post("/legal-templates/{template_id}/generate")]
pub async fn generate(
    template_id: web::Path<String>,
    body: web::Bytes,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let back_to = format!("/legal-templates/{template_id}");
    let form = match GenerateForm::parse(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&back_to);
        }
    };

    let data = match generate_document(backend.get_ref(), &context, &template_id, form).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, &back_to),
    };

    let mut page = base_context(&flash_messages, &context, "legal_templates");
    page.insert("detail", &data);
    render_template(&tera, "legal_templates/show.html", &page)
}
