use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::documents::UploadDocumentForm;
use crate::forms::filters::DocumentFilterForm;
use crate::models::session::AuthenticatedSession;
use crate::query::ListQuery;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::documents::{
    delete_document, download_document, list_documents, process_document, show_document,
    upload_document,
};
use crate::services::{ListViews, ServiceError};

#[get("/documents")]
pub async fn show_documents(
    params: web::Query<DocumentFilterForm>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::from(params.into_inner());
    let data = match list_documents(backend.get_ref(), &views.documents, &context, query).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/"),
    };

    let mut page = base_context(&flash_messages, &context, "documents");
    page.insert("documents", &data);
    render_template(&tera, "documents/index.html", &page)
}

#[post("/documents/upload")]
pub async fn upload(
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    MultipartForm(form): MultipartForm<UploadDocumentForm>,
) -> impl Responder {
    let document = match form.into_document() {
        Ok(document) => document,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect("/documents");
        }
    };

    match upload_document(backend.get_ref(), &context, document).await {
        Ok(document) => {
            FlashMessage::success(format!("Uploaded {}.", document.original_filename)).send();
            redirect(&format!("/documents/{}", document.id))
        }
        Err(err) => service_error_response(err, &session, &views, &context, "/documents"),
    }
}

#[get("/documents/{document_id}")]
pub async fn show_document_detail(
    document_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match show_document(backend.get_ref(), &context, &document_id).await {
        Ok(data) => data,
        Err(err) => return service_error_response(err, &session, &views, &context, "/documents"),
    };

    let mut page = base_context(&flash_messages, &context, "documents");
    page.insert("detail", &data);
    render_template(&tera, "documents/show.html", &page)
}

#[post("/documents/{document_id}/process")]
pub async fn process(
    document_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
) -> impl Responder {
    let back_to = format!("/documents/{document_id}");
    match process_document(backend.get_ref(), &context, &document_id).await {
        Ok(_) => {
            FlashMessage::success("Document processed.").send();
            redirect(&back_to)
        }
        Err(err) => service_error_response(err, &session, &views, &context, &back_to),
    }
}

#[post("/documents/{document_id}/delete")]
pub async fn delete(
    document_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
) -> impl Responder {
    match delete_document(backend.get_ref(), &context, &document_id).await {
        Ok(message) => {
            let message = if message.is_empty() {
                "Document deleted.".to_string()
            } else {
                message
            };
            FlashMessage::success(message).send();
            redirect("/documents")
        }
        Err(err) => service_error_response(err, &session, &views, &context, "/documents"),
    }
}

/// Streams the stored file back with the backend's name and content type.
#[get("/documents/{document_id}/download")]
pub async fn download(
    document_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
) -> impl Responder {
    let file = match download_document(backend.get_ref(), &context, &document_id).await {
        Ok(file) => file,
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            let back_to = format!("/documents/{document_id}");
            return service_error_response(err, &session, &views, &context, &back_to);
        }
    };

    let file_name = file
        .file_name
        .unwrap_or_else(|| format!("document-{document_id}"));
    HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(file.bytes)
}
