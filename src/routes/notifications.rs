use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::forms::filters::NotificationFilterForm;
use crate::forms::notifications::ReminderForm;
use crate::models::session::AuthenticatedSession;
use crate::query::ListQuery;
use crate::routes::{base_context, redirect, render_template, service_error_response};
use crate::services::ListViews;
use crate::services::notifications::{
    create_reminder, delete_notification, list_notifications, mark_all_read, mark_read,
};

#[get("/notifications")]
pub async fn show_notifications(
    params: web::Query<NotificationFilterForm>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ListQuery::from(params.into_inner());
    let data =
        match list_notifications(backend.get_ref(), &views.notifications, &context, query).await {
            Ok(data) => data,
            Err(err) => return service_error_response(err, &session, &views, &context, "/"),
        };

    let mut page = base_context(&flash_messages, &context, "notifications");
    page.insert("notifications", &data);
    render_template(&tera, "notifications/index.html", &page)
}

#[post("/notifications")]
pub async fn add_reminder(
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    web::Form(form): web::Form<ReminderForm>,
) -> impl Responder {
    match create_reminder(backend.get_ref(), &context, form).await {
        Ok(reminder) => {
            FlashMessage::success(format!("Reminder '{}' saved.", reminder.title)).send();
            redirect("/notifications")
        }
        Err(err) => service_error_response(err, &session, &views, &context, "/notifications"),
    }
}

#[post("/notifications/read-all")]
pub async fn read_all(
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
) -> impl Responder {
    match mark_all_read(backend.get_ref(), &context).await {
        Ok(()) => {
            FlashMessage::success("All notifications marked as read.").send();
            redirect("/notifications")
        }
        Err(err) => service_error_response(err, &session, &views, &context, "/notifications"),
    }
}

#[post("/notifications/{notification_id}/read")]
pub async fn read(
    notification_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
) -> impl Responder {
    match mark_read(backend.get_ref(), &context, &notification_id).await {
        Ok(()) => redirect("/notifications"),
        Err(err) => service_error_response(err, &session, &views, &context, "/notifications"),
    }
}

#[post("/notifications/{notification_id}/delete")]
pub async fn delete(
    notification_id: web::Path<String>,
    context: AuthenticatedSession,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
) -> impl Responder {
    match delete_notification(backend.get_ref(), &context, &notification_id).await {
        Ok(()) => {
            FlashMessage::success("Notification deleted.").send();
            redirect("/notifications")
        }
        Err(err) => service_error_response(err, &session, &views, &context, "/notifications"),
    }
}
