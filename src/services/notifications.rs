//! Hearing reminders and notices of the signed-in user.

use crate::backend::errors::BackendError;
use crate::backend::{NotificationReader, NotificationWriter};
use crate::domain::notification::{NewReminder, Notification};
use crate::dto::cards::NotificationRow;
use crate::dto::pages::NotificationsPageData;
use crate::forms::notifications::ReminderForm;
use crate::models::session::SessionContext;
use crate::query::{ListQuery, ViewRegistry, ViewSnapshot, ViewSpec};
use crate::services::{ServiceResult, into_view, parse_id};

pub const NOTIFICATIONS_VIEW: ViewSpec = ViewSpec {
    name: "notifications",
    list_key: "notifications",
    page_size: 20,
    sort: None,
    fields: &["unread_only"],
};

pub async fn list_notifications<R>(
    backend: &R,
    views: &ViewRegistry<Notification>,
    session: &SessionContext,
    query: ListQuery,
) -> ServiceResult<NotificationsPageData>
where
    R: NotificationReader + ?Sized,
{
    let controller = views.controller(&session.view_key);
    let intent = controller.intent_for(query);
    let mut unread_count = None;
    let unread_slot = &mut unread_count;
    let outcome = controller
        .dispatch(intent, move |request| async move {
            let listing = backend.list_notifications(session, &request).await?;
            *unread_slot = Some(listing.unread_count);
            Ok::<_, BackendError>(listing.page)
        })
        .await;

    let view: ViewSnapshot<NotificationRow> = into_view(outcome)?;
    // Unknown after a failed fetch; count the rows still on screen.
    let unread_count = unread_count.unwrap_or_else(|| {
        view.items().iter().filter(|row| !row.is_read).count() as u64
    });
    Ok(NotificationsPageData { view, unread_count })
}

pub async fn create_reminder<R>(
    backend: &R,
    session: &SessionContext,
    form: ReminderForm,
) -> ServiceResult<Notification>
where
    R: NotificationWriter + ?Sized,
{
    let reminder = NewReminder::try_from(form)?;
    log::info!("Creating hearing reminder '{}'", reminder.title);
    Ok(backend.create_reminder(session, &reminder).await?)
}

pub async fn mark_read<R>(backend: &R, session: &SessionContext, id: &str) -> ServiceResult<()>
where
    R: NotificationWriter + ?Sized,
{
    let id = parse_id(id)?;
    Ok(backend.mark_read(session, &id).await?)
}

pub async fn mark_all_read<R>(backend: &R, session: &SessionContext) -> ServiceResult<()>
where
    R: NotificationWriter + ?Sized,
{
    Ok(backend.mark_all_read(session).await?)
}

pub async fn delete_notification<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
) -> ServiceResult<()>
where
    R: NotificationWriter + ?Sized,
{
    let id = parse_id(id)?;
    Ok(backend.delete_notification(session, &id).await?)
}
