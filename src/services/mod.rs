//! Page services sitting between routes and the backend traits.

use std::time::Duration;

use thiserror::Error;

use crate::backend::errors::BackendError;
use crate::domain::case::CaseCard;
use crate::domain::document::LegalDocument;
use crate::domain::lawyer::LawyerCard;
use crate::domain::legal_template::TemplateCard;
use crate::domain::notification::Notification;
use crate::domain::scrape_job::ScrapeJob;
use crate::domain::types::RecordId;
use crate::dto::cards::render_results;
use crate::forms::FormError;
use crate::query::{FetchOutcome, ViewRegistry, ViewSnapshot};

pub mod analytics;
pub mod assistant;
pub mod auth;
pub mod cases;
pub mod documents;
pub mod lawyers;
pub mod legal_templates;
pub mod notifications;
pub mod profile;
pub mod scraper;
pub mod translation;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    #[error("backend error: {0}")]
    Backend(BackendError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<BackendError> for ServiceError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthorized => ServiceError::Unauthorized,
            BackendError::NotFound => ServiceError::NotFound,
            other => ServiceError::Backend(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Record id taken from a URL path; malformed ids cannot exist.
pub(crate) fn parse_id(raw: &str) -> ServiceResult<RecordId> {
    RecordId::new(raw).map_err(|_| ServiceError::NotFound)
}

/// Turns a list fetch into a rendered snapshot.
///
/// Fetch failures stay on the snapshot as a notice, except a rejected token
/// which ends the session.
pub(crate) fn into_view<T, V>(outcome: FetchOutcome<T>) -> ServiceResult<ViewSnapshot<V>>
where
    V: From<T>,
{
    if matches!(outcome.error, Some(BackendError::Unauthorized)) {
        return Err(ServiceError::Unauthorized);
    }
    Ok(outcome.snapshot.map_items(render_results::<T, V>))
}

/// Logs a failed auxiliary fetch and falls back to the default value.
///
/// A rejected token is still reported so the caller can end the session.
pub(crate) fn or_default<T: Default>(
    result: Result<T, BackendError>,
    what: &str,
) -> ServiceResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(BackendError::Unauthorized) => Err(ServiceError::Unauthorized),
        Err(err) => {
            log::warn!("Failed to load {what}: {err}");
            Ok(T::default())
        }
    }
}

/// Per-viewer controllers of every paginated list view.
pub struct ListViews {
    pub cases: ViewRegistry<CaseCard>,
    pub search: ViewRegistry<CaseCard>,
    pub lawyers: ViewRegistry<LawyerCard>,
    pub documents: ViewRegistry<LegalDocument>,
    pub jobs: ViewRegistry<ScrapeJob>,
    pub templates: ViewRegistry<TemplateCard>,
    pub notifications: ViewRegistry<Notification>,
}

impl ListViews {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            cases: ViewRegistry::new(cases::CASES_VIEW, idle_ttl),
            search: ViewRegistry::new(cases::SEARCH_VIEW, idle_ttl),
            lawyers: ViewRegistry::new(lawyers::LAWYERS_VIEW, idle_ttl),
            documents: ViewRegistry::new(documents::DOCUMENTS_VIEW, idle_ttl),
            jobs: ViewRegistry::new(scraper::JOBS_VIEW, idle_ttl),
            templates: ViewRegistry::new(legal_templates::TEMPLATES_VIEW, idle_ttl),
            notifications: ViewRegistry::new(notifications::NOTIFICATIONS_VIEW, idle_ttl),
        }
    }

    /// Forgets every list state of one viewer.
    pub fn discard(&self, view_key: &str) {
        self.cases.discard(view_key);
        self.search.discard(view_key);
        self.lawyers.discard(view_key);
        self.documents.discard(view_key);
        self.jobs.discard(view_key);
        self.templates.discard(view_key);
        self.notifications.discard(view_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_errors_are_lifted() {
        assert!(matches!(
            ServiceError::from(BackendError::Unauthorized),
            ServiceError::Unauthorized
        ));
        assert!(matches!(ServiceError::from(BackendError::NotFound), ServiceError::NotFound));
        assert!(matches!(
            ServiceError::from(BackendError::Timeout),
            ServiceError::Backend(BackendError::Timeout)
        ));
    }

    #[test]
    fn malformed_path_id_is_not_found() {
        assert!(matches!(parse_id("../etc"), Err(ServiceError::NotFound)));
        assert!(parse_id("65a1b2c3d4e5f60718293a4b").is_ok());
    }

    #[test]
    fn discard_forgets_every_view() {
        let views = ListViews::new(Duration::from_secs(60));
        views.cases.controller("k");
        views.jobs.controller("k");
        views.notifications.controller("k");
        views.discard("k");
        assert!(views.cases.is_empty());
        assert!(views.jobs.is_empty());
        assert!(views.notifications.is_empty());
    }
}
