//! Contract of the external REST backend.
//!
//! Every page handler reaches the backend through the traits below so that
//! services can be exercised against mocks. [`http::HttpBackend`] is the
//! production implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::errors::{BackendError, BackendResult};
use crate::domain::analytics::{CourtAnalytics, DashboardStats, TimelinePoint};
use crate::domain::assistant::{ChatReply, ChatRequest, ChatSession, ChatSessionSummary};
use crate::domain::auth::{
    Credentials, LoginResponse, ProfileResponse, ProfileUpdate, Registration, UserProfile,
};
use crate::domain::case::{
    Case, CaseCard, CaseEntities, CaseSummary, JudgeCount, SearchFacets, SimilarCase,
};
use crate::domain::document::{DocumentFile, LegalDocument, NewDocument};
use crate::domain::lawyer::{Lawyer, LawyerCard, LawyerFacets, NewReview, ReviewAccepted};
use crate::domain::legal_template::{
    GeneratedDocument, LegalTemplate, TemplateCard, TemplateCategory, TemplateValues,
};
use crate::domain::notification::{NewReminder, Notification};
use crate::domain::scrape_job::{ScrapeJob, ScraperInfo, ScraperRun, ScraperRunAccepted};
use crate::domain::translation::{GlossaryTerm, TranslationRequest, TranslationResult};
use crate::domain::types::RecordId;
use crate::models::session::SessionContext;
use crate::pagination::Pagination;
use crate::query::ListRequest;

pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// One page of a backend listing.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Notifications page together with the user's unread count.
#[derive(Clone, Debug, PartialEq)]
pub struct NotificationPage {
    pub page: Page<Notification>,
    pub unread_count: u64,
}

/// Decodes a list body of the form `{"<list_key>": [...], "pagination": {...}}`.
///
/// Listings without a `pagination` object are treated as a single page whose
/// size is the body's `total` (or the number of items).
pub fn decode_page<T: DeserializeOwned>(mut body: Value, list_key: &str) -> BackendResult<Page<T>> {
    let raw_items = body
        .get_mut(list_key)
        .map(Value::take)
        .ok_or_else(|| BackendError::Decode(format!("missing `{list_key}` in list response")))?;
    let items: Vec<T> = match raw_items {
        Value::Null => Vec::new(),
        raw => serde_json::from_value(raw)?,
    };

    let pagination = match body.get_mut("pagination").map(Value::take) {
        None | Some(Value::Null) => {
            let total = body
                .get("total")
                .and_then(Value::as_u64)
                .map_or(items.len(), |total| total as usize);
            Pagination::single_page(total)
        }
        Some(raw) => serde_json::from_value::<Pagination>(raw)?.normalized(),
    };

    Ok(Page { items, pagination })
}

/// Decodes a notifications listing, which carries `unread_count` beside the page.
pub fn decode_notification_page(body: Value, list_key: &str) -> BackendResult<NotificationPage> {
    let unread_count = body.get("unread_count").and_then(Value::as_u64).unwrap_or(0);
    Ok(NotificationPage {
        page: decode_page(body, list_key)?,
        unread_count,
    })
}

/// Extracts `body[key]` into `T`.
pub fn decode_field<T: DeserializeOwned>(mut body: Value, key: &str) -> BackendResult<T> {
    match body.get_mut(key).map(Value::take) {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Err(BackendError::Decode(format!("missing `{key}` in response"))),
    }
}

#[async_trait]
pub trait AuthApi {
    async fn login(&self, credentials: &Credentials) -> BackendResult<LoginResponse>;
    async fn register(&self, registration: &Registration) -> BackendResult<LoginResponse>;
}

#[async_trait]
pub trait ProfileApi {
    async fn get_profile(&self, session: &SessionContext) -> BackendResult<ProfileResponse>;
    async fn update_profile(
        &self,
        session: &SessionContext,
        update: &ProfileUpdate,
    ) -> BackendResult<UserProfile>;
}

#[async_trait]
pub trait CaseReader {
    async fn list_cases(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<CaseCard>>;
    async fn search_cases(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<CaseCard>>;
    async fn search_facets(&self, session: &SessionContext) -> BackendResult<SearchFacets>;
    async fn get_case(&self, session: &SessionContext, id: &RecordId) -> BackendResult<Case>;
}

/// Generated views over a single judgment.
#[async_trait]
pub trait CaseInsights {
    async fn summarize_case(&self, session: &SessionContext, id: &RecordId)
    -> BackendResult<CaseSummary>;
    async fn case_entities(&self, session: &SessionContext, id: &RecordId)
    -> BackendResult<CaseEntities>;
    async fn similar_cases(
        &self,
        session: &SessionContext,
        id: &RecordId,
        limit: usize,
    ) -> BackendResult<Vec<SimilarCase>>;
}

#[async_trait]
pub trait LawyerReader {
    async fn list_lawyers(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<LawyerCard>>;
    async fn get_lawyer(&self, session: &SessionContext, id: &RecordId) -> BackendResult<Lawyer>;
    async fn lawyer_facets(&self, session: &SessionContext) -> BackendResult<LawyerFacets>;
}

#[async_trait]
pub trait LawyerWriter {
    async fn review_lawyer(
        &self,
        session: &SessionContext,
        id: &RecordId,
        review: &NewReview,
    ) -> BackendResult<ReviewAccepted>;
}

#[async_trait]
pub trait DocumentReader {
    async fn list_documents(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<LegalDocument>>;
    async fn get_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<LegalDocument>;
    async fn download_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<DocumentFile>;
}

#[async_trait]
pub trait DocumentWriter {
    async fn upload_document(
        &self,
        session: &SessionContext,
        document: NewDocument,
    ) -> BackendResult<LegalDocument>;
    async fn process_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<LegalDocument>;
    async fn delete_document(&self, session: &SessionContext, id: &RecordId)
    -> BackendResult<String>;
}

#[async_trait]
pub trait TemplateReader {
    async fn list_templates(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<TemplateCard>>;
    async fn get_template(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<LegalTemplate>;
    async fn template_categories(
        &self,
        session: &SessionContext,
    ) -> BackendResult<Vec<TemplateCategory>>;
}

#[async_trait]
pub trait TemplateWriter {
    async fn generate_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
        values: &TemplateValues,
    ) -> BackendResult<GeneratedDocument>;
}

#[async_trait]
pub trait ScraperReader {
    async fn list_jobs(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<ScrapeJob>>;
    async fn available_scrapers(&self, session: &SessionContext)
    -> BackendResult<Vec<ScraperInfo>>;
}

#[async_trait]
pub trait ScraperWriter {
    async fn run_scraper(
        &self,
        session: &SessionContext,
        run: &ScraperRun,
    ) -> BackendResult<ScraperRunAccepted>;
}

#[async_trait]
pub trait AssistantApi {
    async fn chat(&self, session: &SessionContext, request: &ChatRequest)
    -> BackendResult<ChatReply>;
    async fn list_sessions(
        &self,
        session: &SessionContext,
    ) -> BackendResult<Vec<ChatSessionSummary>>;
    async fn get_session(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<ChatSession>;
    async fn delete_session(&self, session: &SessionContext, id: &RecordId) -> BackendResult<()>;
}

#[async_trait]
pub trait TranslationApi {
    async fn translate(
        &self,
        session: &SessionContext,
        request: &TranslationRequest,
    ) -> BackendResult<TranslationResult>;
    async fn glossary(&self, session: &SessionContext) -> BackendResult<Vec<GlossaryTerm>>;
}

#[async_trait]
pub trait NotificationReader {
    async fn list_notifications(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<NotificationPage>;
}

#[async_trait]
pub trait NotificationWriter {
    async fn create_reminder(
        &self,
        session: &SessionContext,
        reminder: &NewReminder,
    ) -> BackendResult<Notification>;
    async fn mark_read(&self, session: &SessionContext, id: &RecordId) -> BackendResult<()>;
    async fn mark_all_read(&self, session: &SessionContext) -> BackendResult<()>;
    async fn delete_notification(&self, session: &SessionContext, id: &RecordId)
    -> BackendResult<()>;
}

#[async_trait]
pub trait AnalyticsReader {
    async fn dashboard(&self, session: &SessionContext) -> BackendResult<DashboardStats>;
    async fn court_analytics(&self, session: &SessionContext)
    -> BackendResult<Vec<CourtAnalytics>>;
    async fn top_judges(
        &self,
        session: &SessionContext,
        limit: usize,
    ) -> BackendResult<Vec<JudgeCount>>;
    /// Monthly case counts of `year`, January first.
    async fn case_timeline(&self, session: &SessionContext, year: i32)
    -> BackendResult<Vec<TimelinePoint>>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn decodes_paginated_list() {
        let body = json!({
            "cases": [{"id": "a"}, {"id": "b"}],
            "pagination": {"page": 2, "page_size": 2, "total": 7, "total_pages": 4, "has_next": true}
        });
        let page: Page<Item> = decode_page(body, "cases").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination, Pagination::new(2, 2, 7));
    }

    #[test]
    fn repairs_inconsistent_pagination() {
        let body = json!({
            "jobs": [],
            "pagination": {"page": 1, "per_page": 20, "total": 41, "total_pages": 1}
        });
        let page: Page<Item> = decode_page(body, "jobs").unwrap();
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.page_size, 20);
    }

    #[test]
    fn unpaginated_listing_is_one_page() {
        let body = json!({"templates": [{"id": "a"}, {"id": "b"}], "total": 2});
        let page: Page<Item> = decode_page(body, "templates").unwrap();
        assert_eq!(page.pagination, Pagination::single_page(2));
    }

    #[test]
    fn missing_list_key_is_a_decode_error() {
        let result: BackendResult<Page<Item>> = decode_page(json!({"error": "x"}), "cases");
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn notification_page_keeps_unread_count() {
        let body = json!({
            "notifications": [{"id": "n1", "title": "Hearing", "is_read": false}],
            "unread_count": 3,
            "pagination": {"page": 1, "page_size": 20, "total": 1, "total_pages": 1}
        });
        let listing = decode_notification_page(body, "notifications").unwrap();
        assert_eq!(listing.unread_count, 3);
        assert_eq!(listing.page.items[0].title, "Hearing");
        assert!(!listing.page.items[0].is_read);
    }

    #[test]
    fn decodes_single_field() {
        let item: Item = decode_field(json!({"case": {"id": "c"}}), "case").unwrap();
        assert_eq!(item.id, "c");
        let missing: BackendResult<Item> = decode_field(json!({}), "case");
        assert!(missing.is_err());
    }
}
