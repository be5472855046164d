//! `reqwest` implementation of the backend traits.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::errors::{BackendError, BackendResult};
use crate::backend::{
    AnalyticsReader, AssistantApi, AuthApi, CaseInsights, CaseReader, DocumentReader,
    DocumentWriter, LawyerReader, LawyerWriter, NotificationPage, NotificationReader,
    NotificationWriter, Page, ProfileApi, ScraperReader, ScraperWriter, TemplateReader,
    TemplateWriter, TranslationApi, decode_field, decode_notification_page, decode_page,
};
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
use crate::query::ListRequest;

/// JSON/HTTP client for the backend REST API.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Builds a client whose every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str, session: Option<&SessionContext>) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match session.and_then(|session| session.token.as_deref()) {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> BackendResult<Value> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::from_status(status.as_u16(), error_message(&body)));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_field<T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
        key: &str,
    ) -> BackendResult<T> {
        let body = self.send(self.request(Method::GET, path, Some(session))).await?;
        decode_field(body, key)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        session: &SessionContext,
        path: &str,
        request: &ListRequest,
    ) -> BackendResult<Page<T>> {
        let builder = self
            .request(Method::GET, path, Some(session))
            .query(&request.params);
        let body = self.send(builder).await?;
        decode_page(body, request.list_key)
    }
}

/// Extracts a readable message from an `{"error": string | object}` body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(field, detail)| match detail {
                    Value::Array(messages) => {
                        let joined = messages
                            .iter()
                            .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_string))
                            .collect::<Vec<_>>()
                            .join(" ");
                        format!("{field}: {joined}")
                    }
                    Value::String(message) => format!("{field}: {message}"),
                    other => format!("{field}: {other}"),
                })
                .collect();
            Some(parts.join("; "))
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// File name from a `Content-Disposition: attachment; filename="..."` header.
fn attachment_name(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
            .filter(|name| !name.is_empty())
    })
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> BackendResult<LoginResponse> {
        let body = self
            .send(self.request(Method::POST, "/auth/login", None).json(credentials))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn register(&self, registration: &Registration) -> BackendResult<LoginResponse> {
        let body = self
            .send(self.request(Method::POST, "/auth/register", None).json(registration))
            .await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[async_trait]
impl ProfileApi for HttpBackend {
    async fn get_profile(&self, session: &SessionContext) -> BackendResult<ProfileResponse> {
        let body = self
            .send(self.request(Method::GET, "/auth/me", Some(session)))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn update_profile(
        &self,
        session: &SessionContext,
        update: &ProfileUpdate,
    ) -> BackendResult<UserProfile> {
        let builder = self
            .request(Method::PUT, "/auth/me", Some(session))
            .json(update);
        decode_field(self.send(builder).await?, "user")
    }
}

#[async_trait]
impl CaseReader for HttpBackend {
    async fn list_cases(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<CaseCard>> {
        self.list(session, "/cases", request).await
    }

    async fn search_cases(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<CaseCard>> {
        self.list(session, "/search", request).await
    }

    async fn search_facets(&self, session: &SessionContext) -> BackendResult<SearchFacets> {
        let body = self
            .send(self.request(Method::GET, "/search/filters", Some(session)))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_case(&self, session: &SessionContext, id: &RecordId) -> BackendResult<Case> {
        self.get_field(session, &format!("/cases/{id}"), "case").await
    }
}

#[async_trait]
impl CaseInsights for HttpBackend {
    async fn summarize_case(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<CaseSummary> {
        let body = self
            .send(self.request(Method::GET, &format!("/ai/summarize/{id}"), Some(session)))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn case_entities(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<CaseEntities> {
        let extraction: BTreeMap<String, Value> = self
            .get_field(session, &format!("/ai/extract/{id}"), "extraction")
            .await?;
        Ok(CaseEntities::from_extraction(extraction))
    }

    async fn similar_cases(
        &self,
        session: &SessionContext,
        id: &RecordId,
        limit: usize,
    ) -> BackendResult<Vec<SimilarCase>> {
        let builder = self
            .request(Method::GET, &format!("/ai/similar/{id}"), Some(session))
            .query(&[("limit", limit)]);
        decode_field(self.send(builder).await?, "similar_cases")
    }
}

#[async_trait]
impl LawyerReader for HttpBackend {
    async fn list_lawyers(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<LawyerCard>> {
        self.list(session, "/lawyers", request).await
    }

    async fn get_lawyer(&self, session: &SessionContext, id: &RecordId) -> BackendResult<Lawyer> {
        self.get_field(session, &format!("/lawyers/{id}"), "lawyer").await
    }

    async fn lawyer_facets(&self, session: &SessionContext) -> BackendResult<LawyerFacets> {
        let cities = self.get_field(session, "/lawyers/cities", "cities").await?;
        let specializations = self
            .get_field(session, "/lawyers/specializations", "specializations")
            .await?;
        Ok(LawyerFacets {
            cities,
            specializations,
        })
    }
}

#[async_trait]
impl LawyerWriter for HttpBackend {
    async fn review_lawyer(
        &self,
        session: &SessionContext,
        id: &RecordId,
        review: &NewReview,
    ) -> BackendResult<ReviewAccepted> {
        let builder = self
            .request(Method::POST, &format!("/lawyers/{id}/review"), Some(session))
            .json(review);
        Ok(serde_json::from_value(self.send(builder).await?)?)
    }
}

#[async_trait]
impl DocumentReader for HttpBackend {
    async fn list_documents(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<LegalDocument>> {
        self.list(session, "/documents", request).await
    }

    async fn get_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<LegalDocument> {
        self.get_field(session, &format!("/documents/{id}"), "document")
            .await
    }

    async fn download_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<DocumentFile> {
        let response = self
            .request(Method::GET, &format!("/documents/{id}/download"), Some(session))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::from_status(status.as_u16(), error_message(&body)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_name);
        let bytes = response.bytes().await?.to_vec();

        Ok(DocumentFile {
            content_type,
            file_name,
            bytes,
        })
    }
}

#[async_trait]
impl DocumentWriter for HttpBackend {
    async fn upload_document(
        &self,
        session: &SessionContext,
        document: NewDocument,
    ) -> BackendResult<LegalDocument> {
        let mut part = Part::bytes(document.bytes).file_name(document.file_name);
        if let Some(content_type) = document.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let mut form = Form::new()
            .part("file", part)
            .text("doc_type", document.doc_type);
        if let Some(case_id) = document.case_id {
            form = form.text("case_id", case_id);
        }

        let builder = self
            .request(Method::POST, "/documents/upload", Some(session))
            .multipart(form);
        decode_field(self.send(builder).await?, "document")
    }

    async fn process_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<LegalDocument> {
        let builder = self.request(Method::POST, &format!("/documents/{id}/process"), Some(session));
        decode_field(self.send(builder).await?, "document")
    }

    async fn delete_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<String> {
        let builder = self.request(Method::DELETE, &format!("/documents/{id}"), Some(session));
        let body = self.send(builder).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Document deleted")
            .to_string())
    }
}

#[async_trait]
impl TemplateReader for HttpBackend {
    async fn list_templates(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<TemplateCard>> {
        self.list(session, "/templates", request).await
    }

    async fn get_template(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<LegalTemplate> {
        self.get_field(session, &format!("/templates/{id}"), "template")
            .await
    }

    async fn template_categories(
        &self,
        session: &SessionContext,
    ) -> BackendResult<Vec<TemplateCategory>> {
        self.get_field(session, "/templates/categories", "categories")
            .await
    }
}

#[async_trait]
impl TemplateWriter for HttpBackend {
    async fn generate_document(
        &self,
        session: &SessionContext,
        id: &RecordId,
        values: &TemplateValues,
    ) -> BackendResult<GeneratedDocument> {
        let builder = self
            .request(Method::POST, &format!("/templates/{id}/generate"), Some(session))
            .json(values);
        Ok(serde_json::from_value(self.send(builder).await?)?)
    }
}

#[async_trait]
impl ScraperReader for HttpBackend {
    async fn list_jobs(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<Page<ScrapeJob>> {
        self.list(session, "/scraper/jobs", request).await
    }

    async fn available_scrapers(
        &self,
        session: &SessionContext,
    ) -> BackendResult<Vec<ScraperInfo>> {
        self.get_field(session, "/scraper/available", "scrapers")
            .await
    }
}

#[async_trait]
impl ScraperWriter for HttpBackend {
    async fn run_scraper(
        &self,
        session: &SessionContext,
        run: &ScraperRun,
    ) -> BackendResult<ScraperRunAccepted> {
        let builder = self
            .request(Method::POST, "/scraper/run", Some(session))
            .json(run);
        Ok(serde_json::from_value(self.send(builder).await?)?)
    }
}

#[async_trait]
impl AssistantApi for HttpBackend {
    async fn chat(
        &self,
        session: &SessionContext,
        request: &ChatRequest,
    ) -> BackendResult<ChatReply> {
        let builder = self
            .request(Method::POST, "/ai/chat", Some(session))
            .json(request);
        Ok(serde_json::from_value(self.send(builder).await?)?)
    }

    async fn list_sessions(
        &self,
        session: &SessionContext,
    ) -> BackendResult<Vec<ChatSessionSummary>> {
        self.get_field(session, "/ai/sessions", "sessions").await
    }

    async fn get_session(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<ChatSession> {
        self.get_field(session, &format!("/ai/sessions/{id}"), "session")
            .await
    }

    async fn delete_session(&self, session: &SessionContext, id: &RecordId) -> BackendResult<()> {
        let builder = self.request(Method::DELETE, &format!("/ai/sessions/{id}"), Some(session));
        self.send(builder).await.map(|_| ())
    }
}

#[async_trait]
impl TranslationApi for HttpBackend {
    async fn translate(
        &self,
        session: &SessionContext,
        request: &TranslationRequest,
    ) -> BackendResult<TranslationResult> {
        let builder = self
            .request(Method::POST, "/translate", Some(session))
            .json(request);
        Ok(serde_json::from_value(self.send(builder).await?)?)
    }

    async fn glossary(&self, session: &SessionContext) -> BackendResult<Vec<GlossaryTerm>> {
        self.get_field(session, "/translate/glossary", "glossary")
            .await
    }
}

#[async_trait]
impl NotificationReader for HttpBackend {
    async fn list_notifications(
        &self,
        session: &SessionContext,
        request: &ListRequest,
    ) -> BackendResult<NotificationPage> {
        let builder = self
            .request(Method::GET, "/notifications", Some(session))
            .query(&request.params);
        decode_notification_page(self.send(builder).await?, request.list_key)
    }
}

#[async_trait]
impl NotificationWriter for HttpBackend {
    async fn create_reminder(
        &self,
        session: &SessionContext,
        reminder: &NewReminder,
    ) -> BackendResult<Notification> {
        let builder = self
            .request(Method::POST, "/notifications", Some(session))
            .json(reminder);
        decode_field(self.send(builder).await?, "notification")
    }

    async fn mark_read(&self, session: &SessionContext, id: &RecordId) -> BackendResult<()> {
        let builder = self.request(Method::PUT, &format!("/notifications/{id}/read"), Some(session));
        self.send(builder).await.map(|_| ())
    }

    async fn mark_all_read(&self, session: &SessionContext) -> BackendResult<()> {
        let builder = self.request(Method::PUT, "/notifications/read-all", Some(session));
        self.send(builder).await.map(|_| ())
    }

    async fn delete_notification(
        &self,
        session: &SessionContext,
        id: &RecordId,
    ) -> BackendResult<()> {
        let builder = self.request(Method::DELETE, &format!("/notifications/{id}"), Some(session));
        self.send(builder).await.map(|_| ())
    }
}

#[async_trait]
impl AnalyticsReader for HttpBackend {
    async fn dashboard(&self, session: &SessionContext) -> BackendResult<DashboardStats> {
        let body = self
            .send(self.request(Method::GET, "/analytics/dashboard", Some(session)))
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn court_analytics(
        &self,
        session: &SessionContext,
    ) -> BackendResult<Vec<CourtAnalytics>> {
        self.get_field(session, "/analytics/courts", "courts").await
    }

    async fn top_judges(
        &self,
        session: &SessionContext,
        limit: usize,
    ) -> BackendResult<Vec<JudgeCount>> {
        let builder = self
            .request(Method::GET, "/analytics/judges", Some(session))
            .query(&[("limit", limit)]);
        decode_field(self.send(builder).await?, "judges")
    }

    async fn case_timeline(
        &self,
        session: &SessionContext,
        year: i32,
    ) -> BackendResult<Vec<TimelinePoint>> {
        let builder = self
            .request(Method::GET, "/analytics/timeline", Some(session))
            .query(&[("year", year)]);
        decode_field(self.send(builder).await?, "timeline")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_reads_string_and_object_bodies() {
        assert_eq!(
            error_message(r#"{"error": "Invalid email or password"}"#).as_deref(),
            Some("Invalid email or password")
        );
        assert_eq!(
            error_message(r#"{"error": {"email": ["Not a valid email address."]}}"#).as_deref(),
            Some("email: Not a valid email address.")
        );
        assert_eq!(error_message("<html>oops</html>"), None);
        assert_eq!(error_message(r#"{"message": "fine"}"#), None);
    }

    #[test]
    fn attachment_name_strips_quotes() {
        assert_eq!(
            attachment_name(r#"attachment; filename="plaint.pdf""#).as_deref(),
            Some("plaint.pdf")
        );
        assert_eq!(attachment_name("inline"), None);
    }

    #[test]
    fn base_url_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url, "http://localhost:5000/api");
    }
}
