//! Mock backend implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::backend::errors::BackendResult;
use crate::backend::{
    AnalyticsReader, AssistantApi, AuthApi, CaseInsights, CaseReader, DocumentReader,
    DocumentWriter, LawyerReader, LawyerWriter, NotificationPage, NotificationReader,
    NotificationWriter, Page, ProfileApi, ScraperReader, ScraperWriter, TemplateReader,
    TemplateWriter, TranslationApi,
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

mock! {
    pub Backend {}

    #[async_trait]
    impl AuthApi for Backend {
        async fn login(&self, credentials: &Credentials) -> BackendResult<LoginResponse>;
        async fn register(&self, registration: &Registration) -> BackendResult<LoginResponse>;
    }

    #[async_trait]
    impl ProfileApi for Backend {
        async fn get_profile(&self, session: &SessionContext) -> BackendResult<ProfileResponse>;
        async fn update_profile(
            &self,
            session: &SessionContext,
            update: &ProfileUpdate,
        ) -> BackendResult<UserProfile>;
    }

    #[async_trait]
    impl CaseInsights for Backend {
        async fn summarize_case(
            &self,
            session: &SessionContext,
            id: &RecordId,
        ) -> BackendResult<CaseSummary>;
        async fn case_entities(
            &self,
            session: &SessionContext,
            id: &RecordId,
        ) -> BackendResult<CaseEntities>;
        async fn similar_cases(
            &self,
            session: &SessionContext,
            id: &RecordId,
            limit: usize,
        ) -> BackendResult<Vec<SimilarCase>>;
    }

    #[async_trait]
    impl NotificationReader for Backend {
        async fn list_notifications(
            &self,
            session: &SessionContext,
            request: &ListRequest,
        ) -> BackendResult<NotificationPage>;
    }

    #[async_trait]
    impl NotificationWriter for Backend {
        async fn create_reminder(
            &self,
            session: &SessionContext,
            reminder: &NewReminder,
        ) -> BackendResult<Notification>;
        async fn mark_read(&self, session: &SessionContext, id: &RecordId) -> BackendResult<()>;
        async fn mark_all_read(&self, session: &SessionContext) -> BackendResult<()>;
        async fn delete_notification(
            &self,
            session: &SessionContext,
            id: &RecordId,
        ) -> BackendResult<()>;
    }

    #[async_trait]
    impl CaseReader for Backend {
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

    #[async_trait]
    impl LawyerReader for Backend {
        async fn list_lawyers(
            &self,
            session: &SessionContext,
            request: &ListRequest,
        ) -> BackendResult<Page<LawyerCard>>;
        async fn get_lawyer(&self, session: &SessionContext, id: &RecordId) -> BackendResult<Lawyer>;
        async fn lawyer_facets(&self, session: &SessionContext) -> BackendResult<LawyerFacets>;
    }

    #[async_trait]
    impl LawyerWriter for Backend {
        async fn review_lawyer(
            &self,
            session: &SessionContext,
            id: &RecordId,
            review: &NewReview,
        ) -> BackendResult<ReviewAccepted>;
    }

    #[async_trait]
    impl DocumentReader for Backend {
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
    impl DocumentWriter for Backend {
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
        async fn delete_document(
            &self,
            session: &SessionContext,
            id: &RecordId,
        ) -> BackendResult<String>;
    }

    #[async_trait]
    impl TemplateReader for Backend {
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
    impl TemplateWriter for Backend {
        async fn generate_document(
            &self,
            session: &SessionContext,
            id: &RecordId,
            values: &TemplateValues,
        ) -> BackendResult<GeneratedDocument>;
    }

    #[async_trait]
    impl ScraperReader for Backend {
        async fn list_jobs(
            &self,
            session: &SessionContext,
            request: &ListRequest,
        ) -> BackendResult<Page<ScrapeJob>>;
        async fn available_scrapers(
            &self,
            session: &SessionContext,
        ) -> BackendResult<Vec<ScraperInfo>>;
    }

    #[async_trait]
    impl ScraperWriter for Backend {
        async fn run_scraper(
            &self,
            session: &SessionContext,
            run: &ScraperRun,
        ) -> BackendResult<ScraperRunAccepted>;
    }

    #[async_trait]
    impl AssistantApi for Backend {
        async fn chat(
            &self,
            session: &SessionContext,
            request: &ChatRequest,
        ) -> BackendResult<ChatReply>;
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
    impl TranslationApi for Backend {
        async fn translate(
            &self,
            session: &SessionContext,
            request: &TranslationRequest,
        ) -> BackendResult<TranslationResult>;
        async fn glossary(&self, session: &SessionContext) -> BackendResult<Vec<GlossaryTerm>>;
    }

    #[async_trait]
    impl AnalyticsReader for Backend {
        async fn dashboard(&self, session: &SessionContext) -> BackendResult<DashboardStats>;
        async fn court_analytics(
            &self,
            session: &SessionContext,
        ) -> BackendResult<Vec<CourtAnalytics>>;
        async fn top_judges(
            &self,
            session: &SessionContext,
            limit: usize,
        ) -> BackendResult<Vec<JudgeCount>>;
        async fn case_timeline(
            &self,
            session: &SessionContext,
            year: i32,
        ) -> BackendResult<Vec<TimelinePoint>>;
    }
}
