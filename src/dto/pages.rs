//! Aggregated data handed from services to page templates.

use serde::Serialize;

use crate::domain::analytics::{CourtAnalytics, DashboardStats, TimelinePoint};
use crate::domain::assistant::{ChatMessage, ChatSession, ChatSessionSummary};
use crate::domain::auth::UserProfile;
use crate::domain::case::{Case, CaseEntities, CaseSummary, JudgeCount, SearchFacets, SimilarCase};
use crate::domain::document::LegalDocument;
use crate::domain::lawyer::{Lawyer, LawyerFacets};
use crate::domain::legal_template::{GeneratedDocument, LegalTemplate, TemplateCategory};
use crate::domain::scrape_job::ScraperInfo;
use crate::domain::translation::{GlossaryTerm, TranslationResult};
use crate::dto::cards::{
    CaseCardView, DocumentRow, JobRow, LawyerCardView, NotificationRow, TemplateCardView,
    case_status_class, doc_type_label, format_date, format_size, humanize, job_status_class,
};
use crate::forms::cases::CasePanel;
use crate::markup::render_markdown_lite;
use crate::query::ViewSnapshot;

#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DashboardStats>,
    pub recent_cases: Vec<CaseCardView>,
    /// Shown when part of the dashboard could not be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsPageData {
    pub courts: Vec<CourtAnalytics>,
    pub judges: Vec<JudgeCount>,
    /// Year of the timeline and the years offered by its selector, newest first.
    pub year: i32,
    pub years: Vec<i32>,
    pub timeline: Vec<TimelineBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// One month of the timeline with its bar length relative to the busiest month.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TimelineBar {
    pub month: String,
    pub count: u64,
    pub percent: u64,
}

pub fn timeline_bars(points: Vec<TimelinePoint>) -> Vec<TimelineBar> {
    let busiest = points.iter().map(|point| point.count).max().unwrap_or(0);
    points
        .into_iter()
        .map(|point| TimelineBar {
            percent: if busiest == 0 { 0 } else { point.count * 100 / busiest },
            month: point.month,
            count: point.count,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct SearchPageData {
    pub view: ViewSnapshot<CaseCardView>,
    pub facets: SearchFacets,
}

/// Case detail with display-ready dates and badge.
#[derive(Debug, Serialize)]
pub struct CasePageData {
    pub case: Case,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_class: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,
}

impl From<Case> for CasePageData {
    fn from(case: Case) -> Self {
        Self {
            status_class: case.status.as_deref().map(case_status_class),
            judgment_date: case.judgment_date.as_deref().map(format_date),
            filing_date: case.filing_date.as_deref().map(format_date),
            case,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EntityGroup {
    pub label: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SimilarCaseView {
    pub href: String,
    pub case_number: String,
    pub title: String,
    pub court: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Similarity as a whole percentage.
    pub score: u32,
}

impl From<SimilarCase> for SimilarCaseView {
    fn from(case: SimilarCase) -> Self {
        Self {
            href: format!("/cases/{}", case.id),
            score: (case.similarity.clamp(0.0, 1.0) * 100.0).round() as u32,
            case_number: case.case_number,
            title: case.title,
            court: case.court,
            year: case.year,
        }
    }
}

/// Generated panel of the case detail page. Only the requested part is filled.
#[derive(Debug, Serialize)]
pub struct CasePanelData {
    pub panel: CasePanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CaseSummary>,
    pub entities: Vec<EntityGroup>,
    pub similar: Vec<SimilarCaseView>,
    /// Shown instead of the content when it could not be generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CasePanelData {
    pub fn empty(panel: CasePanel) -> Self {
        Self {
            panel,
            summary: None,
            entities: Vec::new(),
            similar: Vec::new(),
            notice: None,
        }
    }
}

pub fn entity_groups(entities: CaseEntities) -> Vec<EntityGroup> {
    entities
        .0
        .into_iter()
        .map(|(kind, values)| EntityGroup {
            label: humanize(&kind),
            values,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct LawyersPageData {
    pub view: ViewSnapshot<LawyerCardView>,
    pub facets: LawyerFacets,
}

#[derive(Debug, Serialize)]
pub struct LawyerPageData {
    pub lawyer: Lawyer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
}

impl From<Lawyer> for LawyerPageData {
    fn from(lawyer: Lawyer) -> Self {
        Self {
            rating: (lawyer.total_reviews > 0).then(|| format!("{:.1}", lawyer.avg_rating)),
            lawyer,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentsPageData {
    pub view: ViewSnapshot<DocumentRow>,
    /// `(code, label)` pairs for the type filter and upload form.
    pub doc_types: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Serialize)]
pub struct DocumentPageData {
    pub document: LegalDocument,
    pub doc_type: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_class: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<String>,
}

impl From<LegalDocument> for DocumentPageData {
    fn from(document: LegalDocument) -> Self {
        Self {
            doc_type: doc_type_label(&document.doc_type),
            size: format_size(document.file_size),
            status_class: (!document.status.is_empty()).then(|| job_status_class(&document.status)),
            uploaded: document.created_at.as_deref().map(format_date),
            document,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TemplatesPageData {
    pub view: ViewSnapshot<TemplateCardView>,
    pub categories: Vec<TemplateCategory>,
}

#[derive(Debug, Serialize)]
pub struct TemplatePageData {
    pub template: LegalTemplate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedDocument>,
}

#[derive(Debug, Serialize)]
pub struct ScraperPageData {
    pub view: ViewSnapshot<JobRow>,
    pub scrapers: Vec<ScraperInfo>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CitationLink {
    pub href: String,
    pub label: String,
}

/// Chat message ready for display; assistant answers carry sanitized HTML.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MessageView {
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<CitationLink>,
}

impl From<ChatMessage> for MessageView {
    fn from(message: ChatMessage) -> Self {
        let is_assistant = message.role == "assistant";
        Self {
            html: is_assistant.then(|| render_markdown_lite(&message.content)),
            citations: if is_assistant {
                message
                    .citations
                    .iter()
                    .enumerate()
                    .map(|(index, id)| CitationLink {
                        href: format!("/cases/{id}"),
                        label: format!("View Case #{}", index + 1),
                    })
                    .collect()
            } else {
                Vec::new()
            },
            role: message.role,
            content: message.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssistantPageData {
    pub sessions: Vec<ChatSessionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<ChatSession>,
    pub messages: Vec<MessageView>,
    pub starter_prompts: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotificationsPageData {
    pub view: ViewSnapshot<NotificationRow>,
    pub unread_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ProfilePageData {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_since: Option<String>,
    pub genders: &'static [&'static str],
}

#[derive(Debug, Default, Serialize)]
pub struct TranslationPageData {
    pub glossary: Vec<GlossaryTerm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TranslationResult>,
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_messages_get_html_and_citations() {
        let view = MessageView::from(ChatMessage {
            role: "assistant".into(),
            content: "## Bail\n- Section 497".into(),
            citations: vec!["abc".into()],
            ..ChatMessage::default()
        });
        assert!(view.html.as_deref().unwrap().contains("<h3"));
        assert_eq!(
            view.citations,
            vec![CitationLink {
                href: "/cases/abc".into(),
                label: "View Case #1".into(),
            }]
        );
    }

    #[test]
    fn user_messages_stay_plain() {
        let view = MessageView::from(ChatMessage {
            role: "user".into(),
            content: "## not a heading".into(),
            citations: vec!["abc".into()],
            ..ChatMessage::default()
        });
        assert!(view.html.is_none());
        assert!(view.citations.is_empty());
    }

    #[test]
    fn timeline_bars_scale_to_busiest_month() {
        let bars = timeline_bars(vec![
            TimelinePoint {
                month: "Jan".into(),
                count: 5,
            },
            TimelinePoint {
                month: "Feb".into(),
                count: 20,
            },
        ]);
        assert_eq!(bars[0].percent, 25);
        assert_eq!(bars[1].percent, 100);

        let quiet = timeline_bars(vec![TimelinePoint {
            month: "Mar".into(),
            count: 0,
        }]);
        assert_eq!(quiet[0].percent, 0);
    }

    #[test]
    fn similar_case_score_is_a_percentage() {
        let view = SimilarCaseView::from(SimilarCase {
            id: "abc".into(),
            similarity: 0.456,
            ..SimilarCase::default()
        });
        assert_eq!(view.score, 46);
        assert_eq!(view.href, "/cases/abc");
    }
}
