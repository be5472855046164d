//! Card and row views projected from backend list items.
//!
//! Every projection is pure. Optional fields that are absent or blank stay
//! `None` and are skipped on serialization, so templates only render what
//! exists.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::case::CaseCard;
use crate::domain::document::{DOC_TYPES, LegalDocument};
use crate::domain::lawyer::LawyerCard;
use crate::domain::legal_template::TemplateCard;
use crate::domain::notification::Notification;
use crate::domain::scrape_job::ScrapeJob;

/// Maximum characters of a summary shown on a card.
pub const SUMMARY_LIMIT: usize = 200;

const DATE_FORMAT: &str = "%d %b %Y";
const DATE_TIME_FORMAT: &str = "%d %b %Y, %H:%M";

/// Projects a page of items into their views.
pub fn render_results<T, V>(items: Vec<T>) -> Vec<V>
where
    V: From<T>,
{
    items.into_iter().map(V::from).collect()
}

/// Shortens `text` to `limit` characters, ending with `…` when cut.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}…", cut.trim_end())
}

/// Formats backend dates as `01 Mar 2024`; unparseable values pass through.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.format(DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return date.format(DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DATE_FORMAT).to_string();
    }
    raw.to_string()
}

/// Formats a timestamp as `14 Mar 2025, 09:30`; plain dates use [`format_date`].
pub fn format_date_time(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.format(DATE_TIME_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return date.format(DATE_TIME_FORMAT).to_string();
    }
    format_date(raw)
}

/// `case_numbers` → `Case numbers`.
pub fn humanize(key: &str) -> String {
    let spaced = key.trim().replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Bootstrap badge class for a case status.
pub fn case_status_class(status: &str) -> &'static str {
    match status {
        "decided" => "success",
        "pending" => "warning",
        "adjourned" => "orange",
        "disposed" => "info",
        _ => "secondary",
    }
}

/// Bootstrap badge class for a scraper job or document processing status.
pub fn job_status_class(status: &str) -> &'static str {
    match status {
        "completed" | "processed" => "success",
        "running" | "processing" => "primary",
        "pending" | "uploaded" => "warning",
        "failed" => "danger",
        _ => "secondary",
    }
}

/// Human readable file size.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let size = bytes as f64;
    if size < KB {
        format!("{bytes} B")
    } else if size < KB * KB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{:.1} MB", size / (KB * KB))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn present_str(value: &str) -> Option<String> {
    present(Some(value.to_string()))
}

/// "First judge +N" label.
fn judges_label(judges: &[String]) -> Option<String> {
    let mut names = judges.iter().map(|name| name.trim()).filter(|name| !name.is_empty());
    let first = names.next()?;
    let rest = names.count();
    if rest == 0 {
        Some(first.to_string())
    } else {
        Some(format!("{first} +{rest}"))
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CaseCardView {
    pub id: String,
    pub href: String,
    pub case_number: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_class: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment_date: Option<String>,
}

impl From<CaseCard> for CaseCardView {
    fn from(card: CaseCard) -> Self {
        let status = present(card.status);
        Self {
            href: format!("/cases/{}", card.id),
            status_class: status.as_deref().map(case_status_class),
            status,
            court: present_str(&card.court),
            summary: present(card.summary).map(|summary| truncate(&summary, SUMMARY_LIMIT)),
            judges: judges_label(&card.judge_names),
            case_type: present(card.case_type),
            year: card.year,
            judgment_date: present(card.judgment_date).map(|date| format_date(&date)),
            id: card.id,
            case_number: card.case_number,
            title: card.title,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LawyerCardView {
    pub id: String,
    pub href: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specializations: Vec<String>,
    /// Average rating, only when at least one review exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    pub total_reviews: u32,
    pub is_verified: bool,
}

impl From<LawyerCard> for LawyerCardView {
    fn from(card: LawyerCard) -> Self {
        Self {
            href: format!("/lawyers/{}", card.id),
            title: present(card.title),
            city: present(card.city),
            court: present(card.court),
            experience: card
                .experience_years
                .filter(|years| *years > 0)
                .map(|years| format!("{years} yrs experience")),
            specializations: card
                .specializations
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect(),
            rating: (card.total_reviews > 0).then(|| format!("{:.1}", card.avg_rating)),
            total_reviews: card.total_reviews,
            is_verified: card.is_verified,
            id: card.id,
            name: card.name,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DocumentRow {
    pub id: String,
    pub href: String,
    pub file_name: String,
    pub size: String,
    pub doc_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_class: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<String>,
    pub entity_count: usize,
    pub has_text: bool,
}

/// Display label of a document type code.
pub fn doc_type_label(code: &str) -> String {
    DOC_TYPES
        .iter()
        .find(|(value, _)| *value == code)
        .map_or_else(|| code.replace('_', " "), |(_, label)| label.to_string())
}

impl From<LegalDocument> for DocumentRow {
    fn from(document: LegalDocument) -> Self {
        let status = present_str(&document.status);
        Self {
            href: format!("/documents/{}", document.id),
            size: format_size(document.file_size),
            doc_type: doc_type_label(&document.doc_type),
            status_class: status.as_deref().map(job_status_class),
            status,
            summary: present_str(&document.summary).map(|s| truncate(&s, SUMMARY_LIMIT)),
            language: present_str(&document.language),
            uploaded: present(document.created_at).map(|date| format_date(&date)),
            entity_count: document.entities.len(),
            has_text: document.has_text,
            file_name: document.original_filename,
            id: document.id,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct JobRow {
    pub id: String,
    pub source: String,
    pub status: String,
    pub status_class: &'static str,
    pub pages_scraped: u64,
    pub cases_found: u64,
    pub cases_new: u64,
    pub cases_updated: u64,
    pub errors_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
    /// Last log line, if the job recorded any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_log: Option<String>,
}

impl From<ScrapeJob> for JobRow {
    fn from(job: ScrapeJob) -> Self {
        Self {
            status_class: job_status_class(&job.status),
            started: present(job.started_at.or(job.created_at)).map(|d| format_date(&d)),
            completed: present(job.completed_at).map(|d| format_date(&d)),
            last_log: job.logs.last().and_then(|log| present_str(&log.message)),
            pages_scraped: job.pages_scraped,
            cases_found: job.cases_found,
            cases_new: job.cases_new,
            cases_updated: job.cases_updated,
            errors_count: job.errors_count,
            id: job.id,
            source: job.source,
            status: job.status,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TemplateCardView {
    pub id: String,
    pub href: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_type: Option<String>,
    pub usage_count: u64,
}

impl From<TemplateCard> for TemplateCardView {
    fn from(card: TemplateCard) -> Self {
        Self {
            href: format!("/legal-templates/{}", card.id),
            description: present(card.description).map(|d| truncate(&d, SUMMARY_LIMIT)),
            category: present_str(&card.category).map(|c| c.replace('_', " ")),
            language: present_str(&card.language),
            court_type: present(card.court_type),
            usage_count: card.usage_count,
            id: card.id,
            name: card.name,
        }
    }
}

/// Bootstrap badge class for a notification type.
pub fn notification_class(kind: &str) -> &'static str {
    match kind {
        "hearing_reminder" => "primary",
        "deadline" => "danger",
        "case_update" => "info",
        "subscription" => "warning",
        _ => "secondary",
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NotificationRow {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub kind_class: &'static str,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl From<Notification> for NotificationRow {
    fn from(notification: Notification) -> Self {
        Self {
            kind: humanize(&notification.notification_type),
            kind_class: notification_class(&notification.notification_type),
            case_number: present(notification.case_number),
            case_href: present(notification.case_id).map(|id| format!("/cases/{id}")),
            reminder: present(notification.reminder_date).map(|d| format_date_time(&d)),
            created: present(notification.created_at).map(|d| format_date(&d)),
            is_read: notification.is_read,
            id: notification.id,
            title: notification.title,
            message: notification.message,
        }
    }
}
