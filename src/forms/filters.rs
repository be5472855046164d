//! Query-string forms of the paginated list views.

use serde::Deserialize;

use crate::domain::types::parse_year;
use crate::forms::FormError;
use crate::query::{FieldValue, ListQuery};

/// Collects the fields present in a list request.
struct FieldCollector {
    fields: Vec<(String, FieldValue)>,
}

impl FieldCollector {
    fn new() -> Self {
        Self { fields: Vec::new() }
    }

    fn text(mut self, name: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.fields.push((name.to_string(), FieldValue::text(value)));
        }
        self
    }

    fn year(mut self, name: &'static str, value: Option<String>) -> Result<Self, FormError> {
        if let Some(value) = value {
            let field = if value.trim().is_empty() {
                FieldValue::Empty
            } else {
                FieldValue::Number(parse_year(&value).map_err(|_| FormError::InvalidYear(name))?)
            };
            self.fields.push((name.to_string(), field));
        }
        Ok(self)
    }

    fn finish(self, page: Option<usize>, retry: Option<String>) -> ListQuery {
        ListQuery {
            fields: self.fields,
            page: page.map(|page| page.max(1)),
            retry: retry.is_some(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CaseFilterForm {
    pub search: Option<String>,
    pub court: Option<String>,
    pub year: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub retry: Option<String>,
}

impl TryFrom<CaseFilterForm> for ListQuery {
    type Error = FormError;

    fn try_from(form: CaseFilterForm) -> Result<Self, Self::Error> {
        Ok(FieldCollector::new()
            .text("search", form.search)
            .text("court", form.court)
            .year("year", form.year)?
            .text("status", form.status)
            .finish(form.page, form.retry))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchFilterForm {
    pub q: Option<String>,
    pub court: Option<String>,
    pub judge: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub case_type: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub retry: Option<String>,
}

impl TryFrom<SearchFilterForm> for ListQuery {
    type Error = FormError;

    fn try_from(form: SearchFilterForm) -> Result<Self, Self::Error> {
        Ok(FieldCollector::new()
            .text("q", form.q)
            .text("court", form.court)
            .text("judge", form.judge)
            .year("year_from", form.year_from)?
            .year("year_to", form.year_to)?
            .text("case_type", form.case_type)
            .text("status", form.status)
            .finish(form.page, form.retry))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LawyerFilterForm {
    pub q: Option<String>,
    pub city: Option<String>,
    pub specialization: Option<String>,
    pub page: Option<usize>,
    pub retry: Option<String>,
}

impl From<LawyerFilterForm> for ListQuery {
    fn from(form: LawyerFilterForm) -> Self {
        FieldCollector::new()
            .text("q", form.q)
            .text("city", form.city)
            .text("specialization", form.specialization)
            .finish(form.page, form.retry)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DocumentFilterForm {
    pub doc_type: Option<String>,
    pub page: Option<usize>,
    pub retry: Option<String>,
}

impl From<DocumentFilterForm> for ListQuery {
    fn from(form: DocumentFilterForm) -> Self {
        FieldCollector::new()
            .text("doc_type", form.doc_type)
            .finish(form.page, form.retry)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JobFilterForm {
    pub source: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
    pub retry: Option<String>,
}

impl From<JobFilterForm> for ListQuery {
    fn from(form: JobFilterForm) -> Self {
        FieldCollector::new()
            .text("source", form.source)
            .text("status", form.status)
            .finish(form.page, form.retry)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TemplateFilterForm {
    pub category: Option<String>,
    pub language: Option<String>,
    pub retry: Option<String>,
}

impl From<TemplateFilterForm> for ListQuery {
    fn from(form: TemplateFilterForm) -> Self {
        FieldCollector::new()
            .text("category", form.category)
            .text("language", form.language)
            .finish(None, form.retry)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationFilterForm {
    /// `"true"` lists unread notifications only; blank lists all.
    pub unread_only: Option<String>,
    pub page: Option<usize>,
    pub retry: Option<String>,
}

impl From<NotificationFilterForm> for ListQuery {
    fn from(form: NotificationFilterForm) -> Self {
        let unread_only = form
            .unread_only
            .map(|value| if value.trim() == "true" { value } else { String::new() });
        FieldCollector::new()
            .text("unread_only", unread_only)
            .finish(form.page, form.retry)
    }
}

/// Year selector of the analytics timeline.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsFilterForm {
    pub year: Option<String>,
}

impl AnalyticsFilterForm {
    /// The requested year, or `None` for a blank selector.
    pub fn year(&self) -> Result<Option<i32>, FormError> {
        match self.year.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_year(raw)
                .ok()
                .and_then(|year| i32::try_from(year).ok())
                .map(Some)
                .ok_or(FormError::InvalidYear("Year")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_not_collected() {
        let query = ListQuery::try_from(CaseFilterForm {
            court: Some("Islamabad High Court".into()),
            ..CaseFilterForm::default()
        })
        .unwrap();
        assert_eq!(
            query.fields,
            vec![("court".to_string(), FieldValue::text("Islamabad High Court"))]
        );
        assert_eq!(query.page, None);
        assert!(!query.retry);
    }

    #[test]
    fn blank_fields_clear_values() {
        let query = ListQuery::try_from(CaseFilterForm {
            search: Some("".into()),
            year: Some(" ".into()),
            ..CaseFilterForm::default()
        })
        .unwrap();
        assert_eq!(
            query.fields,
            vec![
                ("search".to_string(), FieldValue::Empty),
                ("year".to_string(), FieldValue::Empty),
            ]
        );
        assert!(query.is_blank());
    }

    #[test]
    fn years_are_numbers() {
        let query = ListQuery::try_from(SearchFilterForm {
            year_from: Some("2015".into()),
            page: Some(0),
            ..SearchFilterForm::default()
        })
        .unwrap();
        assert_eq!(query.fields, vec![("year_from".to_string(), FieldValue::Number(2015))]);
        assert_eq!(query.page, Some(1));
    }

    #[test]
    fn invalid_year_is_rejected() {
        let result = ListQuery::try_from(SearchFilterForm {
            year_to: Some("next year".into()),
            ..SearchFilterForm::default()
        });
        assert!(matches!(result, Err(FormError::InvalidYear("year_to"))));
    }

    #[test]
    fn retry_flag() {
        let query = ListQuery::from(JobFilterForm {
            retry: Some("1".into()),
            ..JobFilterForm::default()
        });
        assert!(query.retry);
    }

    #[test]
    fn unread_filter_accepts_only_true() {
        let query = ListQuery::from(NotificationFilterForm {
            unread_only: Some("true".into()),
            ..NotificationFilterForm::default()
        });
        assert_eq!(query.fields, vec![("unread_only".to_string(), FieldValue::text("true"))]);

        let cleared = ListQuery::from(NotificationFilterForm {
            unread_only: Some("yes please".into()),
            ..NotificationFilterForm::default()
        });
        assert_eq!(cleared.fields, vec![("unread_only".to_string(), FieldValue::Empty)]);
    }

    #[test]
    fn analytics_year_is_optional() {
        assert_eq!(AnalyticsFilterForm::default().year().unwrap(), None);
        let form = AnalyticsFilterForm {
            year: Some("2021".into()),
        };
        assert_eq!(form.year().unwrap(), Some(2021));
        let bad = AnalyticsFilterForm {
            year: Some("1800".into()),
        };
        assert!(matches!(bad.year(), Err(FormError::InvalidYear("Year"))));
    }
}
