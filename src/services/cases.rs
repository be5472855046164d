//! Case browsing, advanced search, case detail and its generated panels.

use crate::backend::errors::BackendError;
use crate::backend::{CaseInsights, CaseReader};
use crate::domain::case::CaseCard;
use crate::dto::cards::{CaseCardView, render_results};
use crate::dto::pages::{CasePageData, CasePanelData, SearchPageData, entity_groups};
use crate::forms::cases::CasePanel;
use crate::models::session::SessionContext;
use crate::query::{FetchStatus, ListQuery, ViewRegistry, ViewSnapshot, ViewSpec};
use crate::services::{ServiceError, ServiceResult, into_view, or_default, parse_id};

/// Number of related cases listed in the similar-cases panel.
pub const SIMILAR_CASES: usize = 10;

const SUMMARY_UNAVAILABLE: &str =
    "AI summarization is not available for this case (no text content).";
const ENTITIES_UNAVAILABLE: &str = "Entities could not be extracted from this case.";
const SIMILAR_UNAVAILABLE: &str = "Similar cases could not be found right now.";

pub const CASES_VIEW: ViewSpec = ViewSpec {
    name: "cases",
    list_key: "cases",
    page_size: 12,
    sort: Some("-judgment_date"),
    fields: &["search", "court", "year", "status"],
};

pub const SEARCH_VIEW: ViewSpec = ViewSpec {
    name: "search",
    list_key: "results",
    page_size: 20,
    sort: None,
    fields: &[
        "q",
        "court",
        "judge",
        "year_from",
        "year_to",
        "case_type",
        "status",
    ],
};

/// Loads one page of the case list for the viewer.
pub async fn list_cases<R>(
    backend: &R,
    views: &ViewRegistry<CaseCard>,
    session: &SessionContext,
    query: ListQuery,
) -> ServiceResult<ViewSnapshot<CaseCardView>>
where
    R: CaseReader + ?Sized,
{
    let controller = views.controller(&session.view_key);
    let intent = controller.intent_for(query);
    let outcome = controller
        .dispatch(intent, |request| async move {
            backend.list_cases(session, &request).await
        })
        .await;
    into_view(outcome)
}

/// Runs an advanced search. Until the viewer submits a query nothing is fetched.
pub async fn search_cases<R>(
    backend: &R,
    views: &ViewRegistry<CaseCard>,
    session: &SessionContext,
    query: ListQuery,
) -> ServiceResult<SearchPageData>
where
    R: CaseReader + ?Sized,
{
    let facets = or_default(backend.search_facets(session).await, "search filters")?;
    let controller = views.controller(&session.view_key);

    let view = if query.is_blank() && controller.status() == FetchStatus::Idle {
        controller
            .snapshot()
            .map_items(render_results::<CaseCard, CaseCardView>)
    } else {
        let intent = controller.intent_for(query);
        let outcome = controller
            .dispatch(intent, |request| async move {
                backend.search_cases(session, &request).await
            })
            .await;
        into_view(outcome)?
    };

    Ok(SearchPageData { view, facets })
}

pub async fn show_case<R>(backend: &R, session: &SessionContext, id: &str) -> ServiceResult<CasePageData>
where
    R: CaseReader + ?Sized,
{
    let id = parse_id(id)?;
    let case = backend.get_case(session, &id).await?;
    Ok(CasePageData::from(case))
}

/// Generates one panel of the case page.
///
/// Generation failures become a notice on the panel; only a rejected token
/// aborts the page.
pub async fn load_case_panel<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
    panel: CasePanel,
) -> ServiceResult<CasePanelData>
where
    R: CaseInsights + ?Sized,
{
    let id = parse_id(id)?;
    let mut data = CasePanelData::empty(panel);

    let failure = match panel {
        CasePanel::Summary => match backend.summarize_case(session, &id).await {
            Ok(summary) if summary.summary.trim().is_empty() => Some((None, SUMMARY_UNAVAILABLE)),
            Ok(summary) => {
                data.summary = Some(summary);
                None
            }
            Err(err) => Some((Some(err), SUMMARY_UNAVAILABLE)),
        },
        CasePanel::Entities => match backend.case_entities(session, &id).await {
            Ok(entities) => {
                data.entities = entity_groups(entities);
                None
            }
            Err(err) => Some((Some(err), ENTITIES_UNAVAILABLE)),
        },
        CasePanel::Similar => match backend.similar_cases(session, &id, SIMILAR_CASES).await {
            Ok(similar) => {
                data.similar = render_results(similar);
                None
            }
            Err(err) => Some((Some(err), SIMILAR_UNAVAILABLE)),
        },
    };

    match failure {
        None => {}
        Some((Some(BackendError::Unauthorized), _)) => return Err(ServiceError::Unauthorized),
        Some((err, notice)) => {
            if let Some(err) = err {
                log::warn!("Case {id} {panel:?} panel failed: {err}");
            }
            data.notice = Some(notice.to_string());
        }
    }
    Ok(data)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::backend::Page;
    use crate::backend::errors::BackendError;
    use crate::backend::mock::MockBackend;
    use crate::domain::case::{Case, CaseEntities, CaseSummary, SearchFacets, SimilarCase};
    use crate::pagination::Pagination;
    use crate::query::{FieldValue, ViewState};
    use crate::services::ServiceError;
    use std::time::Duration;

    fn card(id: &str) -> CaseCard {
        CaseCard {
            id: id.to_string(),
            case_number: format!("C-{id}"),
            title: "State v. Accused".to_string(),
            ..CaseCard::default()
        }
    }

    fn session() -> SessionContext {
        SessionContext::anonymous("viewer")
    }

    #[tokio::test]
    async fn list_sends_filters_and_renders_cards() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_cases()
            .withf(|_, request| {
                request.param("court") == Some("Sindh High Court")
                    && request.param("search").is_none()
                    && request.param("page") == Some("1")
                    && request.param("page_size") == Some("12")
                    && request.param("sort") == Some("-judgment_date")
            })
            .times(1)
            .returning(|_, _| {
                Ok(Page {
                    items: vec![card("a"), card("b")],
                    pagination: Pagination::new(1, 12, 30),
                })
            });
        let views = ViewRegistry::new(CASES_VIEW, Duration::from_secs(60));
        let query = ListQuery {
            fields: vec![
                ("search".to_string(), FieldValue::Empty),
                ("court".to_string(), FieldValue::text("Sindh High Court")),
            ],
            page: None,
            retry: false,
        };

        let view = list_cases(&backend, &views, &session(), query).await.unwrap();

        assert_eq!(view.state, ViewState::Results);
        assert_eq!(view.items()[0].href, "/cases/a");
        assert_eq!(view.results.total_pages, 3);
        assert_eq!(view.query_string, "court=Sindh+High+Court");
    }

    #[tokio::test]
    async fn list_failure_keeps_previous_cards() {
        let mut backend = MockBackend::new();
        let mut calls = 0;
        backend.expect_list_cases().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(Page {
                    items: vec![card("a")],
                    pagination: Pagination::new(1, 12, 13),
                })
            } else {
                Err(BackendError::Timeout)
            }
        });
        let views = ViewRegistry::new(CASES_VIEW, Duration::from_secs(60));

        list_cases(&backend, &views, &session(), ListQuery::default())
            .await
            .unwrap();
        let next = ListQuery {
            page: Some(2),
            ..ListQuery::default()
        };
        let view = list_cases(&backend, &views, &session(), next).await.unwrap();

        assert_eq!(view.state, ViewState::Failed);
        assert_eq!(view.items().len(), 1);
        assert!(view.notice.is_some());
    }

    #[tokio::test]
    async fn rejected_token_is_reported() {
        let mut backend = MockBackend::new();
        backend
            .expect_list_cases()
            .returning(|_, _| Err(BackendError::Unauthorized));
        let views = ViewRegistry::new(CASES_VIEW, Duration::from_secs(60));

        let result = list_cases(&backend, &views, &session(), ListQuery::default()).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn search_is_idle_until_first_query() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_facets()
            .returning(|_| Ok(SearchFacets::default()));
        backend.expect_search_cases().times(0);
        let views = ViewRegistry::new(SEARCH_VIEW, Duration::from_secs(60));

        let data = search_cases(&backend, &views, &session(), ListQuery::default())
            .await
            .unwrap();

        assert_eq!(data.view.state, ViewState::Idle);
    }

    #[tokio::test]
    async fn search_survives_missing_facets() {
        let mut backend = MockBackend::new();
        backend
            .expect_search_facets()
            .returning(|_| Err(BackendError::Transport("refused".into())));
        backend
            .expect_search_cases()
            .withf(|_, request| request.param("year_from") == Some("2010"))
            .returning(|_, _| {
                Ok(Page {
                    items: vec![],
                    pagination: Pagination::new(1, 20, 0),
                })
            });
        let views = ViewRegistry::new(SEARCH_VIEW, Duration::from_secs(60));
        let query = ListQuery {
            fields: vec![("year_from".to_string(), FieldValue::Number(2010))],
            ..ListQuery::default()
        };

        let data = search_cases(&backend, &views, &session(), query).await.unwrap();

        assert_eq!(data.view.state, ViewState::Empty);
        assert!(data.facets.courts.is_empty());
    }

    #[tokio::test]
    async fn malformed_case_id_is_not_found() {
        let mut backend = MockBackend::new();
        backend.expect_get_case().times(0);

        let result = show_case(&backend, &session(), "42").await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn case_detail_formats_dates() {
        let mut backend = MockBackend::new();
        backend.expect_get_case().returning(|_, id| {
            Ok(Case {
                id: id.to_string(),
                status: Some("pending".into()),
                judgment_date: Some("2020-02-29".into()),
                ..Case::default()
            })
        });

        let data = show_case(&backend, &session(), "65a1b2c3d4e5f60718293a4b")
            .await
            .unwrap();

        assert_eq!(data.status_class, Some("warning"));
        assert_eq!(data.judgment_date.as_deref(), Some("29 Feb 2020"));
    }

    const CASE_ID: &str = "65a1b2c3d4e5f60718293a4b";

    #[tokio::test]
    async fn summary_panel_shows_headnotes() {
        let mut backend = MockBackend::new();
        backend.expect_summarize_case().times(1).returning(|_, _| {
            Ok(CaseSummary {
                summary: "Bail granted on statutory delay.".into(),
                headnotes: vec!["S. 497 CrPC".into()],
            })
        });
        backend.expect_case_entities().times(0);

        let data = load_case_panel(&backend, &session(), CASE_ID, CasePanel::Summary)
            .await
            .unwrap();

        assert_eq!(data.summary.unwrap().headnotes, vec!["S. 497 CrPC".to_string()]);
        assert!(data.notice.is_none());
    }

    #[tokio::test]
    async fn blank_or_failed_summary_becomes_notice() {
        let mut backend = MockBackend::new();
        let mut calls = 0;
        backend.expect_summarize_case().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(CaseSummary::default())
            } else {
                Err(BackendError::Api {
                    status: 500,
                    message: "model offline".into(),
                })
            }
        });

        for _ in 0..2 {
            let data = load_case_panel(&backend, &session(), CASE_ID, CasePanel::Summary)
                .await
                .unwrap();
            assert!(data.summary.is_none());
            assert_eq!(data.notice.as_deref(), Some(SUMMARY_UNAVAILABLE));
        }
    }

    #[tokio::test]
    async fn entities_panel_labels_groups() {
        let mut backend = MockBackend::new();
        backend.expect_case_entities().returning(|_, _| {
            let mut groups = std::collections::BTreeMap::new();
            groups.insert("case_numbers".to_string(), vec!["PLD 2019 SC 1".to_string()]);
            Ok(CaseEntities(groups))
        });

        let data = load_case_panel(&backend, &session(), CASE_ID, CasePanel::Entities)
            .await
            .unwrap();

        assert_eq!(data.entities[0].label, "Case numbers");
        assert_eq!(data.entities[0].values, vec!["PLD 2019 SC 1".to_string()]);
    }

    #[tokio::test]
    async fn similar_panel_asks_for_ten_cases() {
        let mut backend = MockBackend::new();
        backend
            .expect_similar_cases()
            .withf(|_, id, limit| id.as_str() == CASE_ID && *limit == SIMILAR_CASES)
            .returning(|_, _, _| {
                Ok(vec![SimilarCase {
                    id: "65a1b2c3d4e5f60718293a4c".into(),
                    similarity: 0.8,
                    ..SimilarCase::default()
                }])
            });

        let data = load_case_panel(&backend, &session(), CASE_ID, CasePanel::Similar)
            .await
            .unwrap();

        assert_eq!(data.similar[0].score, 80);
        assert_eq!(data.similar[0].href, "/cases/65a1b2c3d4e5f60718293a4c");
    }

    #[tokio::test]
    async fn panel_with_expired_token_is_reported() {
        let mut backend = MockBackend::new();
        backend
            .expect_similar_cases()
            .returning(|_, _, _| Err(BackendError::Unauthorized));

        let result = load_case_panel(&backend, &session(), CASE_ID, CasePanel::Similar).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
