//! Dashboard and analytics pages.

use chrono::Datelike;

use crate::backend::errors::BackendError;
use crate::backend::{AnalyticsReader, CaseReader};
use crate::dto::cards::{CaseCardView, render_results};
use crate::dto::pages::{AnalyticsPageData, DashboardPageData, timeline_bars};
use crate::models::session::SessionContext;
use crate::query::ListRequest;
use crate::services::cases::CASES_VIEW;
use crate::services::{ServiceError, ServiceResult};

/// Number of newest cases shown on the dashboard.
pub const RECENT_CASES: usize = 5;
/// Number of judges listed on the analytics page.
pub const TOP_JUDGES: usize = 20;
/// Years offered by the timeline selector, counting back from the current one.
pub const TIMELINE_YEARS: i32 = 10;
/// The dashboard lists cases in the order they were added.
const RECENT_SORT: &str = "-created_at";

const PARTIAL_NOTICE: &str = "Some statistics could not be loaded.";

fn recent_cases_request() -> ListRequest {
    let params = vec![
        ("page".to_string(), "1".to_string()),
        ("page_size".to_string(), RECENT_CASES.to_string()),
        ("sort".to_string(), RECENT_SORT.to_string()),
    ];
    ListRequest {
        list_key: CASES_VIEW.list_key,
        page: 1,
        page_size: RECENT_CASES,
        params,
    }
}

/// Keeps partial results; only a rejected token aborts the page.
fn partial<T>(result: Result<T, BackendError>, what: &str, notice: &mut Option<String>) -> ServiceResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(BackendError::Unauthorized) => Err(ServiceError::Unauthorized),
        Err(err) => {
            log::warn!("Failed to load {what}: {err}");
            *notice = Some(PARTIAL_NOTICE.to_string());
            Ok(None)
        }
    }
}

pub async fn load_dashboard<R>(backend: &R, session: &SessionContext) -> ServiceResult<DashboardPageData>
where
    R: AnalyticsReader + CaseReader + ?Sized,
{
    let mut notice = None;
    let stats = partial(backend.dashboard(session).await, "dashboard stats", &mut notice)?;
    let recent = partial(
        backend.list_cases(session, &recent_cases_request()).await,
        "recent cases",
        &mut notice,
    )?;

    Ok(DashboardPageData {
        stats,
        recent_cases: recent
            .map(|page| render_results::<_, CaseCardView>(page.items))
            .unwrap_or_default(),
        notice,
    })
}

/// Current year and the `TIMELINE_YEARS` before it, newest first.
fn selectable_years(current: i32) -> Vec<i32> {
    (current - TIMELINE_YEARS..=current).rev().collect()
}

/// Court and judge statistics plus the monthly timeline of `year`.
///
/// Without a year the timeline shows the current one.
pub async fn load_analytics<R>(
    backend: &R,
    session: &SessionContext,
    year: Option<i32>,
) -> ServiceResult<AnalyticsPageData>
where
    R: AnalyticsReader + ?Sized,
{
    let current = chrono::Utc::now().year();
    let year = year.unwrap_or(current);

    let mut notice = None;
    let courts = partial(backend.court_analytics(session).await, "court analytics", &mut notice)?;
    let judges = partial(backend.top_judges(session, TOP_JUDGES).await, "judge analytics", &mut notice)?;
    let timeline = partial(backend.case_timeline(session, year).await, "case timeline", &mut notice)?;

    let mut years = selectable_years(current);
    if !years.contains(&year) {
        years.push(year);
        years.sort_unstable_by(|a, b| b.cmp(a));
    }

    Ok(AnalyticsPageData {
        courts: courts.unwrap_or_default(),
        judges: judges.unwrap_or_default(),
        year,
        years,
        timeline: timeline_bars(timeline.unwrap_or_default()),
        notice,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::backend::Page;
    use crate::backend::mock::MockBackend;
    use crate::domain::analytics::{DashboardStats, TimelinePoint};
    use crate::domain::case::CaseCard;
    use crate::pagination::Pagination;

    fn session() -> SessionContext {
        SessionContext::anonymous("viewer")
    }

    #[tokio::test]
    async fn dashboard_asks_for_newest_cases() {
        let mut backend = MockBackend::new();
        backend.expect_dashboard().returning(|_| {
            Ok(DashboardStats {
                total_cases: 120,
                ..DashboardStats::default()
            })
        });
        backend
            .expect_list_cases()
            .withf(|_, request| {
                request.param("page_size") == Some("5") && request.param("sort") == Some("-created_at")
            })
            .returning(|_, _| {
                Ok(Page {
                    items: vec![CaseCard {
                        id: "c1".into(),
                        ..CaseCard::default()
                    }],
                    pagination: Pagination::new(1, 5, 120),
                })
            });

        let data = load_dashboard(&backend, &session()).await.unwrap();

        assert_eq!(data.stats.unwrap().total_cases, 120);
        assert_eq!(data.recent_cases.len(), 1);
        assert!(data.notice.is_none());
    }

    #[tokio::test]
    async fn dashboard_degrades_when_stats_fail() {
        let mut backend = MockBackend::new();
        backend
            .expect_dashboard()
            .returning(|_| Err(BackendError::Timeout));
        backend.expect_list_cases().returning(|_, _| {
            Ok(Page {
                items: vec![],
                pagination: Pagination::new(1, 5, 0),
            })
        });

        let data = load_dashboard(&backend, &session()).await.unwrap();

        assert!(data.stats.is_none());
        assert_eq!(data.notice.as_deref(), Some(PARTIAL_NOTICE));
    }

    #[tokio::test]
    async fn analytics_requests_top_judges() {
        let mut backend = MockBackend::new();
        backend.expect_court_analytics().returning(|_| Ok(vec![]));
        backend
            .expect_top_judges()
            .withf(|_, limit| *limit == TOP_JUDGES)
            .returning(|_, _| Ok(vec![]));
        backend.expect_case_timeline().returning(|_, _| Ok(vec![]));

        let data = load_analytics(&backend, &session(), None).await.unwrap();

        assert!(data.courts.is_empty());
        assert_eq!(data.year, chrono::Utc::now().year());
        assert_eq!(data.years.len(), 11);
        assert_eq!(data.years[0], data.year);
        assert!(data.notice.is_none());
    }

    #[tokio::test]
    async fn timeline_follows_selected_year() {
        let mut backend = MockBackend::new();
        backend.expect_court_analytics().returning(|_| Ok(vec![]));
        backend.expect_top_judges().returning(|_, _| Ok(vec![]));
        backend
            .expect_case_timeline()
            .withf(|_, year| *year == 2019)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    TimelinePoint {
                        month: "Jan".into(),
                        count: 4,
                    },
                    TimelinePoint {
                        month: "Feb".into(),
                        count: 8,
                    },
                ])
            });

        let data = load_analytics(&backend, &session(), Some(2019)).await.unwrap();

        assert_eq!(data.year, 2019);
        assert_eq!(data.timeline.len(), 2);
        assert_eq!(data.timeline[0].percent, 50);
        assert_eq!(data.timeline[1].percent, 100);
    }

    #[tokio::test]
    async fn failed_timeline_keeps_other_statistics() {
        let mut backend = MockBackend::new();
        backend.expect_court_analytics().returning(|_| Ok(vec![]));
        backend.expect_top_judges().returning(|_, _| Ok(vec![]));
        backend
            .expect_case_timeline()
            .returning(|_, _| Err(BackendError::Timeout));

        let data = load_analytics(&backend, &session(), Some(2020)).await.unwrap();

        assert!(data.timeline.is_empty());
        assert_eq!(data.notice.as_deref(), Some(PARTIAL_NOTICE));
    }

    #[test]
    fn years_count_back_from_current() {
        assert_eq!(selectable_years(2024)[..3], [2024, 2023, 2022]);
        assert_eq!(selectable_years(2024).last(), Some(&2014));
    }
}
