//! Lawyer directory, profiles and reviews.

use crate::backend::{LawyerReader, LawyerWriter};
use crate::domain::lawyer::{LawyerCard, NewReview, ReviewAccepted};
use crate::dto::pages::{LawyerPageData, LawyersPageData};
use crate::forms::lawyers::ReviewForm;
use crate::models::session::SessionContext;
use crate::query::{ListQuery, ViewRegistry, ViewSpec};
use crate::services::{ServiceResult, into_view, or_default, parse_id};

pub const LAWYERS_VIEW: ViewSpec = ViewSpec {
    name: "lawyers",
    list_key: "lawyers",
    page_size: 12,
    sort: None,
    fields: &["q", "city", "specialization"],
};

pub async fn list_lawyers<R>(
    backend: &R,
    views: &ViewRegistry<LawyerCard>,
    session: &SessionContext,
    query: ListQuery,
) -> ServiceResult<LawyersPageData>
where
    R: LawyerReader + ?Sized,
{
    let facets = or_default(backend.lawyer_facets(session).await, "lawyer filters")?;

    let controller = views.controller(&session.view_key);
    let intent = controller.intent_for(query);
    let outcome = controller
        .dispatch(intent, |request| async move {
            backend.list_lawyers(session, &request).await
        })
        .await;

    Ok(LawyersPageData {
        view: into_view(outcome)?,
        facets,
    })
}

pub async fn show_lawyer<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
) -> ServiceResult<LawyerPageData>
where
    R: LawyerReader + ?Sized,
{
    let id = parse_id(id)?;
    let lawyer = backend.get_lawyer(session, &id).await?;
    Ok(LawyerPageData::from(lawyer))
}

/// Validates and submits a review.
pub async fn review_lawyer<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
    form: ReviewForm,
) -> ServiceResult<ReviewAccepted>
where
    R: LawyerWriter + ?Sized,
{
    let id = parse_id(id)?;
    let review = NewReview::try_from(form)?;
    let accepted = backend.review_lawyer(session, &id, &review).await?;
    Ok(accepted)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::backend::Page;
    use crate::backend::mock::MockBackend;
    use crate::domain::lawyer::LawyerFacets;
    use crate::pagination::Pagination;
    use crate::query::FieldValue;
    use crate::services::ServiceError;

    const LAWYER_ID: &str = "65a1b2c3d4e5f60718293a4b";

    fn session() -> SessionContext {
        SessionContext::signed_in("viewer", "jwt", "Clerk")
    }

    #[tokio::test]
    async fn directory_filters_reach_backend() {
        let mut backend = MockBackend::new();
        backend.expect_lawyer_facets().returning(|_| {
            Ok(LawyerFacets {
                cities: vec!["Lahore".into()],
                specializations: vec![],
            })
        });
        backend
            .expect_list_lawyers()
            .withf(|_, request| {
                request.param("city") == Some("Lahore") && request.param("page_size") == Some("12")
            })
            .returning(|_, _| {
                Ok(Page {
                    items: vec![LawyerCard {
                        id: "l1".into(),
                        name: "Adv. Rana".into(),
                        ..LawyerCard::default()
                    }],
                    pagination: Pagination::new(1, 12, 1),
                })
            });
        let views = ViewRegistry::new(LAWYERS_VIEW, Duration::from_secs(60));
        let query = ListQuery {
            fields: vec![("city".to_string(), FieldValue::text("Lahore"))],
            ..ListQuery::default()
        };

        let data = list_lawyers(&backend, &views, &session(), query).await.unwrap();

        assert_eq!(data.facets.cities, vec!["Lahore".to_string()]);
        assert_eq!(data.view.items()[0].href, "/lawyers/l1");
    }

    #[tokio::test]
    async fn invalid_rating_never_reaches_backend() {
        let mut backend = MockBackend::new();
        backend.expect_review_lawyer().times(0);
        let form = ReviewForm {
            rating: 0,
            comment: None,
        };

        let result = review_lawyer(&backend, &session(), LAWYER_ID, form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn review_is_submitted() {
        let mut backend = MockBackend::new();
        backend
            .expect_review_lawyer()
            .withf(|_, id, review| id.as_str() == LAWYER_ID && review.rating == 5)
            .returning(|_, _, _| {
                Ok(ReviewAccepted {
                    message: "Review added".into(),
                    avg_rating: 4.5,
                })
            });
        let form = ReviewForm {
            rating: 5,
            comment: Some("Thorough".into()),
        };

        let accepted = review_lawyer(&backend, &session(), LAWYER_ID, form)
            .await
            .unwrap();

        assert_eq!(accepted.avg_rating, 4.5);
    }
}
