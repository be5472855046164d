use std::collections::BTreeMap;
use std::future::Future;

use parking_lot::Mutex;
use serde::Serialize;

use crate::backend::Page;
use crate::backend::errors::{BackendError, BackendResult};
use crate::pagination::{Paginated, Pagination};
use crate::query::state::{FieldValue, QueryState};
use crate::query::{Intent, ListQuery, ViewSpec};

/// Parameters of one list request sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRequest {
    /// Key of the item array in the response body.
    pub list_key: &'static str,
    pub page: usize,
    pub page_size: usize,
    /// Every query parameter, filters first, then `page`, `page_size` and `sort`.
    pub params: Vec<(String, String)>,
}

impl ListRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Lifecycle of the most recently issued fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching,
    Success,
    Error,
}

/// What the view shows; exactly one applies at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading,
    Failed,
    Empty,
    Results,
}

impl ViewState {
    fn derive(status: FetchStatus, item_count: usize) -> Self {
        match status {
            FetchStatus::Idle => ViewState::Idle,
            FetchStatus::Fetching => ViewState::Loading,
            FetchStatus::Error => ViewState::Failed,
            FetchStatus::Success if item_count == 0 => ViewState::Empty,
            FetchStatus::Success => ViewState::Results,
        }
    }
}

/// Handle for an issued fetch. Only the newest ticket may update the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: ListRequest,
}

/// Immutable copy of a controller's state, ready to be rendered.
#[derive(Clone, Debug, Serialize)]
pub struct ViewSnapshot<T> {
    pub state: ViewState,
    pub status: FetchStatus,
    pub results: Paginated<T>,
    pub pagination: Pagination,
    /// Current field values as shown in the filter form.
    pub fields: BTreeMap<String, String>,
    /// Encoded non-empty filters for page links.
    pub query_string: String,
    pub notice: Option<String>,
}

impl<T> ViewSnapshot<T> {
    pub fn items(&self) -> &[T] {
        &self.results.items
    }

    /// Projects the items while keeping every other part of the snapshot.
    pub fn map_items<U, F>(self, project: F) -> ViewSnapshot<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        let pagination = self.pagination;
        ViewSnapshot {
            state: self.state,
            status: self.status,
            results: Paginated::new(project(self.results.items), &pagination),
            pagination,
            fields: self.fields,
            query_string: self.query_string,
            notice: self.notice,
        }
    }
}

/// Result of applying a completed fetch.
#[derive(Debug)]
pub struct FetchOutcome<T> {
    pub snapshot: ViewSnapshot<T>,
    /// The response belonged to an older request and was ignored.
    pub superseded: bool,
    /// Failure of this fetch, kept so callers can react to `Unauthorized`.
    pub error: Option<BackendError>,
}

struct ControllerState<T> {
    query: QueryState,
    status: FetchStatus,
    items: Vec<T>,
    pagination: Pagination,
    notice: Option<String>,
    issued: u64,
}

/// Owns the query state and last results of one list view.
pub struct QueryController<T> {
    spec: ViewSpec,
    state: Mutex<ControllerState<T>>,
}

impl<T: Clone> QueryController<T> {
    pub fn new(spec: ViewSpec) -> Self {
        Self {
            spec,
            state: Mutex::new(ControllerState {
                query: QueryState::new(spec.fields),
                status: FetchStatus::Idle,
                items: Vec::new(),
                pagination: Pagination::new(1, spec.page_size, 0),
                notice: None,
                issued: 0,
            }),
        }
    }

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    pub fn current_fields(&self) -> Vec<(String, FieldValue)> {
        self.state.lock().query.fields().to_vec()
    }

    pub fn status(&self) -> FetchStatus {
        self.state.lock().status
    }

    pub fn page(&self) -> usize {
        self.state.lock().query.page()
    }

    /// Updates one field without fetching.
    pub fn set_field(&self, name: &str, value: FieldValue) -> bool {
        self.state.lock().query.set_field(name, value)
    }

    /// Applies an intent, moves to `Fetching` and returns the request to send.
    pub fn begin(&self, intent: Intent) -> FetchTicket {
        let mut state = self.state.lock();
        let requested = match intent {
            Intent::FilterChanged(fields) => {
                for (name, value) in fields {
                    state.query.set_field(&name, value);
                }
                1
            }
            Intent::PageChanged(page) => page,
            Intent::Retry => state.query.page(),
        };
        let page = state.query.take_target_page(requested);

        state.issued += 1;
        state.status = FetchStatus::Fetching;

        FetchTicket {
            seq: state.issued,
            request: self.request_for(&state.query, page),
        }
    }

    /// Applies the response of `ticket` unless a newer fetch was issued since.
    pub fn complete(&self, ticket: FetchTicket, result: BackendResult<Page<T>>) -> FetchOutcome<T> {
        let mut state = self.state.lock();

        if ticket.seq != state.issued {
            log::debug!(
                "Discarding stale {} response #{} (latest #{})",
                self.spec.name,
                ticket.seq,
                state.issued
            );
            return FetchOutcome {
                snapshot: self.snapshot_of(&state),
                superseded: true,
                error: None,
            };
        }

        let error = match result {
            Ok(page) => {
                let pagination = page.pagination.normalized();
                state.items = page.items;
                state.pagination = pagination;
                state.query.set_page(pagination.page);
                state.status = FetchStatus::Success;
                state.notice = None;
                None
            }
            Err(err) => {
                log::warn!("Fetching {} page {} failed: {err}", self.spec.name, ticket.request.page);
                state.status = FetchStatus::Error;
                state.notice = Some(err.user_message());
                Some(err)
            }
        };

        FetchOutcome {
            snapshot: self.snapshot_of(&state),
            superseded: false,
            error,
        }
    }

    /// Translates a page request into an intent.
    ///
    /// A submitted filter form (fields without a page) is a filter change.
    /// Page links carry the filters they were rendered with; those are applied
    /// field by field, so an edited filter still forces page 1.
    pub fn intent_for(&self, query: ListQuery) -> Intent {
        if query.retry {
            return Intent::Retry;
        }
        match query.page {
            None if !query.fields.is_empty() => Intent::FilterChanged(query.fields),
            None => Intent::PageChanged(self.page()),
            Some(page) => {
                let mut state = self.state.lock();
                for (name, value) in query.fields {
                    state.query.set_field(&name, value);
                }
                Intent::PageChanged(page)
            }
        }
    }

    /// Runs one full round trip for `intent`.
    pub async fn dispatch<F, Fut>(&self, intent: Intent, fetcher: F) -> FetchOutcome<T>
    where
        F: FnOnce(ListRequest) -> Fut,
        Fut: Future<Output = BackendResult<Page<T>>>,
    {
        let ticket = self.begin(intent);
        let result = fetcher(ticket.request.clone()).await;
        self.complete(ticket, result)
    }

    /// Fetches `page` with the current filters.
    pub async fn fetch<F, Fut>(&self, page: usize, fetcher: F) -> FetchOutcome<T>
    where
        F: FnOnce(ListRequest) -> Fut,
        Fut: Future<Output = BackendResult<Page<T>>>,
    {
        self.dispatch(Intent::PageChanged(page), fetcher).await
    }

    pub fn snapshot(&self) -> ViewSnapshot<T> {
        self.snapshot_of(&self.state.lock())
    }

    fn request_for(&self, query: &QueryState, page: usize) -> ListRequest {
        let mut params = query.to_params();
        params.push(("page".to_string(), page.to_string()));
        params.push(("page_size".to_string(), self.spec.page_size.to_string()));
        if let Some(sort) = self.spec.sort {
            params.push(("sort".to_string(), sort.to_string()));
        }
        ListRequest {
            list_key: self.spec.list_key,
            page,
            page_size: self.spec.page_size,
            params,
        }
    }

    fn snapshot_of(&self, state: &ControllerState<T>) -> ViewSnapshot<T> {
        let fields = state
            .query
            .fields()
            .iter()
            .map(|(name, value)| (name.clone(), value.as_param().unwrap_or_default()))
            .collect();

        ViewSnapshot {
            state: ViewState::derive(state.status, state.items.len()),
            status: state.status,
            results: Paginated::new(state.items.clone(), &state.pagination),
            pagination: state.pagination,
            fields,
            query_string: state.query.query_string(),
            notice: state.notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ViewSpec = ViewSpec {
        name: "cases",
        list_key: "cases",
        page_size: 12,
        sort: Some("-judgment_date"),
        fields: &["search", "court", "year", "status"],
    };

    fn page_of(items: &[&str], page: usize, total: usize) -> Page<String> {
        Page {
            items: items.iter().map(|s| s.to_string()).collect(),
            pagination: Pagination::new(page, SPEC.page_size, total),
        }
    }

    #[test]
    fn starts_idle() {
        let controller = QueryController::<String>::new(SPEC);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.state, ViewState::Idle);
        assert!(snapshot.results.pages.is_empty());
        assert_eq!(controller.current_fields().len(), 4);
    }

    #[test]
    fn request_carries_only_non_empty_fields() {
        let controller = QueryController::<String>::new(SPEC);
        controller.set_field("court", FieldValue::text("Sindh High Court"));
        controller.set_field("search", FieldValue::text("   "));
        let ticket = controller.begin(Intent::PageChanged(1));

        assert_eq!(
            ticket.request.params,
            vec![
                ("court".to_string(), "Sindh High Court".to_string()),
                ("page".to_string(), "1".to_string()),
                ("page_size".to_string(), "12".to_string()),
                ("sort".to_string(), "-judgment_date".to_string()),
            ]
        );
        assert_eq!(ticket.request.param("search"), None);
        assert_eq!(controller.status(), FetchStatus::Fetching);
    }

    #[test]
    fn dirty_filters_force_first_page() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::PageChanged(4));
        controller.complete(ticket, Ok(page_of(&["a"], 4, 100)));

        controller.set_field("status", FieldValue::text("pending"));
        let ticket = controller.begin(Intent::PageChanged(5));
        assert_eq!(ticket.request.page, 1);

        let ticket = controller.begin(Intent::PageChanged(5));
        assert_eq!(ticket.request.page, 5);
    }

    #[test]
    fn filter_intent_starts_at_page_one() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::PageChanged(3));
        controller.complete(ticket, Ok(page_of(&["a"], 3, 40)));

        let ticket = controller.begin(Intent::FilterChanged(vec![(
            "year".to_string(),
            FieldValue::Number(2019),
        )]));
        assert_eq!(ticket.request.page, 1);
        assert_eq!(ticket.request.param("year"), Some("2019"));
    }

    #[test]
    fn success_replaces_results() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::PageChanged(1));
        let outcome = controller.complete(ticket, Ok(page_of(&["a", "b"], 1, 30)));

        assert!(!outcome.superseded);
        assert_eq!(outcome.snapshot.state, ViewState::Results);
        assert_eq!(outcome.snapshot.items(), ["a".to_string(), "b".to_string()]);
        assert_eq!(outcome.snapshot.pagination.total_pages, 3);

        let ticket = controller.begin(Intent::PageChanged(2));
        let outcome = controller.complete(ticket, Ok(page_of(&["c"], 2, 13)));
        assert_eq!(outcome.snapshot.items(), ["c".to_string()]);
        assert_eq!(outcome.snapshot.pagination, Pagination::new(2, 12, 13));
    }

    #[test]
    fn empty_success_is_not_an_error() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::PageChanged(1));
        let outcome = controller.complete(ticket, Ok(page_of(&[], 1, 0)));
        assert_eq!(outcome.snapshot.state, ViewState::Empty);
        assert!(outcome.snapshot.notice.is_none());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn failure_keeps_stale_results() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::PageChanged(1));
        controller.complete(ticket, Ok(page_of(&["a"], 1, 1)));

        let ticket = controller.begin(Intent::PageChanged(2));
        let outcome = controller.complete(ticket, Err(BackendError::Timeout));

        assert_eq!(outcome.snapshot.state, ViewState::Failed);
        assert_eq!(outcome.snapshot.items(), ["a".to_string()]);
        assert!(outcome.snapshot.notice.is_some());
        assert!(matches!(outcome.error, Some(BackendError::Timeout)));

        let ticket = controller.begin(Intent::Retry);
        let outcome = controller.complete(ticket, Ok(page_of(&["b"], 1, 1)));
        assert!(outcome.snapshot.notice.is_none());
        assert_eq!(outcome.snapshot.items(), ["b".to_string()]);
    }

    #[test]
    fn older_response_never_overwrites_newer() {
        let controller = QueryController::<String>::new(SPEC);
        let first = controller.begin(Intent::PageChanged(1));
        let second = controller.begin(Intent::PageChanged(2));

        let outcome = controller.complete(second, Ok(page_of(&["new"], 2, 30)));
        assert!(!outcome.superseded);

        let outcome = controller.complete(first, Ok(page_of(&["old"], 1, 30)));
        assert!(outcome.superseded);
        assert_eq!(outcome.snapshot.items(), ["new".to_string()]);
        assert_eq!(outcome.snapshot.pagination.page, 2);
    }

    #[test]
    fn stale_error_is_ignored() {
        let controller = QueryController::<String>::new(SPEC);
        let first = controller.begin(Intent::PageChanged(1));
        let second = controller.begin(Intent::PageChanged(1));
        controller.complete(second, Ok(page_of(&["fresh"], 1, 1)));

        let outcome = controller.complete(first, Err(BackendError::Unauthorized));
        assert!(outcome.superseded);
        assert!(outcome.error.is_none());
        assert_eq!(outcome.snapshot.state, ViewState::Results);
        assert!(outcome.snapshot.notice.is_none());
    }

    #[test]
    fn snapshot_exposes_form_values_and_links() {
        let controller = QueryController::<String>::new(SPEC);
        controller.set_field("search", FieldValue::text("murder appeal"));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.fields["search"], "murder appeal");
        assert_eq!(snapshot.fields["court"], "");
        assert_eq!(snapshot.query_string, "search=murder+appeal");
    }

    #[test]
    fn submitted_form_is_a_filter_change() {
        let controller = QueryController::<String>::new(SPEC);
        let query = ListQuery {
            fields: vec![("court".to_string(), FieldValue::text("Lahore High Court"))],
            page: None,
            retry: false,
        };
        assert!(matches!(controller.intent_for(query), Intent::FilterChanged(_)));
    }

    #[test]
    fn page_link_with_same_filters_keeps_page() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::FilterChanged(vec![(
            "status".to_string(),
            FieldValue::text("pending"),
        )]));
        controller.complete(ticket, Ok(page_of(&["a"], 1, 50)));

        let link = ListQuery {
            fields: vec![("status".to_string(), FieldValue::text("pending"))],
            page: Some(3),
            retry: false,
        };
        let intent = controller.intent_for(link);
        assert_eq!(controller.begin(intent).request.page, 3);

        let edited = ListQuery {
            fields: vec![("status".to_string(), FieldValue::text("decided"))],
            page: Some(3),
            retry: false,
        };
        let intent = controller.intent_for(edited);
        assert_eq!(controller.begin(intent).request.page, 1);
    }

    #[test]
    fn bare_request_reuses_state() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::PageChanged(2));
        controller.complete(ticket, Ok(page_of(&["a"], 2, 50)));
        assert_eq!(controller.intent_for(ListQuery::default()), Intent::PageChanged(2));
        let retry = ListQuery {
            retry: true,
            ..ListQuery::default()
        };
        assert_eq!(controller.intent_for(retry), Intent::Retry);
    }

    #[test]
    fn map_items_keeps_pagination() {
        let controller = QueryController::<String>::new(SPEC);
        let ticket = controller.begin(Intent::PageChanged(1));
        let outcome = controller.complete(ticket, Ok(page_of(&["a", "bb"], 1, 100)));
        let mapped = outcome
            .snapshot
            .map_items(|items| items.into_iter().map(|s| s.len()).collect());
        assert_eq!(mapped.items(), [1, 2]);
        assert_eq!(mapped.results.total_pages, 9);
        assert_eq!(mapped.state, ViewState::Results);
    }
}
