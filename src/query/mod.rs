//! Query state and fetch orchestration shared by the paginated list views.
//!
//! Each list view owns a [`QueryController`] holding the viewer's filter
//! fields, the current page and the last page of results. Fetches move the
//! controller through an explicit state machine and are tagged with a
//! sequence number so that only the newest issued request can update what
//! the viewer sees.

pub mod controller;
pub mod registry;
pub mod state;

pub use controller::{
    FetchOutcome, FetchStatus, FetchTicket, ListRequest, QueryController, ViewSnapshot, ViewState,
};
pub use registry::ViewRegistry;
pub use state::{FieldValue, QueryState};

/// Static description of one paginated list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSpec {
    /// Short name used in logs.
    pub name: &'static str,
    /// Key of the item array in the backend's list response.
    pub list_key: &'static str,
    /// Fixed number of items requested per page.
    pub page_size: usize,
    /// Fixed sort order sent with every request, if the view has one.
    pub sort: Option<&'static str>,
    /// Filter fields in display order.
    pub fields: &'static [&'static str],
}

/// Filter values and navigation carried by one list page request.
///
/// `fields` holds only the fields present in the request; an absent field
/// keeps its current value while a present but blank one clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub fields: Vec<(String, FieldValue)>,
    pub page: Option<usize>,
    pub retry: bool,
}

impl ListQuery {
    /// True when the request carries no filter value, page or retry.
    pub fn is_blank(&self) -> bool {
        !self.retry && self.page.is_none() && self.fields.iter().all(|(_, value)| value.is_empty())
    }
}

/// User intent that moves a controller into the fetching state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// New filter values; the fetch always starts from page 1.
    FilterChanged(Vec<(String, FieldValue)>),
    /// Navigation to another page with unchanged filters.
    PageChanged(usize),
    /// Repeat the last request.
    Retry,
}
