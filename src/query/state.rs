use serde::Serialize;

/// Name of the pseudo-field carrying the page number in query strings.
pub const PAGE_FIELD: &str = "page";

/// Value of a single filter field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    #[default]
    Empty,
}

impl FieldValue {
    /// Wraps raw user input; blank input becomes [`FieldValue::Empty`].
    pub fn text<S: Into<String>>(raw: S) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Empty => true,
        }
    }

    /// Value as sent to the backend, `None` when the field must be omitted.
    pub fn as_param(&self) -> Option<String> {
        match self {
            FieldValue::Text(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            FieldValue::Number(value) => Some(value.to_string()),
            _ => None,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::text)
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::Number)
    }
}

/// Filter fields of one list view plus the page currently shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    fields: Vec<(String, FieldValue)>,
    page: usize,
    filters_dirty: bool,
}

impl QueryState {
    /// Creates a state with every field empty, positioned on page 1.
    pub fn new(field_names: &[&str]) -> Self {
        Self {
            fields: field_names
                .iter()
                .map(|name| (name.to_string(), FieldValue::Empty))
                .collect(),
            page: 1,
            filters_dirty: false,
        }
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Updates exactly one field and reports whether its value changed.
    ///
    /// A change to any field other than `page` moves the state back to page 1
    /// and marks the filters dirty until the next fetch is issued.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        if name == PAGE_FIELD {
            let page = match value {
                FieldValue::Number(n) if n > 0 => n as usize,
                FieldValue::Text(ref raw) => raw.trim().parse::<usize>().unwrap_or(1),
                _ => 1,
            };
            let changed = page.max(1) != self.page;
            self.set_page(page);
            return changed;
        }

        let value = if value.is_empty() {
            FieldValue::Empty
        } else {
            value
        };

        let changed = match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, current)) if *current == value => false,
            Some((_, current)) => {
                *current = value;
                true
            }
            None if value.is_empty() => false,
            None => {
                self.fields.push((name.to_string(), value));
                true
            }
        };

        if changed {
            self.page = 1;
            self.filters_dirty = true;
        }
        changed
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn filters_dirty(&self) -> bool {
        self.filters_dirty
    }

    /// Resolves the page the next fetch must use and clears the dirty flag.
    pub fn take_target_page(&mut self, requested: usize) -> usize {
        let page = if self.filters_dirty {
            1
        } else {
            requested.max(1)
        };
        self.filters_dirty = false;
        self.page = page;
        page
    }

    /// Non-empty filter fields as request parameters, in field order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|(name, value)| value.as_param().map(|param| (name.clone(), param)))
            .collect()
    }

    /// Non-empty filter fields encoded for page links.
    pub fn query_string(&self) -> String {
        serde_html_form::to_string(self.to_params()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["search", "court", "year", "status"];

    #[test]
    fn blank_text_is_empty() {
        assert_eq!(FieldValue::text("   "), FieldValue::Empty);
        assert_eq!(FieldValue::text(" Lahore "), FieldValue::Text("Lahore".into()));
        assert!(FieldValue::Text(" ".into()).is_empty());
        assert!(!FieldValue::Number(0).is_empty());
    }

    #[test]
    fn params_omit_empty_fields() {
        let mut state = QueryState::new(FIELDS);
        state.set_field("court", FieldValue::text("Supreme Court"));
        state.set_field("search", FieldValue::text(""));
        state.set_field("year", FieldValue::Number(2021));
        state.set_field("status", FieldValue::Text("  ".into()));

        assert_eq!(
            state.to_params(),
            vec![
                ("court".to_string(), "Supreme Court".to_string()),
                ("year".to_string(), "2021".to_string()),
            ]
        );
    }

    #[test]
    fn clearing_a_field_removes_it_from_params() {
        let mut state = QueryState::new(FIELDS);
        state.set_field("status", FieldValue::text("pending"));
        assert!(state.set_field("status", FieldValue::Empty));
        assert!(state.to_params().is_empty());
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = QueryState::new(FIELDS);
        state.set_page(7);
        assert!(state.set_field("court", FieldValue::text("Lahore High Court")));
        assert_eq!(state.page(), 1);
        assert!(state.filters_dirty());
        assert_eq!(state.take_target_page(4), 1);
        assert!(!state.filters_dirty());
        assert_eq!(state.take_target_page(4), 4);
    }

    #[test]
    fn unchanged_value_keeps_page() {
        let mut state = QueryState::new(FIELDS);
        state.set_field("court", FieldValue::text("Lahore High Court"));
        state.take_target_page(1);
        state.set_page(3);
        assert!(!state.set_field("court", FieldValue::text(" Lahore High Court ")));
        assert_eq!(state.page(), 3);
        assert!(!state.filters_dirty());
    }

    #[test]
    fn page_field_is_not_a_filter() {
        let mut state = QueryState::new(FIELDS);
        assert!(state.set_field(PAGE_FIELD, FieldValue::Number(5)));
        assert_eq!(state.page(), 5);
        assert!(!state.filters_dirty());
        assert!(state.to_params().is_empty());
    }

    #[test]
    fn unknown_fields_are_appended() {
        let mut state = QueryState::new(FIELDS);
        assert!(!state.set_field("judge", FieldValue::Empty));
        assert!(state.set_field("judge", FieldValue::text("Justice Kayani")));
        assert_eq!(state.fields().last().unwrap().0, "judge");
    }

    #[test]
    fn query_string_encodes_filters() {
        let mut state = QueryState::new(FIELDS);
        state.set_field("search", FieldValue::text("bail & parole"));
        state.set_field("year", FieldValue::Number(2020));
        assert_eq!(state.query_string(), "search=bail+%26+parole&year=2020");
    }
}
