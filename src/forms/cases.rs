use serde::{Deserialize, Serialize};

/// Generated panel shown below a case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CasePanel {
    Summary,
    Entities,
    Similar,
}

impl CasePanel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "summary" => Some(CasePanel::Summary),
            "entities" => Some(CasePanel::Entities),
            "similar" => Some(CasePanel::Similar),
            _ => None,
        }
    }
}

/// Query string of the case detail page.
#[derive(Debug, Default, Deserialize)]
pub struct CaseDetailQuery {
    pub panel: Option<String>,
}

impl CaseDetailQuery {
    /// Requested panel; unknown names show the plain case.
    pub fn panel(&self) -> Option<CasePanel> {
        self.panel.as_deref().and_then(CasePanel::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_parse_by_name() {
        let query = CaseDetailQuery {
            panel: Some("similar".into()),
        };
        assert_eq!(query.panel(), Some(CasePanel::Similar));
        assert_eq!(CaseDetailQuery::default().panel(), None);
        assert_eq!(CasePanel::parse("headnotes"), None);
    }
}
