use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Compact case record returned by list and search endpoints.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseCard {
    pub id: String,
    pub case_number: String,
    pub title: String,
    #[serde(default)]
    pub court: String,
    #[serde(default)]
    pub case_type: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub judge_names: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub judgment_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Full case record shown on the detail page.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub id: String,
    pub case_number: String,
    pub title: String,
    #[serde(default)]
    pub court: String,
    #[serde(default)]
    pub bench: Option<String>,
    #[serde(default)]
    pub case_type: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub appellants: Vec<String>,
    #[serde(default)]
    pub respondents: Vec<String>,
    #[serde(default)]
    pub judge_names: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub judgment_text: Option<String>,
    #[serde(default)]
    pub headnotes: Option<String>,
    #[serde(default)]
    pub judgment_date: Option<String>,
    #[serde(default)]
    pub filing_date: Option<String>,
    #[serde(default)]
    pub cited_cases: Vec<String>,
    #[serde(default)]
    pub cited_statutes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Facet values offered by the advanced search form.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchFacets {
    #[serde(default)]
    pub courts: Vec<String>,
    #[serde(default)]
    pub case_types: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
    #[serde(default)]
    pub year_range: YearRange,
    #[serde(default)]
    pub judges: Vec<JudgeCount>,
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct YearRange {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

/// Generated summary of a judgment.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseSummary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub headnotes: Vec<String>,
}

/// Named entities found in a judgment, grouped by kind (`statutes`, `judges`, ...).
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct CaseEntities(pub BTreeMap<String, Vec<String>>);

impl CaseEntities {
    /// Keeps the groups that are non-empty lists of strings.
    ///
    /// The extraction body also carries structured entries (`all_entities`)
    /// which are not grouped values and are left out.
    pub fn from_extraction(extraction: BTreeMap<String, Value>) -> Self {
        let groups = extraction
            .into_iter()
            .filter_map(|(kind, value)| {
                let Value::Array(values) = value else {
                    return None;
                };
                let values: Vec<String> = values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
                    .collect();
                (!values.is_empty()).then_some((kind, values))
            })
            .collect();
        Self(groups)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Case ranked by metadata overlap with another case.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SimilarCase {
    pub id: String,
    #[serde(default)]
    pub case_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub court: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// Score between 0 and 1.
    #[serde(default)]
    pub similarity: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct JudgeCount {
    pub name: String,
    #[serde(default, alias = "case_count")]
    pub count: u64,
}
