use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalogue entry for a drafting template.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub court_type: Option<String>,
    #[serde(default)]
    pub usage_count: u64,
}

/// Template with its full body and placeholder names.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LegalTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub placeholders: Vec<String>,
    #[serde(default)]
    pub court_type: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub usage_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateCategory {
    pub value: String,
    pub label: String,
}

/// Placeholder values submitted to the generate endpoint.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct TemplateValues {
    pub values: BTreeMap<String, String>,
}

/// Document produced by filling a template.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneratedDocument {
    pub document: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub unfilled_placeholders: Vec<String>,
}
