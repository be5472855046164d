use serde::{Deserialize, Serialize};

/// Entity recognized inside an uploaded document.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedEntity {
    pub entity_type: String,
    pub value: String,
    #[serde(default)]
    pub confidence: f64,
}

/// Document uploaded to the user's workspace.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LegalDocument {
    pub id: String,
    #[serde(default)]
    pub case_id: Option<String>,
    pub original_filename: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub doc_type: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub entities: Vec<ExtractedEntity>,
    #[serde(default)]
    pub has_text: bool,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// File sent to the upload endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct NewDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub doc_type: String,
    pub case_id: Option<String>,
}

/// Raw file returned by the download endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentFile {
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Document categories accepted by the upload form.
pub const DOC_TYPES: &[(&str, &str)] = &[
    ("judgment", "Judgment"),
    ("petition", "Petition"),
    ("affidavit", "Affidavit"),
    ("evidence", "Evidence"),
    ("contract", "Contract"),
    ("legal_notice", "Legal Notice"),
    ("power_of_attorney", "Power of Attorney"),
    ("other", "Other"),
];
