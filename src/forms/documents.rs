use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::domain::document::{DOC_TYPES, NewDocument};
use crate::domain::types::RecordId;
use crate::forms::FormError;

#[derive(MultipartForm)]
/// Document upload with its category and optional related case.
pub struct UploadDocumentForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
    pub doc_type: Option<Text<String>>,
    pub case_id: Option<Text<String>>,
}

/// Checks a document type code against the supported categories.
pub fn parse_doc_type(raw: Option<&str>) -> Result<String, FormError> {
    match raw.map(str::trim).filter(|code| !code.is_empty()) {
        None => Ok("other".to_string()),
        Some(code) if DOC_TYPES.iter().any(|(value, _)| *value == code) => Ok(code.to_string()),
        Some(code) => Err(FormError::InvalidDocType(code.to_string())),
    }
}

impl UploadDocumentForm {
    /// Reads the uploaded file into a backend upload request.
    pub fn into_document(self) -> Result<NewDocument, FormError> {
        let file_name = self
            .file
            .file_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .ok_or(FormError::MissingFile)?;
        if self.file.size == 0 {
            return Err(FormError::MissingFile);
        }

        let bytes = std::fs::read(self.file.file.path()).map_err(|err| {
            log::error!("Failed to read uploaded file: {err}");
            FormError::Malformed
        })?;

        let doc_type = parse_doc_type(self.doc_type.as_ref().map(|text| text.as_str()))?;
        let case_id = self
            .case_id
            .as_ref()
            .map(|text| text.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(RecordId::new)
            .transpose()
            .map_err(|_| FormError::Malformed)?
            .map(|id| id.as_str().to_string());

        Ok(NewDocument {
            file_name,
            content_type: self.file.content_type.as_ref().map(|mime| mime.to_string()),
            bytes,
            doc_type,
            case_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_type_defaults_to_other() {
        assert_eq!(parse_doc_type(None).unwrap(), "other");
        assert_eq!(parse_doc_type(Some(" ")).unwrap(), "other");
        assert_eq!(parse_doc_type(Some("petition")).unwrap(), "petition");
        assert!(matches!(
            parse_doc_type(Some("spreadsheet")),
            Err(FormError::InvalidDocType(_))
        ));
    }
}
