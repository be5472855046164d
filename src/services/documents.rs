//! Authenticated document workspace.

use crate::backend::{DocumentReader, DocumentWriter};
use crate::domain::document::{DOC_TYPES, DocumentFile, LegalDocument, NewDocument};
use crate::dto::pages::{DocumentPageData, DocumentsPageData};
use crate::models::session::SessionContext;
use crate::query::{ListQuery, ViewRegistry, ViewSpec};
use crate::services::{ServiceResult, into_view, parse_id};

pub const DOCUMENTS_VIEW: ViewSpec = ViewSpec {
    name: "documents",
    list_key: "documents",
    page_size: 12,
    sort: None,
    fields: &["doc_type"],
};

pub async fn list_documents<R>(
    backend: &R,
    views: &ViewRegistry<LegalDocument>,
    session: &SessionContext,
    query: ListQuery,
) -> ServiceResult<DocumentsPageData>
where
    R: DocumentReader + ?Sized,
{
    let controller = views.controller(&session.view_key);
    let intent = controller.intent_for(query);
    let outcome = controller
        .dispatch(intent, |request| async move {
            backend.list_documents(session, &request).await
        })
        .await;

    Ok(DocumentsPageData {
        view: into_view(outcome)?,
        doc_types: DOC_TYPES.to_vec(),
    })
}

pub async fn show_document<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
) -> ServiceResult<DocumentPageData>
where
    R: DocumentReader + ?Sized,
{
    let id = parse_id(id)?;
    let document = backend.get_document(session, &id).await?;
    Ok(DocumentPageData::from(document))
}

/// Uploads a document and returns the stored record.
pub async fn upload_document<R>(
    backend: &R,
    session: &SessionContext,
    document: NewDocument,
) -> ServiceResult<LegalDocument>
where
    R: DocumentWriter + ?Sized,
{
    log::info!(
        "Uploading {} ({} bytes) as {}",
        document.file_name,
        document.bytes.len(),
        document.doc_type
    );
    Ok(backend.upload_document(session, document).await?)
}

pub async fn process_document<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
) -> ServiceResult<LegalDocument>
where
    R: DocumentWriter + ?Sized,
{
    let id = parse_id(id)?;
    Ok(backend.process_document(session, &id).await?)
}

pub async fn delete_document<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
) -> ServiceResult<String>
where
    R: DocumentWriter + ?Sized,
{
    let id = parse_id(id)?;
    Ok(backend.delete_document(session, &id).await?)
}

pub async fn download_document<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
) -> ServiceResult<DocumentFile>
where
    R: DocumentReader + ?Sized,
{
    let id = parse_id(id)?;
    Ok(backend.download_document(session, &id).await?)
}
