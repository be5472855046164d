//! Drafting template catalogue and fill-in.

use crate::backend::{TemplateReader, TemplateWriter};
use crate::domain::legal_template::{TemplateCard, TemplateValues};
use crate::dto::pages::{TemplatePageData, TemplatesPageData};
use crate::forms::legal_templates::GenerateForm;
use crate::models::session::SessionContext;
use crate::query::{ListQuery, ViewRegistry, ViewSpec};
use crate::services::{ServiceResult, into_view, or_default, parse_id};

/// The catalogue is returned in one piece, so the page size only bounds the request.
pub const TEMPLATES_VIEW: ViewSpec = ViewSpec {
    name: "templates",
    list_key: "templates",
    page_size: 100,
    sort: None,
    fields: &["category", "language"],
};

pub async fn list_templates<R>(
    backend: &R,
    views: &ViewRegistry<TemplateCard>,
    session: &SessionContext,
    query: ListQuery,
) -> ServiceResult<TemplatesPageData>
where
    R: TemplateReader + ?Sized,
{
    let categories = or_default(
        backend.template_categories(session).await,
        "template categories",
    )?;

    let controller = views.controller(&session.view_key);
    let intent = controller.intent_for(query);
    let outcome = controller
        .dispatch(intent, |request| async move {
            backend.list_templates(session, &request).await
        })
        .await;

    Ok(TemplatesPageData {
        view: into_view(outcome)?,
        categories,
    })
}

pub async fn show_template<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
) -> ServiceResult<TemplatePageData>
where
    R: TemplateReader + ?Sized,
{
    let id = parse_id(id)?;
    let template = backend.get_template(session, &id).await?;
    Ok(TemplatePageData {
        template,
        generated: None,
    })
}

/// Fills the template with the submitted placeholder values.
pub async fn generate_document<R>(
    backend: &R,
    session: &SessionContext,
    id: &str,
    form: GenerateForm,
) -> ServiceResult<TemplatePageData>
where
    R: TemplateReader + TemplateWriter + ?Sized,
{
    let id = parse_id(id)?;
    let template = backend.get_template(session, &id).await?;
    let values = TemplateValues::from(form);
    let generated = backend.generate_document(session, &id, &values).await?;
    if !generated.unfilled_placeholders.is_empty() {
        log::debug!(
            "Template {id} generated with {} unfilled placeholders",
            generated.unfilled_placeholders.len()
        );
    }
    Ok(TemplatePageData {
        template,
        generated: Some(generated),
    })
}
