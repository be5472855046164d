//! Scraper job history and manual runs.

use crate::backend::{ScraperReader, ScraperWriter};
use crate::domain::scrape_job::{ScrapeJob, ScraperRunAccepted};
use crate::dto::pages::ScraperPageData;
use crate::forms::scraper::ScraperRunForm;
use crate::models::session::SessionContext;
use crate::query::{ListQuery, ViewRegistry, ViewSpec};
use crate::services::{ServiceResult, into_view, or_default};

pub const JOBS_VIEW: ViewSpec = ViewSpec {
    name: "scraper jobs",
    list_key: "jobs",
    page_size: 20,
    sort: None,
    fields: &["source", "status"],
};

pub async fn list_jobs<R>(
    backend: &R,
    views: &ViewRegistry<ScrapeJob>,
    session: &SessionContext,
    query: ListQuery,
) -> ServiceResult<ScraperPageData>
where
    R: ScraperReader + ?Sized,
{
    let scrapers = or_default(backend.available_scrapers(session).await, "scrapers")?;

    let controller = views.controller(&session.view_key);
    let intent = controller.intent_for(query);
    let outcome = controller
        .dispatch(intent, |request| async move {
            backend.list_jobs(session, &request).await
        })
        .await;

    Ok(ScraperPageData {
        view: into_view(outcome)?,
        scrapers,
    })
}

/// Queues a scraper run after checking the scraper exists.
pub async fn run_scraper<R>(
    backend: &R,
    session: &SessionContext,
    form: ScraperRunForm,
) -> ServiceResult<ScraperRunAccepted>
where
    R: ScraperReader + ScraperWriter + ?Sized,
{
    let available: Vec<String> = or_default(backend.available_scrapers(session).await, "scrapers")?
        .into_iter()
        .map(|scraper| scraper.name)
        .collect();
    let run = form.into_run(&available)?;
    let accepted = backend.run_scraper(session, &run).await?;
    log::info!("Scraper {} queued as job {}", run.scraper, accepted.job_id);
    Ok(accepted)
}
