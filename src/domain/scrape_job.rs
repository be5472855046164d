use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScrapeLog {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub message: String,
    #[serde(default)]
    pub level: String,
}

/// One run of a backend scraper.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScrapeJob {
    pub id: String,
    pub source: String,
    pub status: String,
    #[serde(default)]
    pub pages_scraped: u64,
    #[serde(default)]
    pub cases_found: u64,
    #[serde(default)]
    pub cases_new: u64,
    #[serde(default)]
    pub cases_updated: u64,
    #[serde(default)]
    pub errors_count: u64,
    #[serde(default)]
    pub logs: Vec<ScrapeLog>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Scraper the backend can run on demand.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScraperInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Manual run request.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ScraperRun {
    pub scraper: String,
    pub max_pages: u32,
}

/// Acknowledgement for a queued scraper run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ScraperRunAccepted {
    #[serde(default)]
    pub message: String,
    pub job_id: String,
}
