use serde::{Deserialize, Serialize};

use crate::domain::scrape_job::ScrapeJob;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScraperStats {
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub completed_jobs: u64,
    #[serde(default)]
    pub failed_jobs: u64,
    #[serde(default)]
    pub latest_job: Option<ScrapeJob>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceCount {
    pub source: String,
    pub count: u64,
}

/// Headline numbers for the dashboard.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_cases: u64,
    #[serde(default)]
    pub recent_cases_30d: u64,
    #[serde(default)]
    pub total_courts: u64,
    #[serde(default)]
    pub scraper: ScraperStats,
    #[serde(default)]
    pub cases_by_source: Vec<SourceCount>,
}

/// Case counts per court broken down by status.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CourtAnalytics {
    pub name: String,
    #[serde(default)]
    pub total_cases: u64,
    #[serde(default)]
    pub decided: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub adjourned: u64,
    #[serde(default)]
    pub disposed: u64,
}

/// Cases decided in one month of the selected year.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TimelinePoint {
    pub month: String,
    #[serde(default)]
    pub count: u64,
}
