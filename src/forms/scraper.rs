use serde::Deserialize;
use validator::Validate;

use crate::domain::scrape_job::ScraperRun;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Manual scraper run.
pub struct ScraperRunForm {
    #[validate(length(min = 1))]
    pub scraper: String,
    #[validate(range(min = 1, max = 50))]
    pub max_pages: u32,
}

impl ScraperRunForm {
    /// Validates the form against the scrapers the backend offers.
    pub fn into_run(self, available: &[String]) -> Result<ScraperRun, FormError> {
        self.validate()?;
        let scraper = self.scraper.trim().to_string();
        if !available.is_empty() && !available.contains(&scraper) {
            return Err(FormError::InvalidScraper);
        }
        Ok(ScraperRun {
            scraper,
            max_pages: self.max_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_limit_is_enforced() {
        let form = ScraperRunForm {
            scraper: "supreme_court".into(),
            max_pages: 51,
        };
        assert!(matches!(form.into_run(&[]), Err(FormError::Validation(_))));
    }

    #[test]
    fn unknown_scraper_is_rejected() {
        let form = ScraperRunForm {
            scraper: "moon_court".into(),
            max_pages: 5,
        };
        let available = vec!["supreme_court".to_string()];
        assert!(matches!(form.into_run(&available), Err(FormError::InvalidScraper)));
    }
}
