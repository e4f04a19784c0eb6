//! Helper functions shared by the core and the CLI

mod date;

pub use date::*;

use chrono::{DateTime, Locale, Utc};

use crate::config::SiteConfig;

/// Formatting helpers bound to a site configuration
pub struct Helpers {
    config: SiteConfig,
    locale: Locale,
}

impl Helpers {
    /// Create a new helpers instance
    pub fn new(config: SiteConfig) -> Self {
        let locale = parse_locale(&config.language);
        Self { config, locale }
    }

    /// Format a date with the configured `date_format` and `language`
    pub fn date(&self, date: &DateTime<Utc>) -> String {
        format_date_localized(date, &self.config.date_format, self.locale)
    }

    /// Format an optional date, falling back to a draft marker
    pub fn publication_date(&self, date: Option<&DateTime<Utc>>) -> String {
        date.map(|d| self.date(d))
            .unwrap_or_else(|| "unpublished".to_string())
    }

    /// Read time label, e.g. `4 min`
    pub fn read_time(&self, minutes: u32) -> String {
        format!("{} min", minutes)
    }
}
