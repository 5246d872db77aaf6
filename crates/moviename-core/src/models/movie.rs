use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Movie identified by the remote analysis backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieMatch {
    pub poster_url: String,
    pub title: String,
    pub release_date: String,
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
}

impl MovieMatch {
    /// Year of `release_date` (`YYYY-MM-DD`, or a bare `YYYY`).
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|d| d.year())
            .ok()
            .or_else(|| date.get(..4).and_then(|y| y.parse().ok()))
    }

    /// Rating with one decimal, e.g. `8.4`. `None` when the backend has none.
    pub fn rating_label(&self) -> Option<String> {
        self.vote_average.map(|v| format!("{:.1}", v))
    }
}
