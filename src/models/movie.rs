use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Serialized as `YYYY-MM-DD`
    pub release_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub release_date: NaiveDate,
}

/// Partial update. Absent or empty values leave the column untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl UpdateMovie {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|s| !s.is_empty())
    }

    pub fn release_date(&self) -> Result<Option<NaiveDate>, chrono::ParseError> {
        self.release_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| NaiveDate::parse_from_str(s, RELEASE_DATE_FORMAT))
            .transpose()
    }
}
