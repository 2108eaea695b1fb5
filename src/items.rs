use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A scraped page as it comes out of the extraction step.
///
/// Nothing is validated here. Missing fields deserialize to empty values and
/// are only checked once the record goes through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawArticle {
    pub url: String,
    pub title: String,
    pub text: Vec<String>,
    pub last_updated: String,
}

impl RawArticle {
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        text: Vec<String>,
        last_updated: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text,
            last_updated: last_updated.into(),
        }
    }
}

/// A scraped page after normalization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub url: String,
    pub title: String,
    pub text: String,
    pub last_updated: NaiveDateTime,
}
