use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::items::{Article, RawArticle};

const LAST_EDITED_PREFIX: &str = "This page was last edited on";
const LAST_EDITED_FORMAT: &str = "%d %B %Y, at %H:%M.";

// chrono alone accepts short years, abbreviated months and missing separators,
// so the shape is checked before the values are parsed.
static LAST_EDITED_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d{1,2}\s+(?i:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{4},\s+at\s+\d{1,2}:\d{1,2}\.$",
    )
    .expect("Failed to compile last edited pattern")
});

// Same set as ASCII whitespace plus vertical tab, independent of locale.
const WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\x0B', '\x0C'];

/// Which text fragments get dropped before the fragments are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextFilter {
    /// Drop fragments that are exactly one whitespace character.
    #[default]
    SingleWhitespace,
    /// Drop any non-empty fragment made only of whitespace.
    WhitespaceOnly,
}

impl TextFilter {
    pub fn drops(self, fragment: &str) -> bool {
        match self {
            TextFilter::SingleWhitespace => {
                let mut chars = fragment.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if is_whitespace(c))
            }
            TextFilter::WhitespaceOnly => {
                !fragment.is_empty() && fragment.chars().all(is_whitespace)
            }
        }
    }
}

impl std::str::FromStr for TextFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "single-whitespace" => Ok(TextFilter::SingleWhitespace),
            "whitespace-only" => Ok(TextFilter::WhitespaceOnly),
            other => Err(AppError::ConfigError(format!("Unknown text filter: {}", other))),
        }
    }
}

fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(&c)
}

/// Strips the "last edited" banner and parses what is left,
/// e.g. `This page was last edited on 5 March 2023, at 13:47.`
pub fn clean_last_updated(raw: &str) -> Result<NaiveDateTime> {
    let cleaned = raw.replace(LAST_EDITED_PREFIX, "");
    let cleaned = cleaned.trim();

    if !LAST_EDITED_SHAPE.is_match(cleaned) {
        return Err(AppError::ParseError(format!(
            "{:?}: does not match \"{}\"",
            cleaned, LAST_EDITED_FORMAT
        )));
    }

    NaiveDateTime::parse_from_str(cleaned, LAST_EDITED_FORMAT)
        .map_err(|e| AppError::ParseError(format!("{:?}: {}", cleaned, e)))
}

pub fn join_text(fragments: &[String], filter: TextFilter) -> String {
    let mut result = String::with_capacity(fragments.iter().map(String::len).sum());

    for fragment in fragments.iter().filter(|f| !filter.drops(f)) {
        result.push_str(fragment);
    }

    result
}

/// Cleans one scraped record. The raw record is consumed, so it cannot be
/// sent through the pipeline a second time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticlePipeline {
    pub text_filter: TextFilter,
}

impl ArticlePipeline {
    pub fn new(text_filter: TextFilter) -> Self {
        Self { text_filter }
    }

    pub fn process_item(&self, raw: RawArticle) -> Result<Article> {
        let last_updated = clean_last_updated(&raw.last_updated).inspect_err(|e| {
            warn!(url = %raw.url, error = %e, "dropping article with unparseable date");
        })?;
        let text = join_text(&raw.text, self.text_filter);

        debug!(url = %raw.url, text_len = text.len(), %last_updated, "article normalized");

        Ok(Article {
            url: raw.url,
            title: raw.title,
            text,
            last_updated,
        })
    }
}

pub fn normalize(raw: RawArticle) -> Result<Article> {
    ArticlePipeline::default().process_item(raw)
}
