use serde::Serialize;

use crate::items::Article;
use crate::pipeline::TextFilter;

#[derive(Debug, Serialize)]
pub struct RejectedArticle {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchResponse {
    pub articles: Vec<Article>,
    pub rejected: Vec<RejectedArticle>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub text_filter: TextFilter,
}
