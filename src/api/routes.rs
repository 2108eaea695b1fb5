use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State, rejection::JsonRejection},
};
use tower_http::cors::{CorsLayer, Any};
use tracing::{info, warn};

use crate::AppState;
use crate::api::models::{BatchResponse, HealthResponse, RejectedArticle};
use crate::api::response::{self, Envelope};
use crate::error::{AppError, Result};
use crate::items::{Article, RawArticle};
use crate::pipeline::ArticlePipeline;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/articles/normalize", post(normalize_handler))
        .route("/api/articles/normalize/batch", post(batch_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        text_filter: state.config.text_filter,
    })
}

async fn normalize_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RawArticle>, JsonRejection>,
) -> Envelope<Article> {
    let result = read_payload(payload).and_then(|raw| {
        info!(url = %raw.url, "normalizing article");
        state.pipeline.process_item(raw)
    });

    response::from_result(result)
}

async fn batch_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Vec<RawArticle>>, JsonRejection>,
) -> Envelope<BatchResponse> {
    let result = read_payload(payload).map(|raws| normalize_batch(&state.pipeline, raws));

    response::from_result(result)
}

fn read_payload<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

/// Runs every record through the pipeline once. Records that fail are left
/// out of `articles` and reported in `rejected` instead.
pub fn normalize_batch(pipeline: &ArticlePipeline, raws: Vec<RawArticle>) -> BatchResponse {
    let total = raws.len();
    let mut batch = BatchResponse::default();

    for raw in raws {
        let url = raw.url.clone();
        match pipeline.process_item(raw) {
            Ok(article) => batch.articles.push(article),
            Err(err) => batch.rejected.push(RejectedArticle {
                url,
                error: err.to_string(),
            }),
        }
    }

    if batch.rejected.is_empty() {
        info!(total, "batch normalized");
    } else {
        warn!(total, rejected = batch.rejected.len(), "batch normalized with rejections");
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use axum::http::StatusCode;
    use crate::config::Config;
    use crate::pipeline::TextFilter;

    fn state() -> AppState {
        let config = Config::from_lookup(|_| None).unwrap();
        AppState::new(Arc::new(config))
    }

    fn raw(url: &str, last_updated: &str) -> RawArticle {
        RawArticle::new(
            url,
            "Title",
            vec!["Hello".to_string(), " ".to_string(), "world".to_string()],
            last_updated,
        )
    }

    #[tokio::test]
    async fn health_handler_reports_text_filter() {
        let Json(body) = health_handler(State(state())).await;
        assert_eq!(body.status, "ok");
        assert_eq!(serde_json::to_value(&body).unwrap()["text_filter"], "single-whitespace");
    }

    #[tokio::test]
    async fn normalize_handler_returns_clean_article() {
        let (status, Json(body)) = normalize_handler(
            State(state()),
            Ok(Json(raw("https://en.wikipedia.org/wiki/A", "This page was last edited on 5 March 2023, at 13:47."))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let article = body.data.unwrap();
        assert_eq!(article.text, "Helloworld");
        assert_eq!(article.last_updated.to_string(), "2023-03-05 13:47:00");
    }

    #[tokio::test]
    async fn normalize_handler_reports_parse_error() {
        let (status, Json(body)) = normalize_handler(
            State(state()),
            Ok(Json(raw("https://en.wikipedia.org/wiki/B", "edited recently"))),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.data.is_none());
        assert!(body.meta.message.unwrap().contains("edited recently"));
    }

    #[tokio::test]
    async fn batch_handler_drops_and_reports_failures() {
        let raws = vec![
            raw("https://en.wikipedia.org/wiki/A", "5 March 2023, at 13:47."),
            raw("https://en.wikipedia.org/wiki/B", "yesterday"),
            raw("https://en.wikipedia.org/wiki/C", "This page was last edited on 1 April 2021, at 08:00."),
        ];

        let (status, Json(body)) = batch_handler(State(state()), Ok(Json(raws))).await;

        assert_eq!(status, StatusCode::OK);
        let batch = body.data.unwrap();
        let urls: Vec<_> = batch.articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, ["https://en.wikipedia.org/wiki/A", "https://en.wikipedia.org/wiki/C"]);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].url, "https://en.wikipedia.org/wiki/B");
    }

    #[test]
    fn batch_uses_configured_filter() {
        let pipeline = ArticlePipeline::new(TextFilter::WhitespaceOnly);
        let mut article = raw("u", "5 March 2023, at 13:47.");
        article.text.push("  ".to_string());

        let batch = normalize_batch(&pipeline, vec![article]);
        assert_eq!(batch.articles[0].text, "Helloworld");
    }

    #[test]
    fn empty_batch_is_empty() {
        let batch = normalize_batch(&ArticlePipeline::default(), Vec::new());
        assert!(batch.articles.is_empty());
        assert!(batch.rejected.is_empty());
    }
}
