pub mod api;
pub mod config;
pub mod error;
pub mod items;
pub mod pipeline;

use std::sync::Arc;
use config::Config;
use pipeline::ArticlePipeline;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: ArticlePipeline,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let pipeline = ArticlePipeline::new(config.text_filter);
        Self { config, pipeline }
    }
}
