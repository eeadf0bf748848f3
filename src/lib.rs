pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::error::Result;
use crate::services::{
    llm_service::GeminiClient, quiz_service::QuizService, scraper_service::WikipediaScraper,
    store_service::QuizStore, synthesis_service::SynthesisService,
};
use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Result<Self> {
        let config = crate::config::get_config();
        let http_client = Client::builder().build()?;

        let llm = GeminiClient::new(
            config.gemini_api_key.clone(),
            config.llm_model.clone(),
            Duration::from_secs(config.llm_timeout_secs),
            http_client,
        );
        let scraper = WikipediaScraper::new(Duration::from_secs(config.scrape_timeout_secs))?;
        let store = QuizStore::new(pool);

        let quiz_service = QuizService::new(
            Arc::new(store),
            Arc::new(scraper),
            SynthesisService::new(Arc::new(llm)),
        );

        Ok(Self::with_service(quiz_service))
    }

    pub fn with_service(quiz_service: QuizService) -> Self {
        Self { quiz_service }
    }
}
