pub mod llm_service;
pub mod quiz_service;
pub mod scoring_service;
pub mod scraper_service;
pub mod store_service;
pub mod synthesis_service;
