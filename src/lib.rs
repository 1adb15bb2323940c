pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {crate::config::IngestConfig, crate::domain::quote::QuoteProvider, std::sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub quotes: Arc<dyn QuoteProvider>,
    pub config: Arc<IngestConfig>,
}
