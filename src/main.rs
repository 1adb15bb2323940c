use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::Method,
        routing::{get, post},
    },
    order_sync::{AppState, adapters::melhor_envio, config::IngestConfig},
    sqlx::postgres::PgPoolOptions,
    std::{env, sync::Arc, time::Duration},
    tokio::signal,
    tower_http::cors::{Any, CorsLayer},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let quote_token = env::var("MELHOR_ENVIO_TOKEN").expect("MELHOR_ENVIO_TOKEN must be set");
    let quote_url = env::var("MELHOR_ENVIO_URL")
        .unwrap_or_else(|_| melhor_envio::DEFAULT_BASE_URL.to_string());
    let config = IngestConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        pool,
        quotes: Arc::new(melhor_envio::MelhorEnvioClient::new(quote_url, quote_token)),
        config: Arc::new(config),
    };

    // Webhook senders preflight with OPTIONS from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/webhook/order",
            post(order_sync::adapters::yampi::webhook::order_handler),
        )
        .route(
            "/webhook/cart",
            post(order_sync::adapters::yampi::webhook::cart_handler),
        )
        .route(
            "/webhook/pix",
            post(order_sync::adapters::yampi::webhook::pix_handler),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(256 * 1024)) // webhook payloads are small
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    tracing::info!("listening on 0.0.0.0:3000");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
