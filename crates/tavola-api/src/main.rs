use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tavola_api::{
    config::Config,
    middleware::logging,
    routes::{health, query, threads},
    state::AppState,
};
use tavola_engine::{Engine, EngineConfig};
use tavola_providers::{
    CollectionStore, CompletionClient, HttpCollectionClient, HttpCompletionClient,
    HttpSearchClient, RestaurantSearch,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Tavola API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize collaborator clients
    tracing::info!("Initializing collaborator clients");
    let search: Arc<dyn RestaurantSearch> =
        Arc::new(HttpSearchClient::new(&config.search.base_url)?);
    let collections: Arc<dyn CollectionStore> =
        Arc::new(HttpCollectionClient::new(&config.search.collections_base_url)?);
    let completion: Arc<dyn CompletionClient> = Arc::new(HttpCompletionClient::new(
        config.openai_api_key.clone(),
        config.llm.model.clone(),
    )?);

    // Build engine
    let engine = Engine::builder()
        .search(search)
        .collections(collections)
        .completion(completion)
        .config(EngineConfig {
            history_window: config.llm.history_window,
            completion_timeout: Duration::from_secs(config.llm.completion_timeout_secs),
            default_location: config.search.default_location.clone(),
        })
        .build()?;

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), engine));

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Turn processing
        .route("/query", post(query::query))
        // Threads
        .route("/threads/:thread_id", get(threads::get_thread))
        .route("/threads/:thread_id", delete(threads::clear_thread))
        .route("/threads/:thread_id/messages", get(threads::list_messages));

    Router::new()
        .nest("/", api_routes)
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            for origin in &config.cors.origins {
                if let Ok(parsed_origin) = origin.parse::<axum::http::HeaderValue>() {
                    cors = cors.allow_origin(parsed_origin);
                }
            }
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
