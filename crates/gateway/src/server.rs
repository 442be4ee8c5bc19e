//! Router assembly and server startup.

use std::sync::Arc;

use {
    axum::{Json, Router, response::IntoResponse, routing::get},
    taskboard_config::Config,
    taskboard_graphql::TaskboardSchema,
    taskboard_store::Store,
    tower_http::cors::{Any, CorsLayer},
    tracing::info,
};

use crate::graphql_routes::{graphiql_handler, graphql_handler};

// ── Shared app state ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub schema: TaskboardSchema,
    pub store: Arc<dyn Store>,
    pub jwt_secret: Arc<str>,
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Build the gateway router (shared between production startup and tests).
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/graphql", get(graphiql_handler).post(graphql_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is killed.
pub async fn run(config: &Config, store: Arc<dyn Store>) -> anyhow::Result<()> {
    let schema = taskboard_graphql::build_schema(Arc::clone(&store), config.jwt_secret.clone());
    let state = AppState {
        schema,
        store,
        jwt_secret: config.jwt_secret.as_str().into(),
    };
    let app = build_app(state);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("graphql endpoint ready at http://{addr}/graphql");
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ─────────────────────────────────────────────────────────────────

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
