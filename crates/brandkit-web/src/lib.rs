//! Brandkit Web Server
//!
//! Axum-based JSON API over the generation pipeline and the design system store.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use brandkit_core::BrandkitConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiQuery, UserId, USER_ID_HEADER};
pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Generation
        .route("/generate", post(routes::generate::generate))
        .route("/palette", post(routes::generate::palette))
        .route("/typography", post(routes::generate::typography))
        .route("/components", post(routes::generate::components))
        .route("/accessibility", post(routes::generate::accessibility))
        // Saved design systems
        .route(
            "/design-systems",
            get(routes::design_systems::list_design_systems).post(routes::design_systems::create_design_system),
        )
        .route(
            "/design-systems/{id}",
            get(routes::design_systems::get_design_system).delete(routes::design_systems::delete_design_system),
        )
        .route("/design-systems/{id}/export", get(routes::design_systems::export))
        // Admin
        .route("/admin/metrics", get(routes::admin::metrics))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(from_fn_with_state(state.clone(), middleware::record_performance))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(config: BrandkitConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
