//! Axum router configuration with middleware.
//!
//! All REST routes are under `/api/v1/`; the two WebSocket endpoints
//! live at `/ws/chat` and `/ws/admin`.
//! Middleware: CORS, tracing.
//!
//! In production, the built marketing site is served from the configured
//! web directory. API routes take priority; unknown paths fall through
//! to the site's `index.html` for client-side routing. If the directory
//! does not exist, only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Booking
        .route("/slots", get(handlers::slots::get_slots))
        .route("/appointments", post(handlers::appointment::create_appointment))
        // Contact form
        .route("/contact", post(handlers::contact::submit_contact))
        // Admin console
        .route("/admin/login", post(handlers::admin::login))
        .route("/admin/dashboard", get(handlers::admin::dashboard));

    let web_dir = state.config.server.web_dir.clone();

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/ws/chat", get(handlers::chat_ws::ws_handler))
        .route("/ws/admin", get(handlers::admin_ws::ws_handler))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the built marketing site from disk if the directory exists.
    // API routes, WebSockets, and /health take priority; unknown paths
    // fall through to index.html for client-side routing.
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "static site serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
