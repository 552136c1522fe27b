use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::auth::auth_middleware;
use crate::config::Config;
use crate::db::ContentRepo;
use crate::handlers::{auth as auth_handlers, content as content_handlers};

#[derive(Clone)]
pub struct AppState {
    pub repo: ContentRepo,
    pub config: Config,
}

pub fn create_router(repo: ContentRepo, config: Config) -> Router {
    let state = AppState { repo, config };

    let auth_routes = Router::new().route("/login", post(auth_handlers::login));

    // Reads are public: the marketing site renders from them. The auth
    // layer wraps only the writes registered before it.
    let content_routes = Router::new()
        .route("/", get(content_handlers::list_content))
        .route(
            "/:domain",
            put(content_handlers::put_content)
                .delete(content_handlers::delete_content)
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                ))
                .get(content_handlers::get_content),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/content", content_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
