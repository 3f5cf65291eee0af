//! Route definitions

use super::handlers::{ai, artisans, chat, products, system};
use super::rate_limit;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Multipart framing allowance on top of the image size limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let settings = state.settings.clone();
    let server = &settings.server;
    let upload_limit = settings.ai.max_upload_bytes + MULTIPART_OVERHEAD;

    let api = Router::new()
        .nest("/products", product_routes())
        .nest("/artisans", artisan_routes())
        .nest("/chat", chat_routes())
        .nest(
            "/ai",
            ai_routes().layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/health", get(system::health));

    let mut app = Router::new()
        .nest("/api", api)
        .fallback(system::not_found);

    if let Some(limit) = state.rate_limit.clone() {
        app = app.layer(middleware::from_fn_with_state(limit, rate_limit::enforce));
    }

    app.layer(DefaultBodyLimit::max(server.body_limit))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(cors_layer(&server.frontend_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/search", post(products::search))
        .route("/artisan/:artisan_id", get(products::by_artisan))
        .route("/category/:category", get(products::by_category))
        .route(
            "/:id",
            get(products::get_one)
                .put(products::update)
                .delete(products::delete),
        )
}

fn artisan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(artisans::list).post(artisans::create))
        .route("/search", post(artisans::search))
        .route(
            "/:id",
            get(artisans::get_one)
                .put(artisans::update)
                .delete(artisans::delete),
        )
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/message", post(chat::message))
        .route("/history/:session_id", get(chat::history))
        .route("/session/:session_id", delete(chat::clear_session))
        .route("/voice-to-text", post(chat::voice_to_text))
}

fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze-image", post(ai::analyze_image))
        .route("/generate-description", post(ai::generate_description))
        .route("/suggest-tags", post(ai::suggest_tags))
        .route("/enhance-search", post(ai::enhance_search))
        .route(
            "/personalize-recommendations",
            post(ai::personalize_recommendations),
        )
}

/// CORS for the storefront origin(s), with credentials.
///
/// `frontend_url` may list several origins separated by commas.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = frontend_url
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
