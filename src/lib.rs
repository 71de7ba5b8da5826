pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get},
    Router,
};
use time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

use crate::auth::session_key;
use crate::state::AppState;

/// Build the full router.
///
/// `store` holds server-side session records; the caller picks the backend.
pub fn app<S>(state: AppState, store: S) -> Router
where
    S: SessionStore + Clone,
{
    let config = state.config.clone();

    let mut router = Router::new()
        .route("/", get(handlers::home_page))
        .route("/health", get(handlers::health))
        .merge(place_routes(&state));

    if config.auth.enabled {
        router = router.merge(auth_routes());
    }

    let sessions = SessionManagerLayer::new(store)
        .with_secure(config.auth.secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(config.auth.session_expiry_hours)))
        .with_signed(session_key(&config.auth.session_secret));

    let mut router = router
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(sessions);

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Place API and place pages. Guarded when the authenticated variant is on.
fn place_routes(state: &AppState) -> Router<AppState> {
    use handlers::protected::places;
    use handlers::public::pages;

    let router = Router::new()
        .route("/getplaces", get(places::get_places))
        .route("/getplace/{id}", get(places::get_place))
        .route("/addplace", get(pages::add_place_page).post(places::add_place))
        .route("/editplace/{id}", get(pages::edit_place_page).patch(places::edit_place))
        .route("/viewplace/{id}", get(pages::view_place_page))
        .route("/deleteplace/{id}", delete(places::delete_place));

    if state.auth_enabled() {
        router.route_layer(from_fn_with_state(state.clone(), middleware::require_identity))
    } else {
        router
    }
}

fn auth_routes() -> Router<AppState> {
    use handlers::public::{auth, pages};

    Router::new()
        .route("/signup", get(pages::signup_page).post(auth::signup_post))
        .route("/login", get(pages::login_page).post(auth::login_post))
        .route("/logout", get(auth::logout))
}
