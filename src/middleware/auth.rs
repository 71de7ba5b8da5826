use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::ApiError;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";

/// Guard for place routes in the authenticated variant.
///
/// Anonymous callers are sent to the login page with a 303 and never reach
/// the handler. Otherwise the caller's [`Identity`] goes into the request
/// extensions for [`Owner`] to pick up.
pub async fn require_identity(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    match state.gate.current_identity(&session).await {
        Ok(Some(identity)) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!(path = %request.uri().path(), "anonymous request redirected to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Owner scope for the current request; `None` when auth is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Option<Uuid>);

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Owner(parts.extensions.get::<Identity>().map(|i| i.user_id)))
    }
}
