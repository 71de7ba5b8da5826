// handlers/public/auth.rs - signup, login and logout for the authenticated variant

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tower_sessions::Session;

use crate::auth::{AuthSession, Credentials, Identity};
use crate::database::models::SignupRequest;
use crate::error::ApiError;
use crate::middleware::auth::LOGIN_PATH;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /signup - create an account and log it in
///
/// Input: `{"email", "username", "password"}`
/// Output: 201 `{"user": {"user_id", "username"}}`, 400 on bad input,
/// 409 when the username is taken.
pub async fn signup_post(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<Identity> {
    let Json(request) = payload?;
    let signup = request.validate()?;
    let identity = state.gate.register(signup).await?;
    AuthSession::new(&session).set_user_id(identity.user_id).await?;
    Ok(ApiResponse::created("user", identity))
}

/// POST /login - verify credentials and start a session
///
/// A failed login stays anonymous and is redirected back to the login page
/// rather than answered with a JSON error.
pub async fn login_post(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(credentials) = payload?;

    match state.gate.verify(&credentials).await? {
        Some(identity) => {
            AuthSession::new(&session).set_user_id(identity.user_id).await?;
            Ok(ApiResponse::success("user", identity).into_response())
        }
        None => Ok(Redirect::to(LOGIN_PATH).into_response()),
    }
}

/// GET /logout - forget the session and go home
pub async fn logout(session: Session) -> Result<Redirect, ApiError> {
    AuthSession::new(&session).clear().await?;
    Ok(Redirect::to("/"))
}
