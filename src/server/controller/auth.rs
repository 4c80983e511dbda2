use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, CsrfSession},
        },
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Query parameters Discord sends back to the OAuth2 callback.
#[derive(Deserialize, IntoParams)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code to exchange for an access token.
    pub code: String,
}

/// Redirect to Discord's OAuth2 consent page.
///
/// Stores a fresh CSRF state token in the session for the callback to check.
///
/// # Returns
/// - `307 Temporary Redirect` - To Discord's authorization URL
/// - `500 Internal Server Error` - Session store failure
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Redirect to Discord login"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.db, &state.http_client, &state.oauth_client);

    let (url, csrf_token) = auth_service.login_url();
    CsrfSession::new(&session)
        .set_token(csrf_token.secret().to_string())
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Complete the OAuth2 login.
///
/// Validates the CSRF state, exchanges the code, mirrors the user and stores
/// their id in the session before redirecting to the frontend.
///
/// # Returns
/// - `307 Temporary Redirect` - To the application URL, logged in
/// - `400 Bad Request` - CSRF mismatch or rejected authorization code
/// - `500 Internal Server Error` - Discord or database failure
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(CallbackParams),
    responses(
        (status = 307, description = "Logged in, redirect to the application"),
        (status = 400, description = "Login failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    validate_csrf(&session, &params.state).await?;

    let user = AuthService::new(&state.db, &state.http_client, &state.oauth_client)
        .callback(params.code)
        .await?;

    // Rotate the session id on privilege change.
    session.cycle_id().await?;
    AuthSession::new(&session)
        .set_user_id(user.discord_id)
        .await?;

    Ok(Redirect::temporary(&state.app_url))
}

/// Log out and clear the session.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Logged out, redirect to the application")
    ),
)]
pub async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    AuthSession::new(&session).clear().await;

    Redirect::temporary(&state.app_url)
}

/// Get the logged in user.
///
/// # Returns
/// - `200 OK` - The current user
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The logged in user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require_user().await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), AppError> {
    match CsrfSession::new(session).take_token().await? {
        Some(stored) if stored == csrf_state => Ok(()),
        _ => Err(AuthError::CsrfValidationFailed.into()),
    }
}
