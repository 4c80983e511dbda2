//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error type. It wraps the domain-specific errors,
//! implements `IntoResponse` for the web API and renders a user-facing message
//! for bot command replies.

pub mod auth;
pub mod config;
pub mod internal;
pub mod moderation;
pub mod promotion;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError,
        moderation::ModerationError, promotion::PromotionError,
    },
};

/// Top-level application error type.
///
/// Domain errors (`AuthError`, `ModerationError`, `PromotionError`) carry their
/// own status code mapping. Infrastructure errors always map to 500 with the
/// details logged server-side and a generic message returned to the client.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Infraction or message moderation rule violated.
    #[error(transparent)]
    ModerationErr(#[from] ModerationError),

    /// Promotion campaign rule violated.
    #[error(transparent)]
    PromotionErr(#[from] PromotionError),

    /// Unexpected internal state, usually bad data in the datastore.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity, boxed due to its size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Malformed URL in configuration.
    #[error(transparent)]
    UrlErr(#[from] url::ParseError),

    /// I/O error, e.g. failing to bind the listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found, results in 404.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request, results in 400.
    #[error("{0}")]
    BadRequest(String),

    /// Caller lacks the right to perform the operation, results in 403.
    #[error("{0}")]
    Forbidden(String),

    /// Operation conflicts with the current state, results in 409.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with a message for server-side logging only.
    #[error("{0}")]
    InternalError(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Status code and client-facing message for the error.
    ///
    /// Internal errors are reduced to a generic message so details never leak.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::AuthErr(err) => err.status_and_message(),
            Self::ModerationErr(err) => (err.status(), err.to_string()),
            Self::PromotionErr(err) => (err.status(), err.to_string()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }

    /// Message shown to a Discord user when a command fails.
    pub fn user_message(&self) -> String {
        let (status, message) = self.status_and_message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Something went wrong while running that command.".to_string()
        } else {
            message
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures
/// - 401 Unauthorized - No user in session
/// - 403 Forbidden - Missing claims or outranked
/// - 404 Not Found - Unknown resources
/// - 409 Conflict - Operation conflicts with current state
/// - 500 Internal Server Error - Everything else, logged with full details
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return InternalServerError(self).into_response();
        }

        tracing::debug!("Request failed with {}: {}", status, self);

        (status, Json(ErrorDto { error: message })).into_response()
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the error and returns a generic message to avoid leaking details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
