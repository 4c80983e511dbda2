use axum::http::StatusCode;
use thiserror::Error;

use crate::model::authorization::AuthorizationClaim;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state in the OAuth callback does not match the one in the session.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// Authorization code exchange with Discord failed.
    #[error("Failed to exchange OAuth2 code: {0}")]
    TokenExchange(String),

    /// No user id stored in the session.
    #[error("User not found in session")]
    UserNotInSession,

    /// Session references a user that is no longer mirrored.
    #[error("User {0} not found in database")]
    UserNotInDatabase(u64),

    /// Caller is not a current member of the guild.
    #[error("User {user_id} is not a member of guild {guild_id}")]
    NotGuildMember { guild_id: u64, user_id: u64 },

    /// Caller lacks one or more claims required by the operation.
    #[error("Missing required claims: {}", format_claims(.0))]
    MissingClaims(Vec<AuthorizationClaim>),
}

fn format_claims(claims: &[AuthorizationClaim]) -> String {
    claims
        .iter()
        .map(|claim| claim.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AuthError {
    /// Status code and client-facing message.
    ///
    /// - `CsrfValidationFailed` / `TokenExchange` → 400 with a retry hint
    /// - `UserNotInSession` / `UserNotInDatabase` → 401
    /// - `NotGuildMember` / `MissingClaims` → 403
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::CsrfValidationFailed | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.".to_string(),
            ),
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not logged in".to_string())
            }
            Self::NotGuildMember { .. } => (
                StatusCode::FORBIDDEN,
                "You are not a member of this guild".to_string(),
            ),
            Self::MissingClaims(_) => (StatusCode::FORBIDDEN, self.to_string()),
        }
    }
}
