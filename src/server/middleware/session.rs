//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but only exposes the keys
//! relevant to its concern:
//! - `AuthSession` - The logged in user's Discord id
//! - `CsrfSession` - The OAuth2 state token kept between login and callback

use tower_sessions::Session;

use crate::server::{error::AppError, util::parse::parse_u64_from_string};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the user's Discord ID in the session.
    ///
    /// Ids are stored as strings since snowflakes exceed the range some session
    /// serializers handle losslessly.
    ///
    /// # Returns
    /// - `Ok(())` - User ID successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user_id(&self, user_id: u64) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        Ok(())
    }

    /// Retrieves the user's Discord ID from the session.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user_id(&self) -> Result<Option<u64>, AppError> {
        let Some(user_id_str) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        let user_id = parse_u64_from_string(user_id_str)?;

        Ok(Some(user_id))
    }

    /// Clears all data from the session on logout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection for the OAuth2 login flow.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the state token generated alongside the login URL.
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the state token so each one is only usable once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - Token was found and removed
    /// - `Ok(None)` - No login in progress
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
