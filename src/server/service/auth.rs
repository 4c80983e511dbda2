use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::all::User;
use url::Url;

use crate::server::{
    data::discord::DiscordUserRepository,
    error::{auth::AuthError, AppError},
    model::discord::DiscordUser,
    state::OAuth2Client,
};

const DISCORD_CURRENT_USER_URL: &str = "https://discord.com/api/users/@me";

/// Service for the Discord OAuth2 login flow.
///
/// Guild membership and roles come from the bot's mirror, so logging in only
/// needs the user's identity.
pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
        }
    }

    /// Generates a Discord OAuth2 login URL with CSRF protection.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - The authorization URL and the state token to keep in
    ///   the session for the callback
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("guilds".to_string()))
            .url()
    }

    /// Exchanges the authorization code and mirrors the logged in user.
    ///
    /// # Returns
    /// - `Ok(DiscordUser)` - The authenticated user
    /// - `Err(AuthError::TokenExchange)` - Discord rejected the code
    /// - `Err(AppError::ReqwestErr)` - Fetching the user profile failed
    pub async fn callback(&self, authorization_code: String) -> Result<DiscordUser, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let user = self.fetch_discord_user(&token).await?;
        let user = DiscordUserRepository::new(self.db).upsert(&user).await?;

        tracing::info!("User {} ({}) logged in", user.username, user.discord_id);

        Ok(user)
    }

    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<User, AppError> {
        let user = self
            .http_client
            .get(DISCORD_CURRENT_USER_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<User>()
            .await?;

        Ok(user)
    }
}
