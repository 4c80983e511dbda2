use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::authorization::AuthorizationClaim,
    server::{
        data::discord::DiscordUserRepository,
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        model::{authorization::AuthContext, discord::DiscordUser},
        service::authorization::AuthorizationService,
    },
};

/// Resolves the caller of a web request.
///
/// Controllers create a guard per request and call `require_user` for
/// guild-independent endpoints or `require_guild` for everything scoped to a
/// guild. Claim checks stay in the services so bot commands and the web API
/// share them.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Returns the logged in user.
    ///
    /// # Returns
    /// - `Ok(DiscordUser)` - The user stored in the session
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - The session points to an unknown user
    pub async fn require_user(&self) -> Result<DiscordUser, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = DiscordUserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        Ok(user)
    }

    /// Returns the authorization context of the logged in user within a guild.
    ///
    /// # Returns
    /// - `Ok(AuthContext)` - The caller is a current member of the guild
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::NotGuildMember)` - The caller is not in the guild
    pub async fn require_guild(&self, guild_id: u64) -> Result<AuthContext, AppError> {
        let user = self.require_user().await?;

        AuthorizationService::new(self.db)
            .build_context(guild_id, user.discord_id)
            .await
    }

    /// Same as `require_guild` but also checks the given claims up front.
    pub async fn require_claims(
        &self,
        guild_id: u64,
        claims: &[AuthorizationClaim],
    ) -> Result<AuthContext, AppError> {
        let ctx = self.require_guild(guild_id).await?;
        ctx.require_claims(claims)?;

        Ok(ctx)
    }
}
