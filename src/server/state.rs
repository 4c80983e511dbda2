//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler by
//! Axum's state extraction. Every field is cheap to clone: the database and
//! HTTP clients share their pools, and the Discord handles are reference counted.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;

use super::service::{discord::GuildActions, notification::NotificationPublisher};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Client for Discord's OAuth2 and `users/@me` endpoints. Redirects are
    /// disabled.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// The bot's REST client, shared with the gateway.
    pub discord_http: Arc<Http>,

    /// Discord side effects for services called from the web API.
    pub guild_actions: Arc<dyn GuildActions>,

    /// Publisher shared with the bot so web actions reach the log channels.
    pub notifications: NotificationPublisher,

    /// Base URL of the web application, used in links posted to Discord.
    pub app_url: String,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        discord_http: Arc<Http>,
        guild_actions: Arc<dyn GuildActions>,
        notifications: NotificationPublisher,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord_http,
            guild_actions,
            notifications,
            app_url,
        }
    }
}
