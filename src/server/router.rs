use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, authorization, designation, guild, infraction, promotion},
    error::{config::ConfigError, AppError},
    state::AppState,
};

/// Sustained requests per second allowed per client on the auth routes.
const AUTH_RATE_PER_SECOND: u64 = 2;
const AUTH_RATE_BURST: u32 = 10;

#[derive(OpenApi)]
#[openapi(
    info(title = "Modix API", description = "Moderation and promotion management"),
    paths(
        auth::login,
        auth::callback,
        auth::logout,
        auth::get_user,
        guild::get_guilds,
        guild::get_claims,
        guild::get_roles,
        guild::get_channels,
        guild::search_users,
        guild::get_user_info,
        infraction::get_infractions,
        infraction::create_infraction,
        infraction::rescind_infraction,
        infraction::delete_infraction,
        infraction::get_deleted_messages,
        promotion::get_campaigns,
        promotion::create_campaign,
        promotion::get_campaign,
        promotion::add_comment,
        promotion::update_comment,
        promotion::accept_campaign,
        promotion::reject_campaign,
        authorization::get_claim_mappings,
        authorization::modify_role_claims,
        authorization::modify_user_claims,
        designation::get_designated_channels,
        designation::add_designated_channel,
        designation::remove_designated_channel,
        designation::get_designated_roles,
        designation::add_designated_role,
        designation::remove_designated_role,
    )
)]
pub struct ApiDoc;

/// Builds the application router.
///
/// The auth routes are rate limited per client IP, which requires serving
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(app_url: &str) -> Result<Router<AppState>, AppError> {
    let governor_config = GovernorConfigBuilder::default()
        .per_second(AUTH_RATE_PER_SECOND)
        .burst_size(AUTH_RATE_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid rate limit configuration".to_string()))?;

    let auth_routes = Router::new()
        .route("/api/auth/login", get(auth::login))
        .route("/api/auth/callback", get(auth::callback))
        .route("/api/auth/logout", get(auth::logout))
        .route("/api/auth/user", get(auth::get_user))
        .layer(GovernorLayer::new(Arc::new(governor_config)));

    let guild_routes = Router::new()
        .route("/api/guilds", get(guild::get_guilds))
        .route("/api/guilds/{guild_id}/claims", get(guild::get_claims))
        .route("/api/guilds/{guild_id}/roles", get(guild::get_roles))
        .route("/api/guilds/{guild_id}/channels", get(guild::get_channels))
        .route("/api/guilds/{guild_id}/users", get(guild::search_users))
        .route(
            "/api/guilds/{guild_id}/users/{user_id}",
            get(guild::get_user_info),
        );

    let moderation_routes = Router::new()
        .route(
            "/api/guilds/{guild_id}/infractions",
            get(infraction::get_infractions).post(infraction::create_infraction),
        )
        .route(
            "/api/guilds/{guild_id}/infractions/{infraction_id}",
            delete(infraction::delete_infraction),
        )
        .route(
            "/api/guilds/{guild_id}/infractions/{infraction_id}/rescind",
            post(infraction::rescind_infraction),
        )
        .route(
            "/api/guilds/{guild_id}/deleted-messages",
            get(infraction::get_deleted_messages),
        );

    let promotion_routes = Router::new()
        .route(
            "/api/guilds/{guild_id}/campaigns",
            get(promotion::get_campaigns).post(promotion::create_campaign),
        )
        .route(
            "/api/guilds/{guild_id}/campaigns/{campaign_id}",
            get(promotion::get_campaign),
        )
        .route(
            "/api/guilds/{guild_id}/campaigns/{campaign_id}/comments",
            post(promotion::add_comment),
        )
        .route(
            "/api/guilds/{guild_id}/campaigns/{campaign_id}/accept",
            post(promotion::accept_campaign),
        )
        .route(
            "/api/guilds/{guild_id}/campaigns/{campaign_id}/reject",
            post(promotion::reject_campaign),
        )
        .route(
            "/api/guilds/{guild_id}/comments/{comment_id}",
            put(promotion::update_comment),
        );

    let configuration_routes = Router::new()
        .route(
            "/api/guilds/{guild_id}/claim-mappings",
            get(authorization::get_claim_mappings),
        )
        .route(
            "/api/guilds/{guild_id}/claim-mappings/roles/{role_id}",
            put(authorization::modify_role_claims),
        )
        .route(
            "/api/guilds/{guild_id}/claim-mappings/users/{user_id}",
            put(authorization::modify_user_claims),
        )
        .route(
            "/api/guilds/{guild_id}/designated-channels",
            get(designation::get_designated_channels).post(designation::add_designated_channel),
        )
        .route(
            "/api/guilds/{guild_id}/designated-channels/{designation_id}",
            delete(designation::remove_designated_channel),
        )
        .route(
            "/api/guilds/{guild_id}/designated-roles",
            get(designation::get_designated_roles).post(designation::add_designated_role),
        )
        .route(
            "/api/guilds/{guild_id}/designated-roles/{designation_id}",
            delete(designation::remove_designated_role),
        );

    Ok(Router::new()
        .merge(auth_routes)
        .merge(guild_routes)
        .merge(moderation_routes)
        .merge(promotion_routes)
        .merge(configuration_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(app_url)?))
}

/// CORS for the frontend origin, with cookies allowed.
fn cors_layer(app_url: &str) -> Result<CorsLayer, AppError> {
    let origin = HeaderValue::from_str(app_url.trim_end_matches('/')).map_err(|e| {
        ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
