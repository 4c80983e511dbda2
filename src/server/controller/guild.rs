use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        authorization::ClaimDto,
        discord::{DiscordChannelDto, DiscordGuildDto, DiscordRoleDto, GuildMemberDto},
        user::UserInfoDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            discord::{DiscordGuildChannelService, DiscordGuildRoleService, DiscordGuildService},
            user::UserService,
        },
        state::AppState,
    },
};

/// Tag for grouping guild endpoints in OpenAPI documentation
pub static GUILD_TAG: &str = "guild";

#[derive(Deserialize, IntoParams)]
pub struct UserSearchParam {
    /// Part of a username, global name or nickname.
    #[serde(default)]
    pub query: String,
}

/// Get the guilds the logged in user is a member of.
///
/// Only guilds the bot is in are returned since membership comes from the
/// bot's mirror.
#[utoipa::path(
    get,
    path = "/api/guilds",
    tag = GUILD_TAG,
    responses(
        (status = 200, description = "Guilds shared with the bot", body = Vec<DiscordGuildDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_guilds(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require_user().await?;

    let guilds = DiscordGuildService::new(&state.db)
        .get_guilds_for_user(user.discord_id)
        .await?;

    let dtos: Vec<DiscordGuildDto> = guilds.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get the caller's claims in a guild.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/claims",
    tag = GUILD_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Claims held by the caller", body = Vec<ClaimDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_claims(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let claims: Vec<ClaimDto> = ctx
        .claims
        .iter()
        .map(|claim| ClaimDto {
            claim: *claim,
            category: claim.category(),
        })
        .collect();

    Ok((StatusCode::OK, Json(claims)))
}

/// Get the guild's roles, highest first.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/roles",
    tag = GUILD_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Guild roles", body = Vec<DiscordRoleDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let mut roles = DiscordGuildRoleService::new(&state.db)
        .get_roles(guild_id)
        .await?;
    roles.sort_by(|a, b| b.position.cmp(&a.position));

    let dtos: Vec<DiscordRoleDto> = roles.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get the guild's channels.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/channels",
    tag = GUILD_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Guild channels", body = Vec<DiscordChannelDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_channels(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let channels = DiscordGuildChannelService::new(&state.db)
        .get_channels(guild_id)
        .await?;

    let dtos: Vec<DiscordChannelDto> = channels.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Search current members of the guild by name.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/users",
    tag = GUILD_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        UserSearchParam
    ),
    responses(
        (status = 200, description = "Matching members", body = Vec<GuildMemberDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the guild", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_users(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(params): Query<UserSearchParam>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let members = UserService::new(&state.db)
        .search_users(&ctx, &params.query, None)
        .await?;

    let dtos: Vec<GuildMemberDto> = members
        .into_iter()
        .map(|(user, member)| GuildMemberDto {
            user_id: user.discord_id,
            username: user.username,
            global_name: user.global_name,
            nickname: member.nickname,
        })
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get what is known about a user in the guild.
///
/// Infraction counts are only included for callers holding `ModerationRead`.
///
/// # Returns
/// - `200 OK` - Profile, membership, roles and message activity
/// - `404 Not Found` - The bot has never seen the user
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/users/{user_id}",
    tag = GUILD_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("user_id" = String, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "User information", body = UserInfoDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the guild", body = ErrorDto),
        (status = 404, description = "Unknown user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_info(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let info = UserService::new(&state.db)
        .get_user_info(&ctx, user_id)
        .await?;

    Ok((StatusCode::OK, Json(info.into_dto())))
}
