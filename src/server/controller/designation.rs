use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        designation::{
            CreateDesignatedChannelDto, CreateDesignatedRoleDto, DesignatedChannelDto,
            DesignatedRoleDto,
        },
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::designation::DesignationService,
        state::AppState,
    },
};

/// Tag for grouping designation endpoints in OpenAPI documentation
pub static DESIGNATION_TAG: &str = "designation";

/// Get the guild's designated channels.
///
/// # Access Control
/// - `DesignatedChannelMappingRead`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/designated-channels",
    tag = DESIGNATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Designated channels", body = Vec<DesignatedChannelDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_designated_channels(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let channels = DesignationService::new(&state.db)
        .get_designated_channels(&ctx)
        .await?;

    let dtos: Vec<DesignatedChannelDto> = channels.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Designate a channel for a purpose.
///
/// # Access Control
/// - `DesignatedChannelMappingCreate`
///
/// # Returns
/// - `201 Created` - The new designation
/// - `404 Not Found` - The channel is not part of the guild
/// - `409 Conflict` - The channel already has this designation
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/designated-channels",
    tag = DESIGNATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    request_body = CreateDesignatedChannelDto,
    responses(
        (status = 201, description = "Channel designated", body = DesignatedChannelDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Unknown channel", body = ErrorDto),
        (status = 409, description = "Designation already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_designated_channel(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateDesignatedChannelDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let mapping = DesignationService::new(&state.db)
        .add_designated_channel(&ctx, payload.channel_id, payload.designation)
        .await?;

    Ok((StatusCode::CREATED, Json(mapping.into_dto())))
}

/// Remove a channel designation.
///
/// # Access Control
/// - `DesignatedChannelMappingDelete`
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/designated-channels/{designation_id}",
    tag = DESIGNATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("designation_id" = i32, Path, description = "Designation ID")
    ),
    responses(
        (status = 204, description = "Designation removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Designation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_designated_channel(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, designation_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    DesignationService::new(&state.db)
        .remove_designated_channel(&ctx, designation_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the guild's designated roles.
///
/// # Access Control
/// - `DesignatedRoleMappingRead`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/designated-roles",
    tag = DESIGNATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Designated roles", body = Vec<DesignatedRoleDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_designated_roles(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let roles = DesignationService::new(&state.db)
        .get_designated_roles(&ctx)
        .await?;

    let dtos: Vec<DesignatedRoleDto> = roles.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Designate a role for a purpose.
///
/// # Access Control
/// - `DesignatedRoleMappingCreate`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/designated-roles",
    tag = DESIGNATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    request_body = CreateDesignatedRoleDto,
    responses(
        (status = 201, description = "Role designated", body = DesignatedRoleDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Unknown role", body = ErrorDto),
        (status = 409, description = "Designation already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_designated_role(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateDesignatedRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let mapping = DesignationService::new(&state.db)
        .add_designated_role(&ctx, payload.role_id, payload.designation)
        .await?;

    Ok((StatusCode::CREATED, Json(mapping.into_dto())))
}

/// Remove a role designation.
///
/// # Access Control
/// - `DesignatedRoleMappingDelete`
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/designated-roles/{designation_id}",
    tag = DESIGNATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("designation_id" = i32, Path, description = "Designation ID")
    ),
    responses(
        (status = 204, description = "Designation removed"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Designation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_designated_role(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, designation_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    DesignationService::new(&state.db)
        .remove_designated_role(&ctx, designation_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
