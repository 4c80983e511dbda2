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
        authorization::{ClaimMappingDto, ModifyClaimsDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::authorization::ClaimTarget,
        service::authorization::AuthorizationService, state::AppState,
    },
};

/// Tag for grouping claim mapping endpoints in OpenAPI documentation
pub static AUTHORIZATION_TAG: &str = "authorization";

/// Get the guild's active claim mappings.
///
/// # Access Control
/// - `AuthorizationConfigure`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/claim-mappings",
    tag = AUTHORIZATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Active claim mappings", body = Vec<ClaimMappingDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_claim_mappings(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let mappings = AuthorizationService::new(&state.db)
        .get_claim_mappings(&ctx)
        .await?;

    let dtos: Vec<ClaimMappingDto> = mappings.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Replace the claims granted to and denied from a role.
///
/// Mappings not present in the request are rescinded.
///
/// # Access Control
/// - `AuthorizationConfigure`
#[utoipa::path(
    put,
    path = "/api/guilds/{guild_id}/claim-mappings/roles/{role_id}",
    tag = AUTHORIZATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("role_id" = String, Path, description = "Discord role ID")
    ),
    request_body = ModifyClaimsDto,
    responses(
        (status = 200, description = "The role's active mappings", body = Vec<ClaimMappingDto>),
        (status = 400, description = "Claim both granted and denied", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Unknown role", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn modify_role_claims(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, role_id)): Path<(u64, u64)>,
    Json(payload): Json<ModifyClaimsDto>,
) -> Result<impl IntoResponse, AppError> {
    modify_claims(state, session, guild_id, ClaimTarget::Role(role_id), payload).await
}

/// Replace the claims granted to and denied from a single user.
///
/// # Access Control
/// - `AuthorizationConfigure`
#[utoipa::path(
    put,
    path = "/api/guilds/{guild_id}/claim-mappings/users/{user_id}",
    tag = AUTHORIZATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("user_id" = String, Path, description = "Discord user ID")
    ),
    request_body = ModifyClaimsDto,
    responses(
        (status = 200, description = "The user's active mappings", body = Vec<ClaimMappingDto>),
        (status = 400, description = "Claim both granted and denied", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn modify_user_claims(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, user_id)): Path<(u64, u64)>,
    Json(payload): Json<ModifyClaimsDto>,
) -> Result<impl IntoResponse, AppError> {
    modify_claims(state, session, guild_id, ClaimTarget::User(user_id), payload).await
}

async fn modify_claims(
    state: AppState,
    session: Session,
    guild_id: u64,
    target: ClaimTarget,
    payload: ModifyClaimsDto,
) -> Result<(StatusCode, Json<Vec<ClaimMappingDto>>), AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let mappings = AuthorizationService::new(&state.db)
        .modify_claims(&ctx, target, &payload.granted, &payload.denied)
        .await?;

    let dtos: Vec<ClaimMappingDto> = mappings.into_iter().map(|m| m.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}
