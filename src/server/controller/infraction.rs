use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Duration;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        infraction::{
            CreateInfractionDto, InfractionDto, InfractionType, PaginatedInfractionsDto,
            RescindInfractionDto,
        },
        message::PaginatedDeletedMessagesDto,
    },
    server::{
        controller::param::{parse_user_param, PaginationParam},
        error::{moderation::ModerationError, AppError},
        middleware::auth::AuthGuard,
        model::{infraction::InfractionSearchCriteria, message::DeletedMessageSearchCriteria},
        service::moderation::{ModerationService, MAX_DURATION_DAYS},
        state::AppState,
    },
};

/// Tag for grouping moderation endpoints in OpenAPI documentation
pub static MODERATION_TAG: &str = "moderation";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InfractionSearchParam {
    pub infraction_type: Option<InfractionType>,
    /// Subject user id or mention.
    pub subject: Option<String>,
    /// Moderator user id or mention.
    pub created_by: Option<String>,
    pub rescinded: Option<bool>,
    /// Include only deleted (`true`) or only kept (`false`) infractions.
    pub deleted: Option<bool>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeletedMessageSearchParam {
    pub channel_id: Option<u64>,
    /// Author user id or mention.
    pub author: Option<String>,
    /// Moderator user id or mention.
    pub created_by: Option<String>,
    pub batch_id: Option<i32>,
    /// Text the message content must contain.
    pub content: Option<String>,
}

/// Search the guild's infractions, newest first.
///
/// # Access Control
/// - `ModerationRead`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/infractions",
    tag = MODERATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        InfractionSearchParam,
        PaginationParam
    ),
    responses(
        (status = 200, description = "One page of infractions", body = PaginatedInfractionsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_infractions(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(params): Query<InfractionSearchParam>,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let criteria = InfractionSearchCriteria {
        types: params.infraction_type.into_iter().collect(),
        subject_id: parse_user_param(params.subject.as_deref()),
        created_by_id: parse_user_param(params.created_by.as_deref()),
        is_rescinded: params.rescinded,
        is_deleted: params.deleted,
        ..Default::default()
    };

    let infractions = moderation_service(&state)
        .search_infractions(&ctx, &criteria, pagination.page(), pagination.per_page())
        .await?;

    Ok((StatusCode::OK, Json(infractions.into_dto())))
}

/// Record an infraction and apply it on Discord.
///
/// Mutes and bans may carry a duration after which they are rescinded
/// automatically.
///
/// # Access Control
/// - `ModerationNote`, `ModerationWarn`, `ModerationMute` or `ModerationBan`
///   depending on the type
///
/// # Returns
/// - `201 Created` - The recorded infraction
/// - `400 Bad Request` - Invalid reason or duration
/// - `403 Forbidden` - Missing claim or the subject outranks the caller
/// - `409 Conflict` - The subject already has an active infraction of this type
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/infractions",
    tag = MODERATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    request_body = CreateInfractionDto,
    responses(
        (status = 201, description = "Infraction recorded", body = InfractionDto),
        (status = 400, description = "Invalid infraction", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims or outranked", body = ErrorDto),
        (status = 409, description = "Infraction already active", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_infraction(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateInfractionDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let duration = payload
        .duration_secs
        .map(|secs| {
            Duration::try_seconds(secs).ok_or(ModerationError::InvalidDuration {
                max_days: MAX_DURATION_DAYS,
            })
        })
        .transpose()?;
    let infraction = moderation_service(&state)
        .create_infraction(
            &ctx,
            payload.infraction_type,
            payload.subject_id,
            &payload.reason,
            duration,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(infraction.into_dto())))
}

/// Rescind an active mute or ban.
///
/// # Access Control
/// - `ModerationRescind`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/infractions/{infraction_id}/rescind",
    tag = MODERATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("infraction_id" = i32, Path, description = "Infraction ID")
    ),
    request_body = RescindInfractionDto,
    responses(
        (status = 200, description = "Infraction rescinded", body = InfractionDto),
        (status = 400, description = "Infraction cannot be rescinded", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Infraction not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn rescind_infraction(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, infraction_id)): Path<(u64, i32)>,
    Json(payload): Json<RescindInfractionDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let infraction = moderation_service(&state)
        .rescind_infraction(&ctx, infraction_id, payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(infraction.into_dto())))
}

/// Delete an infraction, lifting it on Discord if still active.
///
/// # Access Control
/// - `ModerationDelete`
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/infractions/{infraction_id}",
    tag = MODERATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("infraction_id" = i32, Path, description = "Infraction ID")
    ),
    responses(
        (status = 204, description = "Infraction deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Infraction not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_infraction(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, infraction_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    moderation_service(&state)
        .delete_infraction(&ctx, infraction_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Search messages deleted by moderators, newest first.
///
/// # Access Control
/// - `LogViewDeletedMessages`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/deleted-messages",
    tag = MODERATION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        DeletedMessageSearchParam,
        PaginationParam
    ),
    responses(
        (status = 200, description = "One page of deleted messages", body = PaginatedDeletedMessagesDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_deleted_messages(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(params): Query<DeletedMessageSearchParam>,
    Query(pagination): Query<PaginationParam>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let criteria = DeletedMessageSearchCriteria {
        channel_id: params.channel_id,
        author_id: parse_user_param(params.author.as_deref()),
        created_by_id: parse_user_param(params.created_by.as_deref()),
        batch_id: params.batch_id,
        content: params.content,
    };

    let messages = moderation_service(&state)
        .search_deleted_messages(&ctx, &criteria, pagination.page(), pagination.per_page())
        .await?;

    Ok((StatusCode::OK, Json(messages.into_dto())))
}

fn moderation_service(state: &AppState) -> ModerationService<'_> {
    ModerationService::new(&state.db, state.guild_actions.as_ref(), &state.notifications)
}
