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
        promotion::{
            AcceptCampaignDto, CampaignDetailsDto, CampaignSummaryDto, CommentBodyDto, CommentDto,
            CreateCampaignDto,
        },
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::promotion::PromotionService,
        state::AppState,
    },
};

/// Tag for grouping promotion endpoints in OpenAPI documentation
pub static PROMOTION_TAG: &str = "promotion";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CampaignSearchParam {
    /// Include accepted, rejected and failed campaigns.
    #[serde(default)]
    pub include_closed: bool,
}

/// List the guild's promotion campaigns, newest first.
///
/// # Access Control
/// - `PromotionsRead`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/campaigns",
    tag = PROMOTION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        CampaignSearchParam
    ),
    responses(
        (status = 200, description = "Campaigns with sentiment tallies", body = Vec<CampaignSummaryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_campaigns(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(params): Query<CampaignSearchParam>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let campaigns = promotion_service(&state)
        .search_campaigns(&ctx, !params.include_closed)
        .await?;

    let dtos: Vec<CampaignSummaryDto> = campaigns.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Nominate a member for promotion to the next rank.
///
/// # Access Control
/// - `PromotionsCreateCampaign`
///
/// # Returns
/// - `201 Created` - The new campaign
/// - `400 Bad Request` - Empty comment, unranked guild or subject at the top rank
/// - `409 Conflict` - An active campaign or cooldown blocks the nomination
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/campaigns",
    tag = PROMOTION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    request_body = CreateCampaignDto,
    responses(
        (status = 201, description = "Campaign created", body = CampaignSummaryDto),
        (status = 400, description = "Invalid nomination", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 409, description = "Campaign already active or in cooldown", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Json(payload): Json<CreateCampaignDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let service = promotion_service(&state);
    let campaign = service
        .create_campaign(&ctx, payload.subject_id, &payload.comment)
        .await?;
    let summary = service.summarize(campaign).await?;

    Ok((StatusCode::CREATED, Json(summary.into_dto())))
}

/// Get a campaign with its comments.
///
/// Comment authors are hidden except for the caller's own comments.
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/campaigns/{campaign_id}",
    tag = PROMOTION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Campaign details", body = CampaignDetailsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, campaign_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let details = promotion_service(&state)
        .get_campaign_details(&ctx, campaign_id)
        .await?;

    Ok((StatusCode::OK, Json(details.into_dto())))
}

/// Comment on an active campaign.
///
/// # Access Control
/// - `PromotionsComment`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/campaigns/{campaign_id}/comments",
    tag = PROMOTION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    request_body = CommentBodyDto,
    responses(
        (status = 201, description = "Comment added", body = CommentDto),
        (status = 400, description = "Invalid comment", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 409, description = "Campaign closed or already commented", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_comment(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, campaign_id)): Path<(u64, i32)>,
    Json(payload): Json<CommentBodyDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let comment = promotion_service(&state)
        .add_comment(&ctx, campaign_id, payload.sentiment, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into_dto(ctx.user_id))))
}

/// Edit the caller's own comment.
#[utoipa::path(
    put,
    path = "/api/guilds/{guild_id}/comments/{comment_id}",
    tag = PROMOTION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    request_body = CommentBodyDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Invalid comment", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the comment's author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto),
        (status = 409, description = "Campaign closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_comment(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, comment_id)): Path<(u64, i32)>,
    Json(payload): Json<CommentBodyDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let comment = promotion_service(&state)
        .update_comment(&ctx, comment_id, payload.sentiment, &payload.content)
        .await?;

    Ok((StatusCode::OK, Json(comment.into_dto(ctx.user_id))))
}

/// Accept a campaign and grant the subject the target rank.
///
/// Campaigns younger than 48 hours need `force`.
///
/// # Access Control
/// - `PromotionsCloseCampaign`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/campaigns/{campaign_id}/accept",
    tag = PROMOTION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    request_body = AcceptCampaignDto,
    responses(
        (status = 200, description = "Campaign closed", body = CampaignSummaryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 409, description = "Campaign closed or too young", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn accept_campaign(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, campaign_id)): Path<(u64, i32)>,
    Json(payload): Json<AcceptCampaignDto>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let service = promotion_service(&state);
    let campaign = service
        .accept_campaign(&ctx, campaign_id, payload.force)
        .await?;
    let summary = service.summarize(campaign).await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// Reject a campaign.
///
/// # Access Control
/// - `PromotionsCloseCampaign`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/campaigns/{campaign_id}/reject",
    tag = PROMOTION_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID"),
        ("campaign_id" = i32, Path, description = "Campaign ID")
    ),
    responses(
        (status = 200, description = "Campaign rejected", body = CampaignSummaryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Missing claims", body = ErrorDto),
        (status = 404, description = "Campaign not found", body = ErrorDto),
        (status = 409, description = "Campaign already closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_campaign(
    State(state): State<AppState>,
    session: Session,
    Path((guild_id, campaign_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = AuthGuard::new(&state.db, &session)
        .require_guild(guild_id)
        .await?;

    let service = promotion_service(&state);
    let campaign = service.reject_campaign(&ctx, campaign_id).await?;
    let summary = service.summarize(campaign).await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

fn promotion_service(state: &AppState) -> PromotionService<'_> {
    PromotionService::new(&state.db, state.guild_actions.as_ref(), &state.notifications)
}
