use super::*;

/// Tests accepting a campaign that has been open long enough.
///
/// Verifies that the rank is added on Discord and in the role mirror.
///
/// Expected: Ok(PromotionCampaign) closed as Accepted
#[tokio::test]
async fn accepts_and_promotes_subject() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let moderator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;
    let campaign =
        PromotionCampaignFactory::new(db, &guild.guild.guild_id, &subject.discord_id, guild.rank_id(0))
            .created_at(Utc::now() - Duration::hours(72))
            .build()
            .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let mut receiver = notifications.subscribe();
    let ctx = context(
        &guild.guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsCloseCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let closed = service.accept_campaign(&ctx, campaign.id, false).await?;

    let subject_id: u64 = subject.discord_id.parse().unwrap();
    let rank_id: u64 = guild.rank_id(0).parse().unwrap();

    assert_eq!(closed.outcome, Some(CampaignOutcome::Accepted));
    assert_eq!(closed.closed_by_id, Some(ctx.user_id));
    assert_eq!(
        actions.calls(),
        vec![GuildCall::AddRole {
            user_id: subject_id,
            role_id: rank_id,
        }]
    );
    assert!(
        GuildUserRoleRepository::new(db)
            .has_role(ctx.guild_id, subject_id, rank_id)
            .await?
    );
    assert!(matches!(
        receiver.try_recv(),
        Ok(Notification::CampaignClosed { .. })
    ));

    Ok(())
}

/// Tests accepting a fresh campaign with and without force.
///
/// Expected: Err(PromotionError::TooEarlyToAccept), then Ok when forced
#[tokio::test]
async fn requires_force_before_delay() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let moderator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsCloseCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);

    let result = service.accept_campaign(&ctx, campaign.id, false).await;
    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::TooEarlyToAccept { hours: 48 }))
    ));

    let closed = service.accept_campaign(&ctx, campaign.id, true).await?;
    assert_eq!(closed.outcome, Some(CampaignOutcome::Accepted));

    Ok(())
}

/// Tests accepting when Discord refuses the role change.
///
/// Expected: Ok(PromotionCampaign) closed as Failed without mirroring the role
#[tokio::test]
async fn closes_as_failed_when_role_cannot_be_added() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let moderator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;

    let actions = RecordingGuildActions::new().failing_add_role();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsCloseCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let closed = service.accept_campaign(&ctx, campaign.id, true).await?;

    assert_eq!(closed.outcome, Some(CampaignOutcome::Failed));
    assert!(
        !GuildUserRoleRepository::new(db)
            .has_role(
                ctx.guild_id,
                subject.discord_id.parse().unwrap(),
                guild.rank_id(0).parse().unwrap()
            )
            .await?
    );

    Ok(())
}

/// Tests rejecting a campaign and then rejecting it again.
///
/// Expected: Ok(PromotionCampaign) closed as Rejected, then Err(PromotionError::CampaignClosed)
#[tokio::test]
async fn rejects_campaign_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let moderator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsCloseCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);

    let closed = service.reject_campaign(&ctx, campaign.id).await?;
    assert_eq!(closed.outcome, Some(CampaignOutcome::Rejected));
    assert!(actions.calls().is_empty());

    let result = service.reject_campaign(&ctx, campaign.id).await;
    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::CampaignClosed(_)))
    ));

    Ok(())
}

/// Tests accepting a campaign a second time after it was accepted.
///
/// Verifies that the second accept neither adds the role again nor publishes
/// another notification.
///
/// Expected: Err(PromotionError::CampaignClosed) with the first outcome kept
#[tokio::test]
async fn accepts_campaign_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let moderator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let mut receiver = notifications.subscribe();
    let ctx = context(
        &guild.guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsCloseCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);

    let closed = service.accept_campaign(&ctx, campaign.id, true).await?;
    assert_eq!(closed.outcome, Some(CampaignOutcome::Accepted));

    let again = service.accept_campaign(&ctx, campaign.id, true).await;
    assert!(matches!(
        again,
        Err(AppError::PromotionErr(PromotionError::CampaignClosed(id))) if id == campaign.id
    ));
    let rejected = service.reject_campaign(&ctx, campaign.id).await;
    assert!(matches!(
        rejected,
        Err(AppError::PromotionErr(PromotionError::CampaignClosed(_)))
    ));

    assert_eq!(actions.calls().len(), 1);
    assert!(matches!(
        receiver.try_recv(),
        Ok(Notification::CampaignClosed { .. })
    ));
    assert!(receiver.try_recv().is_err());

    let details = service.get_campaign_details(
        &context(
            &guild.guild.guild_id,
            &moderator.discord_id,
            &[],
            &[AuthorizationClaim::PromotionsRead],
        ),
        campaign.id,
    )
    .await?;
    assert_eq!(details.summary.campaign.outcome, Some(CampaignOutcome::Accepted));

    Ok(())
}

/// Tests closing without the close claim.
///
/// Expected: Err(AppError::AuthErr)
#[tokio::test]
async fn requires_close_claim() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let user = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &user.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsComment],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service.reject_campaign(&ctx, campaign.id).await;

    assert!(matches!(result, Err(AppError::AuthErr(_))));

    Ok(())
}
