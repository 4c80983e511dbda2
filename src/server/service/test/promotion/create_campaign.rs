use super::*;

/// Tests nominating an unranked member.
///
/// Verifies that the campaign targets the lowest rank and that the creator's
/// comment is recorded as its first approval.
///
/// Expected: Ok(PromotionCampaign) targeting the first rank
#[tokio::test]
async fn targets_lowest_rank_for_unranked_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let creator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let mut receiver = notifications.subscribe();
    let ctx = context(
        &guild.guild.guild_id,
        &creator.discord_id,
        &[guild.rank_id(2)],
        &[AuthorizationClaim::PromotionsCreateCampaign, AuthorizationClaim::PromotionsRead],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let campaign = service
        .create_campaign(&ctx, subject.discord_id.parse().unwrap(), "  Very helpful  ")
        .await?;

    assert!(campaign.is_open());
    assert_eq!(campaign.target_role_id.to_string(), guild.rank_id(0));
    assert_eq!(campaign.created_by_id, ctx.user_id);

    let details = service.get_campaign_details(&ctx, campaign.id).await?;
    assert_eq!(details.summary.approve_count, 1);
    assert_eq!(details.comments[0].content, "Very helpful");

    assert!(matches!(
        receiver.try_recv(),
        Ok(Notification::CampaignCreated { campaign: c }) if c.id == campaign.id
    ));

    Ok(())
}

/// Tests nominating a member to the creator's own rank.
///
/// Expected: Err(PromotionError::TargetNotBelowCreator)
#[tokio::test]
async fn rejects_target_at_creators_rank() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let creator = guild.member(db, Some(1)).await?;
    let subject = guild.member(db, Some(0)).await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &creator.discord_id,
        &[guild.rank_id(1)],
        &[AuthorizationClaim::PromotionsCreateCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .create_campaign(&ctx, subject.discord_id.parse().unwrap(), "Ready")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::TargetNotBelowCreator))
    ));

    Ok(())
}

/// Tests nominating a member who already holds the highest rank.
///
/// Expected: Err(PromotionError::NoNextRank)
#[tokio::test]
async fn rejects_member_at_top_rank() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let creator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, Some(2)).await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &creator.discord_id,
        &[guild.rank_id(2)],
        &[AuthorizationClaim::PromotionsCreateCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .create_campaign(&ctx, subject.discord_id.parse().unwrap(), "Ready")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::NoNextRank))
    ));

    Ok(())
}

/// Tests nominating a user who has left the guild.
///
/// Expected: Err(PromotionError::SubjectNotMember)
#[tokio::test]
async fn rejects_former_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let creator = guild.member(db, Some(2)).await?;
    let former = factory::create_user(db).await?;
    GuildUserFactory::new(db, &guild.guild.guild_id, &former.discord_id)
        .is_member(false)
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &creator.discord_id,
        &[guild.rank_id(2)],
        &[AuthorizationClaim::PromotionsCreateCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .create_campaign(&ctx, former.discord_id.parse().unwrap(), "Ready")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::SubjectNotMember(_)))
    ));

    Ok(())
}

/// Tests opening a second campaign for the same subject.
///
/// Expected: Err(PromotionError::CampaignAlreadyOpen)
#[tokio::test]
async fn rejects_second_open_campaign() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let creator = guild.member(db, Some(2)).await?;
    let subject = guild.member(db, None).await?;
    factory::create_campaign(
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
        &creator.discord_id,
        &[guild.rank_id(2)],
        &[AuthorizationClaim::PromotionsCreateCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .create_campaign(&ctx, subject.discord_id.parse().unwrap(), "Ready")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::CampaignAlreadyOpen))
    ));

    Ok(())
}

/// Tests reopening a campaign shortly after the same rank was rejected.
///
/// Verifies that the cooldown blocks a rejection from ten days ago but not
/// one from sixty days ago.
///
/// Expected: Err(PromotionError::RecentlyRejected), then Ok once the cooldown passed
#[tokio::test]
async fn enforces_rejection_cooldown() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let creator = guild.member(db, Some(2)).await?;
    let recent = guild.member(db, None).await?;
    let old = guild.member(db, None).await?;

    PromotionCampaignFactory::new(db, &guild.guild.guild_id, &recent.discord_id, guild.rank_id(0))
        .created_at(Utc::now() - Duration::days(10))
        .outcome("Rejected")
        .build()
        .await?;
    PromotionCampaignFactory::new(db, &guild.guild.guild_id, &old.discord_id, guild.rank_id(0))
        .created_at(Utc::now() - Duration::days(60))
        .outcome("Rejected")
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &creator.discord_id,
        &[guild.rank_id(2)],
        &[AuthorizationClaim::PromotionsCreateCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);

    let result = service
        .create_campaign(&ctx, recent.discord_id.parse().unwrap(), "Try again")
        .await;
    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::RecentlyRejected { days: 30 }))
    ));

    let campaign = service
        .create_campaign(&ctx, old.discord_id.parse().unwrap(), "Try again")
        .await?;
    assert!(campaign.is_open());

    Ok(())
}

/// Tests nominating oneself.
///
/// Expected: Err(PromotionError::SelfNomination)
#[tokio::test]
async fn rejects_self_nomination() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let creator = guild.member(db, Some(0)).await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &creator.discord_id,
        &[guild.rank_id(0)],
        &[AuthorizationClaim::PromotionsCreateCampaign],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .create_campaign(&ctx, ctx.user_id, "Me")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::SelfNomination))
    ));

    Ok(())
}
