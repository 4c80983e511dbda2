use super::*;

/// Tests commenting on an open campaign.
///
/// Expected: Ok(PromotionComment) and a notification with the campaign
#[tokio::test]
async fn adds_comment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let commenter = guild.member(db, Some(1)).await?;
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
        &commenter.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsComment],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let comment = service
        .add_comment(&ctx, campaign.id, PromotionSentiment::Oppose, "Not yet")
        .await?;

    assert_eq!(comment.sentiment, PromotionSentiment::Oppose);
    assert_eq!(comment.created_by_id, ctx.user_id);
    assert!(matches!(
        receiver.try_recv(),
        Ok(Notification::CampaignCommentCreated { comment: c, .. }) if c.id == comment.id
    ));

    Ok(())
}

/// Tests commenting twice on the same campaign.
///
/// Expected: Err(PromotionError::AlreadyCommented)
#[tokio::test]
async fn rejects_second_comment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let commenter = guild.member(db, None).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;
    factory::create_comment(db, campaign.id, &commenter.discord_id, "Approve").await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &commenter.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsComment],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .add_comment(&ctx, campaign.id, PromotionSentiment::Abstain, "Changed my mind")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::AlreadyCommented))
    ));

    Ok(())
}

/// Tests the subject commenting on their own campaign.
///
/// Expected: Err(PromotionError::SubjectCannotComment)
#[tokio::test]
async fn rejects_subject_comment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
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
        &subject.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsComment],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .add_comment(&ctx, campaign.id, PromotionSentiment::Approve, "Me please")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::SubjectCannotComment))
    ));

    Ok(())
}

/// Tests commenting on a closed campaign.
///
/// Expected: Err(PromotionError::CampaignClosed)
#[tokio::test]
async fn rejects_comment_on_closed_campaign() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let commenter = guild.member(db, None).await?;
    let subject = guild.member(db, None).await?;
    let campaign =
        PromotionCampaignFactory::new(db, &guild.guild.guild_id, &subject.discord_id, guild.rank_id(0))
            .outcome("Accepted")
            .build()
            .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild.guild_id,
        &commenter.discord_id,
        &[],
        &[AuthorizationClaim::PromotionsComment],
    );

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .add_comment(&ctx, campaign.id, PromotionSentiment::Approve, "Late")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::CampaignClosed(id))) if id == campaign.id
    ));

    Ok(())
}

/// Tests the author updating their comment.
///
/// Expected: Ok(PromotionComment) with new sentiment, content and modified_at
#[tokio::test]
async fn updates_own_comment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let commenter = guild.member(db, None).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;
    let comment =
        factory::create_comment(db, campaign.id, &commenter.discord_id, "Approve").await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(&guild.guild.guild_id, &commenter.discord_id, &[], &[]);

    let service = PromotionService::new(db, &actions, &notifications);
    let updated = service
        .update_comment(&ctx, comment.id, PromotionSentiment::Abstain, "On reflection")
        .await?;

    assert_eq!(updated.sentiment, PromotionSentiment::Abstain);
    assert_eq!(updated.content, "On reflection");
    assert!(updated.modified_at.is_some());

    Ok(())
}

/// Tests updating somebody else's comment.
///
/// Expected: Err(PromotionError::NotCommentAuthor)
#[tokio::test]
async fn rejects_update_by_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_promotion_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = RankedGuild::create(db).await?;
    let author = guild.member(db, None).await?;
    let other = guild.member(db, None).await?;
    let subject = guild.member(db, None).await?;
    let campaign = factory::create_campaign(
        db,
        &guild.guild.guild_id,
        &subject.discord_id,
        guild.rank_id(0),
    )
    .await?;
    let comment = factory::create_comment(db, campaign.id, &author.discord_id, "Approve").await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(&guild.guild.guild_id, &other.discord_id, &[], &[]);

    let service = PromotionService::new(db, &actions, &notifications);
    let result = service
        .update_comment(&ctx, comment.id, PromotionSentiment::Oppose, "Hijack")
        .await;

    assert!(matches!(
        result,
        Err(AppError::PromotionErr(PromotionError::NotCommentAuthor))
    ));

    Ok(())
}
