use super::*;

/// Tests deleting an active ban.
///
/// Verifies that the ban is lifted, the infraction is hidden from default
/// searches and a notification names the deleting moderator.
///
/// Expected: Ok(Infraction) with delete fields set
#[tokio::test]
async fn deletes_active_ban() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let ban = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Ban")
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let mut receiver = notifications.subscribe();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationDelete],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let deleted = service.delete_infraction(&ctx, ban.id).await?;

    assert_eq!(deleted.deleted_by_id, Some(ctx.user_id));
    assert_eq!(actions.calls(), vec![GuildCall::Unban { user_id: 7 }]);

    let visible = InfractionRepository::new(db)
        .search(ctx.guild_id, &InfractionSearchCriteria::default(), 0, 10)
        .await?;
    assert_eq!(visible.total, 0);

    assert!(matches!(
        receiver.try_recv(),
        Ok(Notification::InfractionDeleted { deleted_by_id, .. }) if deleted_by_id == ctx.user_id
    ));

    Ok(())
}

/// Tests deleting a warning.
///
/// Expected: Ok(Infraction) with no Discord calls
#[tokio::test]
async fn deletes_warning_without_discord_calls() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let warning = factory::create_infraction(db, &guild.guild_id, "7").await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationDelete],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    service.delete_infraction(&ctx, warning.id).await?;

    assert!(actions.calls().is_empty());

    let recorded = ModerationActionRepository::new(db)
        .get_types_for_infraction(warning.id)
        .await?;
    assert_eq!(recorded, vec![ModerationActionType::InfractionDeleted]);

    Ok(())
}

/// Tests deleting an infraction twice.
///
/// Expected: Err(ModerationError::InfractionNotFound)
#[tokio::test]
async fn rejects_deleted_infraction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let deleted = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .deleted()
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationDelete],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service.delete_infraction(&ctx, deleted.id).await;

    assert!(matches!(
        result,
        Err(AppError::ModerationErr(ModerationError::InfractionNotFound(_)))
    ));

    Ok(())
}
