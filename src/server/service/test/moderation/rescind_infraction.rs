use super::*;

/// Tests rescinding an active mute.
///
/// Verifies that the designated mute role is removed from the subject and the
/// rescission is recorded with its reason and audit action.
///
/// Expected: Ok(Infraction) with rescind fields set
#[tokio::test]
async fn rescinds_mute_and_removes_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let mute_role = factory::create_guild_role(db, &guild.guild_id).await?;
    factory::create_designated_role(db, &guild.guild_id, &mute_role.role_id, "ModerationMute")
        .await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let (subject, _) = factory::create_member(db, &guild.guild_id).await?;
    let mute = factory::infraction::InfractionFactory::new(db, &guild.guild_id, &subject.discord_id)
        .infraction_type("Mute")
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let mut receiver = notifications.subscribe();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationRescind],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let rescinded = service
        .rescind_infraction(&ctx, mute.id, Some("Appealed".to_string()))
        .await?;

    assert!(rescinded.rescinded_at.is_some());
    assert_eq!(rescinded.rescinded_by_id, Some(ctx.user_id));
    assert_eq!(rescinded.rescind_reason.as_deref(), Some("Appealed"));
    assert_eq!(
        actions.calls(),
        vec![GuildCall::RemoveRole {
            user_id: subject.discord_id.parse().unwrap(),
            role_id: mute_role.role_id.parse().unwrap(),
        }]
    );

    let recorded = ModerationActionRepository::new(db)
        .get_types_for_infraction(mute.id)
        .await?;
    assert_eq!(recorded, vec![ModerationActionType::InfractionRescinded]);
    assert!(matches!(
        receiver.try_recv(),
        Ok(Notification::InfractionRescinded { .. })
    ));

    Ok(())
}

/// Tests rescinding a warning.
///
/// Expected: Err(ModerationError::NotRescindable)
#[tokio::test]
async fn rejects_warning() -> Result<(), AppError> {
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
        &[AuthorizationClaim::ModerationRescind],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service.rescind_infraction(&ctx, warning.id, None).await;

    assert!(matches!(
        result,
        Err(AppError::ModerationErr(ModerationError::NotRescindable(
            InfractionType::Warning
        )))
    ));

    Ok(())
}

/// Tests rescinding an infraction twice.
///
/// Expected: Err(ModerationError::AlreadyRescinded)
#[tokio::test]
async fn rejects_already_rescinded() -> Result<(), AppError> {
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
        .rescinded()
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationRescind],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service.rescind_infraction(&ctx, ban.id, None).await;

    assert!(matches!(
        result,
        Err(AppError::ModerationErr(ModerationError::AlreadyRescinded(id))) if id == ban.id
    ));
    assert!(actions.calls().is_empty());

    Ok(())
}

/// Tests rescinding an infraction that belongs to another guild.
///
/// Expected: Err(ModerationError::InfractionNotFound)
#[tokio::test]
async fn hides_other_guilds_infractions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other_guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let ban = factory::infraction::InfractionFactory::new(db, &other_guild.guild_id, "7")
        .infraction_type("Ban")
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationRescind],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service.rescind_infraction(&ctx, ban.id, None).await;

    assert!(matches!(
        result,
        Err(AppError::ModerationErr(ModerationError::InfractionNotFound(_)))
    ));

    Ok(())
}

/// Tests unbanning through the active ban.
///
/// Expected: Ok(Infraction) and the user unbanned
#[tokio::test]
async fn rescinds_active_ban() -> Result<(), AppError> {
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
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationRescind],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let rescinded = service
        .rescind_active(&ctx, 7, InfractionType::Ban)
        .await?;

    assert_eq!(rescinded.id, ban.id);
    assert_eq!(actions.calls(), vec![GuildCall::Unban { user_id: 7 }]);

    Ok(())
}

/// Tests unmuting a user who isn't muted.
///
/// Expected: Err(ModerationError::NoActiveInfraction)
#[tokio::test]
async fn rejects_missing_active_infraction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Mute")
        .rescinded()
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationRescind],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service.rescind_active(&ctx, 7, InfractionType::Mute).await;

    assert!(matches!(
        result,
        Err(AppError::ModerationErr(ModerationError::NoActiveInfraction(
            InfractionType::Mute
        )))
    ));

    Ok(())
}
