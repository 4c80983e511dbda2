use super::*;

/// Tests the expiry sweep.
///
/// Verifies that only timed infractions whose duration has elapsed are
/// rescinded, and that the bot is recorded as the rescinder.
///
/// Expected: Ok(2) with the unexpired mute left active
#[tokio::test]
async fn rescinds_elapsed_infractions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let two_hours_ago = Utc::now() - Duration::hours(2);

    let expired_mute = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Mute")
        .duration_secs(Some(3600))
        .created_at(two_hours_ago)
        .build()
        .await?;
    let expired_ban = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "8")
        .infraction_type("Ban")
        .duration_secs(Some(60))
        .created_at(two_hours_ago)
        .build()
        .await?;
    let running_mute = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "9")
        .infraction_type("Mute")
        .duration_secs(Some(86400))
        .created_at(two_hours_ago)
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let service = ModerationService::new(db, &actions, &notifications);

    let rescinded = service.auto_rescind_expired(Utc::now(), 1).await?;

    assert_eq!(rescinded, 2);

    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let repo = InfractionRepository::new(db);
    for id in [expired_mute.id, expired_ban.id] {
        let infraction = repo.find_by_id(guild_id, id).await?.unwrap();
        assert_eq!(infraction.rescinded_by_id, Some(1));
    }
    let running = repo.find_by_id(guild_id, running_mute.id).await?.unwrap();
    assert!(running.is_active());

    assert!(actions.calls().contains(&GuildCall::Unban { user_id: 8 }));

    Ok(())
}

/// Tests the sweep with nothing to do.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_without_expired_infractions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Ban")
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let service = ModerationService::new(db, &actions, &notifications);

    assert_eq!(service.auto_rescind_expired(Utc::now(), 1).await?, 0);

    Ok(())
}
