use super::*;

/// Tests the default infraction search.
///
/// Verifies that deleted infractions and other guilds' infractions are left
/// out, while rescinded ones are still listed.
///
/// Expected: Ok(Paginated) with the live and rescinded infractions
#[tokio::test]
async fn excludes_deleted_by_default() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other_guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let live = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Warning")
        .build()
        .await?;
    let rescinded = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Mute")
        .rescinded()
        .build()
        .await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Ban")
        .deleted()
        .build()
        .await?;
    factory::infraction::InfractionFactory::new(db, &other_guild.guild_id, "7")
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationRead],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let results = service
        .search_infractions(&ctx, &InfractionSearchCriteria::default(), 0, 10)
        .await?;

    assert_eq!(results.total, 2);
    let mut ids: Vec<i32> = results.items.iter().map(|i| i.id).collect();
    ids.sort();
    assert_eq!(ids, vec![live.id, rescinded.id]);
    assert!(actions.calls().is_empty());

    Ok(())
}

/// Tests searching explicitly for deleted infractions.
///
/// Expected: Ok(Paginated) with only the deleted infraction
#[tokio::test]
async fn lists_deleted_when_requested() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .build()
        .await?;
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
        &[AuthorizationClaim::ModerationRead],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let results = service
        .search_infractions(
            &ctx,
            &InfractionSearchCriteria {
                is_deleted: Some(true),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(results.total, 1);
    assert_eq!(results.items[0].id, deleted.id);

    Ok(())
}

/// Tests searching without the read claim.
///
/// Expected: Err(AuthError::MissingClaims) naming the read claim
#[tokio::test]
async fn requires_read_claim() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .build()
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationWarn],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service
        .search_infractions(&ctx, &InfractionSearchCriteria::default(), 0, 10)
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::MissingClaims(missing))) => {
            assert_eq!(missing, vec![AuthorizationClaim::ModerationRead]);
        }
        other => panic!("expected missing claims, got {:?}", other.map(|p| p.total)),
    }

    Ok(())
}
