use super::*;

/// Tests user info as seen by a moderator.
///
/// Verifies that roles are ordered highest first, that message counts only
/// cover the activity window and that infraction counts are included.
///
/// Expected: Ok(UserInfo) with infraction counts
#[tokio::test]
async fn includes_activity_and_infractions_for_moderators() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let low = DiscordGuildRoleFactory::new(db, &guild.guild_id)
        .position(1)
        .build()
        .await?;
    let high = DiscordGuildRoleFactory::new(db, &guild.guild_id)
        .position(4)
        .build()
        .await?;
    let subject =
        factory::create_member_with_roles(db, &guild.guild_id, &[&low.role_id, &high.role_id])
            .await?;
    let channel = factory::create_guild_channel(db, &guild.guild_id).await?;

    for _ in 0..3 {
        factory::create_discord_message(
            db,
            &guild.guild_id,
            &channel.channel_id,
            &subject.discord_id,
            Utc::now() - Duration::days(1),
        )
        .await?;
    }
    factory::create_discord_message(
        db,
        &guild.guild_id,
        &channel.channel_id,
        &subject.discord_id,
        Utc::now() - Duration::days(45),
    )
    .await?;
    factory::create_infraction(db, &guild.guild_id, &subject.discord_id).await?;

    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationRead],
    );

    let service = UserService::new(db);
    let info = service
        .get_user_info(&ctx, subject.discord_id.parse().unwrap())
        .await?;

    assert!(info.membership.is_some_and(|m| m.is_member));
    let role_ids: Vec<String> = info.roles.iter().map(|r| r.role_id.to_string()).collect();
    assert_eq!(role_ids, vec![high.role_id.clone(), low.role_id.clone()]);
    assert_eq!(info.message_counts.len(), 1);
    assert_eq!(info.message_counts[0].count, 3);
    assert_eq!(info.infraction_counts.map(|c| c.warning), Some(1));

    Ok(())
}

/// Tests user info without `ModerationRead`.
///
/// Expected: Ok(UserInfo) without infraction counts
#[tokio::test]
async fn hides_infractions_without_claim() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (subject, _) = factory::create_member(db, &guild.guild_id).await?;
    factory::create_infraction(db, &guild.guild_id, &subject.discord_id).await?;
    let (viewer, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(&guild.guild_id, &viewer.discord_id, &[], &[]);

    let service = UserService::new(db);
    let info = service
        .get_user_info(&ctx, subject.discord_id.parse().unwrap())
        .await?;

    assert!(info.infraction_counts.is_none());

    Ok(())
}

/// Tests user info for a user the bot has never seen.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (viewer, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(&guild.guild_id, &viewer.discord_id, &[], &[]);

    let service = UserService::new(db);
    let result = service.get_user_info(&ctx, 42).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
