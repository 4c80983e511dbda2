use super::*;

/// Tests designating a channel and removing the designation.
///
/// Expected: Ok for both, with the channel listed only in between
#[tokio::test]
async fn adds_and_removes_channel_designation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let channel = factory::create_guild_channel(db, &guild.guild_id).await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[
            AuthorizationClaim::DesignatedChannelMappingCreate,
            AuthorizationClaim::DesignatedChannelMappingDelete,
        ],
    );
    let channel_id: u64 = channel.channel_id.parse().unwrap();

    let service = DesignationService::new(db);
    let mapping = service
        .add_designated_channel(&ctx, channel_id, DesignatedChannelType::ModerationLog)
        .await?;

    assert_eq!(mapping.channel_id, channel_id);
    assert_eq!(
        service
            .channels_for(ctx.guild_id, DesignatedChannelType::ModerationLog)
            .await?,
        vec![channel_id]
    );

    service.remove_designated_channel(&ctx, mapping.id).await?;

    assert!(!service
        .channel_has(ctx.guild_id, channel_id, DesignatedChannelType::ModerationLog)
        .await?);

    Ok(())
}

/// Tests designating a channel twice for the same purpose.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_duplicate_designation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let channel = factory::create_guild_channel(db, &guild.guild_id).await?;
    factory::create_designated_channel(db, &guild.guild_id, &channel.channel_id, "MessageLog")
        .await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[AuthorizationClaim::DesignatedChannelMappingCreate],
    );

    let service = DesignationService::new(db);
    let result = service
        .add_designated_channel(
            &ctx,
            channel.channel_id.parse().unwrap(),
            DesignatedChannelType::MessageLog,
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests designating a channel that belongs to another guild.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_channel_of_other_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other = factory::create_guild(db).await?;
    let channel = factory::create_guild_channel(db, &other.guild_id).await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[AuthorizationClaim::DesignatedChannelMappingCreate],
    );

    let service = DesignationService::new(db);
    let result = service
        .add_designated_channel(
            &ctx,
            channel.channel_id.parse().unwrap(),
            DesignatedChannelType::MessageLog,
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests removing a designation id that doesn't exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_unknown_mapping() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[AuthorizationClaim::DesignatedChannelMappingDelete],
    );

    let service = DesignationService::new(db);
    let result = service.remove_designated_channel(&ctx, 999).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
