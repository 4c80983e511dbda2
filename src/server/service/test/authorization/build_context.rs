use super::*;

/// Tests resolving claims from roles, `@everyone` and user mappings.
///
/// Verifies that a higher role's denial overrides a lower role's grant, that
/// `@everyone` mappings apply without the role being held, and that user
/// mappings override roles.
///
/// Expected: Ok(AuthContext) with the resolved claim set
#[tokio::test]
async fn resolves_claims_in_precedence_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    DiscordGuildRoleFactory::new(db, &guild.guild_id)
        .role_id(guild.guild_id.clone())
        .name("@everyone")
        .position(0)
        .build()
        .await?;
    let helper = DiscordGuildRoleFactory::new(db, &guild.guild_id)
        .position(1)
        .build()
        .await?;
    let trial = DiscordGuildRoleFactory::new(db, &guild.guild_id)
        .position(2)
        .build()
        .await?;
    let user = factory::create_member_with_roles(
        db,
        &guild.guild_id,
        &[&helper.role_id, &trial.role_id],
    )
    .await?;

    factory::create_role_claim(db, &guild.guild_id, &guild.guild_id, "PromotionsRead").await?;
    factory::create_role_claim(db, &guild.guild_id, &helper.role_id, "ModerationWarn").await?;
    factory::create_role_claim(db, &guild.guild_id, &helper.role_id, "ModerationMute").await?;
    ClaimMappingFactory::new(db, &guild.guild_id, "ModerationMute")
        .role(&trial.role_id)
        .denied()
        .build()
        .await?;
    ClaimMappingFactory::new(db, &guild.guild_id, "ModerationWarn")
        .user(&user.discord_id)
        .denied()
        .build()
        .await?;
    factory::create_user_claim(db, &guild.guild_id, &user.discord_id, "ModerationRead").await?;

    let service = AuthorizationService::new(db);
    let ctx = service
        .build_context(
            guild.guild_id.parse().unwrap(),
            user.discord_id.parse().unwrap(),
        )
        .await?;

    assert!(ctx.has_claim(AuthorizationClaim::PromotionsRead));
    assert!(ctx.has_claim(AuthorizationClaim::ModerationRead));
    assert!(!ctx.has_claim(AuthorizationClaim::ModerationMute));
    assert!(!ctx.has_claim(AuthorizationClaim::ModerationWarn));
    assert_eq!(ctx.role_ids.len(), 2);

    Ok(())
}

/// Tests that rescinded mappings are ignored.
///
/// Expected: Ok(AuthContext) without the rescinded claim
#[tokio::test]
async fn ignores_rescinded_mappings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (user, _) = factory::create_member(db, &guild.guild_id).await?;
    ClaimMappingFactory::new(db, &guild.guild_id, "ModerationBan")
        .user(&user.discord_id)
        .rescinded()
        .build()
        .await?;

    let service = AuthorizationService::new(db);
    let ctx = service
        .build_context(
            guild.guild_id.parse().unwrap(),
            user.discord_id.parse().unwrap(),
        )
        .await?;

    assert!(ctx.claims.is_empty());

    Ok(())
}

/// Tests building a context for a user who left the guild.
///
/// Expected: Err(AuthError::NotGuildMember)
#[tokio::test]
async fn rejects_non_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let user = factory::create_user(db).await?;

    let service = AuthorizationService::new(db);
    let result = service
        .build_context(
            guild.guild_id.parse().unwrap(),
            user.discord_id.parse().unwrap(),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::NotGuildMember { .. }))
    ));

    Ok(())
}
