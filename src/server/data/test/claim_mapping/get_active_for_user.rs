use super::*;

/// Tests collecting mappings for a user through their roles and directly.
///
/// Verifies that mappings for roles the user lacks, rescinded mappings and
/// mappings in other guilds are excluded.
///
/// Expected: Ok with the role grant and the direct denial
#[tokio::test]
async fn returns_role_and_user_mappings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    factory::create_role_claim(db, &guild.guild_id, "100", "ModerationWarn").await?;
    factory::create_role_claim(db, &guild.guild_id, "200", "ModerationBan").await?;
    factory::claim_mapping::ClaimMappingFactory::new(db, &guild.guild_id, "ModerationMute")
        .role("100")
        .rescinded()
        .build()
        .await?;
    factory::claim_mapping::ClaimMappingFactory::new(db, &guild.guild_id, "ModerationWarn")
        .user("7")
        .denied()
        .build()
        .await?;
    factory::create_role_claim(db, "999", "100", "ModerationBan").await?;

    let repo = ClaimMappingRepository::new(db);
    let mappings = repo
        .get_active_for_user(guild.guild_id.parse().unwrap(), 7, &[100])
        .await?;

    assert_eq!(mappings.len(), 2);
    assert!(mappings.iter().any(|m| m.role_id == Some(100)
        && m.claim == AuthorizationClaim::ModerationWarn
        && m.mapping_type == ClaimMappingType::Granted));
    assert!(mappings.iter().any(|m| m.user_id == Some(7)
        && m.claim == AuthorizationClaim::ModerationWarn
        && m.mapping_type == ClaimMappingType::Denied));

    Ok(())
}

/// Tests a user without roles still receives direct mappings.
///
/// Expected: Ok with the direct grant
#[tokio::test]
async fn handles_user_without_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    factory::create_user_claim(db, &guild.guild_id, "7", "LogViewDeletedMessages").await?;

    let repo = ClaimMappingRepository::new(db);
    let mappings = repo
        .get_active_for_user(guild.guild_id.parse().unwrap(), 7, &[])
        .await?;

    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].claim, AuthorizationClaim::LogViewDeletedMessages);

    Ok(())
}
