use super::*;

/// Tests detecting whether a guild was ever configured.
///
/// Verifies that a rescinded mapping still counts, so automatic configuration
/// does not run again after an administrator removed every claim.
///
/// Expected: Ok(false) for an empty guild, Ok(true) once a mapping existed
#[tokio::test]
async fn counts_rescinded_mappings() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let repo = ClaimMappingRepository::new(db);
    assert!(!repo.any_exist(guild_id).await?);

    factory::claim_mapping::ClaimMappingFactory::new(db, &guild.guild_id, "ModerationWarn")
        .role("100")
        .rescinded()
        .build()
        .await?;

    assert!(repo.any_exist(guild_id).await?);

    Ok(())
}
