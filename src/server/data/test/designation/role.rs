use super::*;

/// Tests looking up rank roles.
///
/// Expected: Ok with the rank roles only
#[tokio::test]
async fn returns_roles_for_designation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    factory::create_designated_role(db, &guild.guild_id, "1", "Rank").await?;
    factory::create_designated_role(db, &guild.guild_id, "2", "Rank").await?;
    factory::create_designated_role(db, &guild.guild_id, "3", "ModerationMute").await?;

    let repo = DesignatedRoleRepository::new(db);
    let mut ranks = repo.get_role_ids(guild_id, DesignatedRoleType::Rank).await?;
    ranks.sort();

    assert_eq!(ranks, vec![1, 2]);
    assert!(
        repo.exists(guild_id, 3, DesignatedRoleType::ModerationMute)
            .await?
    );

    Ok(())
}

/// Tests deleting a role designation.
///
/// Expected: Ok(true) with the designation removed from lookups
#[tokio::test]
async fn soft_deletes_designation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();

    let repo = DesignatedRoleRepository::new(db);
    let mapping = repo
        .create(guild_id, 5, DesignatedRoleType::Pingable, 1)
        .await?;

    assert!(repo.delete(guild_id, mapping.id, 1).await?);
    assert!(
        repo.get_role_ids(guild_id, DesignatedRoleType::Pingable)
            .await?
            .is_empty()
    );

    Ok(())
}
