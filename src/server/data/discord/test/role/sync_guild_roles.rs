use super::*;

/// Tests a full role sync removes roles Discord no longer reports.
///
/// Expected: Ok with only the synced roles stored for the guild
#[tokio::test]
async fn removes_stale_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other_guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    factory::create_guild_role_with_position(db, &guild.guild_id, "111", 1).await?;
    factory::create_guild_role_with_position(db, &other_guild.guild_id, "999", 1).await?;

    let mut roles = HashMap::new();
    roles.insert(RoleId::new(222), create_test_role(222, "Kept", 0, 2));
    roles.insert(RoleId::new(333), create_test_role(333, "Added", 0, 3));

    let repo = DiscordGuildRoleRepository::new(db);
    let synced = repo.sync_guild_roles(guild_id, &roles).await?;
    assert_eq!(synced.len(), 2);

    let stored = repo.get_by_guild_id(guild_id).await?;
    let ids: Vec<u64> = stored.iter().map(|r| r.role_id).collect();
    assert_eq!(ids, vec![333, 222]);

    // Roles of other guilds are untouched
    let other = repo.find_by_id(999).await?;
    assert!(other.is_some());

    Ok(())
}
