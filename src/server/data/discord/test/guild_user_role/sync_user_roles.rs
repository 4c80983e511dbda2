use super::*;

/// Tests syncing replaces the member's roles.
///
/// Expected: Ok with old roles removed and new ones stored
#[tokio::test]
async fn replaces_existing_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let user = factory::create_member_with_roles(db, &guild.guild_id, &["111", "222"]).await?;
    let guild_id = guild.guild_id.parse().unwrap();
    let user_id = user.discord_id.parse().unwrap();

    let repo = GuildUserRoleRepository::new(db);
    repo.sync_user_roles(guild_id, user_id, &[222, 333]).await?;

    let mut role_ids = repo.get_role_ids(guild_id, user_id).await?;
    role_ids.sort();
    assert_eq!(role_ids, vec![222, 333]);

    Ok(())
}

/// Tests syncing to an empty list clears the member's roles.
///
/// Expected: Ok with no roles left
#[tokio::test]
async fn clears_roles() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let user = factory::create_member_with_roles(db, &guild.guild_id, &["111"]).await?;
    let guild_id = guild.guild_id.parse().unwrap();
    let user_id = user.discord_id.parse().unwrap();

    let repo = GuildUserRoleRepository::new(db);
    repo.sync_user_roles(guild_id, user_id, &[]).await?;

    assert!(repo.get_role_ids(guild_id, user_id).await?.is_empty());

    Ok(())
}

/// Tests syncing one member leaves other members alone.
///
/// Expected: Ok with the other member's roles unchanged
#[tokio::test]
async fn syncs_only_specified_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let first = factory::create_member_with_roles(db, &guild.guild_id, &["111"]).await?;
    let second = factory::create_member_with_roles(db, &guild.guild_id, &["111"]).await?;
    let guild_id = guild.guild_id.parse().unwrap();

    let repo = GuildUserRoleRepository::new(db);
    repo.sync_user_roles(guild_id, first.discord_id.parse().unwrap(), &[])
        .await?;

    let remaining = repo
        .get_role_ids(guild_id, second.discord_id.parse().unwrap())
        .await?;
    assert_eq!(remaining, vec![111]);

    Ok(())
}
