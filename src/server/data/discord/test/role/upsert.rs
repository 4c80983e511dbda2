use super::*;

/// Tests upserting a role stores its color, position and permissions.
///
/// Expected: Ok with role created
#[tokio::test]
async fn upserts_new_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let role = create_test_role_with_permissions(555, "Admins", 0xFF0000, 4, 1 << 3);

    let repo = DiscordGuildRoleRepository::new(db);
    let stored = repo.upsert(guild_id, &role).await?;

    assert_eq!(stored.role_id, 555);
    assert_eq!(stored.color, "#FF0000");
    assert_eq!(stored.position, 4);
    assert!(stored.is_administrator());

    Ok(())
}

/// Tests upserting an existing role updates it in place.
///
/// Expected: Ok with a single updated row
#[tokio::test]
async fn updates_existing_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    factory::create_guild_role_with_position(db, &guild.guild_id, "555", 1).await?;

    let repo = DiscordGuildRoleRepository::new(db);
    let stored = repo
        .upsert(guild_id, &create_test_role(555, "Renamed", 0, 9))
        .await?;

    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.position, 9);

    let count = entity::prelude::DiscordGuildRole::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
