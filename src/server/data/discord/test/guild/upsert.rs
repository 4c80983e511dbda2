use super::*;

/// Tests upserting a new guild.
///
/// Expected: Ok with guild created
#[tokio::test]
async fn upserts_new_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiscordGuildRepository::new(db);
    let guild = repo
        .upsert(123456789, "Test Guild", Some("abc123".to_string()), 42)
        .await?;

    assert_eq!(guild.guild_id, 123456789);
    assert_eq!(guild.name, "Test Guild");
    assert_eq!(guild.icon_hash, Some("abc123".to_string()));
    assert_eq!(guild.owner_id, 42);

    Ok(())
}

/// Tests upserting updates an existing guild.
///
/// Verifies that when a guild with the same guild_id already exists, the name,
/// icon and owner are replaced rather than a duplicate being created.
///
/// Expected: Ok with guild updated
#[tokio::test]
async fn updates_existing_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordGuild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::discord_guild::DiscordGuildFactory::new(db)
        .guild_id("123456789")
        .name("Old Name")
        .icon_hash(Some("old_icon".to_string()))
        .build()
        .await?;

    let repo = DiscordGuildRepository::new(db);
    let guild = repo.upsert(123456789, "New Name", None, 7).await?;

    assert_eq!(guild.name, "New Name");
    assert!(guild.icon_hash.is_none());
    assert_eq!(guild.owner_id, 7);

    let count = entity::prelude::DiscordGuild::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
