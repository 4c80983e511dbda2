use super::*;

/// Tests activity moves last seen forward but never back.
///
/// Expected: Ok with last seen at the latest activity
#[tokio::test]
async fn only_moves_forward() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let user = factory::create_user(db).await?;
    let start = Utc::now() - Duration::days(2);
    factory::guild_user::GuildUserFactory::new(db, &guild.guild_id, &user.discord_id)
        .last_seen(start)
        .build()
        .await?;
    let guild_id = guild.guild_id.parse().unwrap();
    let user_id = user.discord_id.parse().unwrap();

    let repo = GuildUserRepository::new(db);
    let later = start + Duration::days(1);
    repo.touch_last_seen(guild_id, user_id, later).await?;
    repo.touch_last_seen(guild_id, user_id, start - Duration::days(1))
        .await?;

    let member = repo.find(guild_id, user_id).await?.unwrap();
    // Compare timestamps (allowing for small precision differences)
    let diff = (member.last_seen - later).num_milliseconds().abs();
    assert!(diff < 1000, "last_seen should match the latest activity");

    Ok(())
}
