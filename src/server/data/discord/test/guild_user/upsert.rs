use super::*;

/// Tests recording a new member.
///
/// Expected: Ok with a current membership
#[tokio::test]
async fn creates_membership() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let user = factory::create_user(db).await?;

    let repo = GuildUserRepository::new(db);
    let member = repo
        .upsert(
            guild.guild_id.parse().unwrap(),
            user.discord_id.parse().unwrap(),
            Some("nick".to_string()),
        )
        .await?;

    assert!(member.is_member);
    assert_eq!(member.nickname, Some("nick".to_string()));

    Ok(())
}

/// Tests a returning member keeps their original first seen time.
///
/// Verifies that a user who left and rejoined is marked as a member again
/// without a second row being created.
///
/// Expected: Ok with `first_seen` unchanged and `is_member` restored
#[tokio::test]
async fn rejoining_keeps_first_seen() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let user = factory::create_user(db).await?;
    let original = factory::guild_user::GuildUserFactory::new(db, &guild.guild_id, &user.discord_id)
        .is_member(false)
        .build()
        .await?;

    let repo = GuildUserRepository::new(db);
    let member = repo
        .upsert(
            guild.guild_id.parse().unwrap(),
            user.discord_id.parse().unwrap(),
            None,
        )
        .await?;

    assert!(member.is_member);
    assert_eq!(member.first_seen, original.first_seen);

    let count = entity::prelude::GuildUser::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}
