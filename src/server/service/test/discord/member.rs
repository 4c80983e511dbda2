use super::*;

/// Tests mirroring a member seen for the first time.
///
/// Expected: Ok(GuildUser) with the user, nickname and roles stored
#[tokio::test]
async fn upserts_new_member() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let role = factory::create_guild_role(db, &guild.guild_id).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let role_id: u64 = role.role_id.parse().unwrap();
    let user_id = factory::helpers::next_id();

    let member = create_test_member(guild_id, user_id, "newbie", Some("Newbie"), &[role_id]);

    let service = GuildMemberService::new(db);
    let guild_user = service.upsert_member(&member).await?;

    assert!(guild_user.is_member);
    assert_eq!(guild_user.nickname.as_deref(), Some("Newbie"));
    assert!(DiscordUserRepository::new(db)
        .find_by_id(user_id)
        .await?
        .is_some_and(|user| user.username == "newbie"));
    assert_eq!(
        GuildUserRoleRepository::new(db)
            .get_role_ids(guild_id, user_id)
            .await?,
        vec![role_id]
    );

    Ok(())
}

/// Tests re-syncing a member whose roles changed.
///
/// Expected: Ok(GuildUser) with the stale role replaced
#[tokio::test]
async fn replaces_member_roles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let old_role = factory::create_guild_role(db, &guild.guild_id).await?;
    let new_role = factory::create_guild_role(db, &guild.guild_id).await?;
    let user =
        factory::create_member_with_roles(db, &guild.guild_id, &[&old_role.role_id]).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let user_id: u64 = user.discord_id.parse().unwrap();
    let new_role_id: u64 = new_role.role_id.parse().unwrap();

    let member = create_test_member(guild_id, user_id, &user.username, None, &[new_role_id]);

    let service = GuildMemberService::new(db);
    service.upsert_member(&member).await?;

    assert_eq!(
        GuildUserRoleRepository::new(db)
            .get_role_ids(guild_id, user_id)
            .await?,
        vec![new_role_id]
    );

    Ok(())
}

/// Tests a member leaving the guild.
///
/// Verifies that the membership row is kept for history but marked as left
/// and the role set is cleared.
///
/// Expected: Ok(()) with is_member false and no roles
#[tokio::test]
async fn marks_member_as_left() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let role = factory::create_guild_role(db, &guild.guild_id).await?;
    let user = factory::create_member_with_roles(db, &guild.guild_id, &[&role.role_id]).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let user_id: u64 = user.discord_id.parse().unwrap();

    let service = GuildMemberService::new(db);
    service.remove_member(guild_id, user_id).await?;

    let membership = GuildUserRepository::new(db).find(guild_id, user_id).await?;
    assert!(membership.is_some_and(|m| !m.is_member));
    assert!(GuildUserRoleRepository::new(db)
        .get_role_ids(guild_id, user_id)
        .await?
        .is_empty());

    Ok(())
}

/// Tests searching members by username, global name and nickname.
///
/// Expected: Ok(Vec) of current members matching case-insensitively, sorted by username
#[tokio::test]
async fn searches_current_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;

    let by_username = DiscordUserFactory::new(db).username("zeldaFan").build().await?;
    GuildUserFactory::new(db, &guild.guild_id, &by_username.discord_id)
        .build()
        .await?;
    let by_global = DiscordUserFactory::new(db)
        .username("abc")
        .global_name(Some("Zelda".to_string()))
        .build()
        .await?;
    GuildUserFactory::new(db, &guild.guild_id, &by_global.discord_id)
        .build()
        .await?;
    let by_nickname = DiscordUserFactory::new(db).username("mno").build().await?;
    GuildUserFactory::new(db, &guild.guild_id, &by_nickname.discord_id)
        .nickname(Some("ZELDA".to_string()))
        .build()
        .await?;
    let former = DiscordUserFactory::new(db).username("zelda_old").build().await?;
    GuildUserFactory::new(db, &guild.guild_id, &former.discord_id)
        .is_member(false)
        .build()
        .await?;
    let unrelated = DiscordUserFactory::new(db).username("link").build().await?;
    GuildUserFactory::new(db, &guild.guild_id, &unrelated.discord_id)
        .build()
        .await?;

    let service = GuildMemberService::new(db);
    let results = service
        .search_users(guild.guild_id.parse().unwrap(), " zelda ", None)
        .await?;

    let usernames: Vec<&str> = results.iter().map(|(u, _)| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["abc", "mno", "zeldaFan"]);

    let limited = service
        .search_users(guild.guild_id.parse().unwrap(), "zelda", Some(1))
        .await?;
    assert_eq!(limited.len(), 1);

    Ok(())
}

/// Tests pruning members missing from a complete member list.
///
/// Expected: Ok(1) with only the absent member marked as left
#[tokio::test]
async fn prunes_departed_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_discord_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (stayed, _) = factory::create_member(db, &guild.guild_id).await?;
    let (departed, _) = factory::create_member(db, &guild.guild_id).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let stayed_id: u64 = stayed.discord_id.parse().unwrap();
    let departed_id: u64 = departed.discord_id.parse().unwrap();

    let service = GuildMemberService::new(db);
    let removed = service
        .prune_departed(guild_id, &[stayed_id].into_iter().collect())
        .await?;

    assert_eq!(removed, 1);
    let repo = GuildUserRepository::new(db);
    assert!(repo.find(guild_id, stayed_id).await?.is_some_and(|m| m.is_member));
    assert!(repo.find(guild_id, departed_id).await?.is_some_and(|m| !m.is_member));

    Ok(())
}
