use super::*;

/// Tests upserting a user seen for the first time.
///
/// Expected: Ok with the profile stored and both timestamps set
#[tokio::test]
async fn inserts_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiscordUserRepository::new(db);
    let user = repo
        .upsert(&create_test_user(123456789, "newcomer", false))
        .await?;

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.username, "newcomer");
    assert!(!user.is_bot);
    assert_eq!(user.created_at, user.updated_at);

    Ok(())
}

/// Tests upserting refreshes the profile of a known user.
///
/// Verifies the username changes while `created_at` is kept from the first
/// insert and no duplicate row is created.
///
/// Expected: Ok with one row holding the new username
#[tokio::test]
async fn updates_existing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::discord_user::DiscordUserFactory::new(db)
        .discord_id("123456789")
        .username("old_name")
        .build()
        .await?;

    let repo = DiscordUserRepository::new(db);
    let user = repo
        .upsert(&create_test_user(123456789, "new_name", false))
        .await?;

    assert_eq!(user.username, "new_name");
    assert_eq!(user.created_at, existing.created_at);

    let count = entity::prelude::DiscordUser::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests upserting a bot account.
///
/// Expected: Ok with `is_bot` set
#[tokio::test]
async fn stores_bot_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordUser)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiscordUserRepository::new(db);
    let user = repo.upsert(&create_test_user(42, "modix", true)).await?;

    assert!(user.is_bot);

    Ok(())
}
