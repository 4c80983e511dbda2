use super::*;

/// Tests recording the same message twice.
///
/// Expected: Ok with a single row
#[tokio::test]
async fn ignores_duplicate_messages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DiscordMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DiscordMessageRepository::new(db);
    let now = Utc::now();
    repo.create(1, 10, 20, 30, now).await?;
    repo.create(1, 10, 20, 30, now).await?;

    let count = entity::prelude::DiscordMessage::find().count(db).await?;
    assert_eq!(count, 1);

    repo.delete(1).await?;
    let count = entity::prelude::DiscordMessage::find().count(db).await?;
    assert_eq!(count, 0);

    Ok(())
}
