use super::*;

/// Tests a batch reports how many messages were removed with it.
///
/// Expected: Ok with a message count of two
#[tokio::test]
async fn counts_batch_messages() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DeletedMessageRepository::new(db);
    let batch = repo.create_batch(1, 20, 5).await?;
    for message_id in [100, 101] {
        let message = FetchedMessage {
            message_id,
            channel_id: 20,
            author_id: 7,
            content: "spam".to_string(),
            timestamp: Utc::now(),
        };
        repo.create(1, &message, "clean", 5, Some(batch.id)).await?;
    }

    let stored = repo.find_batch(batch.id).await?.unwrap();
    assert_eq!(stored.message_count, 2);
    assert_eq!(stored.channel_id, 20);

    assert!(repo.find_batch(batch.id + 1).await?.is_none());

    Ok(())
}
