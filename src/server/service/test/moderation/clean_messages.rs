use super::*;

/// Tests cleaning a channel filtered by author.
///
/// Verifies that only the author's messages among the fetched ones are
/// deleted, and that each is recorded in one batch.
///
/// Expected: Ok(DeletedMessageBatch) with two messages
#[tokio::test]
async fn deletes_authors_recent_messages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;

    let actions = RecordingGuildActions::new().with_messages(vec![
        fetched_message(50, 104, 7),
        fetched_message(50, 103, 8),
        fetched_message(50, 102, 7),
        fetched_message(50, 101, 7),
        fetched_message(51, 100, 7),
    ]);
    let notifications = NotificationPublisher::default();
    let mut receiver = notifications.subscribe();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[
            AuthorizationClaim::ModerationMassDeleteMessages,
            AuthorizationClaim::LogViewDeletedMessages,
        ],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let batch = service.clean_messages(&ctx, 50, 3, Some(7)).await?;

    assert_eq!(batch.channel_id, 50);
    assert_eq!(batch.message_count, 2);
    assert_eq!(
        actions.calls(),
        vec![GuildCall::DeleteMessages {
            channel_id: 50,
            message_ids: vec![104, 102],
        }]
    );

    let recorded = service
        .search_deleted_messages(
            &ctx,
            &DeletedMessageSearchCriteria {
                batch_id: Some(batch.id),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(recorded.total, 2);
    assert!(recorded.items.iter().all(|m| m.author_id == 7));

    assert!(matches!(
        receiver.try_recv(),
        Ok(Notification::MessagesDeleted { batch_id: Some(id), ref messages, .. })
            if id == batch.id && messages.len() == 2
    ));

    Ok(())
}

/// Tests cleaning with a count outside 1..=100.
///
/// Expected: Err(ModerationError::InvalidCleanCount) for both bounds
#[tokio::test]
async fn rejects_invalid_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationMassDeleteMessages],
    );

    let service = ModerationService::new(db, &actions, &notifications);

    for count in [0, 101] {
        let result = service.clean_messages(&ctx, 50, count, None).await;
        assert!(matches!(
            result,
            Err(AppError::ModerationErr(ModerationError::InvalidCleanCount { .. }))
        ));
    }
    assert!(actions.calls().is_empty());

    Ok(())
}
