use super::*;

/// Tests deleting a single message.
///
/// Expected: Ok(DeletedMessage) preserving content and reason
#[tokio::test]
async fn deletes_and_records_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;

    let actions = RecordingGuildActions::new().with_messages(vec![fetched_message(50, 101, 7)]);
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::ModerationDeleteMessage],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let deleted = service.delete_message(&ctx, 50, 101, "Off topic").await?;

    assert_eq!(deleted.message_id, 101);
    assert_eq!(deleted.content, "message 101");
    assert_eq!(deleted.reason, "Off topic");
    assert_eq!(deleted.batch_id, None);
    assert_eq!(
        actions.calls(),
        vec![GuildCall::DeleteMessage {
            channel_id: 50,
            message_id: 101,
        }]
    );

    Ok(())
}

/// Tests deleting a message Discord doesn't know.
///
/// Expected: Err(ModerationError::MessageNotFound)
#[tokio::test]
async fn rejects_unknown_message() -> Result<(), AppError> {
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
        &[AuthorizationClaim::ModerationDeleteMessage],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service.delete_message(&ctx, 50, 101, "Off topic").await;

    assert!(matches!(
        result,
        Err(AppError::ModerationErr(ModerationError::MessageNotFound(101)))
    ));

    Ok(())
}
