use super::*;

/// Tests filtering deleted messages by author and content.
///
/// Expected: Ok(Paginated) with the matching message of this guild only
#[tokio::test]
async fn filters_by_author_and_content() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other_guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    let matching =
        factory::create_deleted_message(db, &guild.guild_id, "50", "7", "buy cheap gold", None)
            .await?;
    factory::create_deleted_message(db, &guild.guild_id, "50", "7", "hello there", None).await?;
    factory::create_deleted_message(db, &guild.guild_id, "50", "8", "cheap gold here", None)
        .await?;
    factory::create_deleted_message(db, &other_guild.guild_id, "60", "7", "cheap gold", None)
        .await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[AuthorizationClaim::LogViewDeletedMessages],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let results = service
        .search_deleted_messages(
            &ctx,
            &DeletedMessageSearchCriteria {
                author_id: Some(7),
                content: Some("gold".to_string()),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(results.total, 1);
    assert_eq!(
        results.items[0].message_id,
        matching.message_id.parse::<u64>().unwrap()
    );

    Ok(())
}

/// Tests searching deleted messages without the log claim.
///
/// Moderation claims alone do not grant access to deleted content.
///
/// Expected: Err(AuthError::MissingClaims) naming the log claim
#[tokio::test]
async fn requires_log_claim() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (moderator, _) = factory::create_member(db, &guild.guild_id).await?;
    factory::create_deleted_message(db, &guild.guild_id, "50", "7", "secret", None).await?;

    let actions = RecordingGuildActions::new();
    let notifications = NotificationPublisher::default();
    let ctx = context(
        &guild.guild_id,
        &moderator.discord_id,
        &[],
        &[
            AuthorizationClaim::ModerationRead,
            AuthorizationClaim::ModerationDeleteMessage,
        ],
    );

    let service = ModerationService::new(db, &actions, &notifications);
    let result = service
        .search_deleted_messages(&ctx, &DeletedMessageSearchCriteria::default(), 0, 10)
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::MissingClaims(missing))) => {
            assert_eq!(missing, vec![AuthorizationClaim::LogViewDeletedMessages]);
        }
        other => panic!("expected missing claims, got {:?}", other.map(|p| p.total)),
    }

    Ok(())
}
