use super::*;

/// Tests searching hides deleted infractions by default.
///
/// Expected: Ok with only non-deleted infractions counted
#[tokio::test]
async fn excludes_deleted_by_default() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    factory::create_infraction(db, &guild.guild_id, "7").await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .rescinded()
        .build()
        .await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .deleted()
        .build()
        .await?;

    let repo = InfractionRepository::new(db);
    let result = repo
        .search(guild_id, &InfractionSearchCriteria::default(), 0, 10)
        .await?;
    assert_eq!(result.total, 2);

    let deleted = repo
        .search(
            guild_id,
            &InfractionSearchCriteria {
                is_deleted: Some(true),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(deleted.total, 1);

    Ok(())
}

/// Tests filtering by subject, type and rescinded state.
///
/// Expected: Ok with the single matching infraction
#[tokio::test]
async fn filters_by_criteria() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let target = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Ban")
        .build()
        .await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .infraction_type("Ban")
        .rescinded()
        .build()
        .await?;
    factory::infraction::InfractionFactory::new(db, &guild.guild_id, "8")
        .infraction_type("Ban")
        .build()
        .await?;
    factory::create_infraction(db, &guild.guild_id, "7").await?;

    let repo = InfractionRepository::new(db);
    let result = repo
        .search(
            guild_id,
            &InfractionSearchCriteria {
                types: vec![InfractionType::Ban],
                subject_id: Some(7),
                is_rescinded: Some(false),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, target.id);

    Ok(())
}

/// Tests results are paged newest first.
///
/// Expected: Ok with the second page holding the oldest infraction
#[tokio::test]
async fn pages_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let guild_id: u64 = guild.guild_id.parse().unwrap();
    let now = Utc::now();
    let oldest = factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
        .created_at(now - Duration::days(3))
        .build()
        .await?;
    for days in [2, 1] {
        factory::infraction::InfractionFactory::new(db, &guild.guild_id, "7")
            .created_at(now - Duration::days(days))
            .build()
            .await?;
    }

    let repo = InfractionRepository::new(db);
    let page = repo
        .search(guild_id, &InfractionSearchCriteria::default(), 1, 2)
        .await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, oldest.id);

    Ok(())
}

/// Tests infractions from other guilds are never returned.
///
/// Expected: Ok with zero results
#[tokio::test]
async fn scopes_to_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other = factory::create_guild(db).await?;
    factory::create_infraction(db, &other.guild_id, "7").await?;

    let repo = InfractionRepository::new(db);
    let result = repo
        .search(
            guild.guild_id.parse().unwrap(),
            &InfractionSearchCriteria::default(),
            0,
            10,
        )
        .await?;

    assert_eq!(result.total, 0);

    Ok(())
}
