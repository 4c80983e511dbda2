use super::*;

/// Tests replacing a role's mappings.
///
/// Expected: Ok(Vec<ClaimMapping>) with only the new mappings active
#[tokio::test]
async fn replaces_role_mappings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let role = factory::create_guild_role(db, &guild.guild_id).await?;
    factory::create_role_claim(db, &guild.guild_id, &role.role_id, "ModerationBan").await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;

    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[
            AuthorizationClaim::AuthorizationConfigure,
            AuthorizationClaim::ModerationWarn,
            AuthorizationClaim::ModerationMute,
        ],
    );

    let service = AuthorizationService::new(db);
    let mappings = service
        .modify_claims(
            &ctx,
            ClaimTarget::Role(role.role_id.parse().unwrap()),
            &[AuthorizationClaim::ModerationWarn],
            &[AuthorizationClaim::ModerationMute],
        )
        .await?;

    assert_eq!(mappings.len(), 2);

    let active = service.get_claim_mappings(&ctx).await?;
    assert_eq!(active.len(), 2);
    assert!(active.iter().any(|m| m.claim == AuthorizationClaim::ModerationWarn
        && m.mapping_type == ClaimMappingType::Granted));
    assert!(active.iter().any(|m| m.claim == AuthorizationClaim::ModerationMute
        && m.mapping_type == ClaimMappingType::Denied));
    assert!(!active
        .iter()
        .any(|m| m.claim == AuthorizationClaim::ModerationBan));

    Ok(())
}

/// Tests granting a claim the caller doesn't hold.
///
/// Expected: Err(AuthError::MissingClaims) naming the claim
#[tokio::test]
async fn rejects_escalation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;

    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[AuthorizationClaim::AuthorizationConfigure],
    );

    let service = AuthorizationService::new(db);
    let result = service
        .modify_claims(
            &ctx,
            ClaimTarget::User(ctx.user_id),
            &[AuthorizationClaim::ModerationBan],
            &[],
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingClaims(claims)))
            if claims == vec![AuthorizationClaim::ModerationBan]
    ));

    Ok(())
}

/// Tests granting and denying the same claim.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_conflicting_mappings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;

    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[
            AuthorizationClaim::AuthorizationConfigure,
            AuthorizationClaim::ModerationWarn,
        ],
    );

    let service = AuthorizationService::new(db);
    let result = service
        .modify_claims(
            &ctx,
            ClaimTarget::User(ctx.user_id),
            &[AuthorizationClaim::ModerationWarn],
            &[AuthorizationClaim::ModerationWarn],
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests modifying a role of another guild.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_role_of_other_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let other = factory::create_guild(db).await?;
    let foreign_role = factory::create_guild_role(db, &other.guild_id).await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;

    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[AuthorizationClaim::AuthorizationConfigure],
    );

    let service = AuthorizationService::new(db);
    let result = service
        .modify_claims(
            &ctx,
            ClaimTarget::Role(foreign_role.role_id.parse().unwrap()),
            &[],
            &[],
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
