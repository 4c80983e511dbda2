use super::*;

/// Tests designating a rank role and listing it.
///
/// Expected: Ok(DesignatedRoleMapping) visible through `roles_for`
#[tokio::test]
async fn adds_role_designation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let role = factory::create_guild_role(db, &guild.guild_id).await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[
            AuthorizationClaim::DesignatedRoleMappingCreate,
            AuthorizationClaim::DesignatedRoleMappingRead,
        ],
    );
    let role_id: u64 = role.role_id.parse().unwrap();

    let service = DesignationService::new(db);
    let mapping = service
        .add_designated_role(&ctx, role_id, DesignatedRoleType::Rank)
        .await?;

    assert_eq!(mapping.designation, DesignatedRoleType::Rank);
    assert_eq!(
        service.roles_for(ctx.guild_id, DesignatedRoleType::Rank).await?,
        vec![role_id]
    );
    assert_eq!(service.get_designated_roles(&ctx).await?.len(), 1);

    Ok(())
}

/// Tests removing a role designation.
///
/// Expected: Ok(()) and the role no longer designated
#[tokio::test]
async fn removes_role_designation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let role = factory::create_guild_role(db, &guild.guild_id).await?;
    let mapping =
        factory::create_designated_role(db, &guild.guild_id, &role.role_id, "Pingable").await?;
    let (admin, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(
        &guild.guild_id,
        &admin.discord_id,
        &[],
        &[AuthorizationClaim::DesignatedRoleMappingDelete],
    );

    let service = DesignationService::new(db);
    service.remove_designated_role(&ctx, mapping.id).await?;

    assert!(service
        .roles_for(ctx.guild_id, DesignatedRoleType::Pingable)
        .await?
        .is_empty());

    Ok(())
}

/// Tests designating without the create claim.
///
/// Expected: Err(AppError::AuthErr)
#[tokio::test]
async fn requires_create_claim() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_authorization_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let role = factory::create_guild_role(db, &guild.guild_id).await?;
    let (user, _) = factory::create_member(db, &guild.guild_id).await?;
    let ctx = context(&guild.guild_id, &user.discord_id, &[], &[]);

    let service = DesignationService::new(db);
    let result = service
        .add_designated_role(&ctx, role.role_id.parse().unwrap(), DesignatedRoleType::Rank)
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(_))));

    Ok(())
}
