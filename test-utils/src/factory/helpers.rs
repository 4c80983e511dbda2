//! Shared helpers for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique snowflakes in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1_000_000);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a Discord user and a current guild membership for them.
///
/// # Returns
/// - `Ok((user, guild_user))` - The mirrored user and their membership row
/// - `Err(DbErr)` - Database error during creation
pub async fn create_member(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<(entity::discord_user::Model, entity::guild_user::Model), DbErr> {
    let user = crate::factory::discord_user::create_user(db).await?;
    let member = crate::factory::guild_user::create_guild_user(db, guild_id, &user.discord_id).await?;

    Ok((user, member))
}

/// Creates a guild member holding the given role ids.
///
/// The roles themselves are not created; pair with the role factory when the
/// test needs role rows as well.
pub async fn create_member_with_roles(
    db: &DatabaseConnection,
    guild_id: &str,
    role_ids: &[&str],
) -> Result<entity::discord_user::Model, DbErr> {
    let (user, _) = create_member(db, guild_id).await?;

    for role_id in role_ids {
        crate::factory::guild_user::create_guild_user_role(db, guild_id, &user.discord_id, role_id)
            .await?;
    }

    Ok(user)
}
