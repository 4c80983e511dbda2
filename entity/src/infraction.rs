use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "infraction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub infraction_type: String,
    pub reason: String,
    /// Length of a temporary mute or ban in seconds.
    pub duration_secs: Option<i64>,
    /// `created_at + duration_secs`, kept so the expiry sweep can filter on it.
    pub expires_at: Option<DateTimeUtc>,
    pub subject_id: String,
    pub created_by_id: String,
    pub created_at: DateTimeUtc,
    pub rescinded_by_id: Option<String>,
    pub rescinded_at: Option<DateTimeUtc>,
    pub rescind_reason: Option<String>,
    pub deleted_by_id: Option<String>,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
