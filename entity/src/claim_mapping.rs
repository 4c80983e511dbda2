use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "claim_mapping")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    /// `Granted` or `Denied`.
    pub mapping_type: String,
    pub role_id: Option<String>,
    pub user_id: Option<String>,
    pub claim: String,
    pub created_by_id: String,
    pub created_at: DateTimeUtc,
    pub rescinded_by_id: Option<String>,
    pub rescinded_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
