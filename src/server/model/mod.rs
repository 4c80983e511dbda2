//! Domain models and operation parameter types.
//!
//! Repositories convert SeaORM entity models into these types at their boundary,
//! so services and controllers never handle raw entity rows. Each model provides
//! `into_dto()` for the web API where one is exposed.

pub mod authorization;
pub mod designation;
pub mod discord;
pub mod infraction;
pub mod message;
pub mod promotion;
pub mod user;

/// One page of results with the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}
