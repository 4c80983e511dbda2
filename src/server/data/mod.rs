//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Repositories are generic over `ConnectionTrait` so the same repository can run against
//! the shared connection or inside a transaction started by a service.

pub mod claim_mapping;
pub mod deleted_message;
pub mod designation;
pub mod discord;
pub mod infraction;
pub mod moderation_action;
pub mod promotion;

use sea_orm::{DbErr, SqlErr};

/// Whether the error is a unique index rejecting a duplicate row.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod test;
