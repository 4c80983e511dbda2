//! Modix Test Utils
//!
//! Shared testing utilities for the Modix bot and web API. Provides a builder for
//! test contexts backed by in-memory SQLite databases, factories for every entity
//! in the datastore, and builders for Serenity objects deserialized from JSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn records_infraction() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_moderation_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let infraction = factory::create_infraction(db, "1", "2").await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
