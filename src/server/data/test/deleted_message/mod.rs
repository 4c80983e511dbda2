use crate::server::{
    data::deleted_message::DeletedMessageRepository,
    model::message::{DeletedMessageSearchCriteria, FetchedMessage},
};
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod batch;
