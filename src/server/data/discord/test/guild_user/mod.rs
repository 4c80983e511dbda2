use crate::server::data::discord::guild_user::GuildUserRepository;
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod touch_last_seen;
mod upsert;
