use crate::server::data::discord::user::DiscordUserRepository;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory, serenity::create_test_user};

mod upsert;
