use crate::server::data::discord::role::DiscordGuildRoleRepository;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use serenity::all::RoleId;
use std::collections::HashMap;
use test_utils::{
    builder::TestBuilder,
    factory,
    serenity::{create_test_role, create_test_role_with_permissions},
};

mod sync_guild_roles;
mod upsert;
