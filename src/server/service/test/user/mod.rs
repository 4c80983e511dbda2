use crate::{
    model::authorization::AuthorizationClaim,
    server::{error::AppError, service::user::UserService},
};
use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{self, discord_guild_role::DiscordGuildRoleFactory},
};

use super::context;

mod get_user_info;
