use crate::server::{
    data::discord::{DiscordUserRepository, GuildUserRepository, GuildUserRoleRepository},
    error::AppError,
    service::discord::GuildMemberService,
};
use test_utils::{
    builder::TestBuilder,
    factory::{self, discord_user::DiscordUserFactory, guild_user::GuildUserFactory},
    serenity::create_test_member,
};

mod member;
