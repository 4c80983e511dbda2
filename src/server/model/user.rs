use crate::{
    model::{
        infraction::InfractionCountsDto,
        user::{ChannelMessageCountDto, UserInfoDto},
    },
    server::model::discord::{
        ChannelMessageCount, DiscordGuildChannel, DiscordGuildRole, DiscordUser, GuildUser,
    },
};

/// Everything known about a user in one guild.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub user: DiscordUser,
    pub membership: Option<GuildUser>,
    /// Ordered by position, highest first.
    pub roles: Vec<DiscordGuildRole>,
    pub message_counts: Vec<ChannelMessageCount>,
    pub channels: Vec<DiscordGuildChannel>,
    pub infraction_counts: Option<InfractionCountsDto>,
}

impl UserInfo {
    pub fn into_dto(self) -> UserInfoDto {
        let channels = self.channels;
        let message_counts = self
            .message_counts
            .into_iter()
            .map(|count| ChannelMessageCountDto {
                channel_id: count.channel_id,
                channel_name: channels
                    .iter()
                    .find(|c| c.channel_id == count.channel_id)
                    .map(|c| c.name.clone()),
                count: count.count,
            })
            .collect();

        UserInfoDto {
            is_bot: self.user.is_bot,
            nickname: self.membership.as_ref().and_then(|m| m.nickname.clone()),
            is_member: self.membership.as_ref().is_some_and(|m| m.is_member),
            first_seen: self.membership.as_ref().map(|m| m.first_seen),
            last_seen: self.membership.as_ref().map(|m| m.last_seen),
            user: self.user.into_dto(),
            roles: self.roles.into_iter().map(|r| r.into_dto()).collect(),
            message_counts,
            infraction_counts: self.infraction_counts,
        }
    }
}
