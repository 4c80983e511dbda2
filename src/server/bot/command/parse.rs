//! Turning command tokens into a `BotCommand`.

use chrono::Duration;
use std::str::FromStr;
use thiserror::Error;

use crate::{
    model::{infraction::InfractionType, promotion::PromotionSentiment},
    server::util::parse::parse_user_reference,
};

#[derive(Debug, Clone, PartialEq)]
pub enum BotCommand {
    Help,
    Infract {
        infraction_type: InfractionType,
        subject_id: u64,
        duration: Option<Duration>,
        reason: String,
    },
    Unmute {
        subject_id: u64,
    },
    Unban {
        subject_id: u64,
    },
    RescindInfraction {
        infraction_id: i32,
    },
    DeleteInfraction {
        infraction_id: i32,
    },
    Infractions {
        subject_id: u64,
    },
    Clean {
        count: u64,
        author_id: Option<u64>,
    },
    Info {
        user_id: u64,
    },
    Claims {
        user_id: Option<u64>,
    },
    ListCampaigns,
    Nominate {
        subject_id: u64,
        comment: String,
    },
    Comment {
        campaign_id: i32,
        sentiment: PromotionSentiment,
        content: String,
    },
    AcceptCampaign {
        campaign_id: i32,
        force: bool,
    },
    RejectCampaign {
        campaign_id: i32,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandParseError {
    #[error("Unknown command `{0}`, try `help`")]
    UnknownCommand(String),

    #[error("Usage: `{0}`")]
    Usage(&'static str),

    #[error("`{0}` is not a user mention or id")]
    InvalidUser(String),

    #[error("`{0}` is not a valid duration, try something like `1h 30m`")]
    InvalidDuration(String),

    #[error("`{0}` is not a valid id")]
    InvalidId(String),

    #[error("`{0}` is not a sentiment, use approve, abstain or oppose")]
    InvalidSentiment(String),
}

pub const HELP_TEXT: &str = "\
**Moderation**
`note <user> <reason>`, `warn <user> <reason>`
`mute <user> <reason>`, `tempmute <user> <duration> <reason>`, `unmute <user>`
`ban <user> <reason>`, `tempban <user> <duration> <reason>`, `unban <user>`
`infraction rescind <id>`, `infraction delete <id>`, `infractions <user>`
`clean <count> [user]`
**Users**
`info <user>`, `claims [user]`
**Promotions**
`promotions list`, `promotions nominate <user> <comment>`
`promotions comment <id> <approve|abstain|oppose> <comment>`
`promotions accept <id> [force]`, `promotions reject <id>`";

impl BotCommand {
    /// Parses tokens produced by `prefix::tokenize`.
    pub fn parse(tokens: &[String]) -> Result<Self, CommandParseError> {
        let Some((name, args)) = tokens.split_first() else {
            return Err(CommandParseError::Usage("help"));
        };

        match name.to_lowercase().as_str() {
            "help" => Ok(Self::Help),
            "note" => parse_infraction(InfractionType::Notice, false, args, "note <user> <reason>"),
            "warn" => parse_infraction(InfractionType::Warning, false, args, "warn <user> <reason>"),
            "mute" => parse_infraction(InfractionType::Mute, false, args, "mute <user> <reason>"),
            "tempmute" => parse_infraction(
                InfractionType::Mute,
                true,
                args,
                "tempmute <user> <duration> <reason>",
            ),
            "ban" => parse_infraction(InfractionType::Ban, false, args, "ban <user> <reason>"),
            "tempban" => parse_infraction(
                InfractionType::Ban,
                true,
                args,
                "tempban <user> <duration> <reason>",
            ),
            "unmute" => Ok(Self::Unmute {
                subject_id: user_arg(args.first(), "unmute <user>")?,
            }),
            "unban" => Ok(Self::Unban {
                subject_id: user_arg(args.first(), "unban <user>")?,
            }),
            "infraction" => parse_infraction_subcommand(args),
            "infractions" => Ok(Self::Infractions {
                subject_id: user_arg(args.first(), "infractions <user>")?,
            }),
            "clean" => {
                const USAGE: &str = "clean <count> [user]";
                let count = args
                    .first()
                    .ok_or(CommandParseError::Usage(USAGE))?
                    .parse::<u64>()
                    .map_err(|_| CommandParseError::Usage(USAGE))?;
                let author_id = args.get(1).map(|arg| user(arg)).transpose()?;

                Ok(Self::Clean { count, author_id })
            }
            "info" => Ok(Self::Info {
                user_id: user_arg(args.first(), "info <user>")?,
            }),
            "claims" => Ok(Self::Claims {
                user_id: args.first().map(|arg| user(arg)).transpose()?,
            }),
            "promotions" | "promotion" => parse_promotions_subcommand(args),
            other => Err(CommandParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_infraction(
    infraction_type: InfractionType,
    timed: bool,
    args: &[String],
    usage: &'static str,
) -> Result<BotCommand, CommandParseError> {
    let subject_id = user_arg(args.first(), usage)?;

    let (duration, reason_args) = if timed {
        let raw = args.get(1).ok_or(CommandParseError::Usage(usage))?;
        (Some(parse_duration(raw)?), args.get(2..).unwrap_or_default())
    } else {
        (None, args.get(1..).unwrap_or_default())
    };

    let reason = reason_args.join(" ");
    if reason.trim().is_empty() {
        return Err(CommandParseError::Usage(usage));
    }

    Ok(BotCommand::Infract {
        infraction_type,
        subject_id,
        duration,
        reason,
    })
}

fn parse_infraction_subcommand(args: &[String]) -> Result<BotCommand, CommandParseError> {
    const USAGE: &str = "infraction <rescind|delete> <id>";

    let sub = args.first().ok_or(CommandParseError::Usage(USAGE))?;
    let infraction_id = id_arg(args.get(1), USAGE)?;

    match sub.to_lowercase().as_str() {
        "rescind" => Ok(BotCommand::RescindInfraction { infraction_id }),
        "delete" => Ok(BotCommand::DeleteInfraction { infraction_id }),
        _ => Err(CommandParseError::Usage(USAGE)),
    }
}

fn parse_promotions_subcommand(args: &[String]) -> Result<BotCommand, CommandParseError> {
    const USAGE: &str = "promotions <list|nominate|comment|accept|reject>";

    let Some((sub, args)) = args.split_first() else {
        return Ok(BotCommand::ListCampaigns);
    };

    match sub.to_lowercase().as_str() {
        "list" => Ok(BotCommand::ListCampaigns),
        "nominate" => {
            const NOMINATE_USAGE: &str = "promotions nominate <user> <comment>";
            let subject_id = user_arg(args.first(), NOMINATE_USAGE)?;
            let comment = args.get(1..).unwrap_or_default().join(" ");
            if comment.trim().is_empty() {
                return Err(CommandParseError::Usage(NOMINATE_USAGE));
            }

            Ok(BotCommand::Nominate {
                subject_id,
                comment,
            })
        }
        "comment" => {
            const COMMENT_USAGE: &str =
                "promotions comment <id> <approve|abstain|oppose> <comment>";
            let campaign_id = id_arg(args.first(), COMMENT_USAGE)?;
            let sentiment = parse_sentiment(args.get(1).ok_or(CommandParseError::Usage(COMMENT_USAGE))?)?;
            let content = args.get(2..).unwrap_or_default().join(" ");
            if content.trim().is_empty() {
                return Err(CommandParseError::Usage(COMMENT_USAGE));
            }

            Ok(BotCommand::Comment {
                campaign_id,
                sentiment,
                content,
            })
        }
        "accept" => {
            const ACCEPT_USAGE: &str = "promotions accept <id> [force]";
            let campaign_id = id_arg(args.first(), ACCEPT_USAGE)?;
            let force = match args.get(1).map(|arg| arg.to_lowercase()) {
                None => false,
                Some(arg) if arg == "force" || arg == "true" => true,
                Some(_) => return Err(CommandParseError::Usage(ACCEPT_USAGE)),
            };

            Ok(BotCommand::AcceptCampaign { campaign_id, force })
        }
        "reject" => Ok(BotCommand::RejectCampaign {
            campaign_id: id_arg(args.first(), "promotions reject <id>")?,
        }),
        _ => Err(CommandParseError::Usage(USAGE)),
    }
}

fn user(arg: &str) -> Result<u64, CommandParseError> {
    parse_user_reference(arg).ok_or_else(|| CommandParseError::InvalidUser(arg.to_string()))
}

fn user_arg(arg: Option<&String>, usage: &'static str) -> Result<u64, CommandParseError> {
    user(arg.ok_or(CommandParseError::Usage(usage))?)
}

fn id_arg(arg: Option<&String>, usage: &'static str) -> Result<i32, CommandParseError> {
    let arg = arg.ok_or(CommandParseError::Usage(usage))?;
    let trimmed = arg.trim_start_matches('#');

    trimmed
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| CommandParseError::InvalidId(arg.to_string()))
}

fn parse_duration(raw: &str) -> Result<Duration, CommandParseError> {
    humantime::parse_duration(raw)
        .ok()
        .and_then(|duration| Duration::from_std(duration).ok())
        .filter(|duration| *duration > Duration::zero())
        .ok_or_else(|| CommandParseError::InvalidDuration(raw.to_string()))
}

fn parse_sentiment(raw: &str) -> Result<PromotionSentiment, CommandParseError> {
    let normalized = match raw.to_lowercase().as_str() {
        "approve" | "for" => "Approve",
        "abstain" => "Abstain",
        "oppose" | "against" => "Oppose",
        _ => return Err(CommandParseError::InvalidSentiment(raw.to_string())),
    };

    PromotionSentiment::from_str(normalized)
        .map_err(|_| CommandParseError::InvalidSentiment(raw.to_string()))
}
