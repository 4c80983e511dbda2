use sea_orm::DbErr;
use std::str::FromStr;

use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a stored snowflake column at the repository boundary.
pub fn parse_snowflake(value: &str, column: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", column, e)))
}

/// Parses an optional stored snowflake column.
pub fn parse_optional_snowflake(value: Option<&str>, column: &str) -> Result<Option<u64>, DbErr> {
    value.map(|value| parse_snowflake(value, column)).transpose()
}

/// Parses a stored enumeration name at the repository boundary.
pub fn parse_enum<T: FromStr>(value: &str, column: &str) -> Result<T, DbErr> {
    T::from_str(value)
        .map_err(|_| DbErr::Custom(format!("Unknown {} '{}'", column, value)))
}

/// Parses a Discord user reference given as `<@id>`, `<@!id>` or a raw id.
pub fn parse_user_reference(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    let id = trimmed
        .strip_prefix("<@!")
        .or_else(|| trimmed.strip_prefix("<@"))
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(trimmed);

    id.parse::<u64>().ok().filter(|id| *id != 0)
}
