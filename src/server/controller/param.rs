use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::util::parse::parse_user_reference;

pub const DEFAULT_PER_PAGE: u64 = 25;
pub const MAX_PER_PAGE: u64 = 100;
/// Highest page number served; keeps the row offset well inside `u64`.
pub const MAX_PAGE: u64 = 10_000;

#[derive(Deserialize, IntoParams)]
pub struct PaginationParam {
    /// Zero-based page number.
    #[serde(default)]
    pub page: u64,
    /// Items per page, capped at 100.
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl PaginationParam {
    pub fn page(&self) -> u64 {
        self.page.min(MAX_PAGE)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

/// Parses an optional user id query value, accepting mentions as well.
pub fn parse_user_param(value: Option<&str>) -> Option<u64> {
    value.and_then(parse_user_reference)
}
