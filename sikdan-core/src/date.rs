//! Date formatting shared by the front end and request building.

use chrono::Local;

use crate::model::DateToken;

/// Format of the date typed by the user, e.g. `2024-03-15`.
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Turn a `YYYY-MM-DD` input into the upstream date token by dropping every `-`.
#[must_use]
pub fn to_api_token(display_date: &str) -> DateToken {
    DateToken(display_date.replace('-', ""))
}

/// Render a token as `"{year}년 {month}월 {day}일"`.
///
/// Tokens that are not exactly eight characters produce shortened or empty
/// segments rather than an error.
#[must_use]
pub fn to_display_label(token: &DateToken) -> String {
    let mut chars = token.as_str().chars();
    let year = chars.by_ref().take(4).collect::<String>();
    let month = chars.by_ref().take(2).collect::<String>();
    let day = chars.take(2).collect::<String>();
    format!("{year}년 {month}월 {day}일")
}

/// Today's local date as a `YYYY-MM-DD` input value.
#[must_use]
pub fn today_display() -> String {
    Local::now()
        .date_naive()
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}
