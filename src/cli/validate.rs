//! Token-level validation for the command shell.
//!
//! Input arrives pre-tokenized on whitespace, so these checks are about
//! shape, not splitting: ids are positive integers, dates are ISO 8601,
//! names and tags are restricted character classes.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cli::commands::CommandError;
use crate::model::{Priority, TaskId};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+$").unwrap());
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static LIST_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

/// Task ids as typed by the user: base-10, at least 1.
pub fn parse_id(token: &str) -> Result<TaskId, CommandError> {
    token
        .parse::<TaskId>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| CommandError::InvalidId(token.to_string()))
}

/// True when a token looks like an id at all. Disambiguates commands that
/// accept either an id or a name in the same position.
pub fn is_id_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|byte| byte.is_ascii_digit())
}

pub fn parse_date(token: &str) -> Result<NaiveDate, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidDate(token.to_string()))
}

pub fn parse_priority(token: &str) -> Result<Priority, CommandError> {
    Priority::from_token(token).ok_or_else(|| CommandError::InvalidPriority(token.to_string()))
}

/// Task names carry no whitespace. Tokenization guarantees that already,
/// so in practice only emptiness can fail here.
pub fn parse_name(token: &str) -> Result<&str, CommandError> {
    if !NAME_PATTERN.is_match(token) {
        return Err(CommandError::InvalidName(token.to_string()));
    }
    Ok(token)
}

pub fn parse_tag(token: &str) -> Result<&str, CommandError> {
    if !TAG_PATTERN.is_match(token) {
        return Err(CommandError::InvalidTag(token.to_string()));
    }
    Ok(token)
}

pub fn parse_list_name(token: &str) -> Result<&str, CommandError> {
    if !LIST_PATTERN.is_match(token) {
        return Err(CommandError::InvalidListName(token.to_string()));
    }
    Ok(token)
}
