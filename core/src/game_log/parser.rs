//! Field extraction for each event kind.
//!
//! Every parser works on a normalized line (see [`super::normalize_line`]).
//! Missing optional fields fall back to a default; missing required fields are
//! a [`ParseError`].

use memchr::{memchr, memmem};
use thiserror::Error;

use super::classify::{EventKind, marker};
use super::event::LogEvent;
use crate::game_ids::means_of_death;

const MAPNAME_KEY: &str = "\\mapname\\";
const NAME_KEY: &str = "n";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no player id after `ClientUserinfoChanged:` in {line:?}")]
    MissingPlayerId { line: String },

    #[error("item line is not `Item: <id> <item>`: {line:?}")]
    MalformedItem { line: String },

    #[error("kill line is not `Kill: <killer> <victim> <mod>:`: {line:?}")]
    MalformedKill { line: String },
}

/// Fields of a `Kill:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillFields {
    pub killer_id: i64,
    pub victim_id: i64,
    pub means_of_death: String,
}

/// Parse a normalized line of the given kind. Ignored lines yield `Ok(None)`.
pub fn parse_event(kind: EventKind, line: &str) -> Result<Option<LogEvent>, ParseError> {
    let event = match kind {
        EventKind::MatchStart => LogEvent::MatchStart {
            map_name: parse_map_name(line),
        },
        EventKind::NameChange => {
            let (player_id, name) = parse_name_change(line)?;
            LogEvent::NameChange { player_id, name }
        }
        EventKind::ItemPickup => {
            let (player_id, item) = parse_item_pickup(line)?;
            LogEvent::ItemPickup { player_id, item }
        }
        EventKind::Kill => {
            let KillFields {
                killer_id,
                victim_id,
                means_of_death,
            } = parse_kill(line)?;
            LogEvent::Kill {
                killer_id,
                victim_id,
                means_of_death,
            }
        }
        EventKind::Ignored => return Ok(None),
    };
    Ok(Some(event))
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-kind parsers
// ─────────────────────────────────────────────────────────────────────────────

/// Map name from an `InitGame:` line: the first non-empty token after
/// `\mapname\`, up to the next backslash. Empty if there is none.
pub fn parse_map_name(line: &str) -> String {
    memmem::find_iter(line.as_bytes(), MAPNAME_KEY.as_bytes())
        .map(|pos| until_backslash(&line[pos + MAPNAME_KEY.len()..]))
        .find(|token| !token.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// `ClientUserinfoChanged: <id> n\<name>\t\0\...` -> (id, name).
///
/// The name is the `n` value of the backslash-delimited userinfo string and is
/// empty when that key is missing or blank.
pub fn parse_name_change(line: &str) -> Result<(i64, String), ParseError> {
    let missing = || ParseError::MissingPlayerId {
        line: line.to_string(),
    };

    let rest = after_marker(line, marker::USERINFO_CHANGED).ok_or_else(missing)?;
    let (player_id, userinfo) = take_id(rest.trim_start()).ok_or_else(missing)?;
    let name = userinfo_value(userinfo, NAME_KEY).unwrap_or_default();

    Ok((player_id, name.to_string()))
}

/// `Item: <id> <item name>` -> (id, item name).
pub fn parse_item_pickup(line: &str) -> Result<(i64, String), ParseError> {
    let malformed = || ParseError::MalformedItem {
        line: line.to_string(),
    };

    let rest = after_marker(line, marker::ITEM).ok_or_else(malformed)?;
    let (player_id, rest) = take_id(rest.trim_start()).ok_or_else(malformed)?;
    let item = skip_whitespace1(rest).ok_or_else(malformed)?.trim();
    if item.is_empty() {
        return Err(malformed());
    }

    Ok((player_id, item.to_string()))
}

/// `Kill: <killer> <victim> <mod_id>: <text> by <MOD_TOKEN>`.
///
/// The numeric mod id is required but discarded; the trailing token names the
/// means of death and defaults to `UNKNOWN`.
pub fn parse_kill(line: &str) -> Result<KillFields, ParseError> {
    let malformed = || ParseError::MalformedKill {
        line: line.to_string(),
    };

    let rest = after_marker(line, marker::KILL).ok_or_else(malformed)?;
    let (killer_id, rest) = take_id(rest.trim_start()).ok_or_else(malformed)?;
    let (victim_id, rest) = skip_whitespace1(rest)
        .and_then(take_id)
        .ok_or_else(malformed)?;
    let (_mod_id, rest) = skip_whitespace1(rest)
        .and_then(take_id)
        .ok_or_else(malformed)?;
    if !rest.starts_with(':') {
        return Err(malformed());
    }

    Ok(KillFields {
        killer_id,
        victim_id,
        means_of_death: trailing_means_of_death(line).to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let pos = memmem::find(line.as_bytes(), marker.as_bytes())?;
    Some(&line[pos + marker.len()..])
}

/// Leading ASCII digit run as an id, plus whatever follows it.
fn take_id(input: &str) -> Option<(i64, &str)> {
    let len = input.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let id = input[..len].parse().ok()?;
    Some((id, &input[len..]))
}

/// Requires at least one whitespace character.
fn skip_whitespace1(input: &str) -> Option<&str> {
    let rest = input.trim_start();
    (rest.len() < input.len()).then_some(rest)
}

fn until_backslash(input: &str) -> &str {
    match memchr(b'\\', input.as_bytes()) {
        Some(end) => &input[..end],
        None => input,
    }
}

/// Value of `key` in a `key\value\key\value` userinfo string. A single leading
/// backslash is allowed.
fn userinfo_value<'a>(userinfo: &'a str, key: &str) -> Option<&'a str> {
    let userinfo = userinfo.trim_start();
    let userinfo = userinfo.strip_prefix('\\').unwrap_or(userinfo);

    let mut fields = userinfo.split('\\');
    while let Some(field) = fields.next() {
        let value = fields.next()?;
        if field == key {
            return Some(value);
        }
    }
    None
}

/// `... by MOD_RAILGUN` -> `MOD_RAILGUN`; anything else -> `UNKNOWN`.
fn trailing_means_of_death(line: &str) -> &str {
    let mut tokens = line.split_whitespace().rev();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(token), Some("by"), Some(_)) if is_mod_token(token) => token,
        _ => means_of_death::UNKNOWN,
    }
}

fn is_mod_token(token: &str) -> bool {
    token
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}
