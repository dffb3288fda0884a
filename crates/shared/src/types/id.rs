//! Order identifiers.
//!
//! Order IDs are short, human-readable and sortable by creation time:
//! `ORD-{base36 milliseconds}-{3 random base36 chars}`, all uppercase.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const PREFIX: &str = "ORD";
const SUFFIX_LEN: u32 = 3;

/// Error returned when parsing a malformed order ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order id: {0}")]
pub struct InvalidOrderId(pub String);

/// Unique identifier for a customer order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Generates a new order ID from the current time and a random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let millis = u128::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let random = Uuid::new_v4().as_u128() % 36u128.pow(SUFFIX_LEN);
        let suffix = format!("{:0>width$}", to_base36(random), width = SUFFIX_LEN as usize);
        Self(format!("{PREFIX}-{}-{suffix}", to_base36(millis)))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn is_base36_segment(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderId {
    type Err = InvalidOrderId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let valid = parts.next() == Some(PREFIX)
            && parts.next().is_some_and(is_base36_segment)
            && parts.next().is_some_and(is_base36_segment)
            && parts.next().is_none();

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidOrderId(s.to_string()))
        }
    }
}

impl TryFrom<String> for OrderId {
    type Error = InvalidOrderId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl AsRef<str> for OrderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
