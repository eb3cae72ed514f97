//! Email address type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An email address with the shape `local@domain.tld`.
///
/// Only the coarse shape is checked: no whitespace, exactly one `@`, a
/// non-empty local part, and a domain containing a dot with text on both
/// sides. Delivery is the backend's concern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email address, validating its shape.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidInputError::Email {
                value: s.to_string(),
            }
            .into())
        }
    }

    /// Check the shape without constructing.
    pub fn is_valid(s: &str) -> bool {
        if s.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        match domain.rsplit_once('.') {
            Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Email::new(&s).map_err(serde::de::Error::custom)
    }
}
