//! Redirect URL returned by checkout and portal endpoints.

use serde::Serialize;
use std::fmt;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// An absolute `http(s)` URL the user must be sent to.
///
/// The hosted page behind it belongs to the payment provider; this type only
/// guarantees the value is navigable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Redirect(Url);

impl Redirect {
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Redirect {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::Redirect {
                value: s.to_string(),
                reason: "must be an http(s) URL".to_string(),
            }
            .into());
        }
        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
