use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, fmt};

/// Longest accepted model or field name.
pub const MAX_NAME_LEN: usize = 50;

/// A sanitized, trimmed and lowercased model or field name.
///
/// Only alphanumerics, spaces and underscores are accepted. Two names that
/// differ only by case or surrounding whitespace are the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Sanitizes `src` into a name. `subject` describes the name in errors,
    /// e.g. "model name".
    pub fn parse(src: &str, subject: &str) -> Result<Name> {
        check_characters(src)?;

        let trimmed = src.trim();
        if trimmed.is_empty() {
            return Err(Error::blank_value(subject));
        }

        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(Error::value_too_long(
                format!("{subject} `{src}`"),
                len,
                MAX_NAME_LEN,
            ));
        }

        Ok(Name(trimmed.to_lowercase()))
    }

    /// Wraps a name that is already known to be sanitized, e.g. one loaded
    /// back from the catalog.
    pub fn from_trusted(src: impl Into<String>) -> Name {
        Name(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fails with `InvalidCharacter` on the first character that is not
/// alphanumeric, a space or an underscore.
pub fn check_characters(src: &str) -> Result<()> {
    match src
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '_' || *c == ' '))
    {
        Some(character) => Err(Error::invalid_character(character, src)),
        None => Ok(()),
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
