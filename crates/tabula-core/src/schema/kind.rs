use super::db;
use crate::{stmt::Value, Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The closed set of field kinds a model may declare.
///
/// Each kind knows which runtime values it accepts, which storage type backs
/// it, and which kinds an existing field of this kind may change into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Bounded-length string
    Text,

    /// Signed integer
    Numeric,

    /// true / false
    Boolean,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Text, Kind::Numeric, Kind::Boolean];

    /// Resolves a kind name. Matching is case-insensitive and accepts the
    /// `string` and `number` aliases.
    pub fn from_name(name: &str) -> Result<Kind> {
        match name.to_lowercase().as_str() {
            "text" | "string" => Ok(Kind::Text),
            "numeric" | "number" => Ok(Kind::Numeric),
            "boolean" => Ok(Kind::Boolean),
            _ => Err(Error::unsupported_kind(name)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Text => "text",
            Kind::Numeric => "numeric",
            Kind::Boolean => "boolean",
        }
    }

    /// Returns true if `value`'s runtime type is compatible with this kind.
    ///
    /// `Null` is never accepted; a field is left null by omitting it.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Kind::Text, Value::String(_))
                | (Kind::Numeric, Value::I64(_))
                | (Kind::Boolean, Value::Bool(_))
        )
    }

    /// An existing field may only change kind if the kind is unchanged or the
    /// destination is text.
    pub fn can_transition_to(self, to: Kind) -> bool {
        self == to || to == Kind::Text
    }

    /// The storage type backing this kind; text is bounded by `text_max_length`.
    pub fn storage_ty(self, text_max_length: u64) -> db::Type {
        match self {
            Kind::Text => db::Type::VarChar(text_max_length),
            Kind::Numeric => db::Type::Integer(8),
            Kind::Boolean => db::Type::Boolean,
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Kind> {
        Kind::from_name(s)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
