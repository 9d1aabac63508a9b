use super::{validation::ValidationErrorKind, Error, ErrorKind};
use crate::schema::Kind;

use serde::Serialize;

/// The rule that rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    InvalidCharacter,
    UnsupportedKind,
    BlankValue,
    ValueTooLong,
    ReservedName,
    DuplicateFieldName,
    DuplicateModelName,
    EmptyFieldSet,
    EmptyRowSet,
    IllegalRetype,
    NoChangeRequested,
    RowConformance,
    ModelNotFound,
    MaterializationFailed,
    MigrationFailed,
    Storage,
    Internal,
}

/// Structured failure payload handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub rule: Rule,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    InvalidCharacter {
        character: char,
        input: String,
    },
    IllegalRetype {
        field_name: String,
        kind: Kind,
    },
    RowConformance {
        unknown_fields: Vec<String>,
        mismatches: Vec<Mismatch>,
    },
    ModelNotFound {
        model_id: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub field_name: String,
    pub expected_kind: Kind,
}

impl Error {
    /// Builds the caller-facing report for this error.
    ///
    /// The rule comes from the outermost error that names one; the message is
    /// the full context chain.
    pub fn report(&self) -> ErrorReport {
        let (rule, detail) = self
            .chain()
            .find_map(|err| err.rule_and_detail())
            .unwrap_or((Rule::Internal, None));

        ErrorReport {
            rule,
            message: self.to_string(),
            detail,
        }
    }

    fn rule_and_detail(&self) -> Option<(Rule, Option<Detail>)> {
        use ValidationErrorKind as V;

        let ret = match self.kind() {
            ErrorKind::Validation(err) => match &err.kind {
                V::InvalidCharacter { character, input } => (
                    Rule::InvalidCharacter,
                    Some(Detail::InvalidCharacter {
                        character: *character,
                        input: input.to_string(),
                    }),
                ),
                V::UnsupportedKind { .. } => (Rule::UnsupportedKind, None),
                V::BlankValue { .. } => (Rule::BlankValue, None),
                V::ValueTooLong { .. } => (Rule::ValueTooLong, None),
                V::ReservedName { .. } => (Rule::ReservedName, None),
                V::DuplicateFieldName { .. } => (Rule::DuplicateFieldName, None),
                V::DuplicateModelName { .. } => (Rule::DuplicateModelName, None),
                V::EmptyFieldSet => (Rule::EmptyFieldSet, None),
                V::EmptyRowSet => (Rule::EmptyRowSet, None),
                V::IllegalRetype { field, to } => (
                    Rule::IllegalRetype,
                    Some(Detail::IllegalRetype {
                        field_name: field.to_string(),
                        kind: *to,
                    }),
                ),
                V::NoChangeRequested => (Rule::NoChangeRequested, None),
            },
            ErrorKind::RowConformance(err) => (
                Rule::RowConformance,
                Some(Detail::RowConformance {
                    unknown_fields: err.unknown_fields.clone(),
                    mismatches: err
                        .mismatches
                        .iter()
                        .map(|m| Mismatch {
                            field_name: m.field_name.clone(),
                            expected_kind: m.expected,
                        })
                        .collect(),
                }),
            ),
            ErrorKind::ModelNotFound(err) => (
                Rule::ModelNotFound,
                Some(Detail::ModelNotFound { model_id: err.id }),
            ),
            ErrorKind::MaterializationFailed(_) => (Rule::MaterializationFailed, None),
            ErrorKind::MigrationFailed(_) => (Rule::MigrationFailed, None),
            ErrorKind::DriverOperationFailed(_) | ErrorKind::ConnectionPool(_) => {
                (Rule::Storage, None)
            }
            ErrorKind::Adhoc(_) | ErrorKind::InvalidConnectionUrl(_) | ErrorKind::Unknown => {
                return None
            }
        };

        Some(ret)
    }
}
