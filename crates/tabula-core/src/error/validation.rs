use super::Error;
use crate::schema::Kind;

/// Error when caller input fails one of the schema or row rules.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) kind: ValidationErrorKind,
}

#[derive(Debug)]
pub(super) enum ValidationErrorKind {
    /// A name contains something other than alphanumerics, spaces and `_`
    InvalidCharacter { character: char, input: Box<str> },

    /// The kind name is not one of the supported kinds
    UnsupportedKind { kind: Box<str> },

    /// A name, or a text value, is empty
    BlankValue { subject: Box<str> },

    /// A name or text value exceeds its length bound
    ValueTooLong {
        subject: Box<str>,
        value_len: usize,
        max: usize,
    },

    /// The name is used internally by the physical table
    ReservedName { name: Box<str> },

    /// Two submitted fields collapse to the same name
    DuplicateFieldName { name: Box<str> },

    /// A model with the same (case-insensitive) name exists
    DuplicateModelName { name: Box<str> },

    /// A model definition or update carries no fields
    EmptyFieldSet,

    /// A populate request carries no rows, or an empty row
    EmptyRowSet,

    /// An existing field is retyped to something other than text
    IllegalRetype { field: Box<str>, to: Kind },

    /// The new field list is identical to the current one
    NoChangeRequested,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use ValidationErrorKind::*;

        match &self.kind {
            InvalidCharacter { character, input } => write!(
                f,
                "string should NOT include special characters --> {character} in {input}"
            ),
            UnsupportedKind { kind } => write!(
                f,
                "unsupported field kind `{kind}`; acceptable kinds are text, numeric or boolean"
            ),
            BlankValue { subject } => write!(f, "{subject} must not be blank"),
            ValueTooLong {
                subject,
                value_len,
                max,
            } => write!(
                f,
                "{subject} has length {value_len} which is too long (maximum: {max})"
            ),
            ReservedName { name } => write!(f, "`{name}` is a reserved field name"),
            DuplicateFieldName { name } => write!(f, "field `{name}` is defined more than once"),
            DuplicateModelName { name } => write!(f, "a model named `{name}` already exists"),
            EmptyFieldSet => f.write_str("at least one field is required"),
            EmptyRowSet => f.write_str("rows must not be empty and every row needs a field"),
            IllegalRetype { field, to } => write!(
                f,
                "field kinds can only be changed to text .. {field} -> {to}"
            ),
            NoChangeRequested => f.write_str("fields are the same; no update required"),
        }
    }
}

macro_rules! validation_predicate {
    ($( $(#[$m:meta])* $name:ident => $pat:pat ),* $(,)?) => {
        impl Error {
            $(
                $(#[$m])*
                pub fn $name(&self) -> bool {
                    matches!(
                        self.kind(),
                        super::ErrorKind::Validation(ValidationError { kind: $pat })
                    )
                }
            )*
        }
    };
}

validation_predicate! {
    /// Returns `true` if any validation rule failed.
    is_validation => _,
    is_invalid_character => ValidationErrorKind::InvalidCharacter { .. },
    is_unsupported_kind => ValidationErrorKind::UnsupportedKind { .. },
    is_blank_value => ValidationErrorKind::BlankValue { .. },
    is_value_too_long => ValidationErrorKind::ValueTooLong { .. },
    is_reserved_name => ValidationErrorKind::ReservedName { .. },
    is_duplicate_field_name => ValidationErrorKind::DuplicateFieldName { .. },
    is_duplicate_model_name => ValidationErrorKind::DuplicateModelName { .. },
    is_empty_field_set => ValidationErrorKind::EmptyFieldSet,
    is_empty_row_set => ValidationErrorKind::EmptyRowSet,
    is_illegal_retype => ValidationErrorKind::IllegalRetype { .. },
    is_no_change_requested => ValidationErrorKind::NoChangeRequested,
}

impl Error {
    fn validation(kind: ValidationErrorKind) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError { kind }))
    }

    /// Creates an invalid character error naming the offending character
    /// and the original input.
    pub fn invalid_character(character: char, input: impl Into<String>) -> Error {
        Error::validation(ValidationErrorKind::InvalidCharacter {
            character,
            input: input.into().into(),
        })
    }

    /// Creates an unsupported kind error.
    pub fn unsupported_kind(kind: impl Into<String>) -> Error {
        Error::validation(ValidationErrorKind::UnsupportedKind {
            kind: kind.into().into(),
        })
    }

    /// Creates a blank value error; `subject` describes what was blank.
    pub fn blank_value(subject: impl Into<String>) -> Error {
        Error::validation(ValidationErrorKind::BlankValue {
            subject: subject.into().into(),
        })
    }

    /// Creates a length bound error; `subject` describes the offending value.
    pub fn value_too_long(subject: impl Into<String>, value_len: usize, max: usize) -> Error {
        Error::validation(ValidationErrorKind::ValueTooLong {
            subject: subject.into().into(),
            value_len,
            max,
        })
    }

    /// Creates a reserved name error.
    pub fn reserved_name(name: impl Into<String>) -> Error {
        Error::validation(ValidationErrorKind::ReservedName {
            name: name.into().into(),
        })
    }

    /// Creates a duplicate field name error.
    pub fn duplicate_field_name(name: impl Into<String>) -> Error {
        Error::validation(ValidationErrorKind::DuplicateFieldName {
            name: name.into().into(),
        })
    }

    /// Creates a duplicate model name error.
    pub fn duplicate_model_name(name: impl Into<String>) -> Error {
        Error::validation(ValidationErrorKind::DuplicateModelName {
            name: name.into().into(),
        })
    }

    /// Creates an empty field set error.
    pub fn empty_field_set() -> Error {
        Error::validation(ValidationErrorKind::EmptyFieldSet)
    }

    /// Creates an empty row set error.
    pub fn empty_row_set() -> Error {
        Error::validation(ValidationErrorKind::EmptyRowSet)
    }

    /// Creates an illegal retype error naming the field and rejected kind.
    pub fn illegal_retype(field: impl Into<String>, to: Kind) -> Error {
        Error::validation(ValidationErrorKind::IllegalRetype {
            field: field.into().into(),
            to,
        })
    }

    /// Creates a no change requested error.
    pub fn no_change_requested() -> Error {
        Error::validation(ValidationErrorKind::NoChangeRequested)
    }
}
