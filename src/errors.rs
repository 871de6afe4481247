use std::{error, fmt};

/// Error returned when rendering a record through a format template fails.
///
/// The colorization layer itself never fails: unknown severities fall back to
/// the uncolored path and unrecognized `$TOKEN` directives are passed through
/// literally. These errors all originate in the base template interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template referenced a `%(field)` name the record does not have.
    UnknownField(String),
    /// A `%(`-field in the template was not closed or had a malformed
    /// width/conversion suffix.
    BadFieldSpec(String),
    /// The message contained a different number of `%s`/`%d` fields than
    /// there were positional arguments.
    ArgumentCount {
        /// Number of argument fields found in the message.
        fields: usize,
        /// Number of positional arguments supplied with the record.
        args: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FormatError::UnknownField(ref name) => {
                write!(f, "unknown record field %({})", name)
            }
            FormatError::BadFieldSpec(ref spec) => {
                write!(f, "malformed field specifier '{}'", spec)
            }
            FormatError::ArgumentCount { fields, args } => write!(
                f,
                "message has {} argument field(s) but {} argument(s) were supplied",
                fields, args
            ),
        }
    }
}

impl error::Error for FormatError {}
