//! The base formatter: plain `%`-style template interpolation.
//!
//! This is the layer the chroma formatter wraps. It knows nothing about
//! colors: it splices a record's fields into `%(name)` specifiers and merges
//! positional arguments into the message's `%s`/`%d` fields, and that is
//! all. It is public so a handler that wants entirely unstyled output can
//! use it directly.

use crate::errors::FormatError;
use crate::record::Record;

/// Timestamp layout of the `%(asctime)s` field.
const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Renders records through a `%`-style format template.
///
/// Supported field specifiers are `%(asctime)s`, `%(levelname)s`,
/// `%(filename)s`, `%(lineno)d` and `%(message)s`, each taking an optional
/// `-` flag and minimum width between the closing parenthesis and the
/// conversion character (`%(levelname)-8s` pads the level name to at least
/// eight characters, left-justified). `%%` renders a literal percent sign.
#[derive(Debug, Clone)]
pub struct BaseFormatter {
    template: String,
}

impl BaseFormatter {
    /// Creates a formatter rendering through `template`.
    pub fn new<S: Into<String>>(template: S) -> BaseFormatter {
        BaseFormatter {
            template: template.into(),
        }
    }

    /// The format template this formatter renders through.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders `record` into a line.
    ///
    /// The `%(message)s` field is the record's message with its positional
    /// arguments merged in; an argument/field count mismatch is reported
    /// from here, as is a `%(name)` the record has no field for.
    pub fn render(&self, record: &Record) -> Result<String, FormatError> {
        let message = merge_args(record.msg(), record.args())?;
        let mut out = String::with_capacity(self.template.len() + message.len());
        let mut rest = self.template.as_str();
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];
            if rest.starts_with('%') {
                out.push('%');
                rest = &rest[1..];
                continue;
            }
            if !rest.starts_with('(') {
                // A stray percent is ordinary text.
                out.push('%');
                continue;
            }
            let close = rest
                .find(')')
                .ok_or_else(|| FormatError::BadFieldSpec(format!("%{}", rest)))?;
            let name = &rest[1..close];
            rest = &rest[close + 1..];
            let (spec, remainder) = parse_spec(rest)
                .ok_or_else(|| FormatError::BadFieldSpec(format!("%({}){}", name, rest)))?;
            rest = remainder;
            let value = field_value(name, record, &message)?;
            spec.pad_into(&mut out, &value);
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Width/justification suffix of a field specifier.
struct FieldSpec {
    left_justify: bool,
    width: usize,
}

impl FieldSpec {
    fn pad_into(&self, out: &mut String, value: &str) {
        if self.left_justify {
            out.push_str(&format!("{:<1$}", value, self.width));
        } else {
            out.push_str(&format!("{:>1$}", value, self.width));
        }
    }
}

/// Parses the `-<width><conversion>` tail after `%(name)`. Returns the spec
/// and the rest of the template, or `None` when the tail is malformed.
fn parse_spec(rest: &str) -> Option<(FieldSpec, &str)> {
    let (left_justify, rest) = match rest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let width = if digits == 0 {
        0
    } else {
        rest[..digits].parse().ok()?
    };
    let rest = &rest[digits..];
    match rest.bytes().next() {
        Some(b's') | Some(b'd') => Some((
            FieldSpec {
                left_justify,
                width,
            },
            &rest[1..],
        )),
        _ => None,
    }
}

fn field_value(name: &str, record: &Record, message: &str) -> Result<String, FormatError> {
    match name {
        "asctime" => Ok(record.created().format(ASCTIME_FORMAT).to_string()),
        "levelname" => Ok(record.levelname().into_owned()),
        "filename" => Ok(record.filename().to_string()),
        "lineno" => Ok(record.line().to_string()),
        "message" => Ok(message.to_string()),
        _ => Err(FormatError::UnknownField(name.to_string())),
    }
}

/// Merges positional arguments into a message's `%s`/`%d` fields.
///
/// A message with no arguments passes through untouched, fields included.
/// Otherwise every field consumes one argument in order, and a count
/// mismatch in either direction is an error.
pub(crate) fn merge_args(msg: &str, args: &[String]) -> Result<String, FormatError> {
    if args.is_empty() {
        return Ok(msg.to_string());
    }
    let fields = count_arg_fields(msg);
    if fields != args.len() {
        return Err(FormatError::ArgumentCount {
            fields,
            args: args.len(),
        });
    }
    let mut out = String::with_capacity(msg.len());
    let mut next = args.iter();
    let mut rest = msg;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        if rest.starts_with('%') {
            out.push('%');
            rest = &rest[1..];
            continue;
        }
        match parse_spec(rest) {
            Some((spec, remainder)) => {
                if let Some(arg) = next.next() {
                    spec.pad_into(&mut out, arg);
                }
                rest = remainder;
            }
            None => out.push('%'),
        }
    }
    out.push_str(rest);
    Ok(out)
}

fn count_arg_fields(msg: &str) -> usize {
    let mut fields = 0;
    let mut rest = msg;
    while let Some(pos) = rest.find('%') {
        rest = &rest[pos + 1..];
        if rest.starts_with('%') {
            rest = &rest[1..];
            continue;
        }
        match parse_spec(rest) {
            Some((_, remainder)) => {
                fields += 1;
                rest = remainder;
            }
            None => {}
        }
    }
    fields
}
