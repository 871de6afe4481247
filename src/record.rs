//! Log record and severity types.
//!
//! [`Record`] is the unit of input to a formatter: a message template with
//! `{}` argument placeholders, the positional arguments, a severity and
//! source-location metadata. Formatters color a record in place and then put
//! it back the way they found it, so the same record instance can travel
//! through any number of handlers (a colored console handler followed by a
//! colorless file handler being the usual pair).
//!
//! [`Record`]: struct.Record.html

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Local};

/// An ordered log severity on the classic integer scale.
///
/// The named constants follow `NOTSET < DEBUG < INFO < WARNING < ERROR <
/// CRITICAL`, spaced ten apart so applications can define their own levels
/// in between (or beyond). Severities a formatter's color map does not know
/// about simply render uncolored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(
    /// The numeric level.
    pub i32,
);

impl Severity {
    /// No severity assigned.
    pub const NOTSET: Severity = Severity(0);
    /// Diagnostic detail.
    pub const DEBUG: Severity = Severity(10);
    /// Normal operation.
    pub const INFO: Severity = Severity(20);
    /// Something unexpected, but the application keeps going.
    pub const WARNING: Severity = Severity(30);
    /// An operation failed.
    pub const ERROR: Severity = Severity(40);
    /// The application cannot continue.
    pub const CRITICAL: Severity = Severity(50);

    /// The severity's display name, `"Level {n}"` for custom values.
    pub fn name(&self) -> Cow<'static, str> {
        match *self {
            Severity::NOTSET => Cow::Borrowed("NOTSET"),
            Severity::DEBUG => Cow::Borrowed("DEBUG"),
            Severity::INFO => Cow::Borrowed("INFO"),
            Severity::WARNING => Cow::Borrowed("WARNING"),
            Severity::ERROR => Cow::Borrowed("ERROR"),
            Severity::CRITICAL => Cow::Borrowed("CRITICAL"),
            Severity(n) => Cow::Owned(format!("Level {}", n)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Severity {
        match level {
            log::Level::Error => Severity::ERROR,
            log::Level::Warn => Severity::WARNING,
            log::Level::Info => Severity::INFO,
            log::Level::Debug => Severity::DEBUG,
            log::Level::Trace => Severity::NOTSET,
        }
    }
}

/// The pristine message and arguments of a record, taken the first time a
/// formatter touches it.
#[derive(Debug, Clone)]
struct RestorePoint {
    msg: String,
    args: Vec<String>,
    levelname: Option<String>,
}

/// A single log record.
///
/// Construction is chaining-based:
///
/// ```
/// use chroma_log::{Record, Severity};
///
/// let record = Record::new(Severity::INFO, "value is {}")
///     .arg(7)
///     .location("main.rs", 42);
/// ```
#[derive(Debug, Clone)]
pub struct Record {
    pub(crate) msg: String,
    pub(crate) args: Vec<String>,
    pub(crate) levelname: Option<String>,
    level: Severity,
    filename: String,
    line: u32,
    timestamp: DateTime<Local>,
    restore: Option<RestorePoint>,
}

impl Record {
    /// Creates a record with the given severity and message template,
    /// timestamped now, with no arguments and no source location.
    pub fn new<S: Into<String>>(level: Severity, msg: S) -> Record {
        Record {
            msg: msg.into(),
            args: Vec::new(),
            levelname: None,
            level,
            filename: String::new(),
            line: 0,
            timestamp: Local::now(),
            restore: None,
        }
    }

    /// Appends one positional argument.
    pub fn arg<V: fmt::Display>(mut self, value: V) -> Record {
        self.args.push(value.to_string());
        self
    }

    /// Sets the source filename and line number.
    pub fn location<S: Into<String>>(mut self, filename: S, line: u32) -> Record {
        self.filename = filename.into();
        self.line = line;
        self
    }

    /// Overrides the creation timestamp.
    pub fn timestamp(mut self, timestamp: DateTime<Local>) -> Record {
        self.timestamp = timestamp;
        self
    }

    /// The message template, with any `{}` argument placeholders unexpanded.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// The positional arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The record's severity.
    pub fn level(&self) -> Severity {
        self.level
    }

    /// The level name rendered into `%(levelname)s` fields: the severity's
    /// name, unless a formatter injected a colored override for the current
    /// call.
    pub fn levelname(&self) -> Cow<'_, str> {
        match self.levelname {
            Some(ref name) => Cow::Borrowed(name.as_str()),
            None => self.level.name(),
        }
    }

    /// The source filename, empty when unknown.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The source line number, 0 when unknown.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// When the record was created.
    pub fn created(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Makes certain the record is carrying its original message and
    /// arguments.
    ///
    /// The first call snapshots the current message, arguments and
    /// level-name override as the restore point; subsequent calls reset
    /// them from that snapshot. Formatters
    /// call this before mutating a record so that a record reused across
    /// handlers always starts from pristine input.
    pub fn checkpoint(&mut self) {
        match self.restore {
            Some(ref point) => {
                self.msg = point.msg.clone();
                self.args = point.args.clone();
                self.levelname = point.levelname.clone();
            }
            None => {
                self.restore = Some(RestorePoint {
                    msg: self.msg.clone(),
                    args: self.args.clone(),
                    levelname: self.levelname.clone(),
                });
            }
        }
    }

    /// Puts the restore point's message and arguments back, undoing any
    /// colors a formatter injected during the current call.
    ///
    /// A no-op if [`checkpoint`] has never run.
    ///
    /// [`checkpoint`]: #method.checkpoint
    pub fn restore(&mut self) {
        if let Some(ref point) = self.restore {
            self.msg = point.msg.clone();
            self.args = point.args.clone();
            self.levelname = point.levelname.clone();
        }
    }
}

impl<'a> From<&log::Record<'a>> for Record {
    /// Adapts a [`log`] crate record. The message arrives pre-interpolated
    /// from `log`'s side, so the adapted record has no positional arguments.
    ///
    /// [`log`]: https://docs.rs/log/0.4/log/struct.Record.html
    fn from(record: &log::Record<'a>) -> Record {
        Record::new(record.level().into(), record.args().to_string()).location(
            record.file().unwrap_or_default(),
            record.line().unwrap_or_default(),
        )
    }
}
