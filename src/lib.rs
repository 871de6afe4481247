#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/chroma-log/0.3.0")]
//! Chroma-log: color and style substitution for log format templates.
//!
//! This crate sits between a logging pipeline's record-formatting step and
//! the final rendered line. It takes a format template containing `$COLOR`
//! directive tokens, rewrites it once into literal ANSI escapes (or strips
//! the tokens for colorless sinks), and colors each record's level, message
//! arguments and brackets from a live, per-formatter color map.
//!
//! Current features:
//! - `$RED` through `$LI_WHITE`, `$RESET`, `$BOLD` and the per-record
//!   `$LEVEL` directive, resolved by a single-pass whole-word tokenizer.
//! - A runtime-mutable [`ColorMap`] per formatter: recolor a severity
//!   between two log calls and the next line picks it up, no rebuild.
//! - `{}` argument placeholders colored and optionally bracketed
//!   independently of the surrounding message.
//! - Records restored to their pristine message/arguments after every
//!   format call, so a colorless file handler downstream of a colored
//!   console handler is never polluted with escapes.
//! - A colorless [`BaseFormatter`] handling the `%(asctime)s`-style field
//!   interpolation, usable on its own.
//!
//! This crate performs no I/O: handlers, sinks and level filtering belong
//! to the surrounding logging pipeline, which calls [`ChromaFormatter::format`]
//! and writes the returned string wherever it likes.
//!
//! Usage example
//! ========
//!
//! ```
//! use chroma_log::{ChromaFormatter, Record, Severity, TemplateBuilder};
//!
//! let template = TemplateBuilder::new().levelname_width(8).build();
//! let console = ChromaFormatter::new(&template, true, false);
//! let file = ChromaFormatter::new(&template, false, false);
//!
//! let mut record = Record::new(Severity::WARNING, "disk {} almost full")
//!     .arg("/dev/sda1")
//!     .location("monitor.rs", 17);
//!
//! let colored_line = console.format(&mut record).unwrap();
//! let plain_line = file.format(&mut record).unwrap();
//! assert!(colored_line.contains('\x1B'));
//! assert!(!plain_line.contains('\x1B'));
//! ```
//!
//! `TemplateBuilder` produced the conventional
//! `[timestamp][level][file:line]: message` template; any template with
//! `%(asctime)s`, `%(levelname)s`, `%(filename)s`, `%(lineno)d` and
//! `%(message)s` fields works, directives or not.
//!
//! Records can also be adapted from the [`log`] crate's records via
//! `Record::from(&log_record)`, for wiring a `ChromaFormatter` into a
//! `log`-backed dispatcher.
//!
//! [`ColorMap`]: struct.ColorMap.html
//! [`BaseFormatter`]: struct.BaseFormatter.html
//! [`ChromaFormatter::format`]: struct.ChromaFormatter.html#method.format
//! [`log`]: https://docs.rs/log/0.4/log/

pub use crate::base::BaseFormatter;
pub use crate::errors::FormatError;
pub use crate::formatter::{ChromaFormatter, ColorMap};
pub use crate::record::{Record, Severity};
pub use crate::templates::TemplateBuilder;

pub mod colors;

mod base;
mod errors;
mod formatter;
mod record;
mod templates;
