//! The chroma formatter: per-record colorization over a base formatter.

use std::collections::HashMap;

use colored::Color;

use crate::base::BaseFormatter;
use crate::colors::{fg_escape, resolve_directives, widen_level_width, BOLD, RESET};
use crate::errors::FormatError;
use crate::record::{Record, Severity};

/// Runtime-mutable mapping from severity to color escape, plus the two
/// synthetic slots for argument and bracket coloring.
///
/// Every formatter owns its own map; there is no process-wide color state.
/// The map is read fresh on every format call, so changing an entry between
/// two calls recolors the next line immediately. A severity with no entry
/// renders through the uncolored path.
#[derive(Debug, Clone)]
pub struct ColorMap {
    levels: HashMap<Severity, String>,
    /// Escape applied to substituted argument values, empty for none.
    pub args: String,
    /// Escape applied to literal brackets in the template and around
    /// bracketed arguments, empty for none.
    pub brackets: String,
}

impl Default for ColorMap {
    /// The default palette: DEBUG blue, INFO cyan, WARNING yellow, ERROR
    /// bright red, CRITICAL red, white arguments, unstyled brackets.
    fn default() -> ColorMap {
        let mut levels = HashMap::new();
        levels.insert(Severity::DEBUG, fg_escape(Color::Blue));
        levels.insert(Severity::INFO, fg_escape(Color::Cyan));
        levels.insert(Severity::WARNING, fg_escape(Color::Yellow));
        levels.insert(Severity::ERROR, fg_escape(Color::BrightRed));
        levels.insert(Severity::CRITICAL, fg_escape(Color::Red));
        ColorMap {
            levels,
            args: fg_escape(Color::White),
            brackets: String::new(),
        }
    }
}

impl ColorMap {
    /// An empty map: nothing is colored until entries are added.
    pub fn empty() -> ColorMap {
        ColorMap {
            levels: HashMap::new(),
            args: String::new(),
            brackets: String::new(),
        }
    }

    /// The escape configured for `level`, if any.
    pub fn get(&self, level: Severity) -> Option<&str> {
        self.levels.get(&level).map(String::as_str)
    }

    /// Sets the raw escape sequence for `level`.
    pub fn set<S: Into<String>>(&mut self, level: Severity, escape: S) {
        self.levels.insert(level, escape.into());
    }

    /// Sets the color for `level` by name.
    pub fn set_color(&mut self, level: Severity, color: Color) {
        self.set(level, fg_escape(color));
    }

    /// Removes the entry for `level`, sending it to the uncolored path.
    pub fn remove(&mut self, level: Severity) -> Option<String> {
        self.levels.remove(&level)
    }
}

/// A formatter that substitutes `$COLOR` directives and colors each record
/// by severity, delegating the final field interpolation to
/// [`BaseFormatter`].
///
/// The template is rewritten once at construction; only the `$LEVEL`
/// placeholder and bracket spans are re-derived per record, from whatever
/// the [`color_map`] holds at that moment. Formatting restores the record's
/// message and arguments before returning, so a colorless sink downstream
/// of a colored one still sees pristine input.
///
/// ```
/// use chroma_log::{ChromaFormatter, Record, Severity};
///
/// let formatter = ChromaFormatter::new(
///     "$GREEN[%(asctime)s]$LEVEL[%(levelname)s]: %(message)s",
///     true,
///     false,
/// );
/// let mut record = Record::new(Severity::INFO, "value is {}").arg(7);
/// let line = formatter.format(&mut record).unwrap();
/// assert!(line.contains("\x1B["));
/// assert_eq!(record.msg(), "value is {}");
/// ```
///
/// [`BaseFormatter`]: struct.BaseFormatter.html
/// [`color_map`]: #structfield.color_map
#[derive(Debug, Clone)]
pub struct ChromaFormatter {
    /// Resolved template with `$LEVEL` still pending, used by the colored
    /// path. `$LEVEL` varies per record and is substituted on each call.
    template: String,
    /// Directive-stripped template, used when color is off or a record's
    /// severity has no map entry.
    plain_template: String,
    use_color: bool,
    bold: &'static str,
    /// True when the template carried a `%(levelname)-<n>s` width that was
    /// widened at construction: the colored path then wraps the level name
    /// itself in the level color and a reset, so the widened width absorbs
    /// exactly the injected escape bytes and the visible columns match the
    /// plain rendering.
    wrap_levelname: bool,
    /// Live color configuration, mutable at any time.
    pub color_map: ColorMap,
    /// Whether substituted arguments are wrapped in literal `[`/`]`.
    pub add_brackets_to_args: bool,
}

impl ChromaFormatter {
    /// Creates a formatter over `template`, rewriting its directive tokens
    /// once.
    ///
    /// With `use_color` off the tokens are stripped instead and every record
    /// takes the plain path. With `use_bold` on, every emitted color carries
    /// the bold modifier and the template is rendered bold end to end.
    ///
    /// A `%(levelname)-<n>s` width is widened by the escapes the colored
    /// path wraps around the level name, keeping colored and plain output
    /// column-aligned at the width the template asked for.
    pub fn new<S: AsRef<str>>(template: S, use_color: bool, use_bold: bool) -> ChromaFormatter {
        let bold = if use_bold { BOLD } else { "" };
        let widened = widen_level_width(template.as_ref(), use_color, bold);
        let wrap_levelname = widened != template.as_ref();
        ChromaFormatter {
            template: resolve_directives(&widened, use_color, bold),
            plain_template: resolve_directives(template.as_ref(), false, bold),
            use_color,
            bold,
            wrap_levelname,
            color_map: ColorMap::default(),
            add_brackets_to_args: true,
        }
    }

    /// Whether this formatter emits escape sequences at all.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Formats `record` into a line, coloring it when a color is configured
    /// for its severity.
    ///
    /// The record's message and arguments are restored before returning,
    /// errors included, so repeated calls and multi-handler fan-out always
    /// start from the same input. Taking the record by `&mut` makes the
    /// snapshot/restore pair exclusive per record; handing the same record
    /// to formatters on other threads requires each to get its own copy.
    pub fn format(&self, record: &mut Record) -> Result<String, FormatError> {
        record.checkpoint();
        let result = self.format_record(record);
        record.restore();
        result
    }

    fn format_record(&self, record: &mut Record) -> Result<String, FormatError> {
        let level_color = if self.use_color {
            self.color_map.get(record.level()).map(str::to_string)
        } else {
            None
        };
        let level_color = match level_color {
            Some(color) => color,
            // Unknown severities and colorless formatters render plain.
            None => {
                if !record.args.is_empty() {
                    let marker = if self.add_brackets_to_args { "[%s]" } else { "%s" };
                    record.msg = rewrite_braces(&record.msg, marker);
                }
                return BaseFormatter::new(self.plain_template.as_str()).render(record);
            }
        };
        let bc = format!("{}{}", self.color_map.brackets, self.bold);
        let ac = format!("{}{}", self.color_map.args, self.bold);
        let lc = format!("{}{}", level_color, self.bold);
        let mut working = self.template.replace("$LEVEL", &lc);
        if !self.color_map.brackets.is_empty() {
            working = color_brackets(&working, &bc);
        }
        if self.wrap_levelname {
            record.levelname = Some(format!("{}{}{}", lc, record.level().name(), RESET));
        }
        record.msg.insert_str(0, &lc);
        if !record.args.is_empty() {
            let replacement = if self.add_brackets_to_args {
                format!("{}[{}%s{}]{}", bc, ac, bc, lc)
            } else {
                format!("{}%s{}", ac, lc)
            };
            record.msg = rewrite_braces(&record.msg, &replacement);
        }
        BaseFormatter::new(working).render(record)
    }
}

/// Replaces each `{}` argument placeholder with `replacement`, leaving
/// escaped `{{}`/`{}}` pairs alone.
fn rewrite_braces(msg: &str, replacement: &str) -> String {
    let bytes = msg.as_bytes();
    let mut out = String::with_capacity(msg.len());
    let mut start = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        let escaped = (i > 0 && bytes[i - 1] == b'{') || (i + 2 < bytes.len() && bytes[i + 2] == b'}');
        if bytes[i] == b'{' && bytes[i + 1] == b'}' && !escaped {
            out.push_str(&msg[start..i]);
            out.push_str(replacement);
            i += 2;
            start = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&msg[start..]);
    out
}

/// Wraps every literal bracket in an already-resolved template with the
/// bracket color and a restore to the bracket's ambient color.
///
/// The ambient color is the run of escape sequences most recently seen
/// while scanning left to right, so a bracket inside the timestamp segment
/// restores the timestamp color and one inside the level segment restores
/// the level color. Brackets before the first escape restore nothing.
fn color_brackets(template: &str, bracket_color: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut ambient = String::new();
    let mut prev_was_escape = false;
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\x1B' {
            if let Some(len) = chars[i..].iter().position(|&c| c == 'm') {
                let seq: String = chars[i..=i + len].iter().collect();
                if !prev_was_escape {
                    ambient.clear();
                }
                ambient.push_str(&seq);
                out.push_str(&seq);
                prev_was_escape = true;
                i += len + 1;
                continue;
            }
        }
        prev_was_escape = false;
        if chars[i] == '[' || chars[i] == ']' {
            out.push_str(bracket_color);
            out.push(chars[i]);
            out.push_str(&ambient);
        } else {
            out.push(chars[i]);
        }
        i += 1;
    }
    out
}
