//! Directive token resolution, built on the `colored` crate's color table.
//!
//! A format template may contain `$`-prefixed directive tokens which this
//! module rewrites into ANSI escape sequences: sixteen named colors
//! (`$RED`, `$LI_RED`, ...), `$RESET`, `$BOLD`, and the per-record
//! placeholder `$LEVEL`. Tokens are matched as whole words by a single
//! left-to-right pass, so `$RED` can never consume the start of `$RESET`
//! and `$BLUE` is never found inside `$BLACK`.

pub use colored::Color;

/// Escape sequence resetting all colors and styles.
pub const RESET: &str = "\x1B[0m";
/// Escape sequence enabling bold/bright text.
pub const BOLD: &str = "\x1B[1m";

/// Byte length of a single foreground color escape (`\x1B[` + 2 digits + `m`).
const COLOR_WIDTH: usize = 5;

/// Directive words and the colors they resolve to.
static WORD_TO_COLOR: [(&str, Color); 16] = [
    ("BLACK", Color::Black),
    ("RED", Color::Red),
    ("GREEN", Color::Green),
    ("YELLOW", Color::Yellow),
    ("BLUE", Color::Blue),
    ("MAGENTA", Color::Magenta),
    ("CYAN", Color::Cyan),
    ("WHITE", Color::White),
    ("LI_BLACK", Color::BrightBlack),
    ("LI_RED", Color::BrightRed),
    ("LI_GREEN", Color::BrightGreen),
    ("LI_YELLOW", Color::BrightYellow),
    ("LI_BLUE", Color::BrightBlue),
    ("LI_MAGENTA", Color::BrightMagenta),
    ("LI_CYAN", Color::BrightCyan),
    ("LI_WHITE", Color::BrightWhite),
];

/// Builds the foreground escape sequence for a [`Color`].
///
/// [`Color`]: https://docs.rs/colored/1/colored/enum.Color.html
#[inline]
pub fn fg_escape(color: Color) -> String {
    format!("\x1B[{}m", color.to_fg_str())
}

/// Looks up the color a directive word names, if any.
pub fn color_for_word(word: &str) -> Option<Color> {
    WORD_TO_COLOR
        .iter()
        .find(|(name, _)| *name == word)
        .map(|&(_, color)| color)
}

/// Rewrites every directive token in `template`.
///
/// When `use_color` is true the template is prefixed with `bold` and
/// suffixed with a final `$RESET` before resolution, and each token is
/// replaced as follows:
///
/// - a named color becomes its foreground escape followed by `bold`,
/// - `$RESET` becomes the reset escape followed by `bold`, so text after a
///   reset still renders bold when bold mode is on,
/// - `$BOLD` becomes the bold escape alone,
/// - `$LEVEL` is left in place; its value depends on each record's severity
///   and is substituted per call by the formatter,
/// - an unrecognized word (say `$PURPLE`) is left in the output literally.
///   That is a configuration mistake surfaced in the rendered line, not an
///   error.
///
/// When `use_color` is false every token matching `$` + uppercase/underscore
/// word is deleted, `$LEVEL` and unrecognized words included: the uncolored
/// path never needs any substitution.
pub fn resolve_directives(template: &str, use_color: bool, bold: &str) -> String {
    if !use_color {
        return rewrite_tokens(template, |_, _| {});
    }
    let decorated = format!("{}{}$RESET", bold, template);
    rewrite_tokens(&decorated, |word, out| match word {
        "RESET" => {
            out.push_str(RESET);
            out.push_str(bold);
        }
        "BOLD" => out.push_str(BOLD),
        "LEVEL" => out.push_str("$LEVEL"),
        _ => match color_for_word(word) {
            Some(color) => {
                out.push_str(&fg_escape(color));
                out.push_str(bold);
            }
            None => {
                out.push('$');
                out.push_str(word);
            }
        },
    })
}

/// Widens the minimum field width of a `%(levelname)-<n>s` specifier by the
/// number of bytes the color and reset escapes wrapped around the level
/// name occupy. The padding then absorbs exactly those invisible bytes, so
/// the colored rendering keeps the visible column width the author chose
/// for plain text.
///
/// This goes hand in hand with the formatter injecting `<level color><name>
/// <reset>` as the field value on width-carrying templates; widening a
/// template whose level name renders bare would over-pad it instead.
///
/// Templates without a width-carrying levelname field pass through
/// unchanged, as does everything when `use_color` is false.
pub fn widen_level_width(template: &str, use_color: bool, bold: &str) -> String {
    const NEEDLE: &str = "%(levelname)-";
    if !use_color {
        return template.to_string();
    }
    let start = match template.find(NEEDLE) {
        Some(pos) => pos + NEEDLE.len(),
        None => return template.to_string(),
    };
    let digits = template[start..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 || !template[start + digits..].starts_with('s') {
        return template.to_string();
    }
    let width: usize = match template[start..start + digits].parse() {
        Ok(width) => width,
        Err(_) => return template.to_string(),
    };
    let width = width + COLOR_WIDTH + RESET.len() + bold.len();
    format!(
        "{}{}{}",
        &template[..start],
        width,
        &template[start + digits..]
    )
}

/// Single-pass tokenizer over `template`: copies text through and hands
/// every `$` + `[A-Z_]+` word to `on_token` to emit a replacement. A `$`
/// not followed by such a word is ordinary text.
fn rewrite_tokens(template: &str, mut on_token: impl FnMut(&str, &mut String)) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let len = after
            .bytes()
            .take_while(|&b| b.is_ascii_uppercase() || b == b'_')
            .count();
        if len == 0 {
            out.push('$');
            rest = after;
        } else {
            on_token(&after[..len], &mut out);
            rest = &after[len..];
        }
    }
    out.push_str(rest);
    out
}
