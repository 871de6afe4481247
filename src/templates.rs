//! Ready-made format templates.

use colored::Color;

/// Builder for the standard `[timestamp][level][file:line]: message`
/// template, with per-field minimum column widths and overridable segment
/// colors.
///
/// ```
/// use chroma_log::TemplateBuilder;
///
/// let template = TemplateBuilder::new()
///     .asctime_width(8)
///     .levelname_width(9)
///     .filename_width(3)
///     .lineno_width(24)
///     .build();
/// assert_eq!(
///     template,
///     "$GREEN[%(asctime)-8s]$LEVEL[%(levelname)-9s]\
///      $MAGENTA[%(filename)-3s:%(lineno)-24d]$LEVEL: %(message)s"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    asctime_width: usize,
    levelname_width: usize,
    filename_width: usize,
    lineno_width: usize,
    timestamp_color: Color,
    filename_color: Color,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    /// Creates a builder with zero minimum widths, a green timestamp
    /// segment and a magenta filename segment.
    pub fn new() -> TemplateBuilder {
        TemplateBuilder {
            asctime_width: 0,
            levelname_width: 0,
            filename_width: 0,
            lineno_width: 0,
            timestamp_color: Color::Green,
            filename_color: Color::Magenta,
        }
    }

    /// Minimum column width of the timestamp field.
    pub fn asctime_width(mut self, width: usize) -> Self {
        self.asctime_width = width;
        self
    }

    /// Minimum column width of the level-name field.
    pub fn levelname_width(mut self, width: usize) -> Self {
        self.levelname_width = width;
        self
    }

    /// Minimum column width of the filename field.
    pub fn filename_width(mut self, width: usize) -> Self {
        self.filename_width = width;
        self
    }

    /// Minimum column width of the line-number field.
    pub fn lineno_width(mut self, width: usize) -> Self {
        self.lineno_width = width;
        self
    }

    /// Color of the timestamp segment.
    pub fn timestamp_color(mut self, color: Color) -> Self {
        self.timestamp_color = color;
        self
    }

    /// Color of the filename/line segment.
    pub fn filename_color(mut self, color: Color) -> Self {
        self.filename_color = color;
        self
    }

    /// Produces the template string, directives included.
    pub fn build(&self) -> String {
        format!(
            "{ts}[%(asctime){a}s]$LEVEL[%(levelname){l}s]{file}[%(filename){f}s:%(lineno){n}d]$LEVEL: %(message)s",
            ts = directive_for(self.timestamp_color),
            file = directive_for(self.filename_color),
            a = width_spec(self.asctime_width),
            l = width_spec(self.levelname_width),
            f = width_spec(self.filename_width),
            n = width_spec(self.lineno_width),
        )
    }
}

fn width_spec(width: usize) -> String {
    if width == 0 {
        String::new()
    } else {
        format!("-{}", width)
    }
}

fn directive_for(color: Color) -> &'static str {
    match color {
        Color::Black => "$BLACK",
        Color::Red => "$RED",
        Color::Green => "$GREEN",
        Color::Yellow => "$YELLOW",
        Color::Blue => "$BLUE",
        Color::Magenta => "$MAGENTA",
        Color::Cyan => "$CYAN",
        Color::White => "$WHITE",
        Color::BrightBlack => "$LI_BLACK",
        Color::BrightRed => "$LI_RED",
        Color::BrightGreen => "$LI_GREEN",
        Color::BrightYellow => "$LI_YELLOW",
        Color::BrightBlue => "$LI_BLUE",
        Color::BrightMagenta => "$LI_MAGENTA",
        Color::BrightCyan => "$LI_CYAN",
        Color::BrightWhite => "$LI_WHITE",
    }
}
