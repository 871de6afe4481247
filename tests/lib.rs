use chroma_log::colors::{fg_escape, resolve_directives, Color, RESET};
use chroma_log::{ChromaFormatter, Record, Severity};

use chrono::TimeZone;

/// Removes every `\x1B[..m` escape sequence, leaving the visible text.
fn strip_escapes(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(pos) = rest.find('\x1B') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match rest.find('m') {
            Some(end) => rest = &rest[end + 1..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn fixed_record(level: Severity, msg: &str) -> Record {
    let timestamp = chrono::Local
        .ymd(2020, 5, 2)
        .and_hms_milli(13, 14, 15, 167);
    Record::new(level, msg)
        .location("tests.rs", 7)
        .timestamp(timestamp)
}

#[test]
fn record_restoration_is_idempotent() {
    let template = "$GREEN[%(levelname)s]: %(message)s";
    let colored = ChromaFormatter::new(template, true, true);
    let plain = ChromaFormatter::new(template, false, false);

    let mut record = fixed_record(Severity::INFO, "value is {}").arg(7);

    colored.format(&mut record).unwrap();
    assert_eq!(record.msg(), "value is {}");
    assert_eq!(record.args(), ["7"]);

    plain.format(&mut record).unwrap();
    assert_eq!(record.msg(), "value is {}");
    assert_eq!(record.args(), ["7"]);

    // A second pass through the first formatter still sees pristine input.
    colored.format(&mut record).unwrap();
    assert_eq!(record.msg(), "value is {}");
    assert_eq!(record.args(), ["7"]);
}

#[test]
fn handlers_produce_identical_lines_regardless_of_order() {
    let template = "[%(levelname)s]: %(message)s";
    let colored = ChromaFormatter::new(template, true, false);
    let plain = ChromaFormatter::new(template, false, false);

    let mut record = fixed_record(Severity::ERROR, "failed after {} retries").arg(3);
    let first_plain = plain.format(&mut record).unwrap();
    let colored_line = colored.format(&mut record).unwrap();
    let second_plain = plain.format(&mut record).unwrap();

    assert_eq!(first_plain, second_plain);
    assert_ne!(colored_line, first_plain);
    assert!(!first_plain.contains('\x1B'));
}

#[test]
fn color_disable_round_trip() {
    let template = "$BLACK$RED$GREEN$YELLOW$BLUE$MAGENTA$CYAN$WHITE\
                    $LI_BLACK$LI_RED$LI_GREEN$LI_YELLOW$LI_BLUE$LI_MAGENTA$LI_CYAN$LI_WHITE\
                    $RESET$BOLD$LEVEL text";
    let stripped = resolve_directives(template, false, "");
    assert_eq!(stripped, " text");
    assert!(!stripped.contains('\x1B'));
    assert!(!stripped.contains('$'));
}

#[test]
fn unknown_severity_matches_plain_rendering() {
    let template = "$GREEN[%(asctime)s]$LEVEL[%(levelname)s]: %(message)s";
    let colored = ChromaFormatter::new(template, true, true);
    let plain = ChromaFormatter::new(template, false, false);

    let mut record = fixed_record(Severity(35), "custom severity {}").arg("here");
    let fallback = colored.format(&mut record).unwrap();
    let reference = plain.format(&mut record).unwrap();

    assert_eq!(fallback, reference);
    assert!(!fallback.contains('\x1B'));
    assert!(fallback.contains("[Level 35]"));
    assert!(fallback.contains("[here]"));
}

#[test]
fn brackets_around_arguments_toggle() {
    let mut with_brackets = ChromaFormatter::new("%(message)s", false, false);
    with_brackets.add_brackets_to_args = true;
    let mut record = fixed_record(Severity::INFO, "answer is {}").arg(42);
    assert_eq!(with_brackets.format(&mut record).unwrap(), "answer is [42]");

    let mut without_brackets = ChromaFormatter::new("%(message)s", false, false);
    without_brackets.add_brackets_to_args = false;
    let line = without_brackets.format(&mut record).unwrap();
    assert_eq!(line, "answer is 42");
    assert!(!line.contains('['));
}

#[test]
fn colored_arguments_carry_the_arg_color() {
    let white = fg_escape(Color::White);
    let cyan = fg_escape(Color::Cyan);
    let mut formatter = ChromaFormatter::new("%(message)s", true, false);
    formatter.add_brackets_to_args = true;

    let mut record = fixed_record(Severity::INFO, "answer is {}").arg(42);
    let line = formatter.format(&mut record).unwrap();
    // Bracket color defaults to empty, so the argument renders as
    // [<white>42]<level color>.
    let expected_args = format!("[{}42]{}", white, cyan);
    assert!(line.contains(&expected_args), "line was {:?}", line);
}

#[test]
fn recoloring_a_severity_takes_effect_immediately() {
    let cyan = fg_escape(Color::Cyan);
    let green = fg_escape(Color::Green);
    let mut formatter = ChromaFormatter::new("$LEVEL%(message)s", true, false);

    let mut first = fixed_record(Severity::INFO, "one");
    let first_line = formatter.format(&mut first).unwrap();
    assert!(first_line.contains(&cyan));
    assert!(!first_line.contains(&green));

    formatter.color_map.set_color(Severity::INFO, Color::Green);

    let mut second = fixed_record(Severity::INFO, "two");
    let second_line = formatter.format(&mut second).unwrap();
    assert!(second_line.contains(&green));
    assert!(!second_line.contains(&cyan));
}

#[test]
fn end_to_end_scenario() {
    let green = fg_escape(Color::Green);
    let cyan = fg_escape(Color::Cyan);
    let white = fg_escape(Color::White);

    let mut formatter = ChromaFormatter::new(
        "$GREEN[%(asctime)s$LEVEL][%(levelname)s]: %(message)s",
        true,
        false,
    );
    formatter.add_brackets_to_args = false;
    formatter.color_map.set(Severity::INFO, cyan.clone());
    formatter.color_map.args = white.clone();
    formatter.color_map.brackets = String::new();

    let mut record = fixed_record(Severity::INFO, "value is {}").arg(7);
    let line = formatter.format(&mut record).unwrap();

    let expected = format!(
        "{green}[2020-05-02 13:14:15,167{cyan}][INFO]: {cyan}value is {white}7{cyan}{reset}",
        green = green,
        cyan = cyan,
        white = white,
        reset = RESET,
    );
    assert_eq!(line, expected);
    assert!(!line.contains('$'));
    assert_eq!(record.msg(), "value is {}");
    assert_eq!(record.args(), ["7"]);
}

#[test]
fn literal_brackets_inherit_ambient_colors() {
    let green = fg_escape(Color::Green);
    let cyan = fg_escape(Color::Cyan);
    let white = fg_escape(Color::White);

    let mut formatter = ChromaFormatter::new("$GREEN[%(levelname)s]$LEVEL done", true, false);
    formatter.color_map.brackets = white.clone();

    let mut record = fixed_record(Severity::INFO, "ignored");
    let line = formatter.format(&mut record).unwrap();

    // Both brackets take the bracket color and restore the green the
    // template put them in; the level segment stays cyan.
    let expected = format!(
        "{g}{w}[{g}INFO{w}]{g}{c} done{reset}",
        g = green,
        w = white,
        c = cyan,
        reset = RESET,
    );
    assert_eq!(line, expected);
}

#[test]
fn colored_levelname_columns_align_with_plain() {
    let template = "[%(levelname)-8s] x";
    let colored = ChromaFormatter::new(template, true, false);
    let plain = ChromaFormatter::new(template, false, false);

    for level in [Severity::INFO, Severity::WARNING, Severity::CRITICAL].iter() {
        let mut record = fixed_record(*level, "ignored");
        let colored_line = colored.format(&mut record).unwrap();
        let plain_line = plain.format(&mut record).unwrap();
        // The widened width absorbs the escapes wrapped around the level
        // name, nothing more: visible columns match the plain sink.
        assert_eq!(strip_escapes(&colored_line), plain_line);
        assert_eq!(record.levelname(), level.name());
    }

    let mut record = fixed_record(Severity::INFO, "ignored");
    let plain_line = plain.format(&mut record).unwrap();
    assert_eq!(plain_line, "[INFO    ] x");
}

#[test]
fn bold_levelname_columns_align_with_plain() {
    let template = "[%(levelname)-8s] x";
    let colored = ChromaFormatter::new(template, true, true);
    let plain = ChromaFormatter::new(template, false, false);

    let mut record = fixed_record(Severity::ERROR, "ignored");
    let colored_line = colored.format(&mut record).unwrap();
    let plain_line = plain.format(&mut record).unwrap();
    assert_eq!(strip_escapes(&colored_line), plain_line);
}

#[test]
fn widthed_levelname_carries_the_level_color() {
    let cyan = fg_escape(Color::Cyan);
    let formatter = ChromaFormatter::new("[%(levelname)-8s]", true, false);
    let mut record = fixed_record(Severity::INFO, "ignored");
    let line = formatter.format(&mut record).unwrap();
    let wrapped = format!("{}INFO{}", cyan, RESET);
    assert!(line.contains(&wrapped), "line was {:?}", line);
}

#[test]
fn base_formatter_errors_propagate_and_restore() {
    let formatter = ChromaFormatter::new("%(message)s", false, false);
    let mut record = fixed_record(Severity::INFO, "{} and {}").arg("only one");
    assert!(formatter.format(&mut record).is_err());
    assert_eq!(record.msg(), "{} and {}");
    assert_eq!(record.args(), ["only one"]);
}

#[test]
fn adapts_log_crate_records() {
    let source = log::Record::builder()
        .args(format_args!("ready at {}", 8080))
        .level(log::Level::Warn)
        .file(Some("server.rs"))
        .line(Some(21))
        .build();
    let mut record = Record::from(&source);
    assert_eq!(record.level(), Severity::WARNING);
    assert_eq!(record.msg(), "ready at 8080");
    assert_eq!(record.filename(), "server.rs");
    assert_eq!(record.line(), 21);

    let formatter = ChromaFormatter::new("[%(levelname)s][%(filename)s:%(lineno)d]: %(message)s", false, false);
    let line = formatter.format(&mut record).unwrap();
    assert_eq!(line, "[WARNING][server.rs:21]: ready at 8080");
}
