//! Prints every severity with the default palette, then recolors some of
//! them mid-run. Run with `cargo run --example chroma-demo`.

use chroma_log::colors::Color;
use chroma_log::{ChromaFormatter, Record, Severity, TemplateBuilder};

fn emit(formatter: &ChromaFormatter, level: Severity, msg: &str, arg: &str) {
    let mut record = Record::new(level, msg).arg(arg).location("chroma_demo.rs", 0);
    match formatter.format(&mut record) {
        Ok(line) => println!("{}", line),
        Err(err) => eprintln!("formatting failed: {}", err),
    }
}

fn main() {
    let template = TemplateBuilder::new().levelname_width(8).build();
    let mut formatter = ChromaFormatter::new(&template, true, false);

    emit(&formatter, Severity::DEBUG, "This is a {} message.", "debug");
    emit(&formatter, Severity::INFO, "This is an {} message.", "info");
    emit(&formatter, Severity::WARNING, "This is a {} message.", "warning");
    emit(&formatter, Severity::ERROR, "This is an {} message.", "error");
    emit(&formatter, Severity::CRITICAL, "This is a {} message.", "critical");

    formatter.color_map.set_color(Severity::INFO, Color::Cyan);
    formatter.color_map.brackets = chroma_log::colors::fg_escape(Color::Red);
    formatter.color_map.args = chroma_log::colors::fg_escape(Color::Magenta);
    emit(&formatter, Severity::INFO, "Altered colors {} message.", "info");

    formatter.add_brackets_to_args = false;
    emit(&formatter, Severity::INFO, "No brackets around {} now.", "arguments");
}
