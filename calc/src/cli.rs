use std::{
    io::{BufRead, IsTerminal, Write},
    time::Duration,
};
use calc_core::{environment::prelude::UserId, utils::prelude::Error};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub const PROMPT: &str = ">> ";
pub const EXIT_COMMAND: &str = ".exit";

pub(crate) fn print_session(user: UserId) {
    print_colourful_prefix("Session", Color::Cyan, &format!("user {user}, `{EXIT_COMMAND}` to quit"))
}

pub(crate) fn print_evaluated(lines: usize, failed: usize, duration: Duration) {
    let color = if failed == 0 { Color::Green } else { Color::Red };

    print_colourful_prefix(
        "Evaluated",
        color,
        &format!("{lines} line(s), {failed} failed, in {}", seconds(duration))
    )
}

pub(crate) fn print_stopped() {
    print_colourful_prefix("Stopped", Color::Yellow, "interrupted")
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

pub fn print_error(error: &Error) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    error.pretty(&mut buffer);
    buffer_writer
        .print(&buffer)
        .expect("Writing error to stderr");
}

/// Shows the prompt and reads one line without its line ending.
/// `None` once input is exhausted.
pub fn read_line(prompt: &str) -> std::io::Result<Option<String>> {
    let mut input = String::new();

    print!("{prompt}");
    std::io::stdout().flush()?;

    if std::io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    if let Some('\n') = input.chars().next_back() {
        input.pop();
    }
    if let Some('\r') = input.chars().next_back() {
        input.pop();
    }

    Ok(Some(input))
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
