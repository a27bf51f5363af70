use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, true)
}

/// Treats a closed downstream pipe (`subtrack upcoming | head -1`) as success.
fn write_tolerating_closed_pipe(
    writer: &mut dyn Write,
    text: &str,
    trailing_newline: bool,
) -> io::Result<()> {
    let result = write_and_flush(writer, text, trailing_newline);

    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn write_and_flush(writer: &mut dyn Write, text: &str, trailing_newline: bool) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    if trailing_newline {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
