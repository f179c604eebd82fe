//! Stdout writes for `finwise`. Output is often piped into `head` or `jq`, so
//! a reader closing the pipe early ends output quietly instead of failing.

use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    emit(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    emit(&mut io::stdout().lock(), text, true)
}

fn emit<W: Write>(writer: &mut W, text: &str, newline: bool) -> io::Result<()> {
    let written = writer.write_all(text.as_bytes()).and_then(|()| {
        if newline {
            writer.write_all(b"\n")
        } else {
            Ok(())
        }
    });
    ignore_closed_pipe(written.and_then(|()| writer.flush()))
}

fn ignore_closed_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
