use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_flushed(text.as_bytes())
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push('\n');
    write_flushed(line.as_bytes())
}

/// Writes one streamed chat token. Flushes so each word appears as it arrives.
pub fn write_stdout_token(token: &str) -> io::Result<()> {
    write_flushed(token.as_bytes())
}

fn write_flushed(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_broken_pipe(stdout.write_all(bytes))?;
    tolerate_broken_pipe(stdout.flush())
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
