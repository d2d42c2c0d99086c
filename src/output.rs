use std::io::{self, Write};

/// Prints `message` to stdout and, when given, to `writer` as well.
pub fn println(message: &str, writer: &mut Option<&mut dyn Write>) -> io::Result<()> {
    if let Err(e) = writeln!(io::stdout(), "{message}") {
        eprintln!("Failed to write to stdout: {e}");
    }

    if let Some(w) = writer {
        writeln!(w, "{message}")?;
    }

    Ok(())
}
