//! Interactive URL prompt.

use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter the URL of the image you want to download: ";

/// Prints the prompt and reads one line. Returns None for empty (or EOF) input.
pub fn prompt_url<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let url = line.trim();
    Ok((!url.is_empty()).then(|| url.to_string()))
}
