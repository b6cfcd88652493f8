//! Interactive confirmation before anything is deleted.

use std::io::{BufRead, Write};

/// The only answer that lets a reset proceed.
pub const CONFIRM_WORD: &str = "YES";

/// Warn, prompt, and read one line. Returns `true` only when the answer is
/// exactly [`CONFIRM_WORD`] once surrounding whitespace is stripped.
///
/// End of input counts as a refusal.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    target: &str,
) -> std::io::Result<bool> {
    writeln!(output)?;
    writeln!(output, "⚠️  This will permanently delete ALL race data.")?;
    writeln!(output, "Backend: {target}")?;
    write!(output, "Type  {CONFIRM_WORD}  to continue: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(line.trim() == CONFIRM_WORD)
}
