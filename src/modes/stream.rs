//! Document, line and interactive stdin modes.
//!
//! Reported byte lengths are raw: they include the line terminator in line
//! and interactive modes, while classification itself runs on the line with
//! the terminator stripped.
use std::io::{BufRead, Read, Write};

use crate::error::Error;
use crate::identifiers::{code_of, Identifier};
use crate::io::{trim_terminator, FullLines};

/// Read the whole input as one document and classify it once.
pub fn classify_document<I, R, W>(identifier: &I, mut input: R, out: &mut W) -> Result<(), Error>
where
    I: Identifier,
    R: Read,
    W: Write,
{
    let mut content = Vec::new();
    let length = input.read_to_end(&mut content)?;
    let text = String::from_utf8_lossy(&content);

    let identification = identifier.identify(&text)?;
    writeln!(out, "{},{}", code_of(identification), length)?;
    Ok(())
}

/// Classify each input line separately.
pub fn classify_lines<I, R, W>(identifier: &I, input: R, out: &mut W) -> Result<(), Error>
where
    I: Identifier,
    R: BufRead,
    W: Write,
{
    for line in FullLines::new(input) {
        let line = line?;
        let identification = identifier.identify(trim_terminator(&line))?;
        writeln!(out, "{},{}", code_of(identification), line.len())?;
    }
    Ok(())
}

/// Prompting per-line loop, terminated by an empty line or end-of-input.
pub fn interactive<I, R, W>(identifier: &I, mut input: R, out: &mut W) -> Result<(), Error>
where
    I: Identifier,
    R: BufRead,
    W: Write,
{
    writeln!(out, "langsieve interactive mode.")?;
    loop {
        write!(out, ">>> ")?;
        out.flush()?;

        let mut line = String::new();
        let length = input.read_line(&mut line)?;
        // 0 for end-of-input, 1 for a bare newline
        if length <= 1 {
            break;
        }

        let identification = identifier.identify(trim_terminator(&line))?;
        writeln!(out, "{},{}", code_of(identification), length)?;
    }
    writeln!(out, "Bye!")?;
    Ok(())
}
