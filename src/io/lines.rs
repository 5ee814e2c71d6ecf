//! Terminator-preserving line iteration.
use std::io::{self, BufRead};

/// Iterator over the lines of a reader, terminators included.
///
/// Unlike [BufRead::lines], each yielded line keeps its trailing `\n`
/// (or `\r\n`), except possibly the last one if the stream does not end
/// with a newline.
pub struct FullLines<R> {
    reader: R,
}

impl<R: BufRead> FullLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Iterator for FullLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Strips a single trailing line terminator (`\n` or `\r\n`), if present.
pub fn trim_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
