//! Persisted label sequences.
//!
//! A label sequence holds one language code per line of a classified file.
//! It is written by a classification task and read back during the alignment
//! pass, possibly by different tasks, so it is persisted to disk.
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

/// Buffered writer appending one language code per line.
pub struct LabelWriter {
    inner: BufWriter<File>,
}

impl LabelWriter {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            inner: BufWriter::new(File::create(path)?),
        })
    }

    pub fn push(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.inner, "{}", label)
    }

    /// Flush buffered labels. Must be called before another reader opens the file.
    pub fn finish(mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Reads a label sequence back, one code per item, terminators stripped.
pub struct LabelReader {
    lines: Lines<BufReader<File>>,
}

impl LabelReader {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self {
            lines: BufReader::new(File::open(path)?).lines(),
        })
    }
}

impl Iterator for LabelReader {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}
