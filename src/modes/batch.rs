//! Batch file classification.
//!
//! Reads file paths (one per line) from a request stream and classifies the
//! whole content of each file, reporting `path,length,code` rows.
use std::fs::File;
use std::io::{BufRead, Write};

use log::error;
use memmap2::Mmap;

use crate::error::Error;
use crate::identifiers::{code_of, Identifier};

/// Code reported for paths that cannot be opened.
pub const NO_FILE: &str = "NOSUCHFILE";

/// Classify every file named on `requests`, one path per line, until
/// end-of-input.
///
/// An unopenable path reports `path,0,NOSUCHFILE` and processing continues.
/// Zero-length files are classified on the empty string, without mapping
/// (mapping zero bytes is undefined on common platforms). Everything else is
/// memory-mapped and classified in one call; the mapping is released as soon
/// as the row is reported.
pub fn classify_paths<I, R, W>(identifier: &I, requests: R, out: &mut W) -> Result<(), Error>
where
    I: Identifier,
    R: BufRead,
    W: Write,
{
    for path in requests.lines() {
        let path = path?;

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                error!("could not open {}: {}", path, e);
                writeln!(out, "{},0,{}", path, NO_FILE)?;
                continue;
            }
        };

        let length = file.metadata()?.len();
        let identification = if length == 0 {
            identifier.identify("")?
        } else {
            // the file must not be truncated by another process while mapped
            let map = unsafe { Mmap::map(&file)? };
            let text = String::from_utf8_lossy(&map);
            identifier.identify(&text)?
        };

        writeln!(out, "{},{},{}", path, length, code_of(identification))?;
    }
    Ok(())
}
