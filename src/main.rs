//! # Langsieve
//!
//! Langsieve classifies the language of text with a fasttext model and, in
//! filter mode, reduces a bitext (two line-aligned parallel files) to the
//! line pairs whose two sides are classified as the expected languages.
//!
//! ## Getting started
//!
//! ```sh
//! langsieve 0.1.0
//! Language identification and bitext filtering tool.
//!
//! USAGE:
//!     langsieve [FLAGS] [OPTIONS]
//!
//! FLAGS:
//!     -b, --batch      classify whole files, paths read from stdin
//!     -l, --line       classify each line of stdin separately
//!
//! OPTIONS:
//!     -f, --filter <prefix> <src-lang> <tgt-lang> <dst-prefix>
//!     -m, --model <model>    path to a fasttext model file
//! ```
use std::io::{self, IsTerminal};

use log::debug;
use structopt::StructOpt;

use langsieve::error::Error;
use langsieve::identifiers::FastText;
use langsieve::modes;
use langsieve::pipelines::{BitextFilter, Pipeline};

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Langsieve::from_args();
    debug!("cli args\n{:#?}", opt);

    // one identifier per run, shared by whichever mode runs
    let identifier = match &opt.model {
        Some(path) => FastText::new(path, 0.0)?,
        None => FastText::new_lid()?,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if let Some(job) = &opt.filter {
        let [prefix, src_lang, tgt_lang, dst_prefix] = job.as_slice() else {
            return Err(Error::Custom(
                "filter mode takes prefix, source lang, target lang and destination prefix"
                    .to_string(),
            ));
        };
        let pipeline = BitextFilter::new(&identifier, prefix, src_lang, tgt_lang, dst_prefix);
        pipeline.run()?;
    } else if opt.batch {
        modes::classify_paths(&identifier, stdin.lock(), &mut stdout)?;
    } else if opt.line {
        modes::classify_lines(&identifier, stdin.lock(), &mut stdout)?;
    } else if stdin.is_terminal() {
        modes::interactive(&identifier, stdin.lock(), &mut stdout)?;
    } else {
        modes::classify_document(&identifier, stdin.lock(), &mut stdout)?;
    }

    Ok(())
}
