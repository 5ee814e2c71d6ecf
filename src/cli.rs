//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

/// Mode selection and parameters.
///
/// The three selection flags are mutually exclusive; without any, the tool
/// classifies stdin as a whole document (or interactively, line by line,
/// when stdin is a terminal).
///
/// ```sh
/// langsieve 0.1.0
/// Language identification and bitext filtering tool.
///
/// USAGE:
///     langsieve [FLAGS] [OPTIONS]
///
/// FLAGS:
///     -b, --batch      classify whole files, paths read from stdin
///     -h, --help       Prints help information
///     -l, --line       classify each line of stdin separately
///     -V, --version    Prints version information
///
/// OPTIONS:
///     -f, --filter <prefix> <src-lang> <tgt-lang> <dst-prefix>    filter a bitext down to correctly-classified pairs
///     -m, --model <model>                                         path to a fasttext model file
/// ```
#[derive(Debug, StructOpt)]
#[structopt(name = "langsieve", about = "Language identification and bitext filtering tool.")]
pub struct Langsieve {
    #[structopt(
        short = "l",
        long = "line",
        help = "classify each line of stdin separately",
        conflicts_with_all = &["batch", "filter"]
    )]
    pub line: bool,

    #[structopt(
        short = "b",
        long = "batch",
        help = "classify whole files, paths read from stdin",
        conflicts_with = "filter"
    )]
    pub batch: bool,

    #[structopt(
        short = "f",
        long = "filter",
        number_of_values = 4,
        value_names = &["prefix", "src-lang", "tgt-lang", "dst-prefix"],
        help = "filter a bitext down to correctly-classified pairs"
    )]
    pub filter: Option<Vec<String>>,

    #[structopt(
        short = "m",
        long = "model",
        parse(from_os_str),
        help = "path to a fasttext model file"
    )]
    pub model: Option<PathBuf>,
}
