//! Bitext filtering pipeline.
//!
//! Classifies both sides of a line-aligned parallel corpus concurrently,
//! persists one label per line, then walks the two original files and the
//! two label sequences in lock-step, keeping only the pairs where both
//! sides carry the expected language.
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::Error;
use crate::identifiers::{Identifier, UNKNOWN};
use crate::io::{trim_terminator, FullLines, LabelReader, LabelWriter};

use super::pipeline::Pipeline;

/// The six paths derived from a bitext job.
///
/// Inputs are `{prefix}.{lang}`, transient label files `{prefix}.lid.{lang}`
/// and destinations `{dst_prefix}.{lang}`.
#[derive(Debug)]
struct BitextPaths {
    src: PathBuf,
    tgt: PathBuf,
    src_labels: PathBuf,
    tgt_labels: PathBuf,
    src_dst: PathBuf,
    tgt_dst: PathBuf,
}

impl BitextPaths {
    fn new(prefix: &str, src_lang: &str, tgt_lang: &str, dst_prefix: &str) -> Self {
        Self {
            src: PathBuf::from(format!("{}.{}", prefix, src_lang)),
            tgt: PathBuf::from(format!("{}.{}", prefix, tgt_lang)),
            src_labels: PathBuf::from(format!("{}.lid.{}", prefix, src_lang)),
            tgt_labels: PathBuf::from(format!("{}.lid.{}", prefix, tgt_lang)),
            src_dst: PathBuf::from(format!("{}.{}", dst_prefix, src_lang)),
            tgt_dst: PathBuf::from(format!("{}.{}", dst_prefix, tgt_lang)),
        }
    }
}

/// Removes the transient label files when dropped, so the job leaves no
/// scratch state behind on any exit path.
struct ScratchLabels<'a> {
    paths: [&'a Path; 2],
}

impl Drop for ScratchLabels<'_> {
    fn drop(&mut self) {
        for path in self.paths {
            match fs::remove_file(path) {
                Ok(()) => debug!("removed label file {:?}", path),
                Err(e) if e.kind() == ErrorKind::NotFound => (),
                Err(e) => warn!("could not remove label file {:?}: {}", path, e),
            }
        }
    }
}

/// Bitext filtering pipeline.
///
/// Generic over [Identifier] so that it can run against any model; the
/// identifier is borrowed and must support concurrent calls, since both
/// sides are classified at the same time.
pub struct BitextFilter<'a, I> {
    identifier: &'a I,
    paths: BitextPaths,
    src_lang: String,
    tgt_lang: String,
}

impl<'a, I> BitextFilter<'a, I>
where
    I: Identifier + Sync,
{
    pub fn new(
        identifier: &'a I,
        prefix: &str,
        src_lang: &str,
        tgt_lang: &str,
        dst_prefix: &str,
    ) -> Self {
        Self {
            identifier,
            paths: BitextPaths::new(prefix, src_lang, tgt_lang, dst_prefix),
            src_lang: src_lang.to_string(),
            tgt_lang: tgt_lang.to_string(),
        }
    }

    /// Classify one side of the bitext, writing one label per line.
    ///
    /// Labels are flushed before returning, so the sequence is complete and
    /// readable once this side reports completion.
    fn classify_side(&self, input: &Path, labels: &Path) -> Result<usize, Error> {
        let reader = BufReader::new(File::open(input)?);
        let mut sink = LabelWriter::create(labels)?;

        let mut lines = 0;
        for line in FullLines::new(reader) {
            let line = line?;
            let identification = self.identifier.identify(trim_terminator(&line))?;
            sink.push(identification.as_ref().map_or(UNKNOWN, |i| i.label()))?;
            lines += 1;
        }
        sink.finish()?;

        debug!("{:?}: {} lines labelled", input, lines);
        Ok(lines)
    }

    /// Lock-step walk of the two inputs and the two label sequences.
    ///
    /// All four streams advance together; the pass stops as soon as any one
    /// of them is exhausted, so differing cardinalities terminate the walk
    /// rather than producing ragged pairs. Kept lines are re-emitted
    /// verbatim, terminators included.
    fn align(&self) -> Result<usize, Error> {
        let paths = &self.paths;
        let mut src_lines = FullLines::new(BufReader::new(File::open(&paths.src)?));
        let mut tgt_lines = FullLines::new(BufReader::new(File::open(&paths.tgt)?));
        let mut src_labels = LabelReader::open(&paths.src_labels)?;
        let mut tgt_labels = LabelReader::open(&paths.tgt_labels)?;

        let src_dst = File::create(&paths.src_dst)?;
        let tgt_dst = match File::create(&paths.tgt_dst) {
            Ok(f) => f,
            Err(e) => {
                // a lone truncated sibling must not survive the failure
                if let Err(rm) = fs::remove_file(&paths.src_dst) {
                    warn!("could not remove {:?}: {}", paths.src_dst, rm);
                }
                return Err(e.into());
            }
        };
        let mut src_dst = BufWriter::new(src_dst);
        let mut tgt_dst = BufWriter::new(tgt_dst);

        let mut kept = 0;
        while let (Some(src_line), Some(tgt_line), Some(src_label), Some(tgt_label)) = (
            src_lines.next(),
            tgt_lines.next(),
            src_labels.next(),
            tgt_labels.next(),
        ) {
            let (src_line, tgt_line) = (src_line?, tgt_line?);
            let (src_label, tgt_label) = (src_label?, tgt_label?);

            if src_label == self.src_lang && tgt_label == self.tgt_lang {
                src_dst.write_all(src_line.as_bytes())?;
                tgt_dst.write_all(tgt_line.as_bytes())?;
                kept += 1;
            }
        }

        src_dst.flush()?;
        tgt_dst.flush()?;
        Ok(kept)
    }
}

impl<I> Pipeline<usize> for BitextFilter<'_, I>
where
    I: Identifier + Sync,
{
    /// Runs classification of both sides concurrently, then the alignment
    /// pass. Returns the number of pairs kept.
    fn run(&self) -> Result<usize, Error> {
        let paths = &self.paths;

        // both inputs must be openable before any destination or scratch
        // file is touched
        File::open(&paths.src)?;
        File::open(&paths.tgt)?;

        let _scratch = ScratchLabels {
            paths: [&paths.src_labels, &paths.tgt_labels],
        };

        info!("classifying {:?} and {:?}", paths.src, paths.tgt);
        let (src_side, tgt_side) = rayon::join(
            || self.classify_side(&paths.src, &paths.src_labels),
            || self.classify_side(&paths.tgt, &paths.tgt_labels),
        );
        let (src_lines, tgt_lines) = (src_side?, tgt_side?);
        if src_lines != tgt_lines {
            warn!(
                "side line counts differ ({} vs {}): filtering stops at the shorter side",
                src_lines, tgt_lines
            );
        }

        let kept = self.align()?;
        info!("kept {}/{} pairs", kept, src_lines.min(tgt_lines));
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::fs;
    use std::path::Path;

    use crate::identifiers::Identification;

    use super::*;

    const EN_WORDS: &[&str] = &["hello", "cat", "dog", "the", "quick"];
    const FR_WORDS: &[&str] = &["bonjour", "chat", "chien", "le", "vite"];

    /// Deterministic oracle: majority vote over two small word lists.
    struct WordOracle;

    impl Identifier for WordOracle {
        fn identify(&self, sentence: &str) -> Result<Option<Identification>, Error> {
            let mut en = 0;
            let mut fr = 0;
            for word in sentence.split_whitespace() {
                if EN_WORDS.contains(&word) {
                    en += 1;
                }
                if FR_WORDS.contains(&word) {
                    fr += 1;
                }
            }
            Ok(match en.cmp(&fr) {
                Ordering::Greater => Some(Identification::new("en".to_string(), 1.0)),
                Ordering::Less => Some(Identification::new("fr".to_string(), 1.0)),
                Ordering::Equal => None,
            })
        }
    }

    fn write_bitext(dir: &Path, prefix: &str, src: &str, tgt: &str) -> String {
        let prefix = dir.join(prefix).to_str().unwrap().to_string();
        fs::write(format!("{}.en", prefix), src).unwrap();
        fs::write(format!("{}.fr", prefix), tgt).unwrap();
        prefix
    }

    fn run_filter(prefix: &str, dst_prefix: &str) -> Result<usize, Error> {
        BitextFilter::new(&WordOracle, prefix, "en", "fr", dst_prefix).run()
    }

    #[test_log::test]
    fn test_misclassified_pair_dropped() {
        // middle pair has a french word on the english side
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_bitext(
            dir.path(),
            "corpus",
            "hello\nbonjour\ncat\n",
            "bonjour\nhello\nchat\n",
        );
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        let kept = run_filter(&prefix, &dst).unwrap();
        assert_eq!(kept, 2);
        assert_eq!(fs::read_to_string(format!("{}.en", dst)).unwrap(), "hello\ncat\n");
        assert_eq!(fs::read_to_string(format!("{}.fr", dst)).unwrap(), "bonjour\nchat\n");
    }

    #[test]
    fn test_identity_when_all_match() {
        let dir = tempfile::tempdir().unwrap();
        let src = "hello the cat\nthe quick dog\n";
        let tgt = "bonjour le chat\nle chien vite\n";
        let prefix = write_bitext(dir.path(), "corpus", src, tgt);
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        let kept = run_filter(&prefix, &dst).unwrap();
        assert_eq!(kept, 2);
        assert_eq!(fs::read_to_string(format!("{}.en", dst)).unwrap(), src);
        assert_eq!(fs::read_to_string(format!("{}.fr", dst)).unwrap(), tgt);
    }

    #[test]
    fn test_ragged_inputs_stop_at_shorter_side() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_bitext(
            dir.path(),
            "corpus",
            "hello\ncat\ndog\n",
            "bonjour\nchat\n",
        );
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        let kept = run_filter(&prefix, &dst).unwrap();
        assert_eq!(kept, 2);
        assert_eq!(fs::read_to_string(format!("{}.en", dst)).unwrap(), "hello\ncat\n");
        assert_eq!(fs::read_to_string(format!("{}.fr", dst)).unwrap(), "bonjour\nchat\n");
    }

    #[test]
    fn test_empty_bitext() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_bitext(dir.path(), "corpus", "", "");
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        let kept = run_filter(&prefix, &dst).unwrap();
        assert_eq!(kept, 0);
        assert_eq!(fs::read_to_string(format!("{}.en", dst)).unwrap(), "");
        assert_eq!(fs::read_to_string(format!("{}.fr", dst)).unwrap(), "");
    }

    #[test]
    fn test_unterminated_last_line_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_bitext(dir.path(), "corpus", "hello\ncat", "bonjour\nchat");
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        let kept = run_filter(&prefix, &dst).unwrap();
        assert_eq!(kept, 2);
        assert_eq!(fs::read_to_string(format!("{}.en", dst)).unwrap(), "hello\ncat");
        assert_eq!(fs::read_to_string(format!("{}.fr", dst)).unwrap(), "bonjour\nchat");
    }

    #[test]
    fn test_label_files_removed() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_bitext(dir.path(), "corpus", "hello\n", "bonjour\n");
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        run_filter(&prefix, &dst).unwrap();
        assert!(!Path::new(&format!("{}.lid.en", prefix)).exists());
        assert!(!Path::new(&format!("{}.lid.fr", prefix)).exists());
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("corpus").to_str().unwrap().to_string();
        // only the source side exists
        fs::write(format!("{}.en", prefix), "hello\n").unwrap();
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        assert!(run_filter(&prefix, &dst).is_err());
        assert!(!Path::new(&format!("{}.en", dst)).exists());
        assert!(!Path::new(&format!("{}.fr", dst)).exists());
        assert!(!Path::new(&format!("{}.lid.en", prefix)).exists());
    }

    #[test]
    fn test_unknown_labels_never_match() {
        let dir = tempfile::tempdir().unwrap();
        // equal votes on the source side yield no identification at all
        let prefix = write_bitext(dir.path(), "corpus", "hello bonjour\n", "bonjour\n");
        let dst = dir.path().join("filtered").to_str().unwrap().to_string();

        let kept = run_filter(&prefix, &dst).unwrap();
        assert_eq!(kept, 0);
        assert_eq!(fs::read_to_string(format!("{}.en", dst)).unwrap(), "");
    }
}
