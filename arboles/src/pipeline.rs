#![deny(warnings)]

use crate::error::Error;
use crate::parser::EarleyParser;
use crate::trees::Tree;
use crate::unknown::{restore, substitute};
use crate::vocab::WordSet;
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Written in place of a tree for sentences that didn't parse
pub const FAILURE_MARKER: &str = "null";

/// Parses raw sentences end to end: tokenize, hide unknown words behind the
/// sentinel, parse, rebuild the tree and put the original words back.
pub struct SentenceParser {
    parser: EarleyParser,
    vocabulary: WordSet,
}

#[derive(Debug, Default, PartialEq)]
pub struct BatchReport {
    pub parsed: usize,
    pub failed: usize,
}

impl SentenceParser {
    pub fn new(parser: EarleyParser, vocabulary: WordSet) -> SentenceParser {
        SentenceParser{parser, vocabulary}
    }

    /// Parse one whitespace separated sentence. Returns the tree as parsed,
    /// ie: with sentinels, and its json with the original words restored.
    pub fn analyze(&self, sentence: &str) -> Result<(Tree, String), Error> {
        let sentinel = &self.parser.config().sentinel;
        let words: Vec<_> = sentence.split_whitespace().collect();
        let (tokens, replaced) = substitute(&words, &self.vocabulary, sentinel);
        let tree = self.parser.parse(&tokens)?.tree()?;
        let json = restore(&tree.to_json()?, sentinel, &replaced)?;
        Ok((tree, json))
    }

    pub fn parse_sentence(&self, sentence: &str) -> Result<String, Error> {
        self.analyze(sentence).map(|(_, json)| json)
    }

    /// Parse sentences in parallel, results keep the input order.
    pub fn parse_batch<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> Vec<Result<String, Error>> {
        sentences.par_iter()
            .map(|s| self.parse_sentence(s.as_ref()))
            .collect()
    }

    /// Parse a file with one sentence per line into `<path>.parse`, one json
    /// tree per line or the failure marker for sentences that didn't parse.
    pub fn parse_file(&self, path: &Path) -> Result<BatchReport, Error> {
        let content = fs::read_to_string(path)?;
        let sentences: Vec<_> = content.lines().collect();
        let output = output_path(path);
        let mut writer = BufWriter::new(File::create(&output)?);
        let mut report = BatchReport::default();
        for (idx, result) in self.parse_batch(&sentences).into_iter().enumerate() {
            match result {
                Ok(json) => {
                    report.parsed += 1;
                    writeln!(writer, "{}", json)?;
                },
                Err(e) if e.is_recoverable() => {
                    warn!(line = idx + 1, error = %e, "sentence failed to parse");
                    report.failed += 1;
                    writeln!(writer, "{}", FAILURE_MARKER)?;
                },
                Err(e) => return Err(e),
            }
        }
        writer.flush()?;
        info!(parsed = report.parsed, failed = report.failed,
              output = %output.display(), "parsed file");
        Ok(report)
    }
}

/// `sentences.txt` -> `sentences.txt.parse`
pub fn output_path(path: &Path) -> PathBuf {
    let mut output = path.as_os_str().to_owned();
    output.push(".parse");
    PathBuf::from(output)
}

///////////////////////////////////////////////////////////////////////////////
