#![deny(warnings)]

use crate::config::{ParserConfig, TrainConfig};
use crate::error::Error;
use crate::extract::Extraction;
use crate::grammar::Grammar;
use crate::parser::EarleyParser;
use crate::trees::Tree;
use crate::vocab::{compact, WordSet};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;


/// Everything training produces and parsing needs.
#[derive(Clone)]
pub struct Model {
    pub grammar: Grammar,
    pub terminals: WordSet,
    pub vocabulary: WordSet,
}

/// Paths of the three artifacts of a model called `label` inside `dir`.
pub struct ModelFiles {
    pub grammar: PathBuf,
    pub terminals: PathBuf,
    pub vocabulary: PathBuf,
}

impl ModelFiles {
    pub fn new(dir: &Path, label: &str) -> ModelFiles {
        ModelFiles{
            grammar: dir.join(format!("grammar_{}.json", label)),
            terminals: dir.join(format!("terminals_{}.json", label)),
            vocabulary: dir.join(format!("vocab_{}.json", label)),
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_words(path: &Path) -> Result<WordSet, Error> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}

impl Model {
    pub fn train(trees: &[Tree], config: &TrainConfig) -> Result<Model, Error> {
        let extraction: Extraction = trees.iter().collect();
        let (grammar, terminals, vocabulary) = compact(&extraction, config)?;
        info!(trees = trees.len(), productions = extraction.productions.len(),
              rules = grammar.size(), "trained grammar");
        Ok(Model{grammar, terminals, vocabulary})
    }

    pub fn save(&self, files: &ModelFiles) -> Result<(), Error> {
        write_json(&files.grammar, &self.grammar)?;
        write_json(&files.terminals, &self.terminals)?;
        write_json(&files.vocabulary, &self.vocabulary)?;
        info!(grammar = %files.grammar.display(), "saved model");
        Ok(())
    }

    /// Load and validate the three artifacts
    pub fn load(files: &ModelFiles) -> Result<Model, Error> {
        let grammar = Grammar::from_reader(BufReader::new(File::open(&files.grammar)?))?;
        let terminals = read_words(&files.terminals)?;
        let vocabulary = read_words(&files.vocabulary)?;
        info!(rules = grammar.size(), terminals = terminals.len(),
              vocabulary = vocabulary.len(), "loaded model");
        Ok(Model{grammar, terminals, vocabulary})
    }

    /// Split the model into a parser and the vocabulary used for substitution.
    pub fn into_parser(self, config: ParserConfig) -> Result<(EarleyParser, WordSet), Error> {
        let parser = EarleyParser::new(self.grammar, self.terminals, config)?;
        Ok((parser, self.vocabulary))
    }
}

///////////////////////////////////////////////////////////////////////////////
