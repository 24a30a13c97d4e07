#![deny(warnings)]

mod config;
pub use crate::config::{ParserConfig, TrainConfig, SENTINEL};

mod error;
pub use crate::error::Error;

mod grammar;
pub use crate::grammar::{Alternative, Grammar, GrammarBuilder, Rule, Symbol, AUX_HEAD};

mod treebank;
pub use crate::treebank::read_trees;

mod extract;
pub use crate::extract::{Extraction, Production};

mod vocab;
pub use crate::vocab::{compact, uncommon_words, WordSet};

mod items;
pub use crate::items::{Chart, Item, StateSet};

mod parser;
pub use crate::parser::{Derivation, EarleyParser};

mod trees;
pub use crate::trees::{reconstruct, Tree};

mod unknown;
pub use crate::unknown::{restore, substitute};

mod model;
pub use crate::model::{Model, ModelFiles};

mod pipeline;
pub use crate::pipeline::{output_path, BatchReport, SentenceParser, FAILURE_MARKER};

#[cfg(test)]
mod parser_test;
