#![deny(warnings)]

use crate::error::Error;
use crate::trees::Tree;
use lexers::{Scanner, TreeToken, TreeTokenizer};
use std::io::BufRead;
use std::str::{Chars, FromStr};
use tracing::debug;

type Lexer<'a> = Scanner<TreeTokenizer<Chars<'a>>>;

// Malformed literal, line number gets filled in by the corpus reader
fn malformed(offset: usize, reason: impl Into<String>) -> Error {
    Error::Treebank{line: 0, offset, reason: reason.into()}
}

// skip optional commas, they're only separators
fn skip_commas(lex: &mut Lexer) {
    while let Some((_, TreeToken::Comma)) = lex.peek() {
        lex.next();
    }
}

fn parse_node(lex: &mut Lexer) -> Result<Tree, Error> {
    match lex.next() {
        Some((_, TreeToken::Open)) => (),
        Some((offset, token)) => return Err(malformed(offset, format!("expected '(' found {:?}", token))),
        None => return Err(malformed(0, "unexpected end of input")),
    }
    // tuple and json nodes quote their words, penn nodes don't
    let (label, quoted) = match lex.next() {
        Some((_, TreeToken::Quoted(label))) => (label, true),
        Some((_, TreeToken::Atom(label))) => (label, false),
        Some((offset, token)) => return Err(malformed(offset, format!("expected a label found {:?}", token))),
        None => return Err(malformed(0, "unexpected end of input")),
    };
    let mut words = Vec::new();
    let mut children = Vec::new();
    loop {
        skip_commas(lex);
        match lex.peek() {
            Some((_, TreeToken::Close)) => { lex.next(); break; },
            Some((_, TreeToken::Open)) => children.push(parse_node(lex)?),
            Some((offset, TreeToken::Quoted(word))) if quoted => {
                lex.next();
                words.push((offset, word));
            },
            Some((offset, TreeToken::Atom(word))) if !quoted => {
                lex.next();
                words.push((offset, word));
            },
            Some((offset, TreeToken::Atom(word))) if word.starts_with(['\'', '"']) =>
                return Err(malformed(offset, format!("unterminated string {}", word))),
            Some((offset, TreeToken::Atom(word) | TreeToken::Quoted(word))) =>
                return Err(malformed(offset, format!("node {} mixes quoted and bare word {}", label, word))),
            Some((_, TreeToken::Comma)) => unreachable!("commas were skipped"),
            None => return Err(malformed(0, format!("unbalanced brackets in node {}", label))),
        }
    }
    match (words.len(), children.is_empty()) {
        (1, true) => Ok(Tree::Leaf(label, words.swap_remove(0).1)),
        (0, false) => Ok(Tree::Node(label, children)),
        (0, true) => Err(malformed(0, format!("node {} has no children", label))),
        (_, true) => Err(malformed(words[1].0, format!("leaf {} has more than one word", label))),
        (_, false) => Err(malformed(words[0].0, format!("node {} mixes words and subtrees", label))),
    }
}

impl FromStr for Tree {
    type Err = Error;

    /// Parse a single bracketed tree literal
    fn from_str(literal: &str) -> Result<Tree, Error> {
        let mut lex = TreeTokenizer::scanner(literal);
        let tree = parse_node(&mut lex)?;
        skip_commas(&mut lex);
        match lex.next() {
            None => Ok(tree),
            Some((offset, token)) => Err(malformed(offset, format!("trailing {:?}", token))),
        }
    }
}

/// Read one tree literal per line, blank lines are skipped.
/// The first malformed literal aborts reading.
pub fn read_trees(reader: impl BufRead) -> Result<Vec<Tree>, Error> {
    let mut trees = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Tree>() {
            Ok(tree) => trees.push(tree),
            Err(Error::Treebank{offset, reason, ..}) =>
                return Err(Error::Treebank{line: idx + 1, offset, reason}),
            Err(other) => return Err(other),
        }
    }
    debug!(trees = trees.len(), "read treebank");
    Ok(trees)
}

///////////////////////////////////////////////////////////////////////////////
