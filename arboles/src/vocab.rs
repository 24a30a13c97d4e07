#![deny(warnings)]

use crate::config::TrainConfig;
use crate::error::Error;
use crate::extract::Extraction;
use crate::grammar::{Alternative, Grammar, GrammarBuilder};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};


/// Insertion ordered set of strings, stored as a json array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct WordSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl WordSet {
    /// Returns if `word` wasn't there yet
    pub fn insert(&mut self, word: &str) -> bool {
        if self.members.contains(word) {
            return false;
        }
        self.members.insert(word.to_string());
        self.order.push(word.to_string());
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item=&str> {
        self.order.iter().map(|w| w.as_str())
    }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for WordSet {
    fn from_iter<I: IntoIterator<Item=S>>(words: I) -> Self {
        let mut set = WordSet::default();
        for w in words {
            set.insert(w.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for WordSet {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<WordSet> for Vec<String> {
    fn from(set: WordSet) -> Self {
        set.order
    }
}

///////////////////////////////////////////////////////////////////////////////

/// The `count` least frequent words. Ties keep first-seen order so among
/// equally frequent words the latest seen are the first to go.
pub fn uncommon_words(words: &[String], count: usize) -> WordSet {
    let mut freq = HashMap::new();
    let mut distinct = Vec::new();
    for w in words {
        let n = freq.entry(w.as_str()).or_insert(0usize);
        if *n == 0 {
            distinct.push(w.as_str());
        }
        *n += 1;
    }
    if distinct.len() < count {
        warn!(distinct = distinct.len(), uncommon = count,
              "fewer distinct words than uncommon, every word is unknown");
    }
    // stable, equal counts stay in first-seen order
    distinct.sort_by_key(|w| Reverse(freq[w]));
    let skip = distinct.len().saturating_sub(count);
    distinct[skip..].iter().collect()
}

/// Collapse uncommon words into the sentinel and dedup rules into a Grammar.
/// Returns the grammar, its terminal symbols and the known vocabulary.
pub fn compact(extraction: &Extraction, config: &TrainConfig)
        -> Result<(Grammar, WordSet, WordSet), Error> {
    let uncommon = uncommon_words(&extraction.words, config.uncommon);
    let vocabulary: WordSet = extraction.words.iter()
        .filter(|w| !uncommon.contains(w))
        .collect();

    let mut builder = GrammarBuilder::default();
    let mut terminals = WordSet::default();
    for production in &extraction.productions {
        let body = match &production.body {
            Alternative::Literal(word) => {
                terminals.insert(&production.head);
                match uncommon.contains(word) {
                    true => Alternative::Literal(config.sentinel.clone()),
                    false => Alternative::Literal(word.clone()),
                }
            },
            sequence => sequence.clone(),
        };
        builder.alternative_try(&production.head, body);
    }
    let grammar = builder.into_grammar()?;
    debug!(rules = grammar.size(), terminals = terminals.len(),
           vocabulary = vocabulary.len(), unknown = uncommon.len(), "compacted grammar");
    Ok((grammar, terminals, vocabulary))
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{compact, uncommon_words, WordSet};
    use crate::config::TrainConfig;
    use crate::extract::Extraction;
    use crate::grammar::Alternative;
    use crate::trees::Tree;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn wordset_order_and_json() {
        let set: WordSet = ["b", "a", "b", "c"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert!(set.contains("a"));
        assert!(!set.contains("d"));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["b","a","c"]"#);
        assert_eq!(serde_json::from_str::<WordSet>(r#"["x","y","x"]"#).unwrap().len(), 2);
    }

    #[test]
    fn least_frequent_are_uncommon() {
        let ws = words(&["the", "dog", "the", "cat", "a", "the", "dog"]);
        // the:3 dog:2 cat:1 a:1 -> ties in first-seen order
        let rare = uncommon_words(&ws, 1);
        assert_eq!(rare.iter().collect::<Vec<_>>(), vec!["a"]);
        let rare = uncommon_words(&ws, 2);
        assert_eq!(rare.iter().collect::<Vec<_>>(), vec!["cat", "a"]);
        let rare = uncommon_words(&ws, 0);
        assert!(rare.is_empty());
    }

    #[test]
    fn small_corpus_is_all_uncommon() {
        let ws = words(&["dog", "barks"]);
        assert_eq!(uncommon_words(&ws, 50).len(), 2);
        assert_eq!(uncommon_words(&ws, 2).len(), 2);
    }

    #[test]
    fn compact_rewrites_uncommon_words() {
        let trees: Vec<Tree> = [
            "(S (NP dog) (VP barks))",
            "(S (NP dog) (VP runs))",
            "(S (NP cat) (VP barks))",
        ].iter().map(|t| t.parse().unwrap()).collect();
        let extraction: Extraction = trees.iter().collect();
        let config = TrainConfig{uncommon: 2, ..TrainConfig::default()};
        let (grammar, terminals, vocabulary) = compact(&extraction, &config).unwrap();

        // dog:2 barks:2 runs:1 cat:1
        assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["dog", "barks"]);
        assert_eq!(terminals.iter().collect::<Vec<_>>(), vec!["NP", "VP"]);
        assert_eq!(grammar.heads().collect::<Vec<_>>(), vec!["S", "NP", "VP"]);
        assert_eq!(grammar.alternatives("S").len(), 1);
        assert_eq!(grammar.alternatives("NP"), &[
            Alternative::Literal("dog".to_string()),
            Alternative::Literal("_UNK_".to_string()),
        ]);
        assert_eq!(grammar.alternatives("VP"), &[
            Alternative::Literal("barks".to_string()),
            Alternative::Literal("_UNK_".to_string()),
        ]);
    }
}
