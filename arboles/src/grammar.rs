#![deny(warnings)]

use crate::error::Error;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Head of the auxiliary rule that seeds every parse. No grammar may use it.
pub const AUX_HEAD: &str = "<start>";

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    NonTerm(String),
    // A literal token, only found in scanned items
    Term(String),
}

/// A dotted-rule body. Rules of the grammar only have NonTerm symbols.
#[derive(PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: String,
    pub spec: Vec<Symbol>,
}

/// Right hand side of a production as stored in grammar files: a literal
/// token (lexical rule) or a sequence of symbol names (syntactic rule).
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Alternative {
    Literal(String),
    Sequence(Vec<String>),
}

#[derive(Clone)]
struct Entry {
    alternatives: Vec<Alternative>,
    // Sequence alternatives pre-built for prediction
    rules: Vec<Arc<Rule>>,
    // Literal alternatives for scanning
    lexicon: HashSet<String>,
}

/// Frozen mapping from nonterminal to its alternatives, keys in first-seen
/// order. Built through `GrammarBuilder` which validates it.
#[derive(Clone)]
pub struct Grammar {
    heads: Vec<String>,
    entries: HashMap<String, Entry>,
}

#[derive(Default)]
pub struct GrammarBuilder {
    heads: Vec<String>,
    alternatives: HashMap<String, Vec<Alternative>>,
    error: Option<Error>,
}


impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::NonTerm(name) => name,
            Symbol::Term(token) => token,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Term(token) => write!(f, "Term({})", token),
            Symbol::NonTerm(name) => write!(f, "NonTerm({})", name),
        }
    }
}

impl Rule {
    pub fn new(head: &str, spec: Vec<Symbol>) -> Self {
        Rule{head: head.to_string(), spec}
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.head, self.spec.iter()
               .map(|s| s.name()).collect::<Vec<_>>().join(" "))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Alternative::Literal(token) => write!(f, "{:?}", token),
            Alternative::Sequence(names) => write!(f, "{}", names.join(" ")),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

impl Grammar {
    /// Nonterminals in first-seen order
    pub fn heads(&self) -> impl Iterator<Item=&str> {
        self.heads.iter().map(|h| h.as_str())
    }

    pub fn contains(&self, head: &str) -> bool {
        self.entries.contains_key(head)
    }

    pub fn alternatives(&self, head: &str) -> &[Alternative] {
        self.entries.get(head).map(|e| e.alternatives.as_slice()).unwrap_or_default()
    }

    /// Syntactic rules for `head` in grammar order
    pub fn rules(&self, head: &str) -> &[Arc<Rule>] {
        self.entries.get(head).map(|e| e.rules.as_slice()).unwrap_or_default()
    }

    /// Does `head` have a lexical rule producing `word`
    pub fn derives(&self, head: &str, word: &str) -> bool {
        self.entries.get(head).is_some_and(|e| e.lexicon.contains(word))
    }

    /// Is `word` produced by some lexical rule
    pub fn has_word(&self, word: &str) -> bool {
        self.entries.values().any(|e| e.lexicon.contains(word))
    }

    pub fn is_lexical(&self, head: &str) -> bool {
        self.entries.get(head).is_some_and(|e| !e.lexicon.is_empty())
    }

    /// Total number of alternatives
    pub fn size(&self) -> usize {
        self.entries.values().map(|e| e.alternatives.len()).sum()
    }

    /// Read and validate a grammar file (json object of alternatives).
    pub fn from_reader(reader: impl io::Read) -> Result<Grammar, Error> {
        let table: RuleTable = serde_json::from_reader(reader)?;
        let mut builder = GrammarBuilder::default();
        for (head, alternatives) in table.0 {
            builder.declare(&head);
            for alternative in alternatives {
                builder.add_alternative(&head, alternative, false);
            }
        }
        builder.into_grammar()
    }

    pub fn from_json(json: &str) -> Result<Grammar, Error> {
        Grammar::from_reader(json.as_bytes())
    }
}

impl Serialize for Grammar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.heads.len()))?;
        for head in &self.heads {
            map.serialize_entry(head, self.alternatives(head))?;
        }
        map.end()
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, head) in self.heads.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for alternative in self.alternatives(head) {
                writeln!(f, "{} -> {}", head, alternative)?;
            }
        }
        Ok(())
    }
}

// Json objects are read into a Vec to keep the file's key order
struct RuleTable(Vec<(String, Vec<Alternative>)>);

impl<'de> Deserialize<'de> for RuleTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RuleTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from symbol names to lists of alternatives")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RuleTable, A::Error> {
                let mut table = Vec::new();
                while let Some(entry) = map.next_entry::<String, Vec<Alternative>>()? {
                    table.push(entry);
                }
                Ok(RuleTable(table))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Builds a Grammar while checking rules, validation happens on `into_grammar`.
impl GrammarBuilder {
    fn fail(&mut self, error: Error) {
        // keep the first error, later ones are usually consequences
        self.error.get_or_insert(error);
    }

    // Register a head even if no alternatives follow (those fail validation)
    fn declare(&mut self, head: &str) -> &mut Vec<Alternative> {
        if !self.alternatives.contains_key(head) {
            self.heads.push(head.to_string());
        }
        self.alternatives.entry(head.to_string()).or_default()
    }

    fn add_alternative(&mut self, head: &str, alternative: Alternative, ignore_dups: bool) {
        let alternatives = self.declare(head);
        if !alternatives.contains(&alternative) {
            alternatives.push(alternative);
        } else if !ignore_dups {
            let alternative = alternative.to_string();
            self.fail(Error::DuplicateAlternative{head: head.to_string(), alternative});
        }
    }

    /// Syntactic rule `head -> spec...`
    pub fn rule(mut self, head: &str, spec: &[&str]) -> Self {
        let spec = spec.iter().map(|s| s.to_string()).collect();
        self.add_alternative(head, Alternative::Sequence(spec), false);
        self
    }

    /// Lexical rule `head -> word`
    pub fn lexical(mut self, head: &str, word: &str) -> Self {
        self.add_alternative(head, Alternative::Literal(word.to_string()), false);
        self
    }

    /// Add an alternative silently ignoring it if it already exists.
    /// Doesn't chain to be invoked in loops.
    pub fn alternative_try(&mut self, head: &str, alternative: Alternative) {
        self.add_alternative(head, alternative, true);
    }

    pub fn into_grammar(self) -> Result<Grammar, Error> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut entries = HashMap::new();
        for head in &self.heads {
            if head == AUX_HEAD {
                return Err(Error::ReservedSymbol(head.clone()));
            }
            let alternatives = &self.alternatives[head];
            if alternatives.is_empty() {
                return Err(Error::NoAlternatives(head.clone()));
            }
            let mut rules = Vec::new();
            let mut lexicon = HashSet::new();
            for alternative in alternatives {
                match alternative {
                    Alternative::Literal(token) => { lexicon.insert(token.clone()); },
                    Alternative::Sequence(names) if names.is_empty() =>
                        return Err(Error::EmptySequence(head.clone())),
                    Alternative::Sequence(names) => {
                        // every symbol must be expandable or parsing can't complete
                        if let Some(s) = names.iter().find(|s| !self.alternatives.contains_key(*s)) {
                            return Err(Error::UndefinedSymbol{
                                head: head.clone(), symbol: s.clone()});
                        }
                        let spec = names.iter().map(|s| Symbol::NonTerm(s.clone())).collect();
                        rules.push(Arc::new(Rule::new(head, spec)));
                    }
                }
            }
            entries.insert(head.clone(), Entry{
                alternatives: alternatives.clone(), rules, lexicon});
        }
        Ok(Grammar{heads: self.heads, entries})
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Alternative, Grammar, GrammarBuilder, Symbol};
    use crate::error::Error;
    use std::collections::HashSet;

    fn grammar_dog() -> GrammarBuilder {
        GrammarBuilder::default()
            .rule("S", &["NP", "VP"])
            .lexical("NP", "dog")
            .lexical("NP", "_UNK_")
            .lexical("VP", "barks")
    }

    #[test]
    fn symbol_check_eq_hash() {
        assert_ne!(Symbol::NonTerm("X".to_string()), Symbol::Term("X".to_string()));
        let mut m = HashSet::new();
        m.insert(Symbol::NonTerm("X".to_string()));
        m.insert(Symbol::Term("X".to_string()));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn build_grammar() {
        let g = grammar_dog().into_grammar().unwrap();
        assert_eq!(g.heads().collect::<Vec<_>>(), vec!["S", "NP", "VP"]);
        assert_eq!(g.size(), 4);
        assert_eq!(g.rules("S")[0].to_string(), "S -> NP VP");
        assert!(g.rules("NP").is_empty());
        assert!(g.derives("NP", "_UNK_"));
        assert!(!g.derives("NP", "barks"));
        assert!(g.is_lexical("VP"));
        assert!(g.has_word("_UNK_"));
        assert!(!g.has_word("<unk>"));
        assert!(!g.has_word("NP"));
        assert!(!g.is_lexical("S"));
        assert_eq!(format!("{:?}", g),
                   "S -> NP VP\n\nNP -> \"dog\"\nNP -> \"_UNK_\"\n\nVP -> \"barks\"\n");
    }

    #[test]
    fn grammar_has_dup_rule() {
        let g = grammar_dog().rule("S", &["NP", "VP"]).into_grammar();
        assert_eq!(g.unwrap_err().to_string(), "duplicate rule: S -> NP VP");
        // quiet insertion dedups instead
        let mut b = grammar_dog();
        b.alternative_try("NP", Alternative::Literal("dog".to_string()));
        assert_eq!(b.into_grammar().unwrap().alternatives("NP").len(), 2);
    }

    #[test]
    fn grammar_missing_symbol() {
        let g = grammar_dog().rule("VP", &["V", "NP"]).into_grammar();
        assert!(matches!(g, Err(Error::UndefinedSymbol{head, symbol})
                         if head == "VP" && symbol == "V"));
    }

    #[test]
    fn grammar_rejects_reserved_and_empty() {
        let g = grammar_dog().lexical("<start>", "x").into_grammar();
        assert!(matches!(g, Err(Error::ReservedSymbol(_))));
        let g = grammar_dog().rule("X", &[]).into_grammar();
        assert!(matches!(g, Err(Error::EmptySequence(h)) if h == "X"));
    }

    #[test]
    fn load_keeps_file_order() {
        let json = r#"{"VP": ["barks"], "S": [["NP", "VP"]], "NP": ["dog", "cat"]}"#;
        let g = Grammar::from_json(json).unwrap();
        assert_eq!(g.heads().collect::<Vec<_>>(), vec!["VP", "S", "NP"]);
        assert_eq!(g.alternatives("NP"), &[
            Alternative::Literal("dog".to_string()),
            Alternative::Literal("cat".to_string()),
        ]);
        assert_eq!(serde_json::to_string(&g).unwrap(),
                   r#"{"VP":["barks"],"S":[["NP","VP"]],"NP":["dog","cat"]}"#);
    }

    #[test]
    fn load_validates_references() {
        // NP is referenced but never defined
        let g = Grammar::from_json(r#"{"S": [["NP", "VP"]], "VP": ["barks"]}"#);
        assert!(matches!(g, Err(Error::UndefinedSymbol{symbol, ..}) if symbol == "NP"));
        let g = Grammar::from_json(r#"{"S": [["VP"]], "VP": []}"#);
        assert!(matches!(g, Err(Error::NoAlternatives(h)) if h == "VP"));
        let g = Grammar::from_json(r#"{"S": [["VP"]], "VP": [3]}"#);
        assert!(matches!(g, Err(Error::Json(_))));
    }
}
