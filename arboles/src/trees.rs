#![deny(warnings)]

use crate::error::Error;
use crate::grammar::Symbol;
use crate::items::Item;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::rc::Rc;


/// A syntactic tree, either read from a treebank or rebuilt from a parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    // ("NP", "dog")
    Leaf(String, String),
    // ("S", [("NP", "dog"), ("VP", "barks")])
    Node(String, Vec<Tree>),
}

impl Tree {
    pub fn label(&self) -> &str {
        match self {
            Tree::Leaf(label, _) | Tree::Node(label, _) => label,
        }
    }

    /// Words at the leaves, left to right
    pub fn words(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.collect_words(&mut words);
        words
    }

    fn collect_words<'a>(&'a self, words: &mut Vec<&'a str>) {
        match self {
            Tree::Leaf(_, word) => words.push(word),
            Tree::Node(_, children) => children.iter().for_each(|c| c.collect_words(words)),
        }
    }

    /// Compact json nested arrays, `["S",["NP","dog"],["VP","barks"]]`
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn print(&self) {
        print!("{}", self.outline());
    }

    /// Box drawing outline of the tree, one node per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_helper("", &mut out);
        out
    }

    fn outline_helper(&self, level: &str, out: &mut String) {
        match self {
            Tree::Leaf(label, word) => {
                out.push_str(&format!("{}`-- {} ==> {:?}\n", level, label, word));
            },
            Tree::Node(label, children) => {
                out.push_str(&format!("{}`-- {}\n", level, label));
                if let Some((last, rest)) = children.split_last() {
                    let l = format!("{}  |", level);
                    for n in rest { n.outline_helper(&l, out); }
                    let l = format!("{}   ", level);
                    last.outline_helper(&l, out);
                }
            }
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tree::Leaf(label, word) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(label)?;
                seq.serialize_element(word)?;
                seq.end()
            },
            Tree::Node(label, children) => {
                let mut seq = serializer.serialize_seq(Some(children.len() + 1))?;
                seq.serialize_element(label)?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}

/// Rebuild the derivation of a complete item following its backpointers.
/// Scanned items become leaves, every other item a node with one child
/// per backpointer.
pub fn reconstruct(item: &Rc<Item>) -> Result<Tree, Error> {
    if !item.complete() {
        return Err(Error::Incomplete(item.to_string()));
    }
    if let (Some(Symbol::Term(word)), true) =
            (item.rule.spec.first(), item.backpointers().is_empty()) {
        return Ok(Tree::Leaf(item.head().to_string(), word.clone()));
    }
    let children = item.backpointers().iter()
        .map(reconstruct)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Tree::Node(item.head().to_string(), children))
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{reconstruct, Tree};
    use crate::error::Error;
    use crate::grammar::{Rule, Symbol};
    use crate::items::Item;
    use std::rc::Rc;
    use std::sync::Arc;

    fn leaf(label: &str, word: &str) -> Tree {
        Tree::Leaf(label.to_string(), word.to_string())
    }

    fn sample() -> Tree {
        Tree::Node("S".to_string(), vec![
            Tree::Node("NP".to_string(), vec![leaf("DT", "the"), leaf("NN", "dog")]),
            leaf("VP", "barks"),
        ])
    }

    #[test]
    fn serialize_nested_arrays() {
        assert_eq!(sample().to_json().unwrap(),
                   r#"["S",["NP",["DT","the"],["NN","dog"]],["VP","barks"]]"#);
        assert_eq!(leaf("POS", "\"q\"").to_json().unwrap(), r#"["POS","\"q\""]"#);
    }

    #[test]
    fn tree_yield_and_outline() {
        assert_eq!(sample().words(), vec!["the", "dog", "barks"]);
        assert_eq!(sample().label(), "S");
        assert_eq!(sample().outline(), concat!(
            "`-- S\n",
            "  |`-- NP\n",
            "  |  |`-- DT ==> \"the\"\n",
            "  |   `-- NN ==> \"dog\"\n",
            "   `-- VP ==> \"barks\"\n",
        ));
    }

    #[test]
    fn rebuild_from_items() {
        let rule = Arc::new(Rule::new("S", vec![
            Symbol::NonTerm("NP".to_string()),
            Symbol::NonTerm("VP".to_string()),
        ]));
        let predicted = Rc::new(Item::predict_new(&rule, 0));
        let np = Rc::new(Item::scan_new("NP", "dog", 0));
        let vp = Rc::new(Item::scan_new("VP", "barks", 1));
        let half = Rc::new(Item::complete_new(&predicted, &np, 1));
        let done = Rc::new(Item::complete_new(&half, &vp, 2));

        assert_eq!(reconstruct(&done).unwrap(), Tree::Node("S".to_string(), vec![
            leaf("NP", "dog"), leaf("VP", "barks")]));
        assert_eq!(reconstruct(&np).unwrap(), leaf("NP", "dog"));
        assert!(matches!(reconstruct(&half), Err(Error::Incomplete(_))));
    }
}
