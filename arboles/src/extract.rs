#![deny(warnings)]

use crate::grammar::Alternative;
use crate::trees::Tree;


/// A raw rule as found in a tree, duplicates are expected.
#[derive(Clone, Debug, PartialEq)]
pub struct Production {
    pub head: String,
    pub body: Alternative,
}

/// Productions and words of a corpus in emission order.
#[derive(Default, Debug)]
pub struct Extraction {
    pub productions: Vec<Production>,
    pub words: Vec<String>,
}

impl Extraction {
    /// Walk `tree` in pre-order emitting one production per node.
    pub fn add_tree(&mut self, tree: &Tree) {
        match tree {
            Tree::Leaf(label, word) => {
                self.productions.push(Production{
                    head: label.clone(),
                    body: Alternative::Literal(word.clone()),
                });
                self.words.push(word.clone());
            },
            Tree::Node(label, children) => {
                let body = children.iter().map(|c| c.label().to_string()).collect();
                self.productions.push(Production{
                    head: label.clone(),
                    body: Alternative::Sequence(body),
                });
                for child in children {
                    self.add_tree(child);
                }
            }
        }
    }
}

impl<'a> FromIterator<&'a Tree> for Extraction {
    fn from_iter<I: IntoIterator<Item=&'a Tree>>(trees: I) -> Self {
        let mut extraction = Extraction::default();
        for tree in trees {
            extraction.add_tree(tree);
        }
        extraction
    }
}

///////////////////////////////////////////////////////////////////////////////
