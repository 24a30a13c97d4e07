#![deny(warnings)]

use crate::grammar::{Rule, Symbol};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::{fmt, hash, ops};


/// An Item is a partially matched `Rule`. `dot` shows the match progress.
pub struct Item {
    pub rule: Arc<Rule>, // LR0item (dotted rule)
    pub dot: usize,      // dot position within the rule
    pub start: usize,    // input position where the item starts
    pub end: usize,      // input position where the item ends

    // Completed items that advanced the dot, one per matched symbol.
    // Written once when the item is built. The first derivation of an item
    // to reach the chart wins, later equal items are dropped with theirs.
    backpointers: Vec<Rc<Item>>,
}

// Items are deduped only by rule, dot, start, end (ie: not backpointers)
impl hash::Hash for Item {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.rule.hash(state);
        self.dot.hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Item) -> bool {
        self.rule == other.rule &&
        self.dot == other.dot &&
        self.start == other.start &&
        self.end == other.end
    }
}

impl Eq for Item {}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pre = self.rule.spec.iter().take(self.dot)
            .map(|s| s.name()).collect::<Vec<_>>().join(" ");
        let post = self.rule.spec.iter().skip(self.dot)
            .map(|s| s.name()).collect::<Vec<_>>().join(" ");
        write!(f, "({} - {}) {} -> {} \u{00b7} {}",
               self.start, self.end, self.rule.head, pre, post)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} #bp: {}", self, self.backpointers.len())
    }
}

impl Item {
    /// Item is complete if its Rule has been fully matched
    pub fn complete(&self) -> bool {
        self.dot >= self.rule.spec.len()
    }

    /// Next symbol to match, None if complete
    pub fn next_symbol(&self) -> Option<&Symbol> {
        self.rule.spec.get(self.dot)
    }

    pub fn head(&self) -> &str {
        &self.rule.head
    }

    pub fn backpointers(&self) -> &[Rc<Item>] {
        &self.backpointers
    }

    /// Build a new `Prediction` based Item.
    pub fn predict_new(rule: &Arc<Rule>, start: usize) -> Item {
        Item{
            rule: rule.clone(),
            dot: 0,
            start,
            end: start,
            backpointers: Vec::new(),
        }
    }

    /// Build a `Scan` based Item, a complete lexical rule `head -> word`.
    pub fn scan_new(head: &str, word: &str, start: usize) -> Item {
        let rule = Rule::new(head, vec![Symbol::Term(word.to_string())]);
        Item{
            rule: Arc::new(rule),
            dot: 1,
            start,
            end: start + 1,
            backpointers: Vec::new(),
        }
    }

    /// Build a `Completion` based Item.
    /// `source` is advanced because its next symbol matches the completed `trigger`.
    pub fn complete_new(source: &Rc<Item>, trigger: &Rc<Item>, end: usize) -> Item {
        let mut backpointers = Vec::with_capacity(source.backpointers.len() + 1);
        backpointers.extend(source.backpointers.iter().cloned());
        backpointers.push(trigger.clone());
        Item{
            rule: source.rule.clone(),
            dot: source.dot + 1,
            start: source.start,
            end,
            backpointers,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

/// Chart cell: items ending at the same input position, in insertion order.
/// Newly inserted items also queue up in a worklist until processed.
#[derive(Default)]
pub struct StateSet {
    order: Vec<Rc<Item>>,
    dedup: HashSet<Rc<Item>>,
    pending: VecDeque<Rc<Item>>,
}

impl StateSet {
    /// Insert unless an equal Item is already there. Returns if inserted.
    pub fn push(&mut self, item: Item) -> bool {
        if self.dedup.contains(&item) {
            return false;
        }
        let item = Rc::new(item);
        self.order.push(item.clone());
        self.pending.push_back(item.clone());
        self.dedup.insert(item);
        true
    }

    /// Next item that hasn't been processed yet
    pub fn pop_pending(&mut self) -> Option<Rc<Item>> {
        self.pending.pop_front()
    }

    pub fn get(&self, item: &Item) -> Option<&Rc<Item>> {
        self.dedup.get(item)
    }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Rc<Item>> { self.order.iter() }
}

impl Extend<Item> for StateSet {
    fn extend<I: IntoIterator<Item=Item>>(&mut self, iterable: I) {
        for item in iterable { self.push(item); }
    }
}

impl ops::Index<usize> for StateSet {
    type Output = Rc<Item>;
    fn index(&self, idx: usize) -> &Rc<Item> { &self.order[idx] }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.order.fmt(f) }
}

/// All StateSets of a parse, cell `k` holds items ending at position `k`.
pub struct Chart(pub(crate) Vec<StateSet>);

impl Chart {
    pub fn new(positions: usize) -> Chart {
        Chart((0..positions).map(|_| StateSet::default()).collect())
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Items across all cells
    pub fn num_items(&self) -> usize {
        self.0.iter().map(|s| s.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StateSet> { self.0.iter() }
}

impl ops::Index<usize> for Chart {
    type Output = StateSet;
    fn index(&self, idx: usize) -> &StateSet { &self.0[idx] }
}

impl ops::IndexMut<usize> for Chart {
    fn index_mut(&mut self, idx: usize) -> &mut StateSet { &mut self.0[idx] }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, stateset) in self.0.iter().enumerate() {
            writeln!(f, "=== StateSet {} ===", idx)?;
            for item in stateset.iter() {
                writeln!(f, "{:?}", item)?;
            }
        }
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////
