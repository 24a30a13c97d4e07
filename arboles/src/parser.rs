#![deny(warnings)]

use crate::config::ParserConfig;
use crate::error::Error;
use crate::grammar::{Grammar, Rule, Symbol, AUX_HEAD};
use crate::items::{Chart, Item};
use crate::trees::{reconstruct, Tree};
use crate::vocab::WordSet;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};


pub struct EarleyParser {
    grammar: Grammar,
    // symbols that are matched against input words instead of predicted
    terminals: WordSet,
    config: ParserConfig,
}

/// Outcome of a successful parse: the full chart plus the accepting item,
/// ie: the first `start` item that completed over the whole input.
pub struct Derivation {
    pub chart: Chart,
    pub root: Rc<Item>,
}

impl Derivation {
    pub fn tree(&self) -> Result<Tree, Error> {
        reconstruct(&self.root)
    }
}

///////////////////////////////////////////////////////////////////////////////

impl EarleyParser {
    pub fn new(grammar: Grammar, terminals: WordSet, config: ParserConfig)
            -> Result<EarleyParser, Error> {
        if !grammar.contains(&config.start) {
            return Err(Error::MissingStart(config.start.clone()));
        }
        if let Some(t) = terminals.iter().find(|t| !grammar.is_lexical(t)) {
            return Err(Error::NotATerminal(t.to_string()));
        }
        for head in grammar.heads().filter(|h| grammar.is_lexical(h) && !terminals.contains(h)) {
            warn!(symbol = head, "lexical rules of a non terminal symbol will never be scanned");
        }
        if !grammar.has_word(&config.sentinel) {
            warn!(sentinel = %config.sentinel,
                  "no lexical rule produces the sentinel, unknown words will never parse");
        }
        Ok(EarleyParser{grammar, terminals, config})
    }

    pub fn config(&self) -> &ParserConfig { &self.config }

    fn check_budget(&self, steps: usize, started: &Instant) -> Result<(), Error> {
        if let Some(max_steps) = self.config.max_steps {
            if steps > max_steps {
                return Err(Error::Budget(max_steps));
            }
        }
        if let Some(timeout) = self.config.timeout {
            if started.elapsed() > timeout {
                return Err(Error::Timeout);
            }
        }
        Ok(())
    }

    /// Parse a tokenized sentence. Unknown words should already be replaced
    /// by the sentinel.
    pub fn parse<S: AsRef<str>>(&self, sentence: &[S]) -> Result<Derivation, Error> {
        if sentence.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n = sentence.len();
        let started = Instant::now();
        let mut steps = 0;

        // Seed S0 with the auxiliary rule `<start> -> start`
        let aux = Arc::new(Rule::new(AUX_HEAD, vec![Symbol::NonTerm(self.config.start.clone())]));
        let mut chart = Chart::new(n + 1);
        chart[0].push(Item::predict_new(&aux, 0));

        for k in 0..=n {
            // Process the stateset until no new Items are added to it.
            // Scans land on the next stateset and are processed with it.
            while let Some(item) = chart[k].pop_pending() {
                steps += 1;
                self.check_budget(steps, &started)?;
                match item.next_symbol() {
                    // Completion: advance items at the trigger's start expecting it
                    None => {
                        let completions: Vec<_> = chart[item.start].iter()
                            .filter(|source| matches!(source.next_symbol(),
                                    Some(Symbol::NonTerm(name)) if name == item.head()))
                            .map(|source| Item::complete_new(source, &item, k))
                            .collect();
                        chart[k].extend(completions);
                    },
                    // Scan: terminal symbols never get predicted
                    Some(symbol) if self.terminals.contains(symbol.name()) => {
                        if k < n && self.grammar.derives(symbol.name(), sentence[k].as_ref()) {
                            chart[k + 1].push(Item::scan_new(symbol.name(), sentence[k].as_ref(), k));
                        }
                    },
                    // Prediction
                    Some(symbol) => {
                        let predictions: Vec<_> = self.grammar.rules(symbol.name()).iter()
                            .map(|rule| Item::predict_new(rule, k))
                            .collect();
                        chart[k].extend(predictions);
                    },
                }
            }
        }

        if cfg!(feature="debug") {
            debug!("earley chart\n{}", chart);
        }
        trace!(words = n, items = chart.num_items(), steps, "parsed");

        // The completed aux item points to the first start item spanning all input
        let root = chart[n].iter()
            .find(|item| item.rule == aux && item.complete() && item.start == 0)
            .and_then(|item| item.backpointers().first().cloned())
            .ok_or(Error::NoParse)?;
        Ok(Derivation{chart, root})
    }
}
