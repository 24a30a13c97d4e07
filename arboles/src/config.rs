#![deny(warnings)]

use std::time::Duration;

/// Stands in for out-of-vocabulary words in grammars and sentences.
pub const SENTINEL: &str = "_UNK_";

#[derive(Clone, Debug)]
pub struct TrainConfig {
    /// How many of the least frequent words collapse into the sentinel
    pub uncommon: usize,
    pub sentinel: String,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig{uncommon: 50, sentinel: SENTINEL.to_string()}
    }
}

#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Grammar entry point
    pub start: String,
    /// Must be the sentinel the grammar was trained with
    pub sentinel: String,
    /// Abort a parse after processing this many chart items
    pub max_steps: Option<usize>,
    /// Abort a parse running longer than this
    pub timeout: Option<Duration>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig{
            start: "S".to_string(),
            sentinel: SENTINEL.to_string(),
            max_steps: None,
            timeout: None,
        }
    }
}

impl ParserConfig {
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    pub fn sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
