#![deny(warnings)]

/// Everything that can go wrong while training, loading or parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed tree literal at line {line}, offset {offset}: {reason}")]
    Treebank { line: usize, offset: usize, reason: String },

    #[error("rule {head} references undefined symbol {symbol}")]
    UndefinedSymbol { head: String, symbol: String },
    #[error("symbol {0} has no alternatives")]
    NoAlternatives(String),
    #[error("symbol {0} has an empty alternative")]
    EmptySequence(String),
    #[error("duplicate rule: {head} -> {alternative}")]
    DuplicateAlternative { head: String, alternative: String },
    #[error("symbol name {0} is reserved")]
    ReservedSymbol(String),
    #[error("missing start symbol: {0}")]
    MissingStart(String),
    #[error("{0} is not a terminal symbol with lexical rules")]
    NotATerminal(String),

    #[error("no parse: the grammar does not derive the sentence")]
    NoParse,
    #[error("parse aborted after {0} steps")]
    Budget(usize),
    #[error("parse aborted: timeout")]
    Timeout,
    #[error("empty sentence")]
    EmptyInput,

    #[error("sentinel mismatch: {found} occurrences for {recorded} substituted words")]
    SentinelMismatch { found: usize, recorded: usize },
    #[error("can't build a tree from incomplete item {0}")]
    Incomplete(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Recoverable errors affect a single sentence, a batch carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self,
            Error::NoParse | Error::Budget(_) | Error::Timeout |
            Error::EmptyInput | Error::SentinelMismatch { .. })
    }
}
