mod scanner;
mod char_scanner;
mod tree_tokenizer;

pub use scanner::Scanner;
pub use char_scanner::unquote;
pub use tree_tokenizer::{TreeToken, TreeTokenizer};
