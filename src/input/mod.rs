mod completer;
pub mod tokenizer;

pub use completer::ShellHelper;
pub use tokenizer::{split, TokenizeError};
