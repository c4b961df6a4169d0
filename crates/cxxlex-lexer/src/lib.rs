//! cxxlex lexer: splits lines of C++-like source into tokens.

pub mod config;
pub mod fsm;
pub mod token;
pub mod tokenizer;

pub use config::TokenizerConfig;
pub use fsm::{Action, CharClass, Mode, State};
pub use token::{Token, TokenId, TokenList};
pub use tokenizer::Tokenizer;
