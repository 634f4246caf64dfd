//! weblex engine: token categories, the rule-table lexer engine, configuration and logging

// Internal modules
pub mod config;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod tokens;

// Re-export key types for library consumers
pub use lexical::{
    LexerInfo, LexerOptions, OptionError, OptionReport, RegexLexer, StateTable, TableError,
    Tokens,
};
pub use tokens::{validate_tokenization, Category, CoverageViolation, Token};
