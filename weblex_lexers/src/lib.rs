//! weblex lexers: rule tables for web languages, their content heuristics and style sheets
//!
//! Each language module exposes the same surface: an `INFO` descriptor, a `table` builder,
//! a `lexer` constructor taking `LexerOptions`, and an `analyse_text` score in `[0, 1]`.
//! Modules holding more than one dialect prefix the extra functions with the dialect name
//! (`as3_lexer`, `scss_lexer`, `xslt_lexer`).

pub mod actionscript;
pub mod analysis;
pub mod coffeescript;
pub mod css;
pub mod haxe;
pub mod html;
pub mod javascript;
pub mod objective_j;
pub mod php;
mod php_builtins;
pub mod sass;
pub mod styles;
pub mod xml;

pub use styles::{ResolvedStyle, StyleError, StyleSheet};
