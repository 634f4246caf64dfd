//! Rule-table lexer engine
//!
//! Languages are described as `StateTable`s of ordered regex rules grouped into named
//! states. A `RegexLexer` runs a table over text and yields a lazy token stream that
//! covers the input exactly, delegating embedded sub-languages to other lexers.

pub mod context;
pub mod engine;
pub mod error;
pub mod indent;
pub mod options;
pub mod pattern;
pub mod rule;
pub mod stack;
pub mod table;

use crate::config::compile_time::engine::*;
use crate::config::runtime::EnginePreferences;
use crate::log_debug;
use std::sync::OnceLock;

pub use context::{AuxContext, AuxValue, LexerContext};
pub use engine::{LexerBuilder, LexerInfo, RegexLexer, Tokens};
pub use error::{OptionError, TableError};
pub use indent::{enters_block, indentation, starts_block};
pub use options::{LexerOptions, OptionReport};
pub use pattern::{words, Pattern, RegexFlags, RuleMatch};
pub use rule::{
    callback, fallthrough, include, rule, rule_matching, using, using_this, Action, Callback,
    Delegate, Emission, Entry, Rule, TokenFilter,
};
pub use stack::{StackOp, StateId, StateStack};
pub use table::{StateMatcher, StateTable, StateTableBuilder, DEFAULT_ROOT};

// ============================================================================
// ENGINE PREFERENCES
// ============================================================================

static ENGINE_PREFERENCES: OnceLock<EnginePreferences> = OnceLock::new();

/// Install engine preferences; the first call wins
pub fn init_engine_preferences(preferences: EnginePreferences) -> Result<(), String> {
    ENGINE_PREFERENCES
        .set(preferences)
        .map_err(|_| "Engine preferences already initialized".to_string())
}

/// Active engine preferences (environment defaults until initialized)
pub fn engine_preferences() -> &'static EnginePreferences {
    ENGINE_PREFERENCES.get_or_init(EnginePreferences::default)
}

// ============================================================================
// MODULE INITIALIZATION AND VALIDATION
// ============================================================================

/// Check that every engine code is registered and report the active limits
pub fn init_lexical_logging() -> Result<(), String> {
    use crate::logging::codes;

    let engine_codes = [
        codes::table::INCLUDE_CYCLE,
        codes::table::UNKNOWN_STATE,
        codes::table::INVALID_PATTERN,
        codes::table::MISSING_ROOT_STATE,
        codes::table::DUPLICATE_STATE,
        codes::table::EMPTY_INITIAL_STACK,
        codes::table::TOO_MANY_STATES,
        codes::options::INVALID_OPTION_VALUE,
        codes::options::UNKNOWN_OPTION_VALUE,
        codes::options::MALFORMED_ASSIGNMENT,
        codes::scan::ZERO_PROGRESS_RULE,
        codes::scan::STACK_DEPTH_EXCEEDED,
        codes::scan::DELEGATION_DEPTH_EXCEEDED,
        codes::scan::UNKNOWN_CALLBACK_STATE,
        codes::scan::FALLBACK_TOKEN,
    ];

    for code in &engine_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Engine code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Lexer engine limits",
        "config" => crate::config::build_info::source_info(),
        "max_stack_depth" => MAX_STACK_DEPTH,
        "max_zero_width_steps" => MAX_ZERO_WIDTH_STEPS,
        "max_delegation_depth" => MAX_DELEGATION_DEPTH,
        "max_states_per_table" => MAX_STATES_PER_TABLE
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_codes_are_registered() {
        assert!(init_lexical_logging().is_ok());
    }

    #[test]
    fn test_preferences_default_without_init() {
        let preferences = engine_preferences();
        assert_eq!(
            preferences.log_table_construction,
            engine_preferences().log_table_construction
        );
    }
}
