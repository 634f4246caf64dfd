use crate::config::compile_time::engine::MAX_STATES_PER_TABLE;
use crate::logging::codes;

/// Construction-time failures of a state table or lexer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Include cycle detected: {}", path.join(" -> "))]
    IncludeCycle { path: Vec<String> },

    #[error("State '{state}' referenced from '{referenced_from}' is not defined")]
    UnknownState {
        state: String,
        referenced_from: String,
    },

    #[error("Invalid pattern in state '{state}' (rule {index}): {message}")]
    InvalidPattern {
        state: String,
        index: usize,
        pattern: String,
        message: String,
    },

    #[error("State table has no '{root}' state")]
    MissingRoot { root: String },

    #[error("State '{state}' is defined more than once")]
    DuplicateState { state: String },

    #[error("Initial stack must name at least one state")]
    EmptyInitialStack,

    #[error("State table defines {count} states (max {MAX_STATES_PER_TABLE})")]
    TooManyStates { count: usize },
}

impl TableError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            TableError::IncludeCycle { .. } => codes::table::INCLUDE_CYCLE,
            TableError::UnknownState { .. } => codes::table::UNKNOWN_STATE,
            TableError::InvalidPattern { .. } => codes::table::INVALID_PATTERN,
            TableError::MissingRoot { .. } => codes::table::MISSING_ROOT_STATE,
            TableError::DuplicateState { .. } => codes::table::DUPLICATE_STATE,
            TableError::EmptyInitialStack => codes::table::EMPTY_INITIAL_STACK,
            TableError::TooManyStates { .. } => codes::table::TOO_MANY_STATES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

/// A lexer option whose value could not be used; the option's default applies instead
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("Invalid value {value:?} for option '{option}': expected {expected}")]
    InvalidValue {
        option: String,
        value: String,
        expected: &'static str,
    },

    #[error("Unknown value {value:?} for option '{option}' (known: {})", known.join(", "))]
    UnknownValue {
        option: String,
        value: String,
        known: Vec<String>,
    },

    #[error("Option assignment {assignment:?} is not of the form key=value")]
    MalformedAssignment { assignment: String },
}

impl OptionError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            OptionError::InvalidValue { .. } => codes::options::INVALID_OPTION_VALUE,
            OptionError::UnknownValue { .. } => codes::options::UNKNOWN_OPTION_VALUE,
            OptionError::MalformedAssignment { .. } => codes::options::MALFORMED_ASSIGNMENT,
        }
    }

    /// Name of the offending option, when there is one
    pub fn option(&self) -> Option<&str> {
        match self {
            OptionError::InvalidValue { option, .. } | OptionError::UnknownValue { option, .. } => {
                Some(option)
            }
            OptionError::MalformedAssignment { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_lists_path() {
        let error = TableError::IncludeCycle {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(error.to_string(), "Include cycle detected: a -> b -> a");
        assert_eq!(error.error_code(), codes::table::INCLUDE_CYCLE);
        assert!(error.requires_halt());
    }

    #[test]
    fn test_option_error_names_option() {
        let error = OptionError::InvalidValue {
            option: "startinline".into(),
            value: "maybe".into(),
            expected: "a boolean",
        };
        assert_eq!(error.option(), Some("startinline"));
        assert!(error.to_string().contains("'startinline'"));
        assert_eq!(error.error_code(), codes::options::INVALID_OPTION_VALUE);

        let unknown = OptionError::UnknownValue {
            option: "disabledmodules".into(),
            value: "nope".into(),
            known: vec!["mysql".into(), "zlib".into()],
        };
        assert!(unknown.to_string().ends_with("(known: mysql, zlib)"));
    }
}
