//! Error, warning and success codes with their classification metadata
//!
//! Every code the engine, the language tables and the CLI can report is declared here
//! together with its category, severity and recommended action.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code wrapper shared by error, warning and success events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// State table construction error codes
pub mod table {
    use super::Code;

    pub const INCLUDE_CYCLE: Code = Code::new("E010");
    pub const UNKNOWN_STATE: Code = Code::new("E011");
    pub const INVALID_PATTERN: Code = Code::new("E012");
    pub const MISSING_ROOT_STATE: Code = Code::new("E013");
    pub const DUPLICATE_STATE: Code = Code::new("E014");
    pub const EMPTY_INITIAL_STACK: Code = Code::new("E015");
    pub const TOO_MANY_STATES: Code = Code::new("E016");
}

/// Lexer option error codes
pub mod options {
    use super::Code;

    pub const INVALID_OPTION_VALUE: Code = Code::new("E020");
    pub const UNKNOWN_OPTION_VALUE: Code = Code::new("E021");
    pub const MALFORMED_ASSIGNMENT: Code = Code::new("E022");
}

/// Scan-time warning codes
pub mod scan {
    use super::Code;

    pub const ZERO_PROGRESS_RULE: Code = Code::new("W030");
    pub const STACK_DEPTH_EXCEEDED: Code = Code::new("W031");
    pub const DELEGATION_DEPTH_EXCEEDED: Code = Code::new("W032");
    pub const UNKNOWN_CALLBACK_STATE: Code = Code::new("W033");
    pub const FALLBACK_TOKEN: Code = Code::new("D034");
}

/// Style table error codes
pub mod style {
    use super::Code;

    pub const INVALID_STYLE_DEFINITION: Code = Code::new("E035");
    pub const INVALID_COLOR: Code = Code::new("E036");
}

/// Source input error codes
pub mod source {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E040");
    pub const FILE_TOO_LARGE: Code = Code::new("E041");
    pub const INVALID_ENCODING: Code = Code::new("E042");
    pub const IO_ERROR: Code = Code::new("E043");
    pub const INVALID_PATH: Code = Code::new("E044");
    pub const PERMISSION_DENIED: Code = Code::new("E045");
    pub const UNKNOWN_LEXER: Code = Code::new("E046");
    pub const COVERAGE_VIOLATION: Code = Code::new("E047");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TABLE_CONSTRUCTED: Code = Code::new("I010");
    pub const LEXER_CONFIGURED: Code = Code::new("I011");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const COVERAGE_VERIFIED: Code = Code::new("I021");
    pub const SOURCE_LOADED: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check build profile and runtime environment variables",
            ),
            // Table construction
            ErrorMetadata::new(
                "E010",
                "Table",
                Severity::High,
                false,
                true,
                "State includes form a cycle",
                "Remove one include from the reported cycle path",
            ),
            ErrorMetadata::new(
                "E011",
                "Table",
                Severity::High,
                false,
                true,
                "Reference to a state that is not defined",
                "Define the state or fix the reference name",
            ),
            ErrorMetadata::new(
                "E012",
                "Table",
                Severity::High,
                false,
                true,
                "Rule pattern failed to compile",
                "Fix the regular expression for the reported rule",
            ),
            ErrorMetadata::new(
                "E013",
                "Table",
                Severity::High,
                false,
                true,
                "State table has no root state",
                "Define the root state or configure another root name",
            ),
            ErrorMetadata::new(
                "E014",
                "Table",
                Severity::High,
                false,
                true,
                "State defined twice",
                "Merge the definitions or extend the existing state",
            ),
            ErrorMetadata::new(
                "E015",
                "Table",
                Severity::High,
                false,
                true,
                "Initial stack names no states",
                "Provide at least one state for the initial stack",
            ),
            ErrorMetadata::new(
                "E016",
                "Table",
                Severity::High,
                false,
                true,
                "State table exceeds the configured state limit",
                "Split the table or raise engine.max_states_per_table",
            ),
            // Options
            ErrorMetadata::new(
                "E020",
                "Options",
                Severity::Low,
                true,
                false,
                "Lexer option has an invalid value",
                "The documented default was used instead",
            ),
            ErrorMetadata::new(
                "E021",
                "Options",
                Severity::Low,
                true,
                false,
                "Lexer option names an unknown value",
                "Unknown entries were ignored",
            ),
            ErrorMetadata::new(
                "E022",
                "Options",
                Severity::Medium,
                true,
                false,
                "Option assignment is not of the form key=value",
                "Pass options as key=value",
            ),
            // Scanning
            ErrorMetadata::new(
                "W030",
                "Scan",
                Severity::Low,
                true,
                false,
                "Rule made no progress at the current position",
                "Give the rule a stack operation or a non-empty pattern",
            ),
            ErrorMetadata::new(
                "W031",
                "Scan",
                Severity::Medium,
                true,
                false,
                "State stack depth limit reached; push ignored",
                "Check the table for pushes that are never popped",
            ),
            ErrorMetadata::new(
                "W032",
                "Scan",
                Severity::Medium,
                true,
                false,
                "Delegation depth limit reached",
                "The substring was emitted as a single Other token",
            ),
            ErrorMetadata::new(
                "W033",
                "Scan",
                Severity::Medium,
                true,
                false,
                "Callback referenced an unknown state",
                "Fix the state name used by the callback",
            ),
            ErrorMetadata::new(
                "D034",
                "Scan",
                Severity::Low,
                true,
                false,
                "No rule matched; one-character fallback emitted",
                "Add a rule covering the reported input",
            ),
            // Styles
            ErrorMetadata::new(
                "E035",
                "Style",
                Severity::Medium,
                true,
                false,
                "Style definition contains an unknown attribute",
                "Use bold, italic, underline, bg:, border: or a #color",
            ),
            ErrorMetadata::new(
                "E036",
                "Style",
                Severity::Medium,
                true,
                false,
                "Style color is not a 3 or 6 digit hex value",
                "Write colors as #rgb or #rrggbb",
            ),
            // Source input
            ErrorMetadata::new(
                "E040",
                "Source",
                Severity::High,
                false,
                true,
                "Source file does not exist",
                "Check the file path",
            ),
            ErrorMetadata::new(
                "E041",
                "Source",
                Severity::High,
                false,
                true,
                "Source file exceeds the configured size limit",
                "Split the file or raise source.max_file_size",
            ),
            ErrorMetadata::new(
                "E042",
                "Source",
                Severity::High,
                false,
                true,
                "Source file is not valid UTF-8",
                "Convert the file to UTF-8",
            ),
            ErrorMetadata::new(
                "E043",
                "Source",
                Severity::High,
                false,
                true,
                "I/O error while reading source",
                "Check file system health and permissions",
            ),
            ErrorMetadata::new(
                "E044",
                "Source",
                Severity::High,
                false,
                true,
                "Source path is not a regular file",
                "Pass a file or a directory of files",
            ),
            ErrorMetadata::new(
                "E045",
                "Source",
                Severity::High,
                false,
                true,
                "Permission denied reading source",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E046",
                "Source",
                Severity::High,
                false,
                true,
                "No lexer is registered under the requested alias",
                "List aliases with --list",
            ),
            ErrorMetadata::new(
                "E047",
                "Source",
                Severity::Critical,
                false,
                true,
                "Token stream does not reproduce the input",
                "File a bug report with the input and lexer name",
            ),
            // Success codes
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "None",
            ),
            ErrorMetadata::new(
                "I010",
                "Table",
                Severity::Low,
                true,
                false,
                "State table constructed",
                "None",
            ),
            ErrorMetadata::new(
                "I011",
                "Options",
                Severity::Low,
                true,
                false,
                "Lexer configured from options",
                "None",
            ),
            ErrorMetadata::new(
                "I020",
                "Scan",
                Severity::Low,
                true,
                false,
                "Tokenization completed",
                "None",
            ),
            ErrorMetadata::new(
                "I021",
                "Scan",
                Severity::Low,
                true,
                false,
                "Token coverage verified",
                "None",
            ),
            ErrorMetadata::new(
                "I040",
                "Source",
                Severity::Low,
                true,
                false,
                "Source file loaded",
                "None",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
