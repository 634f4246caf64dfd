pub mod category;
pub mod token;

pub use category::Category;
pub use token::Token;

use std::fmt;

/// Ways a token sequence can fail to partition its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageViolation {
    /// Token starts somewhere other than where the previous one ended
    Discontinuity { index: usize, expected: usize, found: usize },
    /// Token text differs from the input at its offset
    TextMismatch { index: usize, offset: usize },
    /// A token carries no text
    EmptyToken { index: usize, offset: usize },
    /// Tokens stop before the input does
    Incomplete { covered: usize, length: usize },
}

impl CoverageViolation {
    /// Byte range of the input the violation concerns
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            CoverageViolation::Discontinuity { expected, found, .. } => {
                (*expected).min(*found)..(*expected).max(*found)
            }
            CoverageViolation::TextMismatch { offset, .. }
            | CoverageViolation::EmptyToken { offset, .. } => *offset..*offset,
            CoverageViolation::Incomplete { covered, length } => *covered..*length,
        }
    }
}

impl fmt::Display for CoverageViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverageViolation::Discontinuity {
                index,
                expected,
                found,
            } => write!(
                f,
                "token {} starts at byte {} but the previous token ended at {}",
                index, found, expected
            ),
            CoverageViolation::TextMismatch { index, offset } => write!(
                f,
                "token {} does not match the input at byte {}",
                index, offset
            ),
            CoverageViolation::EmptyToken { index, offset } => {
                write!(f, "token {} at byte {} is empty", index, offset)
            }
            CoverageViolation::Incomplete { covered, length } => write!(
                f,
                "tokens cover {} of {} bytes",
                covered, length
            ),
        }
    }
}

/// Checks that `tokens` partition `text` exactly, in order and without empty tokens
pub fn validate_tokenization(text: &str, tokens: &[Token<'_>]) -> Result<(), CoverageViolation> {
    let mut expected = 0;

    for (index, token) in tokens.iter().enumerate() {
        if token.offset != expected {
            return Err(CoverageViolation::Discontinuity {
                index,
                expected,
                found: token.offset,
            });
        }
        if token.is_empty() {
            return Err(CoverageViolation::EmptyToken {
                index,
                offset: token.offset,
            });
        }
        if text.get(token.span()) != Some(token.text) {
            return Err(CoverageViolation::TextMismatch {
                index,
                offset: token.offset,
            });
        }
        expected = token.end();
    }

    if expected != text.len() {
        return Err(CoverageViolation::Incomplete {
            covered: expected,
            length: text.len(),
        });
    }

    Ok(())
}

/// Concatenation of all token texts
pub fn concat_text(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|token| token.text).collect()
}
