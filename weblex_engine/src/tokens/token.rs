use super::category::Category;
use serde::Serialize;
use std::ops::Range;

/// One `(offset, category, text)` triple
///
/// `text` borrows from the buffer handed to the lexer; `offset` is its byte position there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token<'t> {
    pub offset: usize,
    pub category: Category,
    pub text: &'t str,
}

impl<'t> Token<'t> {
    pub fn new(offset: usize, category: Category, text: &'t str) -> Self {
        Self {
            offset,
            category,
            text,
        }
    }

    /// Byte offset one past the last byte of the token
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn span(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Same token moved `delta` bytes further into an enclosing buffer
    pub fn shifted(self, delta: usize) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }

    pub fn with_category(self, category: Category) -> Self {
        Self { category, ..self }
    }

    pub fn is_a(&self, ancestor: Category) -> bool {
        self.category.is_a(ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_and_shift() {
        let token = Token::new(3, Category::Keyword, "var");
        assert_eq!(token.span(), 3..6);
        assert_eq!(token.len(), 3);

        let moved = token.shifted(10);
        assert_eq!(moved.offset, 13);
        assert_eq!(moved.end(), 16);
        assert_eq!(moved.text, "var");
    }

    #[test]
    fn test_recategorize_keeps_position() {
        let token = Token::new(0, Category::NameOther, "strlen").with_category(Category::NameBuiltin);
        assert_eq!(token.category, Category::NameBuiltin);
        assert_eq!(token.offset, 0);
        assert!(token.is_a(Category::Name));
    }

    #[test]
    fn test_serializes_short_category_path() {
        let json = serde_json::to_string(&Token::new(1, Category::StringDouble, "\"x\"")).unwrap();
        assert_eq!(json, r#"{"offset":1,"category":"String.Double","text":"\"x\""}"#);
    }
}
