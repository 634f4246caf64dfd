//! Hierarchical token categories
//!
//! Categories form a fixed tree rooted at `Token`. A category "is a" each of its
//! ancestors, so a consumer asking for `Comment` also matches `Comment.Preproc`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! categories {
    ($($variant:ident => $path:literal, $parent:ident;)+) => {
        /// One node of the token category tree
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Category {
            $($variant,)+
        }

        impl Category {
            /// Every category, parents before children
            pub const ALL: &'static [Category] = &[$(Category::$variant,)+];

            /// Full dotted path below the root, e.g. `Literal.String.Double`
            pub fn path(self) -> &'static str {
                match self {
                    $(Category::$variant => $path,)+
                }
            }

            fn parent_or_self(self) -> Category {
                match self {
                    $(Category::$variant => Category::$parent,)+
                }
            }
        }
    };
}

categories! {
    Token => "Token", Token;

    Text => "Text", Token;
    Whitespace => "Text.Whitespace", Text;
    Error => "Error", Token;
    Other => "Other", Token;

    Keyword => "Keyword", Token;
    KeywordConstant => "Keyword.Constant", Keyword;
    KeywordDeclaration => "Keyword.Declaration", Keyword;
    KeywordNamespace => "Keyword.Namespace", Keyword;
    KeywordPseudo => "Keyword.Pseudo", Keyword;
    KeywordReserved => "Keyword.Reserved", Keyword;
    KeywordType => "Keyword.Type", Keyword;

    Name => "Name", Token;
    NameAttribute => "Name.Attribute", Name;
    NameBuiltin => "Name.Builtin", Name;
    NameBuiltinPseudo => "Name.Builtin.Pseudo", NameBuiltin;
    NameClass => "Name.Class", Name;
    NameConstant => "Name.Constant", Name;
    NameDecorator => "Name.Decorator", Name;
    NameEntity => "Name.Entity", Name;
    NameException => "Name.Exception", Name;
    NameFunction => "Name.Function", Name;
    NameLabel => "Name.Label", Name;
    NameNamespace => "Name.Namespace", Name;
    NameOther => "Name.Other", Name;
    NamePseudo => "Name.Pseudo", Name;
    NameTag => "Name.Tag", Name;
    NameVariable => "Name.Variable", Name;
    NameVariableClass => "Name.Variable.Class", NameVariable;
    NameVariableGlobal => "Name.Variable.Global", NameVariable;
    NameVariableInstance => "Name.Variable.Instance", NameVariable;

    Literal => "Literal", Token;
    LiteralDate => "Literal.Date", Literal;

    String => "Literal.String", Literal;
    StringBacktick => "Literal.String.Backtick", String;
    StringChar => "Literal.String.Char", String;
    StringDoc => "Literal.String.Doc", String;
    StringDouble => "Literal.String.Double", String;
    StringEscape => "Literal.String.Escape", String;
    StringHeredoc => "Literal.String.Heredoc", String;
    StringInterpol => "Literal.String.Interpol", String;
    StringOther => "Literal.String.Other", String;
    StringRegex => "Literal.String.Regex", String;
    StringSingle => "Literal.String.Single", String;
    StringSymbol => "Literal.String.Symbol", String;

    Number => "Literal.Number", Literal;
    NumberFloat => "Literal.Number.Float", Number;
    NumberHex => "Literal.Number.Hex", Number;
    NumberInteger => "Literal.Number.Integer", Number;
    NumberIntegerLong => "Literal.Number.Integer.Long", NumberInteger;
    NumberOct => "Literal.Number.Oct", Number;

    Operator => "Operator", Token;
    OperatorWord => "Operator.Word", Operator;

    Punctuation => "Punctuation", Token;

    Comment => "Comment", Token;
    CommentMultiline => "Comment.Multiline", Comment;
    CommentPreproc => "Comment.Preproc", Comment;
    CommentSingle => "Comment.Single", Comment;
    CommentSpecial => "Comment.Special", Comment;

    Generic => "Generic", Token;
    GenericDeleted => "Generic.Deleted", Generic;
    GenericEmph => "Generic.Emph", Generic;
    GenericError => "Generic.Error", Generic;
    GenericHeading => "Generic.Heading", Generic;
    GenericInserted => "Generic.Inserted", Generic;
    GenericOutput => "Generic.Output", Generic;
    GenericPrompt => "Generic.Prompt", Generic;
    GenericStrong => "Generic.Strong", Generic;
    GenericSubheading => "Generic.Subheading", Generic;
    GenericTraceback => "Generic.Traceback", Generic;
}

impl Category {
    /// Parent category; `None` only for the root
    pub fn parent(self) -> Option<Category> {
        match self {
            Category::Token => None,
            other => Some(other.parent_or_self()),
        }
    }

    /// True when `self` equals `ancestor` or lies below it
    pub fn is_a(self, ancestor: Category) -> bool {
        self.ancestors().any(|category| category == ancestor)
    }

    /// `self`, then each parent up to and including the root
    pub fn ancestors(self) -> impl Iterator<Item = Category> {
        std::iter::successors(Some(self), |category| category.parent())
    }

    /// Number of edges between `self` and the root
    pub fn depth(self) -> usize {
        self.ancestors().count() - 1
    }

    /// Conventional short form: `String.Double` instead of `Literal.String.Double`
    pub fn short_path(self) -> &'static str {
        let path = self.path();
        if self.is_a(Category::String) || self.is_a(Category::Number) {
            path.strip_prefix("Literal.").unwrap_or(path)
        } else {
            path
        }
    }

    /// Resolves a dotted path in full or short form, with or without a `Token.` prefix
    pub fn from_path(path: &str) -> Option<Category> {
        let path = path.trim();
        if path == "Token" || path.is_empty() {
            return Some(Category::Token);
        }
        let path = path.strip_prefix("Token.").unwrap_or(path);

        Category::ALL
            .iter()
            .copied()
            .find(|category| category.path() == path || category.short_path() == path)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Token => write!(f, "Token"),
            other => write!(f, "Token.{}", other.short_path()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.short_path())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = std::string::String::deserialize(deserializer)?;
        Category::from_path(&path)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown token category '{}'", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_chain() {
        assert_eq!(Category::StringDouble.parent(), Some(Category::String));
        assert_eq!(Category::String.parent(), Some(Category::Literal));
        assert_eq!(Category::Literal.parent(), Some(Category::Token));
        assert_eq!(Category::Token.parent(), None);
        assert_eq!(Category::NumberIntegerLong.depth(), 4);
    }

    #[test]
    fn test_is_a_matches_ancestors_only() {
        assert!(Category::CommentPreproc.is_a(Category::Comment));
        assert!(Category::CommentPreproc.is_a(Category::Token));
        assert!(Category::CommentPreproc.is_a(Category::CommentPreproc));
        assert!(!Category::Comment.is_a(Category::CommentPreproc));
        assert!(!Category::NameBuiltin.is_a(Category::Keyword));
        assert!(Category::Whitespace.is_a(Category::Text));
    }

    #[test]
    fn test_every_parent_precedes_child() {
        for (index, category) in Category::ALL.iter().enumerate() {
            if let Some(parent) = category.parent() {
                let parent_index = Category::ALL.iter().position(|c| *c == parent).unwrap();
                assert!(parent_index < index, "{:?} listed before its parent", category);
                assert!(category.path().starts_with(parent.path()) || parent == Category::Token);
            }
        }
    }

    #[test]
    fn test_from_path_accepts_all_spellings() {
        assert_eq!(Category::from_path("String.Double"), Some(Category::StringDouble));
        assert_eq!(
            Category::from_path("Literal.String.Double"),
            Some(Category::StringDouble)
        );
        assert_eq!(
            Category::from_path("Token.Name.Builtin.Pseudo"),
            Some(Category::NameBuiltinPseudo)
        );
        assert_eq!(Category::from_path("Token"), Some(Category::Token));
        assert_eq!(Category::from_path("Name.Nonsense"), None);

        for category in Category::ALL {
            assert_eq!(Category::from_path(&category.to_string()), Some(*category));
        }
    }

    #[test]
    fn test_display_and_serde_use_short_path() {
        assert_eq!(Category::NumberHex.to_string(), "Token.Number.Hex");
        assert_eq!(Category::Keyword.to_string(), "Token.Keyword");

        let json = serde_json::to_string(&Category::StringEscape).unwrap();
        assert_eq!(json, "\"String.Escape\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::StringEscape);
        assert!(serde_json::from_str::<Category>("\"Bogus\"").is_err());
    }
}
