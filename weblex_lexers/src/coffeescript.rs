//! CoffeeScript
//!
//! Shares JavaScript's regex-literal detection. Identifiers also open `slashstartsregex`,
//! since calls without parentheses put an operand right after a name.

use crate::javascript::{BUILTINS, DOUBLE_QUOTED, REGEX_LITERAL, SINGLE_QUOTED};
use weblex_engine::lexical::{
    fallthrough, include, rule, words, LexerInfo, LexerOptions, RegexFlags, RegexLexer,
    StateTable, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "CoffeeScript",
    aliases: &["coffee-script", "coffeescript"],
    filenames: &["*.coffee"],
    mimetypes: &["text/coffeescript"],
};

const OPERATORS: &str = concat!(
    r"\+\+|--|~|&&|\band\b|\bor\b|\bis\b|\bisnt\b|\bnot\b|\?|:|",
    r"\|\||(<<|>>>?|==?|!=?|[-<>+*`%&\|\^/])=?",
);

const KEYWORDS: &[&str] = &[
    "for", "in", "of", "while", "break", "return", "continue", "switch", "when", "then", "if",
    "else", "throw", "try", "catch", "finally", "new", "delete", "typeof", "instanceof",
    "super", "extends", "this",
];

const CONSTANTS: &[&str] = &[
    "true", "false", "yes", "no", "on", "off", "null", "NaN", "Infinity", "undefined",
];

pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder()
        .flags(RegexFlags::none().dot_all())
        .state(
            "commentsandwhitespace",
            vec![
                rule(r"\s+", Category::Text),
                rule(r"#.*?\n", Category::CommentSingle),
            ],
        )
        .state(
            "slashstartsregex",
            vec![
                include("commentsandwhitespace"),
                rule(REGEX_LITERAL, Category::StringRegex).pop(1),
                rule("", Category::Text).ahead("/").replace(&["badregex"]),
                fallthrough().pop(1),
            ],
        )
        .state("badregex", vec![rule(r"\n", Category::Text).pop(1)])
        .state(
            "root",
            vec![
                rule("^", Category::Text)
                    .ahead(r"\s|/|<!--")
                    .push("slashstartsregex"),
                include("commentsandwhitespace"),
                rule(OPERATORS, Category::Operator).push("slashstartsregex"),
                rule(r"\\", Category::Operator)
                    .ahead(r"\n")
                    .push("slashstartsregex"),
                rule(r"[\{(\[;,]", Category::Punctuation).push("slashstartsregex"),
                rule(r"[\})\].]", Category::Punctuation),
                rule(words(KEYWORDS, "", r"\b"), Category::Keyword).push("slashstartsregex"),
                rule(words(CONSTANTS, "", r"\b"), Category::KeywordConstant),
                rule(words(BUILTINS, "", r"\b"), Category::NameBuiltin),
                rule(r"[$a-zA-Z_][a-zA-Z0-9_\.:]*\s*:\s", Category::NameVariable)
                    .push("slashstartsregex"),
                rule(
                    r"@[$a-zA-Z_][a-zA-Z0-9_\.:]*\s*:\s",
                    Category::NameVariableInstance,
                )
                .push("slashstartsregex"),
                rule("@?[$a-zA-Z_][a-zA-Z0-9_]*", Category::NameOther).push("slashstartsregex"),
                rule(r"[0-9][0-9]*\.[0-9]+([eE][0-9]+)?[fd]?", Category::NumberFloat),
                rule("0x[0-9a-fA-F]+", Category::NumberHex),
                rule("[0-9]+", Category::NumberInteger),
                rule(DOUBLE_QUOTED, Category::StringDouble),
                rule(SINGLE_QUOTED, Category::StringSingle),
            ],
        )
        .build()
}

pub fn lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table()?).build()
}

pub fn analyse_text(_text: &str) -> f32 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use weblex_engine::{validate_tokenization, Token};

    fn lex(text: &str) -> Vec<Token<'_>> {
        let tokens: Vec<_> = lexer(&LexerOptions::new()).unwrap().tokenize(text).collect();
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));
        tokens
    }

    fn category_of(tokens: &[Token<'_>], text: &str) -> Option<Category> {
        tokens.iter().find(|t| t.text == text).map(|t| t.category)
    }

    #[test]
    fn test_assignments_literals_and_regex() {
        let tokens = lex("square = (x) -> x * x\n# note\nlist = [1, 2.5, 0xff]\nre = /ab+/g\n");
        assert_eq!(category_of(&tokens, "square"), Some(Category::NameOther));
        assert_eq!(category_of(&tokens, "="), Some(Category::Operator));
        assert_eq!(category_of(&tokens, "# note\n"), Some(Category::CommentSingle));
        assert_eq!(category_of(&tokens, "1"), Some(Category::NumberInteger));
        assert_eq!(category_of(&tokens, "2.5"), Some(Category::NumberFloat));
        assert_eq!(category_of(&tokens, "0xff"), Some(Category::NumberHex));
        assert_eq!(category_of(&tokens, "/ab+/g"), Some(Category::StringRegex));
    }

    #[test]
    fn test_object_keys() {
        let tokens = lex("point =\n  x: 1\n  @name: 'v'\n");
        assert_eq!(category_of(&tokens, "x: "), Some(Category::NameVariable));
        assert_eq!(category_of(&tokens, "@name: "), Some(Category::NameVariableInstance));
        assert_eq!(category_of(&tokens, "'v'"), Some(Category::StringSingle));
    }

    #[test]
    fn test_word_operators_and_constants() {
        let tokens = lex("ready = a isnt b and yes\n");
        assert_eq!(category_of(&tokens, "isnt"), Some(Category::Operator));
        assert_eq!(category_of(&tokens, "and"), Some(Category::Operator));
        assert_eq!(category_of(&tokens, "yes"), Some(Category::KeywordConstant));
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("for item in items when item then log item\n");
        assert_eq!(category_of(&tokens, "for"), Some(Category::Keyword));
        assert_eq!(category_of(&tokens, "when"), Some(Category::Keyword));
        assert_eq!(category_of(&tokens, "log"), Some(Category::NameOther));
    }
}
