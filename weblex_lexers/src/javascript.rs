//! JavaScript
//!
//! A slash is a regex literal only where an operand is expected: after an operator, an
//! opening bracket, a keyword, or at the very start of the text. Those rules push
//! `slashstartsregex`, which takes one regex literal or gives up without consuming anything.

use weblex_engine::lexical::{
    fallthrough, include, rule, words, LexerInfo, LexerOptions, RegexFlags, RegexLexer,
    StateTable, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "JavaScript",
    aliases: &["js", "javascript"],
    filenames: &["*.js"],
    mimetypes: &[
        "application/x-javascript",
        "text/x-javascript",
        "text/javascript",
    ],
};

/// `/body/flags`, where the body may hold escapes and bracketed classes containing `/`
pub(crate) const REGEX_LITERAL: &str =
    r"/(\\.|[^\[/\\\n]|\[(\\.|[^\]\\\n])*\])+/([gim]+\b|\B)";

/// Operators after which a slash opens a regex literal; `\` before a newline is handled apart
pub(crate) const OPERATORS: &str = r"\+\+|--|~|&&|\?|:|\|\||(<<|>>>?|==?|!=?|[-<>+*%&\|\^/])=?";

pub(crate) const DOUBLE_QUOTED: &str = r#""(\\\\|\\"|[^"])*""#;
pub(crate) const SINGLE_QUOTED: &str = r"'(\\\\|\\'|[^'])*'";

pub(crate) const BUILTINS: &[&str] = &[
    "Array",
    "Boolean",
    "Date",
    "Error",
    "Function",
    "Math",
    "netscape",
    "Number",
    "Object",
    "Packages",
    "RegExp",
    "String",
    "sun",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "eval",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    "document",
    "this",
    "window",
];

const KEYWORDS: &[&str] = &[
    "for", "in", "while", "do", "break", "return", "continue", "switch", "case", "default",
    "if", "else", "throw", "try", "catch", "finally", "new", "delete", "typeof", "instanceof",
    "void", "this",
];

const RESERVED: &[&str] = &[
    "abstract",
    "boolean",
    "byte",
    "char",
    "class",
    "const",
    "debugger",
    "double",
    "enum",
    "export",
    "extends",
    "final",
    "float",
    "goto",
    "implements",
    "import",
    "int",
    "interface",
    "long",
    "native",
    "package",
    "private",
    "protected",
    "public",
    "short",
    "static",
    "super",
    "synchronized",
    "throws",
    "transient",
    "volatile",
];

pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder()
        .flags(RegexFlags::none().dot_all())
        .state(
            "commentsandwhitespace",
            vec![
                rule(r"\s+", Category::Text),
                rule("<!--", Category::Comment),
                rule(r"//.*?\n", Category::CommentSingle),
                rule(r"/\*.*?\*/", Category::CommentMultiline),
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
                rule(
                    words(&["var", "with", "function"], "", r"\b"),
                    Category::KeywordDeclaration,
                )
                .push("slashstartsregex"),
                rule(words(RESERVED, "", r"\b"), Category::KeywordReserved),
                rule(
                    words(
                        &["true", "false", "null", "NaN", "Infinity", "undefined"],
                        "",
                        r"\b",
                    ),
                    Category::KeywordConstant,
                ),
                rule(words(BUILTINS, "", r"\b"), Category::NameBuiltin),
                rule(r"[$a-zA-Z_][a-zA-Z0-9_]*", Category::NameOther),
                rule(r"[0-9][0-9]*\.[0-9]+([eE][0-9]+)?[fd]?", Category::NumberFloat),
                rule(r"0x[0-9a-fA-F]+", Category::NumberHex),
                rule(r"[0-9]+", Category::NumberInteger),
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

    fn significant<'t>(tokens: &[Token<'t>]) -> Vec<(Category, &'t str)> {
        tokens
            .iter()
            .filter(|t| !t.text.trim().is_empty())
            .map(|t| (t.category, t.text))
            .collect()
    }

    #[test]
    fn test_regex_literal_after_assignment() {
        let tokens = lex("var re = /ab+c/g;\n");
        assert_eq!(
            significant(&tokens),
            vec![
                (Category::KeywordDeclaration, "var"),
                (Category::NameOther, "re"),
                (Category::Operator, "="),
                (Category::StringRegex, "/ab+c/g"),
                (Category::Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn test_slash_after_operand_is_division() {
        let tokens = lex("total / count\n");
        assert_eq!(
            significant(&tokens),
            vec![
                (Category::NameOther, "total"),
                (Category::Operator, "/"),
                (Category::NameOther, "count"),
            ]
        );
    }

    #[test]
    fn test_keywords_builtins_and_literals() {
        let tokens = lex("if (isNaN(x)) { return 0x1F + 2.5 + 'a\\'b' + \"c\"; }");
        let categorized = significant(&tokens);
        assert!(categorized.contains(&(Category::Keyword, "if")));
        assert!(categorized.contains(&(Category::NameBuiltin, "isNaN")));
        assert!(categorized.contains(&(Category::Keyword, "return")));
        assert!(categorized.contains(&(Category::NumberHex, "0x1F")));
        assert!(categorized.contains(&(Category::NumberFloat, "2.5")));
        assert!(categorized.contains(&(Category::StringSingle, "'a\\'b'")));
        assert!(categorized.contains(&(Category::StringDouble, "\"c\"")));
    }

    #[test]
    fn test_comments() {
        let tokens = lex("// line\n/* block\n more */x");
        let categorized = significant(&tokens);
        assert_eq!(categorized[0], (Category::CommentSingle, "// line\n"));
        assert_eq!(categorized[1], (Category::CommentMultiline, "/* block\n more */"));
        assert_eq!(categorized[2], (Category::NameOther, "x"));
    }

    #[test]
    fn test_unterminated_regex_recovers_at_newline() {
        let text = "x = /oops\ny";
        let tokens = lex(text);
        let last = tokens.last().unwrap();
        assert_eq!((last.category, last.text), (Category::NameOther, "y"));
    }

    #[test]
    fn test_analyse_text_is_neutral() {
        assert_eq!(analyse_text("var x;"), 0.0);
    }
}
