//! Objective-J
//!
//! JavaScript with Objective-C style classes, message selectors and a C preprocessor.
//! Method signatures are matched whole at the start of a line and re-lexed from the
//! `function_signature` state.

use crate::analysis::clamp_score;
use crate::javascript::{BUILTINS, DOUBLE_QUOTED, OPERATORS, REGEX_LITERAL, SINGLE_QUOTED};
use regex::Regex;
use std::sync::OnceLock;
use weblex_engine::bygroups;
use weblex_engine::lexical::{
    fallthrough, include, rule, using_this, words, LexerInfo, LexerOptions, RegexFlags,
    RegexLexer, StateTable, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "Objective-J",
    aliases: &["objective-j", "objectivej", "obj-j", "objj"],
    filenames: &["*.j"],
    mimetypes: &["text/x-objective-j"],
};

/// Optional run of whitespace and comments
const WS: &str = r"(?:\s|//.*?\n|/[*].*?[*]/)*";

const NAME: &str = "[a-zA-Z_][a-zA-Z0-9_]*";

pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder()
        .flags(RegexFlags::none().dot_all().multi_line())
        .state(
            "root",
            vec![
                include("whitespace"),
                // method definition
                rule(
                    format!(r"^({ws}[\+-]{ws})([\(a-zA-Z_].*?[^\(])({ws}\{{)", ws = WS),
                    bygroups![
                        using_this(),
                        using_this().with_state(&["root", "function_signature"]),
                        using_this()
                    ],
                ),
                rule(
                    r"(@interface|@implementation)(\s+)",
                    bygroups![Category::Keyword, Category::Text],
                )
                .push("classname"),
                rule(
                    r"(@class|@protocol)(\s*)",
                    bygroups![Category::Keyword, Category::Text],
                )
                .push("forward_classname"),
                rule(
                    r"(\s*)(@end)(\s*)",
                    bygroups![Category::Text, Category::Keyword, Category::Text],
                ),
                include("statements"),
                rule(r"[\{\(\)\}]", Category::Punctuation),
                rule(";", Category::Punctuation),
            ],
        )
        .state(
            "whitespace",
            vec![
                rule(
                    r#"(@import)(\s+)("(?:\\\\|\\"|[^"])*")"#,
                    bygroups![Category::CommentPreproc, Category::Text, Category::StringDouble],
                ),
                rule(
                    r"(@import)(\s+)(<(?:\\\\|\\>|[^>])*>)",
                    bygroups![Category::CommentPreproc, Category::Text, Category::StringDouble],
                ),
                rule(
                    r#"(#(?:include|import))(\s+)("(?:\\\\|\\"|[^"])*")"#,
                    bygroups![Category::CommentPreproc, Category::Text, Category::StringDouble],
                ),
                rule(
                    r"(#(?:include|import))(\s+)(<(?:\\\\|\\>|[^>])*>)",
                    bygroups![Category::CommentPreproc, Category::Text, Category::StringDouble],
                ),
                rule(r"#if\s+0", Category::CommentPreproc).push("if0"),
                rule("#", Category::CommentPreproc).push("macro"),
                rule(r"\n", Category::Text),
                rule(r"\s+", Category::Text),
                // line continuation
                rule(r"\\\n", Category::Text),
                rule(r"//(\n|(.|\n)*?[^\\]\n)", Category::CommentSingle),
                rule(r"/(\\\n)?[*](.|\n)*?[*](\\\n)?/", Category::CommentMultiline),
                rule("<!--", Category::Comment),
            ],
        )
        .state(
            "slashstartsregex",
            vec![
                include("whitespace"),
                rule(REGEX_LITERAL, Category::StringRegex).pop(1),
                rule("", Category::Text).ahead("/").replace(&["badregex"]),
                fallthrough().pop(1),
            ],
        )
        .state("badregex", vec![rule(r"\n", Category::Text).pop(1)])
        .state("statements", statements())
        .state(
            "classname",
            vec![
                // subclass
                rule(
                    format!(r"({name})({ws}:{ws})({name})?", name = NAME, ws = WS),
                    bygroups![Category::NameClass, using_this(), Category::NameClass],
                )
                .pop(1),
                // category
                rule(
                    format!(r"({name})({ws}\()({name})(\))", name = NAME, ws = WS),
                    bygroups![
                        Category::NameClass,
                        using_this(),
                        Category::NameLabel,
                        Category::Text
                    ],
                )
                .pop(1),
                rule(format!("({})", NAME), Category::NameClass).pop(1),
            ],
        )
        .state(
            "forward_classname",
            vec![
                rule(
                    format!(r"({})(\s*,\s*)", NAME),
                    bygroups![Category::NameClass, Category::Text],
                )
                .push_current(),
                rule(
                    format!(r"({})(\s*;?)", NAME),
                    bygroups![Category::NameClass, Category::Text],
                )
                .pop(1),
            ],
        )
        .state(
            "function_signature",
            vec![
                include("whitespace"),
                // return type, then a selector taking parameters
                rule(
                    format!(
                        r"(\({ws})([a-zA-Z_][a-zA-Z0-9_]+)({ws}\){ws})([$a-zA-Z_][a-zA-Z0-9_]+{ws}:)",
                        ws = WS
                    ),
                    bygroups![
                        using_this(),
                        Category::KeywordType,
                        using_this(),
                        Category::NameFunction
                    ],
                )
                .push("function_parameters"),
                // return type, no parameters
                rule(
                    format!(
                        r"(\({ws})([a-zA-Z_][a-zA-Z0-9_]+)({ws}\){ws})([$a-zA-Z_][a-zA-Z0-9_]+)",
                        ws = WS
                    ),
                    bygroups![
                        using_this(),
                        Category::KeywordType,
                        using_this(),
                        Category::NameFunction
                    ],
                )
                .pop(1),
                rule(
                    format!(r"([$a-zA-Z_][a-zA-Z0-9_]+{}:)", WS),
                    bygroups![Category::NameFunction],
                )
                .push("function_parameters"),
                rule(
                    r"([$a-zA-Z_][a-zA-Z0-9_]+)",
                    bygroups![Category::NameFunction],
                )
                .pop(1),
                fallthrough().pop(1),
            ],
        )
        .state(
            "function_parameters",
            vec![
                include("whitespace"),
                // (type) name
                rule(
                    format!(
                        r"(\({ws})([^\)]+)({ws}\){ws})+([$a-zA-Z_][a-zA-Z0-9_]+)",
                        ws = WS
                    ),
                    bygroups![
                        using_this(),
                        Category::KeywordType,
                        using_this(),
                        Category::Text
                    ],
                ),
                rule(
                    format!(r"([$a-zA-Z_][a-zA-Z0-9_]+{}:)", WS),
                    Category::NameFunction,
                ),
                rule("(:)", Category::NameFunction),
                // variadic tail
                rule(format!(r"(,{}...)", WS), using_this()),
                rule(r"([$a-zA-Z_][a-zA-Z0-9_]+)", Category::Text),
            ],
        )
        .state(
            "expression",
            vec![
                rule(
                    r"([$a-zA-Z_][a-zA-Z0-9_]*)(\()",
                    bygroups![Category::NameFunction, Category::Punctuation],
                ),
                rule(r"(\))", Category::Punctuation).pop(1),
            ],
        )
        .state(
            "string",
            vec![
                rule("\"", Category::String).pop(1),
                rule(
                    r#"\\([\\abfnrtv"']|x[a-fA-F0-9]{2,4}|[0-7]{1,3})"#,
                    Category::StringEscape,
                ),
                rule(r#"[^\\"\n]+"#, Category::String),
                rule(r"\\\n", Category::String),
                rule(r"\\", Category::String),
            ],
        )
        .state(
            "macro",
            vec![
                rule(r"[^/\n\\]+", Category::CommentPreproc),
                rule(r"/[*](.|\n)*?[*]/", Category::CommentMultiline),
                rule(r"//.*?\n", Category::CommentSingle).pop(1),
                rule("/", Category::CommentPreproc),
                // continued onto the next line
                rule(r"\\\n", Category::CommentPreproc),
                rule(r"\\", Category::CommentPreproc),
                rule(r"\n", Category::CommentPreproc).pop(1),
            ],
        )
        .state(
            "if0",
            vec![
                rule(r"^\s*#if(?:.*?[^\\])??\n", Category::CommentPreproc).push_current(),
                rule(r"^\s*#endif(?:.*?[^\\])??\n", Category::CommentPreproc).pop(1),
                rule(r".*?\n", Category::Comment),
            ],
        )
        .build()
}

fn statements() -> Vec<weblex_engine::lexical::Entry> {
    vec![
        rule(r#"(L|@)?""#, Category::String).push("string"),
        rule(
            r"(L|@)?'(\\.|\\[0-7]{1,3}|\\x[a-fA-F0-9]{1,2}|[^\\'\n])'",
            Category::StringChar,
        ),
        rule(DOUBLE_QUOTED, Category::StringDouble),
        rule(SINGLE_QUOTED, Category::StringSingle),
        rule(r"(\d+\.\d*|\.\d+|\d+)[eE][+-]?\d+[lL]?", Category::NumberFloat),
        rule(r"(\d+\.\d*|\.\d+|\d+[fF])[fF]?", Category::NumberFloat),
        rule("0x[0-9a-fA-F]+[Ll]?", Category::NumberHex),
        rule("0[0-7]+[Ll]?", Category::NumberOct),
        rule(r"\d+[Ll]?", Category::NumberInteger),
        rule("^", Category::Text)
            .ahead(r"\s|/|<!--")
            .push("slashstartsregex"),
        rule(OPERATORS, Category::Operator).push("slashstartsregex"),
        rule(r"\\", Category::Operator)
            .ahead(r"\n")
            .push("slashstartsregex"),
        rule(r"[\{(\[;,]", Category::Punctuation).push("slashstartsregex"),
        rule(r"[\})\].]", Category::Punctuation),
        rule(
            words(
                &[
                    "for", "in", "while", "do", "break", "return", "continue", "switch", "case",
                    "default", "if", "else", "throw", "try", "catch", "finally", "new", "delete",
                    "typeof", "instanceof", "void", "prototype", "__proto__",
                ],
                "",
                r"\b",
            ),
            Category::Keyword,
        )
        .push("slashstartsregex"),
        rule(
            words(&["var", "with", "function"], "", r"\b"),
            Category::KeywordDeclaration,
        )
        .push("slashstartsregex"),
        rule(
            words(
                &[
                    "@selector",
                    "@private",
                    "@protected",
                    "@public",
                    "@encode",
                    "@synchronized",
                    "@try",
                    "@throw",
                    "@catch",
                    "@finally",
                    "@end",
                    "@property",
                    "@synthesize",
                    "@dynamic",
                    "@for",
                    "@accessors",
                    "new",
                ],
                "",
                r"\b",
            ),
            Category::Keyword,
        ),
        rule(
            words(
                &[
                    "int", "long", "float", "short", "double", "char", "unsigned", "signed",
                    "void", "id", "BOOL", "bool", "boolean", "IBOutlet", "IBAction", "SEL",
                    "@outlet", "@action",
                ],
                "",
                r"\b",
            ),
            Category::KeywordType,
        ),
        rule(r"(self|super)\b", Category::NameBuiltin),
        rule(
            words(&["TRUE", "YES", "FALSE", "NO", "Nil", "nil", "NULL"], "", r"\b"),
            Category::KeywordConstant,
        ),
        rule(
            words(
                &["true", "false", "null", "NaN", "Infinity", "undefined"],
                "",
                r"\b",
            ),
            Category::KeywordConstant,
        ),
        rule(
            words(
                &[
                    "ABS", "ASIN", "ACOS", "ATAN", "ATAN2", "SIN", "COS", "TAN", "EXP", "POW",
                    "CEIL", "FLOOR", "ROUND", "MIN", "MAX", "RAND", "SQRT", "E", "LN2", "LN10",
                    "LOG2E", "LOG10E", "PI", "PI2", "PI_2", "SQRT1_2", "SQRT2",
                ],
                "",
                r"\b",
            ),
            Category::KeywordConstant,
        ),
        rule(words(BUILTINS, "", r"\b"), Category::NameBuiltin),
        rule(
            format!(r"([$a-zA-Z_][a-zA-Z0-9_]*)({})", WS),
            bygroups![Category::NameFunction, using_this()],
        )
        .ahead(r"\("),
        rule(r"[$a-zA-Z_][a-zA-Z0-9_]*", Category::Name),
    ]
}

pub fn lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table()?).build()
}

static IMPORT_DIRECTIVE: OnceLock<Option<Regex>> = OnceLock::new();

/// `@import <...>` or `@import "..."` on any line is a near-certain sign
pub fn analyse_text(text: &str) -> f32 {
    let found = IMPORT_DIRECTIVE
        .get_or_init(|| Regex::new(r#"(?m)^\s*@import\s+[<"]"#).ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(text));

    clamp_score(if found { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use weblex_engine::{validate_tokenization, Token};

    const SAMPLE: &str = "@import <Foundation/CPObject.j>\n\n\
@implementation Counter : CPObject\n\
{\n    int count;\n}\n\
- (void)addAmount:(int)anAmount\n{\n    count = count + anAmount;\n}\n\
@end\n";

    fn lex(text: &str) -> Vec<Token<'_>> {
        let tokens: Vec<_> = lexer(&LexerOptions::new()).unwrap().tokenize(text).collect();
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));
        tokens
    }

    fn category_of(tokens: &[Token<'_>], text: &str) -> Option<Category> {
        tokens.iter().find(|t| t.text == text).map(|t| t.category)
    }

    #[test]
    fn test_class_and_method_definition() {
        let tokens = lex(SAMPLE);
        assert_eq!(category_of(&tokens, "@import"), Some(Category::CommentPreproc));
        assert_eq!(
            category_of(&tokens, "<Foundation/CPObject.j>"),
            Some(Category::StringDouble)
        );
        assert_eq!(category_of(&tokens, "@implementation"), Some(Category::Keyword));
        assert_eq!(category_of(&tokens, "Counter"), Some(Category::NameClass));
        assert_eq!(category_of(&tokens, "CPObject"), Some(Category::NameClass));
        assert_eq!(category_of(&tokens, "void"), Some(Category::KeywordType));
        assert_eq!(category_of(&tokens, "addAmount:"), Some(Category::NameFunction));
        assert_eq!(category_of(&tokens, "anAmount"), Some(Category::Text));
        assert_eq!(category_of(&tokens, "@end"), Some(Category::Keyword));
    }

    #[test]
    fn test_method_signature_offsets_are_outer_offsets() {
        let tokens = lex(SAMPLE);
        let selector = tokens.iter().find(|t| t.text == "addAmount:").unwrap();
        assert_eq!(selector.offset, SAMPLE.find("addAmount:").unwrap());
    }

    #[test]
    fn test_preprocessor() {
        let text = "#if 0\nhidden\n#endif\n#define LIMIT \\\n  10\nx";
        let tokens = lex(text);
        assert_eq!(category_of(&tokens, "hidden\n"), Some(Category::Comment));
        assert_eq!(category_of(&tokens, "#endif\n"), Some(Category::CommentPreproc));
        assert_eq!(category_of(&tokens, "\\\n"), Some(Category::CommentPreproc));
        assert_eq!(category_of(&tokens, "  10"), Some(Category::CommentPreproc));
        assert_eq!(category_of(&tokens, "x"), Some(Category::Name));
    }

    #[test]
    fn test_disabled_block_nesting() {
        let text = "#if 0\n#if DEBUG \\\n  && TRACE\nlog();\n#endif\nstill();\n#endif\ny";
        let tokens = lex(text);
        assert_eq!(
            category_of(&tokens, "#if DEBUG \\\n  && TRACE\n"),
            Some(Category::CommentPreproc)
        );
        assert_eq!(category_of(&tokens, "log();\n"), Some(Category::Comment));
        assert_eq!(category_of(&tokens, "still();\n"), Some(Category::Comment));
        let endifs = tokens.iter().filter(|t| t.text == "#endif\n").count();
        assert_eq!(endifs, 2);
        assert_eq!(category_of(&tokens, "y"), Some(Category::Name));
    }

    #[test]
    fn test_function_call_name() {
        let tokens = lex("x = compute (1);");
        assert_eq!(category_of(&tokens, "compute"), Some(Category::NameFunction));
        assert_eq!(category_of(&tokens, "1"), Some(Category::NumberInteger));
    }

    #[test]
    fn test_analyse_text() {
        assert_eq!(analyse_text("var x;\n  @import \"a.j\"\n"), 1.0);
        assert_eq!(analyse_text("@importing nothing"), 0.0);
    }
}
