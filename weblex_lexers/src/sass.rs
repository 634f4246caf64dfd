//! Sass and SCSS
//!
//! Both dialects share the value, selector and string states. Sass is line oriented: every
//! line starts in `root`, whose indentation callback picks the state for the rest of the
//! line, and comment openers arm a block state for deeper-indented continuation lines.
//! Where a line ends the stack goes back to a bare `root` rather than growing.

use crate::css::{BASIC_COLORS, EXTENDED_COLORS, PROPERTY_KEYWORDS};
use weblex_engine::bygroups;
use weblex_engine::lexical::{
    fallthrough, include, indentation, rule, starts_block, words, Entry, LexerInfo,
    LexerOptions, RegexFlags, RegexLexer, StateTable, StateTableBuilder, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "Sass",
    aliases: &["sass", "SASS"],
    filenames: &["*.sass"],
    mimetypes: &["text/x-sass"],
};

pub const SCSS_INFO: LexerInfo = LexerInfo {
    name: "SCSS",
    aliases: &["scss"],
    filenames: &["*.scss"],
    mimetypes: &["text/x-scss"],
};

fn value(line_end: Vec<Entry>) -> Vec<Entry> {
    let mut entries = vec![
        rule(r"[ \t]+", Category::Text),
        rule(r"[!$][\w-]+", Category::NameVariable),
        rule(r"url\(", Category::StringOther).push("string-url"),
        rule(r"[a-z_-][\w-]*", Category::NameFunction).ahead(r"\("),
        rule(words(PROPERTY_KEYWORDS, "", r"\b"), Category::NameConstant),
        rule(words(EXTENDED_COLORS, "", r"\b"), Category::NameEntity),
        rule(words(BASIC_COLORS, "", r"\b"), Category::NameBuiltin),
        rule("!(important|default)", Category::NameException),
        rule("(true|false)", Category::NamePseudo),
        rule("(and|or|not)", Category::OperatorWord),
        rule(r"/\*", Category::CommentMultiline).push("inline-comment"),
        rule(r"//[^\n]*", Category::CommentSingle),
        rule("#[a-z0-9]{1,6}", Category::NumberHex),
        rule(
            r"(-?\d+)(%|[a-z]+)?",
            bygroups![Category::NumberInteger, Category::KeywordType],
        ),
        rule(
            r"(-?\d*\.\d+)(%|[a-z]+)?",
            bygroups![Category::NumberFloat, Category::KeywordType],
        ),
        rule(r"#\{", Category::StringInterpol).push("interpolation"),
        rule(r"[~\^\*!&%<>\|+=@:,./?-]+", Category::Operator),
        rule(r"[\[\]()]+", Category::Punctuation),
        rule("\"", Category::StringDouble).push("string-double"),
        rule("'", Category::StringSingle).push("string-single"),
        rule(r"[a-z_-][\w-]*", Category::Name),
    ];
    entries.extend(line_end);
    entries
}

fn selector(line_end: Vec<Entry>) -> Vec<Entry> {
    let mut entries = vec![
        rule(r"[ \t]+", Category::Text),
        rule(":", Category::NameDecorator).push("pseudo-class"),
        rule(r"\.", Category::NameClass).push("class"),
        rule("#", Category::NameNamespace).push("id"),
        rule("[a-zA-Z0-9_-]+", Category::NameTag),
        rule(r"#\{", Category::StringInterpol).push("interpolation"),
        rule("&", Category::Keyword),
        rule(r"[~\^\*!&\[\]\(\)<>\|+=@:;,./?-]", Category::Operator),
        rule("\"", Category::StringDouble).push("string-double"),
        rule("'", Category::StringSingle).push("string-single"),
    ];
    entries.extend(line_end);
    entries
}

/// A run of text inside a quoted or `url(...)` string; `#{` opens an interpolation
fn string_state(body: &str, category: Category, close: Entry) -> Vec<Entry> {
    vec![
        rule(body, category),
        rule(r"#\{", Category::StringInterpol).push("interpolation"),
        rule("#", category).ahead(r"[^\n\{]"),
        close,
    ]
}

/// A selector fragment after `:`, `.` or `#`
fn name_fragment(category: Category) -> Vec<Entry> {
    vec![
        rule(r"[\w-]+", category),
        rule(r"#\{", Category::StringInterpol).push("interpolation"),
        fallthrough().pop(1),
    ]
}

/// States both dialects share; `line_end` closes the value and selector states
fn shared_states(builder: StateTableBuilder, line_end: impl Fn() -> Vec<Entry>) -> StateTableBuilder {
    builder
        .state("value", value(line_end()))
        .state(
            "interpolation",
            vec![
                rule(r"\}", Category::StringInterpol).pop(1),
                include("value"),
            ],
        )
        .state("selector", selector(line_end()))
        .state(
            "string-double",
            string_state(
                r##"(?:\\.|[^\n"#])+"##,
                Category::StringDouble,
                rule("\"", Category::StringDouble).pop(1),
            ),
        )
        .state(
            "string-single",
            string_state(
                r"(?:\\.|[^\n'#])+",
                Category::StringDouble,
                rule("'", Category::StringDouble).pop(1),
            ),
        )
        .state(
            "string-url",
            string_state(
                r"(?:\\#|[^\n#)])+",
                Category::StringOther,
                rule(r"\)", Category::StringOther).pop(1),
            ),
        )
        .state("pseudo-class", name_fragment(Category::NameDecorator))
        .state("class", name_fragment(Category::NameClass))
        .state("id", name_fragment(Category::NameNamespace))
        .state(
            "for",
            vec![
                rule("(from|to|through)", Category::OperatorWord),
                include("value"),
            ],
        )
}

/// Directives both dialects accept at the start of a statement
fn directives() -> Vec<Entry> {
    vec![
        rule("@for", Category::Keyword).push("for"),
        rule("@(debug|warn|if|while)", Category::Keyword).push("value"),
        rule(
            r"(@mixin)( [\w-]+)",
            bygroups![Category::Keyword, Category::NameFunction],
        )
        .push("value"),
        rule(
            r"(@include)( [\w-]+)",
            bygroups![Category::Keyword, Category::NameDecorator],
        )
        .push("value"),
        rule("@extend", Category::Keyword).push("selector"),
        rule("@[a-z0-9_-]+", Category::Keyword).push("selector"),
    ]
}

pub fn table() -> Result<StateTable, TableError> {
    let mut content = vec![
        rule(
            r"//[^\n]*",
            starts_block(Category::CommentSingle, "single-comment"),
        )
        .reset("root"),
        rule(
            r"/\*[^\n]*",
            starts_block(Category::CommentMultiline, "multi-comment"),
        )
        .reset("root"),
        rule("@import", Category::Keyword).push("import"),
    ];
    content.extend(directives());
    content.extend([
        rule(r"=[\w-]+", Category::NameFunction).push("value"),
        rule(r"\+[\w-]+", Category::NameDecorator).push("value"),
        rule(
            r"([!$][\w-]\w*)([ \t]*(?:(?:\|\|)?=|:))",
            bygroups![Category::NameVariable, Category::Operator],
        )
        .push("value"),
        rule(":", Category::NameAttribute).push("old-style-attr"),
        rule("", Category::NameAttribute)
            .ahead(".+?[=:](?:[^a-z]|$)")
            .push("new-style-attr"),
        fallthrough().push("selector"),
    ]);

    let builder = StateTable::builder()
        .flags(RegexFlags::none().ignore_case())
        .state(
            "root",
            vec![
                rule(r"[ \t]*\n", Category::Text),
                rule(r"[ \t]*", indentation("content")),
            ],
        )
        .state("content", content)
        .state(
            "single-comment",
            vec![
                rule(".+", Category::CommentSingle),
                rule(r"\n", Category::Text).reset("root"),
            ],
        )
        .state(
            "multi-comment",
            vec![
                rule(".+", Category::CommentMultiline),
                rule(r"\n", Category::Text).reset("root"),
            ],
        )
        .state(
            "import",
            vec![
                rule(r"[ \t]+", Category::Text),
                rule(r"\S+", Category::String),
                rule(r"\n", Category::Text).reset("root"),
            ],
        )
        .state(
            "old-style-attr",
            vec![
                rule(r#"[^\s:="\[]+"#, Category::NameAttribute),
                rule(r"#\{", Category::StringInterpol).push("interpolation"),
                rule(r"[ \t]*=", Category::Operator).push("value"),
                fallthrough().push("value"),
            ],
        )
        .state(
            "new-style-attr",
            vec![
                rule(r#"[^\s:="\[]+"#, Category::NameAttribute),
                rule(r"#\{", Category::StringInterpol).push("interpolation"),
                rule(r"[ \t]*[=:]", Category::Operator).push("value"),
            ],
        )
        .state(
            "inline-comment",
            vec![
                rule(r"(?:\\#|[^\n#*])+", Category::CommentMultiline),
                rule(r"#\{", Category::StringInterpol).push("interpolation"),
                rule("#", Category::CommentMultiline).ahead(r"[^\n\{]"),
                rule(r"\*/", Category::Comment).pop(1),
                rule(r"\*", Category::CommentMultiline).ahead(r"[^\n/]"),
            ],
        );

    shared_states(builder, || vec![rule(r"\n", Category::Text).reset("root")]).build()
}

pub fn lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table()?).build()
}

pub fn analyse_text(_text: &str) -> f32 {
    0.0
}

pub fn scss_table() -> Result<StateTable, TableError> {
    let mut root = vec![
        rule(r"\s+", Category::Text),
        rule(r"//.*?\n", Category::CommentSingle),
        rule(r"/\*.*?\*/", Category::CommentMultiline),
        rule("@import", Category::Keyword).push("value"),
    ];
    root.extend(directives());
    root.extend([
        rule(
            r"(\$[\w-]\w*)([ \t]*:)",
            bygroups![Category::NameVariable, Category::Operator],
        )
        .push("value"),
        // a lone character closing a statement, or a name followed by `:` and a value
        rule("", Category::NameAttribute)
            .ahead(r"[^;\{\}][;\}]")
            .push("attr"),
        rule("", Category::NameAttribute)
            .ahead(r"[^;\{\}:]+:[^a-z]")
            .push("attr"),
        fallthrough().push("selector"),
    ]);

    let builder = StateTable::builder()
        .flags(RegexFlags::none().ignore_case().dot_all())
        .state("root", root)
        .state(
            "attr",
            vec![
                rule(r#"[^\s:="\[]+"#, Category::NameAttribute),
                rule(r"#\{", Category::StringInterpol).push("interpolation"),
                rule(r"[ \t]*:", Category::Operator).push("value"),
            ],
        )
        .state(
            "inline-comment",
            vec![
                rule(r"(?:\\#|[^#*])+", Category::CommentMultiline),
                rule(r"#\{", Category::StringInterpol).push("interpolation"),
                rule("#", Category::CommentMultiline).ahead(r"[^\{]"),
                rule(r"\*/", Category::Comment).pop(1),
                rule(r"\*", Category::CommentMultiline).ahead("[^/]"),
            ],
        );

    shared_states(builder, || {
        vec![
            rule(r"\n", Category::Text),
            rule(r"[;\{\}]", Category::Punctuation).reset("root"),
        ]
    })
    .build()
}

pub fn scss_lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(SCSS_INFO, scss_table()?).build()
}

pub fn scss_analyse_text(_text: &str) -> f32 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use weblex_engine::{validate_tokenization, Token};

    fn checked<'t>(lexer: &RegexLexer, text: &'t str) -> Vec<Token<'t>> {
        let tokens: Vec<_> = lexer.tokenize(text).collect();
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));
        tokens
    }

    fn category_of(tokens: &[Token<'_>], text: &str) -> Option<Category> {
        tokens.iter().find(|t| t.text == text).map(|t| t.category)
    }

    const SASS: &str = "$width: 10px\n\
.box\n  width: $width\n  // note\n    more\n  color: red\n\
@import base.sass\n";

    #[test]
    fn test_sass_lines() {
        let lexer = lexer(&LexerOptions::new()).unwrap();
        let tokens = checked(&lexer, SASS);
        assert_eq!(category_of(&tokens, "$width"), Some(Category::NameVariable));
        assert_eq!(category_of(&tokens, "10"), Some(Category::NumberInteger));
        assert_eq!(category_of(&tokens, "px"), Some(Category::KeywordType));
        assert_eq!(category_of(&tokens, "box"), Some(Category::NameClass));
        assert_eq!(category_of(&tokens, "width"), Some(Category::NameAttribute));
        assert_eq!(category_of(&tokens, "red"), Some(Category::NameBuiltin));
        assert_eq!(category_of(&tokens, "@import"), Some(Category::Keyword));
        assert_eq!(category_of(&tokens, "base.sass"), Some(Category::String));
    }

    #[test]
    fn test_sass_comment_block_follows_indentation() {
        let lexer = lexer(&LexerOptions::new()).unwrap();
        let tokens = checked(&lexer, SASS);
        assert_eq!(category_of(&tokens, "// note"), Some(Category::CommentSingle));
        assert_eq!(category_of(&tokens, "more"), Some(Category::CommentSingle));
        assert_eq!(category_of(&tokens, "color"), Some(Category::NameAttribute));
    }

    #[test]
    fn test_sass_stack_stays_shallow() {
        let lexer = lexer(&LexerOptions::new()).unwrap();
        let text = "a\n".repeat(500);
        let mut tokens = lexer.tokenize(&text);
        let _ = tokens.by_ref().count();
        assert!(tokens.stack_names().len() <= 2);
    }

    #[test]
    fn test_scss_rules() {
        let lexer = scss_lexer(&LexerOptions::new()).unwrap();
        let tokens = checked(
            &lexer,
            "$main: #333;\n.nav a:hover {\n  color: $main;\n  margin: 0 2px;\n}\n",
        );
        assert_eq!(category_of(&tokens, "$main"), Some(Category::NameVariable));
        assert_eq!(category_of(&tokens, "#333"), Some(Category::NumberHex));
        assert_eq!(category_of(&tokens, "nav"), Some(Category::NameClass));
        assert_eq!(category_of(&tokens, "a"), Some(Category::NameTag));
        assert_eq!(category_of(&tokens, "hover"), Some(Category::NameDecorator));
        assert_eq!(category_of(&tokens, "{"), Some(Category::Punctuation));
        assert_eq!(category_of(&tokens, "color"), Some(Category::NameAttribute));
        assert_eq!(category_of(&tokens, "2"), Some(Category::NumberInteger));
        assert_eq!(category_of(&tokens, "px"), Some(Category::KeywordType));
    }

    #[test]
    fn test_scss_interpolated_string() {
        let lexer = scss_lexer(&LexerOptions::new()).unwrap();
        let tokens = checked(&lexer, "$path: \"img/#{$name}.png\";\n");
        assert_eq!(category_of(&tokens, "img/"), Some(Category::StringDouble));
        assert_eq!(category_of(&tokens, "#{"), Some(Category::StringInterpol));
        assert_eq!(category_of(&tokens, "$name"), Some(Category::NameVariable));
        assert_eq!(category_of(&tokens, "}"), Some(Category::StringInterpol));
        assert_eq!(category_of(&tokens, ".png"), Some(Category::StringDouble));
    }
}
