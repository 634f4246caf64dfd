//! PHP
//!
//! Text outside `<?php ... ?>` is `Other` so a host-language lexer can take it over.
//! Builtin function names are retagged after scanning, from the modules left enabled by
//! the `disabledmodules` option.

use crate::analysis::clamp_score;
use crate::php_builtins::{module_names, MODULES, UNKNOWN_MODULE};
use std::collections::HashSet;
use weblex_engine::bygroups;
use weblex_engine::lexical::{
    callback, rule, using_this, LexerContext, LexerInfo, LexerOptions, OptionError,
    OptionReport, RegexFlags, RegexLexer, RuleMatch, StateTable, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "PHP",
    aliases: &["php", "php3", "php4", "php5"],
    filenames: &["*.php", "*.php[345]"],
    mimetypes: &["text/x-php"],
};

/// Characters the operator rule accepts
const OPERATOR_CHARS: &str = "~!%^&*+=|:.<>/?@-";

const KEYWORDS: &str = concat!(
    r"(and|E_PARSE|old_function|E_ERROR|or|as|E_WARNING|parent|",
    r"eval|PHP_OS|break|exit|case|extends|PHP_VERSION|cfunction|",
    r"FALSE|print|for|require|continue|foreach|require_once|",
    r"declare|return|default|static|do|switch|die|stdClass|",
    r"echo|else|TRUE|elseif|var|empty|if|xor|enddeclare|include|",
    r"virtual|endfor|include_once|while|endforeach|global|__FILE__|",
    r"endif|list|__LINE__|endswitch|new|__sleep|endwhile|not|",
    r"array|__wakeup|E_ALL|NULL|final|php_user_filter|interface|",
    r"implements|public|private|protected|abstract|clone|try|",
    r"catch|throw|this|use|namespace)\b",
);

/// `<<<NAME` or `<<<'NAME'` opening a heredoc or nowdoc
const HEREDOC_OPENER: &str = r"<<<('?)([a-zA-Z_][a-zA-Z0-9_]*)('?)\n";

pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder()
        .flags(RegexFlags::none().ignore_case().dot_all().multi_line())
        .state(
            "root",
            vec![
                rule(r"<\?(php)?", Category::CommentPreproc).push("php"),
                rule("[^<]+", Category::Other),
                rule("<", Category::Other),
            ],
        )
        .state(
            "php",
            vec![
                rule(r"\?>", Category::CommentPreproc).pop(1),
                rule(HEREDOC_OPENER, callback(heredoc)),
                rule(r"\s+", Category::Text),
                rule(r"#.*?\n", Category::CommentSingle),
                rule(r"//.*?\n", Category::CommentSingle),
                // empty comment, not the start of a docstring
                rule(r"/\*\*/", Category::CommentMultiline),
                rule(r"/\*\*.*?\*/", Category::StringDoc),
                rule(r"/\*.*?\*/", Category::CommentMultiline),
                rule(
                    r"(->|::)(\s*)([a-zA-Z_][a-zA-Z0-9_]*)",
                    bygroups![Category::Operator, Category::Text, Category::NameAttribute],
                ),
                rule(r"[~!%^&*+=|:.<>/?@-]+", Category::Operator),
                rule(r"[\[\]\{\}();,]+", Category::Punctuation),
                rule(r"(class)(\s+)", bygroups![Category::Keyword, Category::Text])
                    .push("classname"),
                rule(r"(function)(\s*)", bygroups![Category::Keyword, Category::Text])
                    .ahead(r"\("),
                rule(
                    r"(function)(\s+)(&?)(\s*)",
                    bygroups![
                        Category::Keyword,
                        Category::Text,
                        Category::Operator,
                        Category::Text
                    ],
                )
                .push("functionname"),
                rule(
                    r"(const)(\s+)([a-zA-Z_][a-zA-Z0-9_]*)",
                    bygroups![Category::Keyword, Category::Text, Category::NameConstant],
                ),
                rule(KEYWORDS, Category::Keyword),
                rule(r"(true|false|null)\b", Category::KeywordConstant),
                rule(r"\$\{\$+[a-zA-Z_][a-zA-Z0-9_]*\}", Category::NameVariable),
                rule(r"\$+[a-zA-Z_][a-zA-Z0-9_]*", Category::NameVariable),
                rule(r"[\\a-zA-Z_][\\a-zA-Z0-9_]*", Category::NameOther),
                rule(
                    r"0[xX][0-9a-fA-F]+[Ll]?|[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?[flFLdD]?",
                    Category::Number,
                ),
                rule(r"'([^'\\]*(?:\\.[^'\\]*)*)'", Category::StringSingle),
                rule(r"`([^`\\]*(?:\\.[^`\\]*)*)`", Category::StringBacktick),
                rule("\"", Category::StringDouble).push("string"),
            ],
        )
        .state(
            "classname",
            vec![rule(r"[a-zA-Z_][\\a-zA-Z0-9_]*", Category::NameClass).pop(1)],
        )
        .state(
            "functionname",
            vec![rule("[a-zA-Z_][a-zA-Z0-9_]*", Category::NameFunction).pop(1)],
        )
        .state(
            "string",
            vec![
                rule("\"", Category::StringDouble).pop(1),
                rule(r#"[^\{$"\\]+"#, Category::StringDouble),
                rule(
                    r#"\\([nrt"$]|[0-7]{1,3}|x[0-9A-Fa-f]{1,2})"#,
                    Category::StringEscape,
                ),
                rule(
                    r"\$[a-zA-Z_][a-zA-Z0-9_]*(\[\S+\]|->[a-zA-Z_][a-zA-Z0-9_]*)?",
                    Category::StringInterpol,
                ),
                rule(
                    r"(\{\$\{)(.*?)(\}\})",
                    bygroups![
                        Category::StringInterpol,
                        using_this().with_state(&["root", "php"]),
                        Category::StringInterpol
                    ],
                ),
                rule(
                    r"(\{)(\$.*?)(\})",
                    bygroups![
                        Category::StringInterpol,
                        using_this().with_state(&["root", "php"]),
                        Category::StringInterpol
                    ],
                ),
                rule(
                    r"(\$\{)(\S+)(\})",
                    bygroups![
                        Category::StringInterpol,
                        Category::NameVariable,
                        Category::StringInterpol
                    ],
                ),
                rule(r"[$\{\\]+", Category::StringDouble),
            ],
        )
        .build()
}

/// Heredoc body through the closing identifier line, or just the `<<<` operator when the
/// opener is malformed or never closed
fn heredoc(found: &RuleMatch<'_>, ctx: &mut LexerContext<'_, '_>) {
    let closed = match (found.group(1), found.group(2), found.group(3)) {
        (Some(open), Some(name), Some(close)) if open == close => {
            heredoc_end(ctx.text(), found.end(), name)
        }
        _ => None,
    };

    match closed {
        Some(end) => {
            ctx.emit(end, Category::String);
            ctx.set_pos(end);
        }
        None => {
            let operator_len: usize = found
                .as_str()
                .chars()
                .take_while(|c| OPERATOR_CHARS.contains(*c))
                .map(char::len_utf8)
                .sum();
            let end = found.start() + operator_len;
            ctx.emit(end, Category::Operator);
            ctx.set_pos(end);
        }
    }
}

/// End of the first `\nNAME;?\n` at or after `from`; names compare case-insensitively
fn heredoc_end(text: &str, from: usize, name: &str) -> Option<usize> {
    let body = text.get(from..)?;

    body.match_indices('\n').find_map(|(newline, _)| {
        let after = newline + 1;
        let candidate = body.get(after..after + name.len())?;
        if !candidate.eq_ignore_ascii_case(name) {
            return None;
        }

        let mut tail = after + name.len();
        if body[tail..].starts_with(';') {
            tail += 1;
        }
        body[tail..]
            .starts_with('\n')
            .then_some(from + tail + 1)
    })
}

/// Functions of every enabled module
fn builtin_functions(disabled: &[String]) -> HashSet<&'static str> {
    MODULES
        .iter()
        .filter(|(module, _)| !disabled.iter().any(|d| d == module))
        .flat_map(|(_, functions)| functions.iter().copied())
        .collect()
}

/// Options: `startinline`, `funcnamehighlighting`, `disabledmodules`
pub fn lexer(options: &LexerOptions) -> Result<RegexLexer, TableError> {
    let mut report = OptionReport::new(INFO.name, options);
    let start_inline = report.bool("startinline", false);
    let highlight_functions = report.bool("funcnamehighlighting", true);

    let mut disabled = report.list("disabledmodules", &[UNKNOWN_MODULE]);
    let unknown: Vec<String> = disabled
        .iter()
        .filter(|name| !module_names().any(|known| known == name.as_str()))
        .cloned()
        .collect();
    for value in unknown {
        report.push(OptionError::UnknownValue {
            option: "disabledmodules".to_string(),
            value: value.clone(),
            known: module_names().map(str::to_string).collect(),
        });
        disabled.retain(|name| *name != value);
    }

    let mut builder = RegexLexer::builder(INFO, table()?);
    if start_inline {
        builder = builder.initial_stack(&["root", "php"]);
    }
    if highlight_functions {
        let functions = builtin_functions(&disabled);
        builder = builder.filter(move |category, text| {
            if category == Category::NameOther && functions.contains(text) {
                Category::NameBuiltin
            } else {
                category
            }
        });
    }

    builder.option_errors(report.into_errors()).build()
}

pub fn analyse_text(text: &str) -> f32 {
    let mut score = 0.0;
    if text
        .match_indices("<?")
        .any(|(at, _)| !text[at + 2..].starts_with("xml"))
    {
        score += 0.3;
    }
    if text.contains("?>") {
        score += 0.1;
    }
    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use weblex_engine::{validate_tokenization, Token};

    fn lex_with<'t>(options: &LexerOptions, text: &'t str) -> Vec<Token<'t>> {
        let tokens: Vec<_> = lexer(options).unwrap().tokenize(text).collect();
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));
        tokens
    }

    fn lex(text: &str) -> Vec<Token<'_>> {
        lex_with(&LexerOptions::new(), text)
    }

    fn category_of(tokens: &[Token<'_>], text: &str) -> Option<Category> {
        tokens.iter().find(|t| t.text == text).map(|t| t.category)
    }

    #[test]
    fn test_embedded_block() {
        let tokens = lex("<p>Hi</p><?php echo strlen($name); ?>\n");
        assert_eq!(category_of(&tokens, "p>Hi"), Some(Category::Other));
        assert_eq!(category_of(&tokens, "<?php"), Some(Category::CommentPreproc));
        assert_eq!(category_of(&tokens, "echo"), Some(Category::Keyword));
        assert_eq!(category_of(&tokens, "strlen"), Some(Category::NameBuiltin));
        assert_eq!(category_of(&tokens, "$name"), Some(Category::NameVariable));
        assert_eq!(category_of(&tokens, "?>"), Some(Category::CommentPreproc));
        assert_eq!(category_of(&tokens, "\n"), Some(Category::Other));
    }

    #[test]
    fn test_startinline() {
        let inline = LexerOptions::new().with("startinline", "yes");
        let tokens = lex_with(&inline, "$x = 10;");
        assert_eq!(category_of(&tokens, "$x"), Some(Category::NameVariable));
        assert_eq!(category_of(&tokens, "10"), Some(Category::Number));

        let tokens = lex("$x = 10;");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, Category::Other);
    }

    #[test]
    fn test_function_highlighting_options() {
        let text = "<?php strlen(1); foo(2);";

        let tokens = lex(text);
        assert_eq!(category_of(&tokens, "foo"), Some(Category::NameOther));

        let disabled = LexerOptions::new().with("disabledmodules", "Strings, unknown");
        let tokens = lex_with(&disabled, text);
        assert_eq!(category_of(&tokens, "strlen"), Some(Category::NameOther));

        let off = LexerOptions::new().with("funcnamehighlighting", "off");
        let tokens = lex_with(&off, text);
        assert_eq!(category_of(&tokens, "strlen"), Some(Category::NameOther));
    }

    #[test]
    fn test_unknown_module_is_reported() {
        let options = LexerOptions::new().with("disabledmodules", "Strings nosuchmodule");
        let lexer = lexer(&options).unwrap();
        assert_eq!(lexer.option_errors().len(), 1);
        assert_matches!(
            &lexer.option_errors()[0],
            OptionError::UnknownValue { option, value, .. }
                if option == "disabledmodules" && value == "nosuchmodule"
        );

        let tokens: Vec<_> = lexer.tokenize("<?php strlen(1);").collect();
        assert_eq!(category_of(&tokens, "strlen"), Some(Category::NameOther));
    }

    #[test]
    fn test_heredoc() {
        let text = "<?php $s = <<<EOT\nHello $name\neot;\n?>";
        let tokens = lex(text);
        assert_eq!(
            category_of(&tokens, "<<<EOT\nHello $name\neot;\n"),
            Some(Category::String)
        );
        assert_eq!(tokens.last().unwrap().category, Category::CommentPreproc);
    }

    #[test]
    fn test_unclosed_heredoc_is_an_operator() {
        let tokens = lex("<?php $a <<<EOT\nnever closed");
        assert_eq!(category_of(&tokens, "<<<"), Some(Category::Operator));
        assert_eq!(category_of(&tokens, "EOT"), Some(Category::NameOther));

        let tokens = lex("<?php <<<'EOT\nx\nEOT\n");
        assert_eq!(category_of(&tokens, "<<<"), Some(Category::Operator));
    }

    #[test]
    fn test_string_interpolation_lexes_php() {
        let text = "<?php \"a {$b->c}\\n\" ?>";
        let tokens = lex(text);
        assert_eq!(category_of(&tokens, "{"), Some(Category::StringInterpol));
        assert_eq!(category_of(&tokens, "$b"), Some(Category::NameVariable));
        assert_eq!(category_of(&tokens, "->"), Some(Category::Operator));
        assert_eq!(category_of(&tokens, "c"), Some(Category::NameAttribute));
        assert_eq!(category_of(&tokens, "\\n"), Some(Category::StringEscape));

        let attribute = tokens.iter().find(|t| t.text == "c").unwrap();
        assert_eq!(attribute.offset, text.find("c}").unwrap());
    }

    #[test]
    fn test_declarations() {
        let tokens = lex("<?php class Foo\\Bar {} function &make() {} const LIMIT = 3;");
        assert_eq!(category_of(&tokens, "Foo\\Bar"), Some(Category::NameClass));
        assert_eq!(category_of(&tokens, "&"), Some(Category::Operator));
        assert_eq!(category_of(&tokens, "make"), Some(Category::NameFunction));
        assert_eq!(category_of(&tokens, "LIMIT"), Some(Category::NameConstant));
    }

    #[test]
    fn test_analyse_text() {
        assert_eq!(analyse_text("<?php echo 1; ?>"), 0.4);
        assert_eq!(analyse_text("<?php echo 1;"), 0.3);
        assert_eq!(analyse_text("<?xml version=\"1.0\"?><a/>"), 0.1);
        assert_eq!(analyse_text("plain"), 0.0);
    }
}
