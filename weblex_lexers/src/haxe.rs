//! haXe
//!
//! Declarations drive the stack: `class`, `enum`, `typedef` and `interface` push a
//! pre-body state under a type declaration, and a `{` swaps the pre-body for the body.

use crate::actionscript::starts_with_type_annotation;
use crate::analysis::clamp_score;
use crate::javascript::{DOUBLE_QUOTED, SINGLE_QUOTED};
use weblex_engine::bygroups;
use weblex_engine::lexical::{
    include, rule, LexerInfo, LexerOptions, RegexFlags, RegexLexer, StateTable, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "haXe",
    aliases: &["hx", "haXe"],
    filenames: &["*.hx"],
    mimetypes: &["text/haxe"],
};

const IDENT: &str = "(?:[a-zA-Z_][a-zA-Z0-9_]*)";
/// Dotted package path ending in a capitalized type name
const TYPE_ID: &str = r"(?:(?:[a-z0-9_\.])*[A-Z_][A-Za-z0-9_]*)";
const PROPERTY_ACCESS: &str = "(?:default|null|never)";
const DECLARATION_MODIFIER: &str = "(?:public|private|override|static|inline|extern|dynamic)";

const OPERATORS: &str = concat!(
    r"(?:=|\+=|-=|\*=|/=|%=|&=|\|=|\^=|<<=|>>=|>>>=|\|\||&&|",
    r"\.\.\.|==|!=|>|<|>=|<=|\||&|\^|<<|>>|>>>|\+|\-|\*|/|%|",
    r"!|\+\+|\-\-|~|\.|\?|\:)",
);

pub fn table() -> Result<StateTable, TableError> {
    StateTable::builder()
        .flags(RegexFlags::none().dot_all().multi_line())
        .state(
            "root",
            vec![
                include("whitespace"),
                include("comments"),
                rule(DECLARATION_MODIFIER, Category::KeywordDeclaration),
                include("enumdef"),
                include("typedef"),
                include("classdef"),
                include("interfacedef"),
                include("imports"),
            ],
        )
        .state(
            "comments",
            vec![
                rule(r"//.*?\n", Category::CommentSingle),
                rule(r"/\*.*?\*/", Category::CommentMultiline),
                rule(r"#[^\n]*", Category::CommentPreproc),
            ],
        )
        .state(
            "whitespace",
            vec![include("comments"), rule(r"\s+", Category::Text)],
        )
        .state(
            "codekeywords",
            vec![rule(
                concat!(
                    r"\b(if|else|while|do|for|in|break|continue|",
                    r"return|switch|case|try|catch|throw|null|trace|",
                    r"new|this|super|untyped|cast|callback|here)\b",
                ),
                Category::KeywordReserved,
            )],
        )
        .state(
            "literals",
            vec![
                rule("0[xX][0-9a-fA-F]+", Category::NumberHex),
                rule("[0-9]+", Category::NumberInteger),
                rule(r"[0-9][0-9]*\.[0-9]+([eE][0-9]+)?[fd]?", Category::NumberFloat),
                rule(SINGLE_QUOTED, Category::StringSingle),
                rule(DOUBLE_QUOTED, Category::StringDouble),
                rule(r"~/([^\n])*?/[gisx]*", Category::StringRegex),
                rule(r"\b(true|false|null)\b", Category::KeywordConstant),
            ],
        )
        .state(
            "codeblock",
            vec![
                include("whitespace"),
                include("new"),
                include("case"),
                include("anonfundef"),
                include("literals"),
                include("vardef"),
                include("codekeywords"),
                rule(r"[();,\[\]]", Category::Punctuation),
                rule(OPERATORS, Category::Operator),
                rule(IDENT, Category::Name),
                rule(r"\}", Category::Punctuation).pop(1),
                rule(r"\{", Category::Punctuation).push_current(),
            ],
        )
        // instance and block level
        .state(
            "propertydef",
            vec![rule(
                format!(
                    r"(\()({access})(,)({access})(\))",
                    access = PROPERTY_ACCESS
                ),
                bygroups![
                    Category::Punctuation,
                    Category::KeywordReserved,
                    Category::Punctuation,
                    Category::KeywordReserved,
                    Category::Punctuation
                ],
            )],
        )
        .state(
            "new",
            vec![rule(r"\bnew\b", Category::Keyword).push("typedecl")],
        )
        .state(
            "case",
            vec![rule(
                format!(r"\b(case)(\s+)({})(\s*)(\()", IDENT),
                bygroups![
                    Category::KeywordReserved,
                    Category::Text,
                    Category::Name,
                    Category::Text,
                    Category::Punctuation
                ],
            )
            .push("funargdecl")],
        )
        .state(
            "vardef",
            vec![rule(
                format!(r"\b(var)(\s+)({})", IDENT),
                bygroups![
                    Category::KeywordDeclaration,
                    Category::Text,
                    Category::NameVariable
                ],
            )
            .push("vardecl")],
        )
        .state(
            "vardecl",
            vec![
                include("whitespace"),
                include("typelabel"),
                rule("=", Category::Operator).pop(1),
                rule(";", Category::Punctuation).pop(1),
            ],
        )
        .state(
            "instancevardef",
            vec![
                rule(DECLARATION_MODIFIER, Category::KeywordDeclaration),
                rule(
                    format!(r"\b(var)(\s+)({})", IDENT),
                    bygroups![
                        Category::KeywordDeclaration,
                        Category::Text,
                        Category::NameVariableInstance
                    ],
                )
                .push("instancevardecl"),
            ],
        )
        .state(
            "instancevardecl",
            vec![include("vardecl"), include("propertydef")],
        )
        .state(
            "anonfundef",
            vec![rule(r"\bfunction\b", Category::KeywordDeclaration).push("fundecl")],
        )
        .state(
            "instancefundef",
            vec![
                rule(DECLARATION_MODIFIER, Category::KeywordDeclaration),
                rule(
                    format!(r"\b(function)(\s+)({})", IDENT),
                    bygroups![
                        Category::KeywordDeclaration,
                        Category::Text,
                        Category::NameFunction
                    ],
                )
                .push("fundecl"),
            ],
        )
        .state(
            "fundecl",
            vec![
                include("whitespace"),
                include("typelabel"),
                include("generictypedecl"),
                rule(r"\(", Category::Punctuation).push("funargdecl"),
                rule("", Category::Text).ahead("[a-zA-Z0-9_]").pop(1),
                rule(r"\{", Category::Punctuation).replace(&["codeblock"]),
                rule(";", Category::Punctuation).pop(1),
            ],
        )
        .state(
            "funargdecl",
            vec![
                include("whitespace"),
                rule(IDENT, Category::NameVariable),
                include("typelabel"),
                include("literals"),
                rule("=", Category::Operator),
                rule(",", Category::Punctuation),
                rule(r"\?", Category::Punctuation),
                rule(r"\)", Category::Punctuation).pop(1),
            ],
        )
        .state(
            "typelabel",
            vec![rule(":", Category::Punctuation).push("type")],
        )
        .state(
            "typedecl",
            vec![
                include("whitespace"),
                rule(TYPE_ID, Category::NameClass),
                rule("<", Category::Punctuation).push("generictypedecl"),
                rule("", Category::Text).ahead(r"[\{\}()=,a-z]").pop(1),
            ],
        )
        .state(
            "type",
            vec![
                include("whitespace"),
                rule(TYPE_ID, Category::NameClass),
                rule("<", Category::Punctuation).push("generictypedecl"),
                rule("->", Category::KeywordType),
                rule("", Category::Text).ahead(r"[\{\}(),;=]").pop(1),
            ],
        )
        .state(
            "generictypedecl",
            vec![
                include("whitespace"),
                rule(TYPE_ID, Category::NameClass),
                rule("<", Category::Punctuation).push_current(),
                rule(">", Category::Punctuation).pop(1),
                rule(",", Category::Punctuation),
            ],
        )
        // top level
        .state(
            "imports",
            vec![rule(
                r"(package|import|using)(\s+)([^;]+)(;)",
                bygroups![
                    Category::KeywordNamespace,
                    Category::Text,
                    Category::NameNamespace,
                    Category::Punctuation
                ],
            )],
        )
        .state(
            "typedef",
            vec![rule("typedef", Category::KeywordDeclaration)
                .push_all(&["typedefprebody", "typedecl"])],
        )
        .state(
            "typedefprebody",
            vec![
                include("whitespace"),
                rule(
                    r"(=)(\s*)(\{)",
                    bygroups![Category::Punctuation, Category::Text, Category::Punctuation],
                )
                .replace(&["typedefbody"]),
            ],
        )
        .state(
            "enumdef",
            vec![rule("enum", Category::KeywordDeclaration)
                .push_all(&["enumdefprebody", "typedecl"])],
        )
        .state(
            "enumdefprebody",
            vec![
                include("whitespace"),
                rule(r"\{", Category::Punctuation).replace(&["enumdefbody"]),
            ],
        )
        .state(
            "classdef",
            vec![rule("class", Category::KeywordDeclaration)
                .push_all(&["classdefprebody", "typedecl"])],
        )
        .state(
            "classdefprebody",
            vec![
                include("whitespace"),
                rule("(extends|implements)", Category::KeywordDeclaration).push("typedecl"),
                rule(r"\{", Category::Punctuation).replace(&["classdefbody"]),
            ],
        )
        .state(
            "interfacedef",
            vec![rule("interface", Category::KeywordDeclaration)
                .push_all(&["interfacedefprebody", "typedecl"])],
        )
        .state(
            "interfacedefprebody",
            vec![
                include("whitespace"),
                rule("(extends)", Category::KeywordDeclaration).push("typedecl"),
                rule(r"\{", Category::Punctuation).replace(&["classdefbody"]),
            ],
        )
        .state(
            "typedefbody",
            vec![
                include("whitespace"),
                include("instancevardef"),
                include("instancefundef"),
                rule(">", Category::Punctuation).push("typedecl"),
                rule(",", Category::Punctuation),
                rule(r"\}", Category::Punctuation).pop(1),
            ],
        )
        .state(
            "enumdefbody",
            vec![
                include("whitespace"),
                rule(IDENT, Category::NameVariableInstance),
                rule(r"\(", Category::Punctuation).push("funargdecl"),
                rule(";", Category::Punctuation),
                rule(r"\}", Category::Punctuation).pop(1),
            ],
        )
        .state(
            "classdefbody",
            vec![
                include("whitespace"),
                include("instancevardef"),
                include("instancefundef"),
                rule(r"\}", Category::Punctuation).pop(1),
                include("codeblock"),
            ],
        )
        .build()
}

pub fn lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table()?).build()
}

pub fn analyse_text(text: &str) -> f32 {
    clamp_score(if starts_with_type_annotation(text) {
        0.3
    } else {
        0.0
    })
}
