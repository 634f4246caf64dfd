//! XML and the two dialects built on its table
//!
//! XSLT retags instruction elements after scanning; MXML hands `<![CDATA[...]]>` bodies
//! to ActionScript 3.

use crate::actionscript;
use crate::analysis::{clamp_score, looks_like_xml};
use regex::Regex;
use std::sync::OnceLock;
use weblex_engine::bygroups;
use weblex_engine::lexical::{
    rule, using, Entry, LexerInfo, LexerOptions, RegexFlags, RegexLexer, StateTable,
    StateTableBuilder, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "XML",
    aliases: &["xml"],
    filenames: &["*.xml", "*.xsl", "*.rss", "*.xslt", "*.xsd", "*.wsdl"],
    mimetypes: &[
        "text/xml",
        "application/xml",
        "image/svg+xml",
        "application/rss+xml",
        "application/atom+xml",
        "application/xsl+xml",
        "application/xslt+xml",
    ],
};

pub const XSLT_INFO: LexerInfo = LexerInfo {
    name: "XSLT",
    aliases: &["xslt"],
    filenames: &["*.xsl", "*.xslt"],
    mimetypes: &[],
};

pub const MXML_INFO: LexerInfo = LexerInfo {
    name: "MXML",
    aliases: &["mxml"],
    filenames: &["*.mxml"],
    mimetypes: &[],
};

/// `xsl:` elements that are instructions rather than literal result elements
const XSLT_INSTRUCTIONS: &[&str] = &[
    "apply-imports",
    "apply-templates",
    "attribute",
    "attribute-set",
    "call-template",
    "choose",
    "comment",
    "copy",
    "copy-of",
    "decimal-format",
    "element",
    "fallback",
    "for-each",
    "if",
    "import",
    "include",
    "key",
    "message",
    "namespace-alias",
    "number",
    "otherwise",
    "output",
    "param",
    "preserve-space",
    "processing-instruction",
    "sort",
    "strip-space",
    "stylesheet",
    "template",
    "text",
    "transform",
    "value-of",
    "variable",
    "when",
    "with-param",
];

/// Markup states shared by every dialect; `cdata` decides what a CDATA section becomes
fn markup(cdata: Entry) -> StateTableBuilder {
    StateTable::builder()
        .flags(RegexFlags::none().multi_line().dot_all())
        .state(
            "root",
            vec![
                rule("[^<&]+", Category::Text),
                rule(r"&\S*?;", Category::NameEntity),
                cdata,
                rule("<!--", Category::Comment).push("comment"),
                rule(r"<\?.*?\?>", Category::CommentPreproc),
                rule("<![^>]*>", Category::CommentPreproc),
                rule(r"<\s*[a-zA-Z0-9:._-]+", Category::NameTag).push("tag"),
                rule(r"<\s*/\s*[a-zA-Z0-9:._-]+\s*>", Category::NameTag),
            ],
        )
        .state(
            "comment",
            vec![
                rule("[^-]+", Category::Comment),
                rule("-->", Category::Comment).pop(1),
                rule("-", Category::Comment),
            ],
        )
        .state(
            "tag",
            vec![
                rule(r"\s+", Category::Text),
                rule(r"[a-zA-Z0-9_.:-]+\s*=", Category::NameAttribute).push("attr"),
                rule(r"/?\s*>", Category::NameTag).pop(1),
            ],
        )
        .state(
            "attr",
            vec![
                rule(r"\s+", Category::Text),
                rule("\".*?\"", Category::String).pop(1),
                rule("'.*?'", Category::String).pop(1),
                rule(r"[^\s>]+", Category::String).pop(1),
            ],
        )
}

pub fn table() -> Result<StateTable, TableError> {
    markup(rule(r"<!\[CDATA\[.*?\]\]>", Category::CommentPreproc)).build()
}

pub fn lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table()?).build()
}

pub fn analyse_text(text: &str) -> f32 {
    clamp_score(if looks_like_xml(text) { 0.5 } else { 0.0 })
}

static XSL_ELEMENT: OnceLock<Option<Regex>> = OnceLock::new();

/// Local name of an `xsl:` tag token such as `<xsl:template` or `</xsl:if>`
fn xsl_local_name(tag: &str) -> Option<&str> {
    XSL_ELEMENT
        .get_or_init(|| Regex::new(r"^</?xsl:([^>]*)/?>?").ok())
        .as_ref()?
        .captures(tag)?
        .get(1)
        .map(|name| name.as_str())
}

pub fn xslt_lexer(_options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(XSLT_INFO, table()?)
        .filter(|category, text| {
            let instruction = category == Category::NameTag
                && xsl_local_name(text).is_some_and(|name| XSLT_INSTRUCTIONS.contains(&name));
            if instruction {
                Category::Keyword
            } else {
                category
            }
        })
        .build()
}

pub fn xslt_analyse_text(text: &str) -> f32 {
    clamp_score(if looks_like_xml(text) && text.contains("<xsl") {
        0.8
    } else {
        0.0
    })
}

pub fn mxml_table(options: &LexerOptions) -> Result<StateTable, TableError> {
    let script = actionscript::as3_lexer(options)?;
    markup(rule(
        r"(<!\[CDATA\[)(.*?)(\]\]>)",
        bygroups![Category::String, using(&script), Category::String],
    ))
    .build()
}

pub fn mxml_lexer(options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(MXML_INFO, mxml_table(options)?).build()
}

pub fn mxml_analyse_text(_text: &str) -> f32 {
    0.0
}
