//! HTML
//!
//! Markup with `<script>` bodies handed to the JavaScript lexer and `<style>` bodies to
//! the CSS lexer.

use crate::analysis::{clamp_score, html_doctype_matches};
use crate::{css, javascript};
use weblex_engine::lexical::{
    rule, using, LexerInfo, LexerOptions, RegexFlags, RegexLexer, StateTable, TableError,
};
use weblex_engine::Category;

pub const INFO: LexerInfo = LexerInfo {
    name: "HTML",
    aliases: &["html"],
    filenames: &["*.html", "*.htm", "*.xhtml", "*.xslt"],
    mimetypes: &["text/html", "application/xhtml+xml"],
};

const SCRIPT_END: &str = r"<\s*/\s*script\s*>";
const STYLE_END: &str = r"<\s*/\s*style\s*>";

pub fn table(options: &LexerOptions) -> Result<StateTable, TableError> {
    let script = javascript::lexer(options)?;
    let style = css::lexer(options)?;

    StateTable::builder()
        .flags(RegexFlags::none().ignore_case().dot_all())
        .state(
            "root",
            vec![
                rule("[^<&]+", Category::Text),
                rule(r"&\S*?;", Category::NameEntity),
                rule(r"<!\[CDATA\[.*?\]\]>", Category::CommentPreproc),
                rule("<!--", Category::Comment).push("comment"),
                rule(r"<\?.*?\?>", Category::CommentPreproc),
                rule("<![^>]*>", Category::CommentPreproc),
                rule(r"<\s*script\s*", Category::NameTag).push_all(&["script-content", "tag"]),
                rule(r"<\s*style\s*", Category::NameTag).push_all(&["style-content", "tag"]),
                rule(r"<\s*[a-zA-Z0-9:]+", Category::NameTag).push("tag"),
                rule(r"<\s*/\s*[a-zA-Z0-9:]+\s*>", Category::NameTag),
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
                rule(r"[a-zA-Z0-9_:-]+\s*=", Category::NameAttribute).push("attr"),
                rule("[a-zA-Z0-9_:-]+", Category::NameAttribute),
                rule(r"/?\s*>", Category::NameTag).pop(1),
            ],
        )
        .state(
            "script-content",
            vec![
                rule(SCRIPT_END, Category::NameTag).pop(1),
                rule(".+?", using(&script)).ahead(SCRIPT_END),
            ],
        )
        .state(
            "style-content",
            vec![
                rule(STYLE_END, Category::NameTag).pop(1),
                rule(".+?", using(&style)).ahead(STYLE_END),
            ],
        )
        .state(
            "attr",
            vec![
                rule("\".*?\"", Category::String).pop(1),
                rule("'.*?'", Category::String).pop(1),
                rule(r"[^\s>]+", Category::String).pop(1),
            ],
        )
        .build()
}

pub fn lexer(options: &LexerOptions) -> Result<RegexLexer, TableError> {
    RegexLexer::builder(INFO, table(options)?).build()
}

pub fn analyse_text(text: &str) -> f32 {
    clamp_score(if html_doctype_matches(text) { 0.5 } else { 0.0 })
}
