//! Every language the binary can tokenize, looked up by alias

use weblex_engine::{LexerInfo, LexerOptions, RegexLexer, TableError};
use weblex_lexers::{
    actionscript, coffeescript, css, haxe, html, javascript, objective_j, php, sass, xml,
};

type BuildFn = fn(&LexerOptions) -> Result<RegexLexer, TableError>;
type AnalyseFn = fn(&str) -> f32;

#[derive(Debug, Clone, Copy)]
pub struct Language {
    pub info: LexerInfo,
    pub build: BuildFn,
    pub analyse: AnalyseFn,
}

impl Language {
    const fn new(info: LexerInfo, build: BuildFn, analyse: AnalyseFn) -> Self {
        Self {
            info,
            build,
            analyse,
        }
    }

    pub fn name(&self) -> &'static str {
        self.info.name
    }

    fn answers_to(&self, alias: &str) -> bool {
        self.info
            .aliases
            .iter()
            .any(|known| known.eq_ignore_ascii_case(alias))
    }
}

pub const LANGUAGES: &[Language] = &[
    Language::new(javascript::INFO, javascript::lexer, javascript::analyse_text),
    Language::new(actionscript::INFO, actionscript::lexer, actionscript::analyse_text),
    Language::new(
        actionscript::AS3_INFO,
        actionscript::as3_lexer,
        actionscript::as3_analyse_text,
    ),
    Language::new(css::INFO, css::lexer, css::analyse_text),
    Language::new(objective_j::INFO, objective_j::lexer, objective_j::analyse_text),
    Language::new(html::INFO, html::lexer, html::analyse_text),
    Language::new(php::INFO, php::lexer, php::analyse_text),
    Language::new(xml::INFO, xml::lexer, xml::analyse_text),
    Language::new(xml::XSLT_INFO, xml::xslt_lexer, xml::xslt_analyse_text),
    Language::new(xml::MXML_INFO, xml::mxml_lexer, xml::mxml_analyse_text),
    Language::new(haxe::INFO, haxe::lexer, haxe::analyse_text),
    Language::new(sass::INFO, sass::lexer, sass::analyse_text),
    Language::new(sass::SCSS_INFO, sass::scss_lexer, sass::scss_analyse_text),
    Language::new(coffeescript::INFO, coffeescript::lexer, coffeescript::analyse_text),
];

/// Language registered under `alias`, compared ASCII case-insensitively
pub fn by_alias(alias: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.answers_to(alias))
}

/// Every language with its content score, in registration order
pub fn scores(text: &str) -> Vec<(&'static Language, f32)> {
    LANGUAGES
        .iter()
        .map(|language| (language, (language.analyse)(text)))
        .collect()
}
