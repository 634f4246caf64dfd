//! The scanning loop
//!
//! A `RegexLexer` pairs a resolved `StateTable` with an initial stack and an optional
//! token filter. `tokenize` returns a lazy iterator; each call to `next` runs scan steps
//! until at least one token is pending.

use super::context::{AuxContext, LexerContext};
use super::engine_preferences;
use super::error::{OptionError, TableError};
use super::pattern::RuleMatch;
use super::rule::TokenFilter;
use super::stack::{StateId, StateStack};
use super::table::{BoundDelegate, BoundEmission, CompiledRule, StateTable, Step};
use crate::config::compile_time::engine::{MAX_DELEGATION_DEPTH, MAX_ZERO_WIDTH_STEPS};
use crate::logging::codes;
use crate::tokens::{Category, Token};
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Static description of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexerInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub filenames: &'static [&'static str],
    pub mimetypes: &'static [&'static str],
}

struct LexerCore {
    info: LexerInfo,
    table: StateTable,
    initial: Vec<StateId>,
    filter: Option<TokenFilter>,
    option_errors: Vec<OptionError>,
}

/// A configured lexer; cheap to clone and safe to share between threads
#[derive(Clone)]
pub struct RegexLexer {
    core: Arc<LexerCore>,
}

impl fmt::Debug for RegexLexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexLexer")
            .field("name", &self.core.info.name)
            .field("initial", &self.initial_stack_names())
            .field("filtered", &self.core.filter.is_some())
            .finish()
    }
}

impl RegexLexer {
    pub fn builder(info: LexerInfo, table: StateTable) -> LexerBuilder {
        LexerBuilder {
            info,
            table,
            initial: None,
            filter: None,
            option_errors: Vec::new(),
        }
    }

    pub fn info(&self) -> &LexerInfo {
        &self.core.info
    }

    pub fn name(&self) -> &'static str {
        self.core.info.name
    }

    pub fn table(&self) -> &StateTable {
        &self.core.table
    }

    /// Option problems found while configuring this lexer; defaults were used instead
    pub fn option_errors(&self) -> &[OptionError] {
        &self.core.option_errors
    }

    pub fn initial_stack_names(&self) -> Vec<&str> {
        self.core
            .initial
            .iter()
            .filter_map(|id| self.core.table.state_name(*id))
            .collect()
    }

    /// Tokenize `text` from the lexer's initial stack
    pub fn tokenize<'t>(&self, text: &'t str) -> Tokens<'t> {
        Tokens::new(self.clone(), text, &self.core.initial, 0)
    }

    /// Tokenize `text` starting from the named states, bottom first
    pub fn tokenize_with_stack<'t>(
        &self,
        text: &'t str,
        stack: &[&str],
    ) -> Result<Tokens<'t>, TableError> {
        let initial = resolve_stack(&self.core.table, stack, "<tokenize>")?;
        Ok(Tokens::new(self.clone(), text, &initial, 0))
    }
}

fn resolve_stack(
    table: &StateTable,
    names: &[&str],
    referenced_from: &str,
) -> Result<Vec<StateId>, TableError> {
    if names.is_empty() {
        return Err(TableError::EmptyInitialStack);
    }

    names
        .iter()
        .map(|name| {
            table.state_id(name).ok_or_else(|| TableError::UnknownState {
                state: name.to_string(),
                referenced_from: referenced_from.to_string(),
            })
        })
        .collect()
}

pub struct LexerBuilder {
    info: LexerInfo,
    table: StateTable,
    initial: Option<Vec<String>>,
    filter: Option<TokenFilter>,
    option_errors: Vec<OptionError>,
}

impl LexerBuilder {
    /// Start every tokenization in these states instead of the root alone
    pub fn initial_stack(mut self, states: &[&str]) -> Self {
        self.initial = Some(states.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Retag every produced token; text and position are never changed
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Category, &str) -> Category + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn option_errors(mut self, errors: Vec<OptionError>) -> Self {
        self.option_errors = errors;
        self
    }

    pub fn build(self) -> Result<RegexLexer, TableError> {
        let initial = match &self.initial {
            None => vec![self.table.root()],
            Some(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                resolve_stack(&self.table, &names, "<initial stack>").map_err(|error| {
                    log_error!(error.error_code(), &error.to_string(),
                        "lexer" => self.info.name
                    );
                    error
                })?
            }
        };

        if engine_preferences().log_table_construction {
            log_success!(codes::success::LEXER_CONFIGURED, "Lexer configured",
                "lexer" => self.info.name,
                "initial_depth" => initial.len(),
                "option_errors" => self.option_errors.len()
            );
        }

        Ok(RegexLexer {
            core: Arc::new(LexerCore {
                info: self.info,
                table: self.table,
                initial,
                filter: self.filter,
                option_errors: self.option_errors,
            }),
        })
    }
}

// ============================================================================
// TOKEN STREAM
// ============================================================================

/// Lazy token sequence over one input
pub struct Tokens<'t> {
    lexer: RegexLexer,
    text: &'t str,
    pos: usize,
    stack: StateStack,
    aux: AuxContext,
    pending: VecDeque<Token<'t>>,
    zero_width_steps: usize,
    depth: usize,
    warned_zero_progress: bool,
}

impl<'t> Tokens<'t> {
    fn new(lexer: RegexLexer, text: &'t str, initial: &[StateId], depth: usize) -> Self {
        let stack = StateStack::new(initial, lexer.table().root());
        Self {
            lexer,
            text,
            pos: 0,
            stack,
            aux: AuxContext::new(),
            pending: VecDeque::new(),
            zero_width_steps: 0,
            depth,
            warned_zero_progress: false,
        }
    }

    /// Names of the live stack, bottom first
    pub fn stack_names(&self) -> Vec<&str> {
        let table = self.lexer.table();
        self.stack
            .as_slice()
            .iter()
            .filter_map(|id| table.state_name(*id))
            .collect()
    }

    /// Byte offset where the next scan step starts
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn aux(&self) -> &AuxContext {
        &self.aux
    }

    fn step(&mut self) {
        let lexer = self.lexer.clone();
        let rules = lexer.table().rules(self.stack.top());

        let matched = rules
            .iter()
            .find_map(|rule| rule.matcher.match_at(self.text, self.pos).map(|m| (rule, m)));

        match matched {
            Some((rule, found)) => self.apply(rule, found),
            None => self.fallback(),
        }
    }

    fn apply(&mut self, rule: &CompiledRule, found: RuleMatch<'t>) {
        let start = self.pos;
        let generation = self.stack.generation();

        let next = match &rule.step {
            Step::Emit(category) => {
                self.push(found.start(), *category, found.as_str());
                found.end()
            }
            Step::Groups(emissions) => {
                self.emit_groups(&found, emissions);
                found.end()
            }
            Step::Delegate(delegate) => {
                self.delegate(delegate, found.start(), found.as_str());
                found.end()
            }
            Step::Callback(callback) => {
                let mut context = LexerContext::new(
                    self.text,
                    found.start(),
                    found.end(),
                    &mut self.stack,
                    self.lexer.table(),
                    &mut self.aux,
                    &mut self.pending,
                );
                callback(&found, &mut context);
                context.finish()
            }
        };

        if let Some(op) = &rule.stack_op {
            self.stack.apply(op);
        }

        if next > start {
            self.pos = next;
            self.zero_width_steps = 0;
            return;
        }

        // Zero-width step: only a stack change counts as progress, and only a bounded number of times
        if self.stack.generation() == generation {
            self.warn_zero_progress("Zero-width match left the stack unchanged");
            self.fallback();
        } else {
            self.zero_width_steps += 1;
            if self.zero_width_steps > MAX_ZERO_WIDTH_STEPS {
                self.warn_zero_progress("Too many consecutive zero-width steps");
                self.fallback();
            }
        }
    }

    fn emit_groups(&mut self, found: &RuleMatch<'t>, emissions: &[BoundEmission]) {
        let text = self.text;
        let mut cursor = found.start();

        for (index, emission) in emissions.iter().enumerate() {
            let Some(span) = found.group_span(index + 1) else {
                continue;
            };
            if span.is_empty() || span.start < cursor {
                continue;
            }

            if span.start > cursor {
                self.push(cursor, Category::Text, &text[cursor..span.start]);
            }
            let piece = &text[span.clone()];
            match emission {
                BoundEmission::Token(category) => self.push(span.start, *category, piece),
                BoundEmission::Delegate(delegate) => self.delegate(delegate, span.start, piece),
            }
            cursor = span.end;
        }

        if cursor < found.end() {
            self.push(cursor, Category::Text, &text[cursor..found.end()]);
        }
    }

    fn delegate(&mut self, delegate: &BoundDelegate, offset: usize, piece: &'t str) {
        if piece.is_empty() {
            return;
        }

        if self.depth + 1 > MAX_DELEGATION_DEPTH {
            log_warning!(code = codes::scan::DELEGATION_DEPTH_EXCEEDED,
                "Delegation depth exceeded; emitting text unlexed",
                span = offset..offset + piece.len(),
                "lexer" => self.lexer.name(),
                "depth" => self.depth
            );
            self.push(offset, Category::Other, piece);
            return;
        }

        let lexer = delegate.lexer.clone().unwrap_or_else(|| self.lexer.clone());
        let stack = delegate
            .stack
            .clone()
            .unwrap_or_else(|| lexer.core.initial.clone());

        let inner = Tokens::new(lexer, piece, &stack, self.depth + 1);
        self.pending
            .extend(inner.map(|token| token.shifted(offset)));
    }

    fn fallback(&mut self) {
        let text = self.text;
        let rest = &text[self.pos..];
        let width = rest.chars().next().map_or(1, char::len_utf8);
        let piece = &rest[..width.min(rest.len())];
        let lexer = self.lexer.clone();
        let table = lexer.table();

        if piece == "\n" && table.resets_on_newline() {
            self.stack.reset(table.root());
            self.push(self.pos, Category::Text, piece);
        } else {
            self.push(self.pos, table.fallback(), piece);
            if engine_preferences().log_fallback_tokens {
                log_debug!(code = codes::scan::FALLBACK_TOKEN, "No rule matched; emitting fallback token",
                    span = self.pos..self.pos + piece.len(),
                    "state" => table.state_name(self.stack.top()).unwrap_or_default()
                );
            }
        }

        self.pos += piece.len();
        self.zero_width_steps = 0;
    }

    fn push(&mut self, offset: usize, category: Category, text: &'t str) {
        if !text.is_empty() {
            self.pending.push_back(Token::new(offset, category, text));
        }
    }

    fn warn_zero_progress(&mut self, message: &str) {
        if self.warned_zero_progress {
            return;
        }
        self.warned_zero_progress = true;
        log_warning!(code = codes::scan::ZERO_PROGRESS_RULE, message,
            span = self.pos..self.pos,
            "lexer" => self.lexer.name(),
            "state" => self.lexer.table().state_name(self.stack.top()).unwrap_or_default()
        );
    }
}

impl<'t> Iterator for Tokens<'t> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Token<'t>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(match &self.lexer.core.filter {
                    Some(filter) => token.with_category(filter(token.category, token.text)),
                    None => token,
                });
            }
            if self.pos >= self.text.len() {
                return None;
            }
            self.step();
        }
    }
}

impl FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bygroups;
    use crate::lexical::rule::{
        callback, fallthrough, include, rule, rule_matching, using, using_this,
    };
    use crate::tokens::validate_tokenization;

    const INFO: LexerInfo = LexerInfo {
        name: "Test",
        aliases: &["test"],
        filenames: &["*.test"],
        mimetypes: &[],
    };

    fn lexer(table: StateTable) -> RegexLexer {
        RegexLexer::builder(INFO, table).build().unwrap()
    }

    fn triples<'t>(tokens: impl Iterator<Item = Token<'t>>) -> Vec<(usize, Category, &'t str)> {
        tokens.map(|t| (t.offset, t.category, t.text)).collect()
    }

    fn braces() -> RegexLexer {
        lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule(r"\{", Category::Punctuation).push("block"),
                        rule(r"[^{]+", Category::Text),
                    ],
                )
                .state(
                    "block",
                    vec![
                        rule(r"\}", Category::Punctuation).pop(1),
                        rule(r"[^}]+", Category::Keyword),
                    ],
                )
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_digits_and_plain_text() {
        let digits = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule("[0-9]+", Category::Number),
                        rule("[^0-9]+", Category::Text),
                    ],
                )
                .build()
                .unwrap(),
        );

        assert_eq!(
            triples(digits.tokenize("12ab3")),
            vec![
                (0, Category::Number, "12"),
                (2, Category::Text, "ab"),
                (4, Category::Number, "3"),
            ]
        );
        assert_eq!(digits.tokenize("").count(), 0);
    }

    #[test]
    fn test_brace_push_and_pop() {
        let lexer = braces();
        let mut tokens = lexer.tokenize("a{b}c");
        let collected: Vec<_> = tokens.by_ref().map(|t| (t.offset, t.category, t.text)).collect();

        assert_eq!(
            collected,
            vec![
                (0, Category::Text, "a"),
                (1, Category::Punctuation, "{"),
                (2, Category::Keyword, "b"),
                (3, Category::Punctuation, "}"),
                (4, Category::Text, "c"),
            ]
        );
        assert_eq!(tokens.stack_names(), vec!["root"]);
    }

    #[test]
    fn test_over_pop_leaves_root() {
        let lexer = braces();
        let mut tokens = lexer.tokenize_with_stack("}}x", &["root", "block"]).unwrap();
        let collected = triples(tokens.by_ref());
        assert_eq!(collected[0], (0, Category::Punctuation, "}"));
        assert_eq!(tokens.stack_names(), vec!["root"]);
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[1], (1, Category::Text, "}x"));
    }

    #[test]
    fn test_delegation_shifts_offsets() {
        let inner = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule("[a-z]+", Category::NameTag),
                        rule("[^a-z]+", Category::Text),
                    ],
                )
                .build()
                .unwrap(),
        );
        let outer = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule(
                            "(<s>)(.*?)(</s>)",
                            bygroups![Category::Keyword, using(&inner), Category::Keyword],
                        ),
                        rule(".", Category::Text),
                    ],
                )
                .build()
                .unwrap(),
        );

        let text = "x<s>ab 1</s>";
        let tokens: Vec<_> = outer.tokenize(text).collect();
        assert_eq!(
            triples(tokens.iter().copied()),
            vec![
                (0, Category::Text, "x"),
                (1, Category::Keyword, "<s>"),
                (4, Category::NameTag, "ab"),
                (6, Category::Text, " 1"),
                (8, Category::Keyword, "</s>"),
            ]
        );
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));
    }

    #[test]
    fn test_fallback_on_nul_and_multibyte() {
        let strict = lexer(
            StateTable::builder()
                .state("root", vec![rule("[a-z]+", Category::Name)])
                .build()
                .unwrap(),
        );

        assert_eq!(triples(strict.tokenize("\0")), vec![(0, Category::Text, "\0")]);
        assert_eq!(
            triples(strict.tokenize("é")),
            vec![(0, Category::Text, "é")]
        );
        assert_eq!(
            triples(strict.tokenize("a→b")),
            vec![
                (0, Category::Name, "a"),
                (1, Category::Text, "→"),
                (4, Category::Name, "b"),
            ]
        );
    }

    #[test]
    fn test_include_is_equivalent_to_inlining() {
        let shared = vec![rule("[0-9]+", Category::Number), rule(r"\s+", Category::Whitespace)];
        let included = lexer(
            StateTable::builder()
                .state("root", vec![include("common"), rule("[a-z]+", Category::Name)])
                .state("common", shared.clone())
                .build()
                .unwrap(),
        );
        let mut inline = shared;
        inline.push(rule("[a-z]+", Category::Name));
        let inlined = lexer(StateTable::builder().state("root", inline).build().unwrap());

        let text = "abc 123 x9";
        assert_eq!(triples(included.tokenize(text)), triples(inlined.tokenize(text)));
    }

    #[test]
    fn test_zero_progress_rule_falls_back() {
        let looping = lexer(
            StateTable::builder()
                .state("root", vec![rule("x*", Category::Keyword), rule("y", Category::Name)])
                .build()
                .unwrap(),
        );

        // "x*" matches empty before "y"; the step is treated as unmatched
        assert_eq!(
            triples(looping.tokenize("xy")),
            vec![(0, Category::Keyword, "x"), (1, Category::Text, "y")]
        );
    }

    #[test]
    fn test_stack_churn_is_bounded() {
        let churn = lexer(
            StateTable::builder()
                .state("root", vec![fallthrough().push("other")])
                .state("other", vec![fallthrough().pop(1)])
                .build()
                .unwrap(),
        );

        let tokens: Vec<_> = churn.tokenize("ab").collect();
        assert_eq!(validate_tokenization("ab", &tokens), Ok(()));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_zero_width_transition_is_honored() {
        let lexer = lexer(
            StateTable::builder()
                .state("root", vec![rule("[a-z]+", Category::Name).ahead("=").push("value"), rule("=", Category::Operator)])
                .state("value", vec![rule("=", Category::Operator), fallthrough().pop(1)])
                .build()
                .unwrap(),
        );

        let mut tokens = lexer.tokenize("k=k");
        assert_eq!(
            triples(tokens.by_ref()),
            vec![
                (0, Category::Name, "k"),
                (1, Category::Operator, "="),
                (2, Category::Text, "k"),
            ]
        );
        assert_eq!(tokens.stack_names(), vec!["root"]);
    }

    #[test]
    fn test_group_gaps_become_text() {
        let lexer = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule(r"(\w+)\s*(=)\s*(\w+)?", bygroups![Category::NameAttribute, Category::Operator, Category::String]),
                        rule(r"\s+", Category::Whitespace),
                    ],
                )
                .build()
                .unwrap(),
        );

        assert_eq!(
            triples(lexer.tokenize("a = ")),
            vec![
                (0, Category::NameAttribute, "a"),
                (1, Category::Text, " "),
                (2, Category::Operator, "="),
                (3, Category::Text, " "),
            ]
        );
    }

    #[test]
    fn test_recursive_self_delegation() {
        let nested = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule(r"(\()([^()]*(?:\([^()]*\))?[^()]*)(\))", bygroups![Category::Punctuation, using_this(), Category::Punctuation]),
                        rule(r"[^()]+", Category::Name),
                        rule(r"[()]", Category::Error),
                    ],
                )
                .build()
                .unwrap(),
        );

        let text = "(a(b)c)";
        let tokens: Vec<_> = nested.tokenize(text).collect();
        assert_eq!(validate_tokenization(text, &tokens), Ok(()));
        assert_eq!(
            triples(tokens.iter().copied()),
            vec![
                (0, Category::Punctuation, "("),
                (1, Category::Name, "a"),
                (2, Category::Punctuation, "("),
                (3, Category::Name, "b"),
                (4, Category::Punctuation, ")"),
                (5, Category::Name, "c"),
                (6, Category::Punctuation, ")"),
            ]
        );
    }

    #[test]
    fn test_delegate_with_explicit_stack() {
        let lexer = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule(r"\[[^\]]*\]", using_this().with_state(&["root", "inside"])),
                        rule(".", Category::Text),
                    ],
                )
                .state("inside", vec![rule(r"[^\]]", Category::Keyword), rule(r"\]", Category::Punctuation).pop(1)])
                .build()
                .unwrap(),
        );

        assert_eq!(
            triples(lexer.tokenize("[ab]")),
            vec![
                (0, Category::Keyword, "["),
                (1, Category::Keyword, "a"),
                (2, Category::Keyword, "b"),
                (3, Category::Punctuation, "]"),
            ]
        );
    }

    #[test]
    fn test_callback_controls_emission_and_position() {
        let lexer = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule(
                            "<<",
                            callback(|found, ctx| {
                                let rest = &ctx.text()[found.end()..];
                                let close = rest.find(">>").map_or(ctx.text().len(), |at| found.end() + at + 2);
                                ctx.emit(close, Category::StringHeredoc);
                                ctx.set_pos(close);
                            }),
                        ),
                        rule(".", Category::Text),
                    ],
                )
                .build()
                .unwrap(),
        );

        assert_eq!(
            triples(lexer.tokenize("a<<b>>c")),
            vec![
                (0, Category::Text, "a"),
                (1, Category::StringHeredoc, "<<b>>"),
                (6, Category::Text, "c"),
            ]
        );
    }

    #[test]
    fn test_filter_retags_every_token() {
        let lexer = RegexLexer::builder(
            INFO,
            StateTable::builder()
                .state("root", vec![rule(r"\w+", Category::NameOther), rule(r"\W", Category::Text)])
                .build()
                .unwrap(),
        )
        .filter(|category, text| {
            if category == Category::NameOther && text == "echo" {
                Category::NameBuiltin
            } else {
                category
            }
        })
        .build()
        .unwrap();

        assert_eq!(
            triples(lexer.tokenize("echo x")),
            vec![
                (0, Category::NameBuiltin, "echo"),
                (4, Category::Text, " "),
                (5, Category::NameOther, "x"),
            ]
        );
    }

    #[test]
    fn test_newline_reset_recovery() {
        let lexer = lexer(
            StateTable::builder()
                .fallback(Category::Error)
                .state("root", vec![rule("a", Category::Keyword).push("deep")])
                .state("deep", vec![rule("b", Category::Name)])
                .build()
                .unwrap(),
        );

        let mut tokens = lexer.tokenize("ab?\na");
        assert_eq!(
            triples(tokens.by_ref()),
            vec![
                (0, Category::Keyword, "a"),
                (1, Category::Name, "b"),
                (2, Category::Error, "?"),
                (3, Category::Text, "\n"),
                (4, Category::Keyword, "a"),
            ]
        );
        assert_eq!(tokens.stack_names(), vec!["root", "deep"]);
    }

    #[test]
    fn test_newline_kept_as_fallback_when_opted_out() {
        let lexer = lexer(
            StateTable::builder()
                .keep_stack_on_newline()
                .fallback(Category::Error)
                .state("root", vec![rule("a", Category::Keyword).push("deep")])
                .state("deep", vec![rule("b", Category::Name)])
                .build()
                .unwrap(),
        );

        let mut tokens = lexer.tokenize("a\nb");
        assert_eq!(
            triples(tokens.by_ref()),
            vec![
                (0, Category::Keyword, "a"),
                (1, Category::Error, "\n"),
                (2, Category::Name, "b"),
            ]
        );
        assert_eq!(tokens.stack_names(), vec!["root", "deep"]);
    }

    #[test]
    fn test_rule_matching_applies_outer_action_only() {
        let numbers = StateTable::builder()
            .state(
                "root",
                vec![
                    rule("0x[0-9a-f]+", Category::NumberHex).push("hex"),
                    rule("[0-9]+", Category::NumberInteger).pop(1),
                ],
            )
            .state("hex", vec![rule("h", Category::Keyword)])
            .build()
            .unwrap();
        let lexer = lexer(
            StateTable::builder()
                .state(
                    "root",
                    vec![
                        rule_matching(numbers.matcher("root").unwrap(), Category::Number)
                            .push("unit"),
                        rule(" ", Category::Text),
                    ],
                )
                .state("unit", vec![rule("px", Category::KeywordType).pop(1)])
                .build()
                .unwrap(),
        );

        let mut tokens = lexer.tokenize("0x1f");
        assert_eq!(triples(tokens.by_ref()), vec![(0, Category::Number, "0x1f")]);
        assert_eq!(tokens.stack_names(), vec!["root", "unit"]);

        assert_eq!(
            triples(lexer.tokenize("12px 0x1fpx")),
            vec![
                (0, Category::Number, "12"),
                (2, Category::KeywordType, "px"),
                (4, Category::Text, " "),
                (5, Category::Number, "0x1f"),
                (9, Category::KeywordType, "px"),
            ]
        );
    }

    #[test]
    fn test_initial_stack_and_errors() {
        let table = braces().table().clone();
        let lexer = RegexLexer::builder(INFO, table.clone())
            .initial_stack(&["root", "block"])
            .build()
            .unwrap();
        assert_eq!(lexer.initial_stack_names(), vec!["root", "block"]);
        assert_eq!(lexer.tokenize("x").next().map(|t| t.category), Some(Category::Keyword));

        assert_eq!(
            RegexLexer::builder(INFO, table.clone()).initial_stack(&[]).build().unwrap_err(),
            TableError::EmptyInitialStack
        );
        assert!(lexer.tokenize_with_stack("x", &["nope"]).is_err());
    }

    #[test]
    fn test_tokenization_is_deterministic() {
        let lexer = braces();
        let text = "a{b{c}}d}{";
        let first = triples(lexer.tokenize(text));
        let second = triples(lexer.tokenize(text));
        assert_eq!(first, second);
        assert_eq!(first.iter().map(|t| t.2).collect::<String>(), text);
    }

    #[test]
    fn test_lexer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RegexLexer>();
        assert_send_sync::<StateTable>();
    }
}
