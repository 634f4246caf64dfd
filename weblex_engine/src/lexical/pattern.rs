//! Anchored pattern matching
//!
//! Every pattern matches exactly at the scan position. Look-around assertions (`^`, `\b`)
//! still see the text before that position, so a rule that starts with `^` only fires at
//! the start of a line.

use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};
use std::ops::Range;

/// Name of the capture group that holds a rule's trailing lookahead text
const AHEAD_GROUP: &str = "ahead";

/// Regex flags applied to every pattern of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexFlags {
    pub ignore_case: bool,
    pub multi_line: bool,
    pub dot_all: bool,
}

impl Default for RegexFlags {
    /// `^` and `$` match at line boundaries unless a table opts out
    fn default() -> Self {
        Self {
            ignore_case: false,
            multi_line: true,
            dot_all: false,
        }
    }
}

impl RegexFlags {
    pub fn none() -> Self {
        Self {
            ignore_case: false,
            multi_line: false,
            dot_all: false,
        }
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    pub fn dot_all(mut self) -> Self {
        self.dot_all = true;
        self
    }

    /// Inline flag group, e.g. `(?im)`; empty when no flag is set
    pub fn prefix(&self) -> String {
        let mut flags = String::new();
        if self.ignore_case {
            flags.push('i');
        }
        if self.multi_line {
            flags.push('m');
        }
        if self.dot_all {
            flags.push('s');
        }

        if flags.is_empty() {
            flags
        } else {
            format!("(?{})", flags)
        }
    }
}

/// A compiled rule pattern with an optional lookahead tail
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    ahead: Option<String>,
    regex: Regex,
    groups: usize,
}

impl Pattern {
    pub fn compile(body: &str, ahead: Option<&str>, flags: RegexFlags) -> Result<Self, String> {
        let full = match ahead {
            Some(ahead) => format!(
                "{}(?:{})(?P<{}>{})",
                flags.prefix(),
                body,
                AHEAD_GROUP,
                ahead
            ),
            None => format!("{}(?:{})", flags.prefix(), body),
        };

        let regex = Regex::new(&full).map_err(|e| e.to_string())?;

        // Group 0 is the whole match; the lookahead group is not visible to actions
        let hidden = if ahead.is_some() { 2 } else { 1 };
        let groups = regex.captures_len().saturating_sub(hidden);

        Ok(Self {
            source: body.to_string(),
            ahead: ahead.map(str::to_string),
            regex,
            groups,
        })
    }

    /// Pattern text as written, without flags or lookahead
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ahead(&self) -> Option<&str> {
        self.ahead.as_deref()
    }

    /// Number of explicit capture groups
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Match anchored at `pos`; `None` when the pattern does not match there
    pub fn match_at<'t>(&self, text: &'t str, pos: usize) -> Option<RuleMatch<'t>> {
        if pos > text.len() {
            return None;
        }

        let input = Input::new(text)
            .span(pos..text.len())
            .anchored(Anchored::Yes);
        let mut caps = self.regex.create_captures();
        self.regex.search_captures(&input, &mut caps);

        let whole = caps.get_match()?;
        let end = match self.ahead {
            Some(_) => caps
                .get_group_by_name(AHEAD_GROUP)
                .map(|span| span.start)
                .unwrap_or(whole.end()),
            None => whole.end(),
        };

        let groups = (1..=self.groups)
            .map(|index| {
                caps.get_group(index)
                    .map(|span| span.start..span.end.min(end))
                    .filter(|span| span.start <= span.end)
            })
            .collect();

        Some(RuleMatch {
            text,
            span: whole.start()..end,
            groups,
        })
    }
}

/// The result of one anchored match against the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    text: &'t str,
    span: Range<usize>,
    groups: Vec<Option<Range<usize>>>,
}

impl<'t> RuleMatch<'t> {
    /// A match without capture groups
    pub fn whole(text: &'t str, span: Range<usize>) -> Self {
        Self {
            text,
            span,
            groups: Vec::new(),
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    pub fn as_str(&self) -> &'t str {
        &self.text[self.span.clone()]
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The whole input the match was taken from
    pub fn haystack(&self) -> &'t str {
        self.text
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Byte range of group `index`; group 0 is the whole match
    pub fn group_span(&self, index: usize) -> Option<Range<usize>> {
        if index == 0 {
            return Some(self.span());
        }
        self.groups.get(index - 1).cloned().flatten()
    }

    pub fn group(&self, index: usize) -> Option<&'t str> {
        self.group_span(index).map(|span| &self.text[span])
    }
}

/// Escaped alternation of `words`, longest first, wrapped in `prefix` and `suffix`
///
/// `words(&["in", "instanceof"], "", r"\b")` yields `(?:instanceof|in)\b`.
pub fn words(words: &[&str], prefix: &str, suffix: &str) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    sorted.dedup();

    let alternatives: Vec<String> = sorted.iter().map(|word| regex::escape(word)).collect();
    format!("{}(?:{}){}", prefix, alternatives.join("|"), suffix)
}
