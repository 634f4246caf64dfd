//! Rule authoring vocabulary
//!
//! Language modules describe their tables with these builders:
//!
//! ```ignore
//! StateTable::builder()
//!     .state("root", vec![
//!         rule(r"\{", Category::Punctuation).push("block"),
//!         rule(r"(\w+)(\s*)(=)", bygroups![Category::NameAttribute, Category::Text, Category::Operator]),
//!         include("whitespace"),
//!     ])
//! ```

use super::context::LexerContext;
use super::engine::RegexLexer;
use super::pattern::RuleMatch;
use super::stack::StackOp;
use super::table::StateMatcher;
use crate::tokens::Category;
use std::fmt;
use std::sync::Arc;

/// Extended-engine action: inspects the match and drives emission, stack and aux context
pub type Callback = Arc<dyn Fn(&RuleMatch<'_>, &mut LexerContext<'_, '_>) + Send + Sync>;

/// Lexer-level retagging hook applied to every produced token
pub type TokenFilter = Arc<dyn Fn(Category, &str) -> Category + Send + Sync>;

/// Target of a recursive tokenization
#[derive(Debug, Clone)]
pub enum Delegate {
    /// The lexer running this table, bound when the rule fires
    This { stack: Option<Vec<String>> },
    /// Another, fully built lexer
    Lexer {
        lexer: RegexLexer,
        stack: Option<Vec<String>>,
    },
}

impl Delegate {
    /// Start the delegate in `states` instead of its own initial stack
    pub fn with_state(self, states: &[&str]) -> Self {
        let stack = Some(states.iter().map(|s| s.to_string()).collect());
        match self {
            Delegate::This { .. } => Delegate::This { stack },
            Delegate::Lexer { lexer, .. } => Delegate::Lexer { lexer, stack },
        }
    }

    pub fn stack(&self) -> Option<&[String]> {
        match self {
            Delegate::This { stack } | Delegate::Lexer { stack, .. } => stack.as_deref(),
        }
    }
}

/// Tokenize the matched text with `lexer`
pub fn using(lexer: &RegexLexer) -> Delegate {
    Delegate::Lexer {
        lexer: lexer.clone(),
        stack: None,
    }
}

/// Tokenize the matched text with the running lexer
pub fn using_this() -> Delegate {
    Delegate::This { stack: None }
}

/// What a group of a grouped match turns into
#[derive(Debug, Clone)]
pub enum Emission {
    Token(Category),
    Delegate(Delegate),
}

impl From<Category> for Emission {
    fn from(category: Category) -> Self {
        Emission::Token(category)
    }
}

impl From<Delegate> for Emission {
    fn from(delegate: Delegate) -> Self {
        Emission::Delegate(delegate)
    }
}

/// What a matched rule produces
#[derive(Clone)]
pub enum Action {
    /// The whole match as one token
    Emit(Category),
    /// One emission per capture group, in group order
    Groups(Vec<Emission>),
    /// The whole match tokenized by another lexer
    Delegate(Delegate),
    Callback(Callback),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Emit(category) => f.debug_tuple("Emit").field(category).finish(),
            Action::Groups(emissions) => f.debug_tuple("Groups").field(emissions).finish(),
            Action::Delegate(delegate) => f.debug_tuple("Delegate").field(delegate).finish(),
            Action::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl From<Category> for Action {
    fn from(category: Category) -> Self {
        Action::Emit(category)
    }
}

impl From<Delegate> for Action {
    fn from(delegate: Delegate) -> Self {
        Action::Delegate(delegate)
    }
}

/// Wrap a closure as an extended-engine action
pub fn callback<F>(f: F) -> Action
where
    F: Fn(&RuleMatch<'_>, &mut LexerContext<'_, '_>) + Send + Sync + 'static,
{
    Action::Callback(Arc::new(f))
}

/// One rule per capture group: `bygroups![Category::Keyword, Category::Text, using_this()]`
#[macro_export]
macro_rules! bygroups {
    ($($emission:expr),+ $(,)?) => {
        $crate::lexical::Action::Groups(vec![$($crate::lexical::Emission::from($emission)),+])
    };
}

#[derive(Debug, Clone)]
pub(crate) enum RuleSource {
    Regex {
        pattern: String,
        ahead: Option<String>,
    },
    Matcher(StateMatcher),
}

/// A rule as written, before compilation
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) source: RuleSource,
    pub(crate) action: Action,
    pub(crate) stack_op: Option<StackOp<String>>,
}

/// One line of a state definition
#[derive(Debug, Clone)]
pub enum Entry {
    Rule(Rule),
    /// Splice another state's rules in at this point
    Include(String),
}

pub fn rule(pattern: impl Into<String>, action: impl Into<Action>) -> Entry {
    Entry::Rule(Rule {
        source: RuleSource::Regex {
            pattern: pattern.into(),
            ahead: None,
        },
        action: action.into(),
        stack_op: None,
    })
}

/// Rule whose pattern is another state's compiled rule set
pub fn rule_matching(matcher: StateMatcher, action: impl Into<Action>) -> Entry {
    Entry::Rule(Rule {
        source: RuleSource::Matcher(matcher),
        action: action.into(),
        stack_op: None,
    })
}

pub fn include(state: impl Into<String>) -> Entry {
    Entry::Include(state.into())
}

/// Zero-width rule that always matches; pair it with a stack operation
pub fn fallthrough() -> Entry {
    rule("", Category::Text)
}

// Stack and lookahead modifiers are no-ops on includes
impl Entry {
    /// Require `pattern` to follow the match without consuming it
    pub fn ahead(mut self, pattern: &str) -> Self {
        if let Entry::Rule(Rule {
            source: RuleSource::Regex { ahead, .. },
            ..
        }) = &mut self
        {
            *ahead = Some(pattern.to_string());
        }
        self
    }

    /// Push `state`; chained calls push in order
    pub fn push(self, state: &str) -> Self {
        self.push_all(&[state])
    }

    pub fn push_all(mut self, states: &[&str]) -> Self {
        if let Entry::Rule(rule) = &mut self {
            let added = states.iter().map(|s| s.to_string());
            match &mut rule.stack_op {
                Some(StackOp::Push(existing)) | Some(StackOp::Replace(existing)) => {
                    existing.extend(added)
                }
                op => *op = Some(StackOp::Push(added.collect())),
            }
        }
        self
    }

    pub fn push_current(self) -> Self {
        self.with_op(StackOp::PushCurrent)
    }

    pub fn pop(self, n: usize) -> Self {
        self.with_op(StackOp::Pop(n))
    }

    /// Leave the current state for `states`
    pub fn replace(self, states: &[&str]) -> Self {
        self.with_op(StackOp::Replace(
            states.iter().map(|s| s.to_string()).collect(),
        ))
    }

    pub fn reset(self, state: &str) -> Self {
        self.with_op(StackOp::Reset(state.to_string()))
    }

    fn with_op(mut self, op: StackOp<String>) -> Self {
        if let Entry::Rule(rule) = &mut self {
            rule.stack_op = Some(op);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rule_builders_set_stack_op() {
        let entry = rule(r"\{", Category::Punctuation).push("a").push("b");
        assert_matches!(
            entry,
            Entry::Rule(Rule { stack_op: Some(StackOp::Push(ref states)), .. }) if states == &["a", "b"]
        );

        let entry = rule(r"\}", Category::Punctuation).pop(2);
        assert_matches!(entry, Entry::Rule(Rule { stack_op: Some(StackOp::Pop(2)), .. }));

        let entry = rule("x", Category::Text).replace(&["c"]).push("d");
        assert_matches!(
            entry,
            Entry::Rule(Rule { stack_op: Some(StackOp::Replace(ref states)), .. }) if states == &["c", "d"]
        );
    }

    #[test]
    fn test_modifiers_ignore_includes() {
        let entry = include("common").push("x").ahead("y").pop(1);
        assert_matches!(entry, Entry::Include(ref name) if name == "common");
    }

    #[test]
    fn test_ahead_is_recorded() {
        let entry = rule("[a-z]+", Category::NameFunction).ahead(r"\(");
        assert_matches!(
            entry,
            Entry::Rule(Rule { source: RuleSource::Regex { ahead: Some(ref a), .. }, .. }) if a == r"\("
        );
    }

    #[test]
    fn test_bygroups_builds_emissions() {
        let action = bygroups![Category::Keyword, using_this().with_state(&["root", "php"])];
        match action {
            Action::Groups(emissions) => {
                assert_eq!(emissions.len(), 2);
                assert_matches!(emissions[0], Emission::Token(Category::Keyword));
                assert_matches!(
                    &emissions[1],
                    Emission::Delegate(Delegate::This { stack: Some(stack) }) if stack == &["root", "php"]
                );
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_action_debug_hides_callback() {
        let action = callback(|_, _| {});
        assert_eq!(format!("{:?}", action), "Callback(..)");
        assert_eq!(format!("{:?}", Action::from(Category::Text)), "Emit(Text)");
    }
}
