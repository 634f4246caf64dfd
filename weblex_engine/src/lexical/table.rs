//! State tables: named states, compiled rules and include resolution

use super::engine::RegexLexer;
use super::engine_preferences;
use super::error::TableError;
use super::pattern::{Pattern, RegexFlags, RuleMatch};
use super::rule::{Action, Callback, Delegate, Emission, Entry, Rule, RuleSource};
use super::stack::{StackOp, StateId};
use crate::config::compile_time::engine::MAX_STATES_PER_TABLE;
use crate::logging::codes;
use crate::tokens::Category;
use crate::{log_error, log_success};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_ROOT: &str = "root";

// ============================================================================
// COMPILED FORMS
// ============================================================================

#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    Regex(Pattern),
    State(StateMatcher),
}

impl Matcher {
    pub(crate) fn match_at<'t>(&self, text: &'t str, pos: usize) -> Option<RuleMatch<'t>> {
        match self {
            Matcher::Regex(pattern) => pattern.match_at(text, pos),
            Matcher::State(matcher) => matcher.match_at(text, pos),
        }
    }
}

/// A delegate with its stack resolved to state ids of the target table
#[derive(Debug, Clone)]
pub(crate) struct BoundDelegate {
    /// `None` delegates to the running lexer
    pub(crate) lexer: Option<RegexLexer>,
    pub(crate) stack: Option<Vec<StateId>>,
}

#[derive(Debug, Clone)]
pub(crate) enum BoundEmission {
    Token(Category),
    Delegate(BoundDelegate),
}

#[derive(Clone)]
pub(crate) enum Step {
    Emit(Category),
    Groups(Vec<BoundEmission>),
    Delegate(BoundDelegate),
    Callback(Callback),
}

#[derive(Clone)]
pub(crate) struct CompiledRule {
    pub(crate) matcher: Matcher,
    pub(crate) step: Step,
    pub(crate) stack_op: Option<StackOp<StateId>>,
}

enum Slot {
    Rule(CompiledRule),
    Include(StateId),
}

// ============================================================================
// STATE MATCHER
// ============================================================================

/// A state's rule patterns usable as a single pattern elsewhere
///
/// Tries each rule of the state in order and yields the first match as a whole; the
/// rules' actions and stack operations are not carried over.
#[derive(Debug, Clone)]
pub struct StateMatcher {
    state: String,
    matchers: Arc<[Matcher]>,
}

impl StateMatcher {
    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn match_at<'t>(&self, text: &'t str, pos: usize) -> Option<RuleMatch<'t>> {
        self.matchers
            .iter()
            .find_map(|matcher| matcher.match_at(text, pos))
            .map(|found| RuleMatch::whole(text, found.span()))
    }

    pub fn is_match_at(&self, text: &str, pos: usize) -> bool {
        self.match_at(text, pos).is_some()
    }
}

// ============================================================================
// STATE TABLE
// ============================================================================

struct TableInner {
    names: Vec<String>,
    ids: HashMap<String, StateId>,
    rules: Vec<Vec<CompiledRule>>,
    root: StateId,
    fallback: Category,
    reset_on_newline: bool,
    flags: RegexFlags,
}

/// Immutable, shareable mapping from state names to resolved rule lists
#[derive(Clone)]
pub struct StateTable {
    inner: Arc<TableInner>,
}

impl fmt::Debug for StateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTable")
            .field("root", &self.root_name())
            .field("states", &self.inner.names)
            .field("fallback", &self.inner.fallback)
            .finish()
    }
}

impl StateTable {
    pub fn builder() -> StateTableBuilder {
        StateTableBuilder::new()
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.inner.ids.get(name).copied()
    }

    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.inner.names.get(id).map(String::as_str)
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.inner.names.iter().map(String::as_str)
    }

    pub fn state_count(&self) -> usize {
        self.inner.names.len()
    }

    /// Number of rules in a state after include resolution
    pub fn rule_count(&self, state: &str) -> Option<usize> {
        self.state_id(state).map(|id| self.rules(id).len())
    }

    /// Source text of each regex rule in a state after include resolution
    pub fn rule_patterns(&self, state: &str) -> Option<Vec<&str>> {
        let id = self.state_id(state)?;
        Some(
            self.rules(id)
                .iter()
                .map(|rule| match &rule.matcher {
                    Matcher::Regex(pattern) => pattern.source(),
                    Matcher::State(matcher) => matcher.state(),
                })
                .collect(),
        )
    }

    pub fn root(&self) -> StateId {
        self.inner.root
    }

    pub fn root_name(&self) -> &str {
        self.state_name(self.inner.root).unwrap_or(DEFAULT_ROOT)
    }

    /// Category of the one-character token emitted when nothing matches
    pub fn fallback(&self) -> Category {
        self.inner.fallback
    }

    pub fn resets_on_newline(&self) -> bool {
        self.inner.reset_on_newline
    }

    pub fn flags(&self) -> RegexFlags {
        self.inner.flags
    }

    /// Package a state's rules as a stand-alone matcher
    pub fn matcher(&self, state: &str) -> Option<StateMatcher> {
        let id = self.state_id(state)?;
        let matchers: Vec<Matcher> = self
            .rules(id)
            .iter()
            .map(|rule| rule.matcher.clone())
            .collect();

        Some(StateMatcher {
            state: state.to_string(),
            matchers: matchers.into(),
        })
    }

    pub(crate) fn rules(&self, id: StateId) -> &[CompiledRule] {
        self.inner.rules.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ============================================================================
// BUILDER
// ============================================================================

pub struct StateTableBuilder {
    flags: RegexFlags,
    fallback: Category,
    root: String,
    reset_on_newline: bool,
    states: Vec<(String, Vec<Entry>)>,
    duplicate: Option<String>,
}

impl Default for StateTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StateTableBuilder {
    pub fn new() -> Self {
        Self {
            flags: RegexFlags::default(),
            fallback: Category::Text,
            root: DEFAULT_ROOT.to_string(),
            reset_on_newline: true,
            states: Vec::new(),
            duplicate: None,
        }
    }

    pub fn flags(mut self, flags: RegexFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn fallback(mut self, category: Category) -> Self {
        self.fallback = category;
        self
    }

    pub fn root(mut self, name: &str) -> Self {
        self.root = name.to_string();
        self
    }

    /// An unmatched newline becomes fallback text and leaves the stack alone,
    /// instead of being emitted as `Text` with the stack reset to the root state
    pub fn keep_stack_on_newline(mut self) -> Self {
        self.reset_on_newline = false;
        self
    }

    pub fn state(mut self, name: &str, entries: Vec<Entry>) -> Self {
        if self.states.iter().any(|(existing, _)| existing == name) {
            self.duplicate.get_or_insert_with(|| name.to_string());
        } else {
            self.states.push((name.to_string(), entries));
        }
        self
    }

    /// Append entries to a state, defining it when absent
    pub fn extend_state(mut self, name: &str, entries: Vec<Entry>) -> Self {
        match self.states.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => existing.extend(entries),
            None => self.states.push((name.to_string(), entries)),
        }
        self
    }

    pub fn build(self) -> Result<StateTable, TableError> {
        match self.compile() {
            Ok(table) => {
                if engine_preferences().log_table_construction {
                    let rules: usize = table.inner.rules.iter().map(Vec::len).sum();
                    log_success!(codes::success::TABLE_CONSTRUCTED, "State table constructed",
                        "root" => table.root_name(),
                        "states" => table.state_count(),
                        "rules" => rules
                    );
                }
                Ok(table)
            }
            Err(error) => {
                log_error!(error.error_code(), &error.to_string());
                Err(error)
            }
        }
    }

    fn compile(self) -> Result<StateTable, TableError> {
        if let Some(state) = self.duplicate {
            return Err(TableError::DuplicateState { state });
        }

        let ids: HashMap<String, StateId> = self
            .states
            .iter()
            .enumerate()
            .map(|(id, (name, _))| (name.clone(), id))
            .collect();

        let root = *ids.get(&self.root).ok_or_else(|| TableError::MissingRoot {
            root: self.root.clone(),
        })?;

        if self.states.len() > MAX_STATES_PER_TABLE {
            return Err(TableError::TooManyStates {
                count: self.states.len(),
            });
        }

        let lookup = |name: &String, from: &str| -> Result<StateId, TableError> {
            ids.get(name).copied().ok_or_else(|| TableError::UnknownState {
                state: name.clone(),
                referenced_from: from.to_string(),
            })
        };

        let mut slots: Vec<Vec<Slot>> = Vec::with_capacity(self.states.len());
        for (state, entries) in &self.states {
            let mut compiled = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                compiled.push(match entry {
                    Entry::Include(target) => Slot::Include(lookup(target, state)?),
                    Entry::Rule(rule) => {
                        Slot::Rule(compile_rule(rule, state, index, self.flags, &lookup)?)
                    }
                });
            }
            slots.push(compiled);
        }

        let names: Vec<String> = self.states.into_iter().map(|(name, _)| name).collect();
        let mut resolved: Vec<Option<Vec<CompiledRule>>> = vec![None; names.len()];
        let mut visiting = Vec::new();
        for id in 0..names.len() {
            flatten(id, &slots, &mut resolved, &mut visiting, &names)?;
        }

        Ok(StateTable {
            inner: Arc::new(TableInner {
                names,
                ids,
                rules: resolved.into_iter().map(Option::unwrap_or_default).collect(),
                root,
                fallback: self.fallback,
                reset_on_newline: self.reset_on_newline,
                flags: self.flags,
            }),
        })
    }
}

fn compile_rule(
    rule: &Rule,
    state: &str,
    index: usize,
    flags: RegexFlags,
    lookup: &dyn Fn(&String, &str) -> Result<StateId, TableError>,
) -> Result<CompiledRule, TableError> {
    let matcher = match &rule.source {
        RuleSource::Regex { pattern, ahead } => Matcher::Regex(
            Pattern::compile(pattern, ahead.as_deref(), flags).map_err(|message| {
                TableError::InvalidPattern {
                    state: state.to_string(),
                    index,
                    pattern: pattern.clone(),
                    message,
                }
            })?,
        ),
        RuleSource::Matcher(matcher) => Matcher::State(matcher.clone()),
    };

    let stack_op = match &rule.stack_op {
        Some(op) => Some(op.try_map(|name| lookup(name, state))?),
        None => None,
    };

    let bind = |delegate: &Delegate| bind_delegate(delegate, state, lookup);
    let step = match &rule.action {
        Action::Emit(category) => Step::Emit(*category),
        Action::Groups(emissions) => Step::Groups(
            emissions
                .iter()
                .map(|emission| match emission {
                    Emission::Token(category) => Ok(BoundEmission::Token(*category)),
                    Emission::Delegate(delegate) => bind(delegate).map(BoundEmission::Delegate),
                })
                .collect::<Result<_, _>>()?,
        ),
        Action::Delegate(delegate) => Step::Delegate(bind(delegate)?),
        Action::Callback(callback) => Step::Callback(callback.clone()),
    };

    Ok(CompiledRule {
        matcher,
        step,
        stack_op,
    })
}

fn bind_delegate(
    delegate: &Delegate,
    state: &str,
    lookup: &dyn Fn(&String, &str) -> Result<StateId, TableError>,
) -> Result<BoundDelegate, TableError> {
    let (lexer, stack) = match delegate {
        Delegate::This { stack } => (None, stack),
        Delegate::Lexer { lexer, stack } => (Some(lexer.clone()), stack),
    };

    let stack = match stack {
        None => None,
        Some(names) if names.is_empty() => return Err(TableError::EmptyInitialStack),
        Some(names) => Some(
            names
                .iter()
                .map(|name| match &lexer {
                    None => lookup(name, state),
                    Some(lexer) => {
                        lexer
                            .table()
                            .state_id(name)
                            .ok_or_else(|| TableError::UnknownState {
                                state: name.clone(),
                                referenced_from: format!("{} (delegate to {})", state, lexer.name()),
                            })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };

    Ok(BoundDelegate { lexer, stack })
}

/// Resolve the includes of `id` depth-first, memoizing finished states
fn flatten(
    id: StateId,
    slots: &[Vec<Slot>],
    resolved: &mut Vec<Option<Vec<CompiledRule>>>,
    visiting: &mut Vec<StateId>,
    names: &[String],
) -> Result<(), TableError> {
    if resolved[id].is_some() {
        return Ok(());
    }
    if let Some(at) = visiting.iter().position(|open| *open == id) {
        let mut path: Vec<String> = visiting[at..].iter().map(|s| names[*s].clone()).collect();
        path.push(names[id].clone());
        return Err(TableError::IncludeCycle { path });
    }

    visiting.push(id);
    let mut rules = Vec::new();
    for slot in &slots[id] {
        match slot {
            Slot::Rule(rule) => rules.push(rule.clone()),
            Slot::Include(target) => {
                flatten(*target, slots, resolved, visiting, names)?;
                rules.extend(resolved[*target].iter().flatten().cloned());
            }
        }
    }
    visiting.pop();

    resolved[id] = Some(rules);
    Ok(())
}
