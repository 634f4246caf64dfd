//! Mutable state handed to extended-engine callbacks

use super::stack::StateStack;
use super::table::StateTable;
use crate::log_warning;
use crate::logging::codes;
use crate::tokens::{Category, Token};
use std::collections::{HashMap, VecDeque};

/// A value stored in the auxiliary context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuxValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

/// Per-run scratch map for callbacks that need memory between matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxContext {
    values: HashMap<String, AuxValue>,
}

impl AuxContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AuxValue> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: &str, value: AuxValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<AuxValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AuxValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: &str, text: &str) {
        self.set(key, AuxValue::Text(text.to_string()));
    }

    pub fn number(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(AuxValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(AuxValue::Flag(true)))
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// View of a running tokenization given to a callback
///
/// Emission runs from a cursor that starts at the match start; `emit(end, ..)` covers the
/// text from the cursor up to `end`. Once the callback returns, anything between the cursor
/// and the next scan position is emitted as `Text`.
pub struct LexerContext<'a, 't> {
    text: &'t str,
    cursor: usize,
    pos: usize,
    stack: &'a mut StateStack,
    table: &'a StateTable,
    aux: &'a mut AuxContext,
    out: &'a mut VecDeque<Token<'t>>,
}

impl<'a, 't> LexerContext<'a, 't> {
    pub(crate) fn new(
        text: &'t str,
        start: usize,
        end: usize,
        stack: &'a mut StateStack,
        table: &'a StateTable,
        aux: &'a mut AuxContext,
        out: &'a mut VecDeque<Token<'t>>,
    ) -> Self {
        Self {
            text,
            cursor: start,
            pos: end,
            stack,
            table,
            aux,
            out,
        }
    }

    /// The whole input being tokenized
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Where scanning resumes after the callback; defaults to the match end
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the next scan position; rounded forward to a character boundary
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = self.boundary(pos);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Emit the text from the cursor up to `end` as one token
    pub fn emit(&mut self, end: usize, category: Category) {
        let end = self.boundary(end);
        if end <= self.cursor {
            return;
        }
        let text = self.text;
        self.out
            .push_back(Token::new(self.cursor, category, &text[self.cursor..end]));
        self.cursor = end;
    }

    /// Emit `start..end`, filling any gap before it with `Text`
    pub fn emit_range(&mut self, start: usize, end: usize, category: Category) {
        self.emit(start, Category::Text);
        self.emit(end, category);
    }

    pub fn stack(&self) -> &StateStack {
        &*self.stack
    }

    /// Names of the stacked states, bottom first
    pub fn stack_names(&self) -> Vec<&str> {
        self.stack
            .as_slice()
            .iter()
            .map(|id| self.table.state_name(*id).unwrap_or_default())
            .collect()
    }

    pub fn current_state(&self) -> &str {
        self.table.state_name(self.stack.top()).unwrap_or_default()
    }

    /// Push a state by name; false when the table has no such state or the stack is full
    pub fn push_state(&mut self, name: &str) -> bool {
        match self.table.state_id(name) {
            Some(id) => self.stack.push(id),
            None => {
                log_warning!(code = codes::scan::UNKNOWN_CALLBACK_STATE,
                    "Callback referenced an undefined state",
                    span = self.cursor..self.pos,
                    "state" => name
                );
                false
            }
        }
    }

    pub fn pop_states(&mut self, n: usize) -> usize {
        self.stack.pop(n)
    }

    pub fn reset_state(&mut self, name: &str) -> bool {
        match self.table.state_id(name) {
            Some(id) => {
                self.stack.reset(id);
                true
            }
            None => {
                log_warning!(code = codes::scan::UNKNOWN_CALLBACK_STATE,
                    "Callback referenced an undefined state",
                    span = self.cursor..self.pos,
                    "state" => name
                );
                false
            }
        }
    }

    pub fn aux(&self) -> &AuxContext {
        &*self.aux
    }

    pub fn aux_mut(&mut self) -> &mut AuxContext {
        &mut *self.aux
    }

    /// Fill the remaining gap and return the next scan position
    pub(crate) fn finish(mut self) -> usize {
        let next = self.pos.max(self.cursor);
        self.emit(next, Category::Text);
        next
    }

    fn boundary(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::rule::rule;

    fn table() -> StateTable {
        StateTable::builder()
            .state("root", vec![rule("a", Category::Text)])
            .state("inner", vec![rule("b", Category::Text)])
            .build()
            .unwrap()
    }

    #[test]
    fn test_aux_typed_accessors() {
        let mut aux = AuxContext::new();
        aux.set_text("indent", "  ");
        aux.set("depth", AuxValue::Number(2));
        aux.set("open", AuxValue::Flag(true));

        assert_eq!(aux.text("indent"), Some("  "));
        assert_eq!(aux.number("depth"), Some(2));
        assert!(aux.flag("open"));
        assert_eq!(aux.text("depth"), None);
        assert!(!aux.flag("missing"));

        assert_eq!(aux.remove("indent"), Some(AuxValue::Text("  ".into())));
        assert_eq!(aux.len(), 2);
        aux.clear();
        assert!(aux.is_empty());
    }

    #[test]
    fn test_emit_runs_from_cursor_and_fills_gap() {
        let table = table();
        let mut stack = StateStack::new(&[table.root()], table.root());
        let mut aux = AuxContext::new();
        let mut out = VecDeque::new();
        let text = "key = value";

        let mut ctx = LexerContext::new(text, 0, text.len(), &mut stack, &table, &mut aux, &mut out);
        ctx.emit(3, Category::NameAttribute);
        ctx.emit(2, Category::Error);
        ctx.emit_range(4, 5, Category::Operator);
        assert_eq!(ctx.cursor(), 5);
        assert_eq!(ctx.finish(), text.len());

        let texts: Vec<_> = out.iter().map(|t| (t.offset, t.category, t.text)).collect();
        assert_eq!(
            texts,
            vec![
                (0, Category::NameAttribute, "key"),
                (3, Category::Text, " "),
                (4, Category::Operator, "="),
                (5, Category::Text, " value"),
            ]
        );
    }

    #[test]
    fn test_position_never_moves_behind_cursor() {
        let table = table();
        let mut stack = StateStack::new(&[table.root()], table.root());
        let mut aux = AuxContext::new();
        let mut out = VecDeque::new();

        let mut ctx = LexerContext::new("abcdef", 0, 2, &mut stack, &table, &mut aux, &mut out);
        ctx.emit(4, Category::Text);
        ctx.set_pos(1);
        assert_eq!(ctx.finish(), 4);
    }

    #[test]
    fn test_set_pos_rounds_to_char_boundary() {
        let table = table();
        let mut stack = StateStack::new(&[table.root()], table.root());
        let mut aux = AuxContext::new();
        let mut out = VecDeque::new();

        let mut ctx = LexerContext::new("aé", 0, 1, &mut stack, &table, &mut aux, &mut out);
        ctx.set_pos(2);
        assert_eq!(ctx.pos(), 3);
    }

    #[test]
    fn test_stack_manipulation_by_name() {
        let table = table();
        let mut stack = StateStack::new(&[table.root()], table.root());
        let mut aux = AuxContext::new();
        let mut out = VecDeque::new();

        let mut ctx = LexerContext::new("ab", 0, 1, &mut stack, &table, &mut aux, &mut out);
        assert!(ctx.push_state("inner"));
        assert_eq!(ctx.current_state(), "inner");
        assert_eq!(ctx.stack_names(), vec!["root", "inner"]);
        assert!(!ctx.push_state("missing"));
        assert_eq!(ctx.pop_states(3), 1);
        assert!(ctx.reset_state("inner"));
        assert_eq!(ctx.stack_names(), vec!["inner"]);
    }
}
