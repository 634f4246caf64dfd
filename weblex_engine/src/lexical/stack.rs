use crate::config::compile_time::engine::MAX_STACK_DEPTH;
use crate::log_warning;
use crate::logging::codes;

/// Index of a state inside its table
pub type StateId = usize;

/// A transition applied to the state stack after a rule's emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackOp<S> {
    /// Push states in order; the last becomes the top
    Push(Vec<S>),
    /// Push another copy of the current top
    PushCurrent,
    /// Pop `n` states, never removing the bottom entry
    Pop(usize),
    /// Drop the top entry, then push the given states
    Replace(Vec<S>),
    /// Discard everything and continue in a single state
    Reset(S),
}

impl<S> StackOp<S> {
    /// Same operation with every state reference converted
    pub fn try_map<T, E>(&self, mut f: impl FnMut(&S) -> Result<T, E>) -> Result<StackOp<T>, E> {
        Ok(match self {
            StackOp::Push(states) => {
                StackOp::Push(states.iter().map(&mut f).collect::<Result<_, _>>()?)
            }
            StackOp::PushCurrent => StackOp::PushCurrent,
            StackOp::Pop(n) => StackOp::Pop(*n),
            StackOp::Replace(states) => {
                StackOp::Replace(states.iter().map(&mut f).collect::<Result<_, _>>()?)
            }
            StackOp::Reset(state) => StackOp::Reset(f(state)?),
        })
    }

    /// State references made by the operation
    pub fn states(&self) -> Vec<&S> {
        match self {
            StackOp::Push(states) | StackOp::Replace(states) => states.iter().collect(),
            StackOp::Reset(state) => vec![state],
            StackOp::PushCurrent | StackOp::Pop(_) => Vec::new(),
        }
    }
}

/// The per-run state stack; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStack {
    states: Vec<StateId>,
    generation: u64,
}

impl StateStack {
    /// Stack holding `initial`; an empty slice yields `[fallback]`
    pub fn new(initial: &[StateId], fallback: StateId) -> Self {
        let states = if initial.is_empty() {
            vec![fallback]
        } else {
            initial.iter().copied().take(MAX_STACK_DEPTH.max(1)).collect()
        };

        Self {
            states,
            generation: 0,
        }
    }

    pub fn top(&self) -> StateId {
        // Never empty: every mutation below keeps at least one entry
        self.states[self.states.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.states
    }

    /// Counter bumped on every effective change; lets the scanner detect stack-only steps
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Push `state`; false when the depth limit refuses it
    pub fn push(&mut self, state: StateId) -> bool {
        if self.states.len() >= MAX_STACK_DEPTH {
            log_warning!(code = codes::scan::STACK_DEPTH_EXCEEDED,
                "State push ignored at maximum stack depth",
                "depth" => self.states.len(),
                "max" => MAX_STACK_DEPTH
            );
            return false;
        }
        self.states.push(state);
        self.generation += 1;
        true
    }

    /// Pop up to `n` entries, leaving at least the bottom one
    pub fn pop(&mut self, n: usize) -> usize {
        let removable = n.min(self.states.len() - 1);
        if removable > 0 {
            self.states.truncate(self.states.len() - removable);
            self.generation += 1;
        }
        removable
    }

    pub fn reset(&mut self, state: StateId) {
        if self.states.len() != 1 || self.states[0] != state {
            self.states.clear();
            self.states.push(state);
            self.generation += 1;
        }
    }

    pub fn apply(&mut self, op: &StackOp<StateId>) {
        match op {
            StackOp::Push(states) => {
                for state in states {
                    self.push(*state);
                }
            }
            StackOp::PushCurrent => {
                let top = self.top();
                self.push(top);
            }
            StackOp::Pop(n) => {
                self.pop(*n);
            }
            StackOp::Replace(states) => self.replace(states),
            StackOp::Reset(state) => self.reset(*state),
        }
    }

    fn replace(&mut self, states: &[StateId]) {
        match states {
            [] => {
                self.pop(1);
            }
            _ if self.states.len() == 1 => {
                self.states.clear();
                self.states.extend(states.iter().copied().take(MAX_STACK_DEPTH.max(1)));
                self.generation += 1;
            }
            _ => {
                self.states.pop();
                self.generation += 1;
                for state in states {
                    self.push(*state);
                }
            }
        }
    }
}
