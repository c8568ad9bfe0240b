//! State stack of a running lexer.

use crate::grammar::StateId;

/// Stack of active states. The root at the bottom is never popped.
#[derive(Clone, Debug)]
pub struct StateStack {
    stack: Vec<StateId>,
}

impl StateStack {
    /// Creates a stack holding only `root`.
    pub fn new(root: StateId) -> Self {
        Self { stack: vec![root] }
    }

    /// The active state.
    pub fn top(&self) -> StateId {
        self.stack[self.stack.len() - 1]
    }

    /// Enters `state`.
    pub fn push(&mut self, state: StateId) {
        self.stack.push(state);
    }

    /// Leaves the active state.
    ///
    /// Returns false, leaving the stack untouched, when only the root is left.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Number of states on the stack, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if only the root is on the stack.
    pub fn is_root(&self) -> bool {
        self.stack.len() == 1
    }
}
