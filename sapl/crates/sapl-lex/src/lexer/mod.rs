//! Lexer module.
//!
//! This module organizes the state machine into smaller components:
//! - `core` - The `Lexer` scanning loop, error recovery and consolidation
//! - `stack` - The state stack

mod core;
mod stack;

pub use self::core::{merge_adjacent, Lexer};
pub use self::stack::StateStack;
