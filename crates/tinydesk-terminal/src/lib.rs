//! Command registry and terminal session.
//!
//! The terminal is a registry-based dispatch system. Commands are function
//! values registered by case-folded name. A [`Terminal`] session splits
//! input lines on whitespace, resolves the command name (falling back to its
//! own `help`, `clear` and `history`), and renders either the result or the
//! failure as output text.

mod commands;
mod interpreter;
mod session;

/// Register the default commands (help, echo, time, sum) into a registry.
pub use commands::register_builtins;
/// A registered command: handler plus help metadata.
pub use interpreter::Command;
/// Registry of available commands keyed by case-folded name.
pub use interpreter::CommandRegistry;
/// Boxed handler signature stored by the registry.
pub use interpreter::Handler;
/// Quote-aware tokenizer for console arguments.
pub use interpreter::tokenize;
/// Result of submitting one input line.
pub use session::LineOutcome;
/// Interactive terminal session: output buffer, history, prompt.
pub use session::Terminal;
