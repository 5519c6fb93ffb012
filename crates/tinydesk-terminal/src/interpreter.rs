//! Command type, registry, and tokenizer.

use std::collections::HashMap;

use tinydesk_types::error::{DeskError, Result};
use tinydesk_types::key::fold;

/// Handler signature: arguments in, result text or failure out.
pub type Handler = Box<dyn Fn(&[&str]) -> Result<String>>;

/// A single executable command.
pub struct Command {
    description: String,
    usage: String,
    handler: Handler,
}

impl Command {
    /// Wrap a handler with empty help metadata.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&[&str]) -> Result<String> + 'static,
    {
        Self {
            description: String::new(),
            usage: String::new(),
            handler: Box::new(handler),
        }
    }

    /// Attach a one-line description and usage string for `help`.
    pub fn describe(mut self, description: &str, usage: &str) -> Self {
        self.description = description.to_string();
        self.usage = usage.to_string();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Run the handler. Failures come back as `DeskError::Command`.
    pub fn execute(&self, args: &[&str]) -> Result<String> {
        (self.handler)(args)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("description", &self.description)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

/// Registry of available commands.
///
/// Names are case-folded on the way in and on lookup. Registering a name
/// that already exists replaces the previous handler. There is no way to
/// unregister: entries live as long as the registry.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under `name`. Replaces any existing command with
    /// the same folded name.
    pub fn register(&mut self, name: &str, command: Command) {
        let key = fold(name);
        if self.commands.insert(key.clone(), command).is_some() {
            log::debug!("command '{key}' re-registered, previous handler replaced");
        } else {
            log::debug!("command '{key}' registered");
        }
    }

    /// Register a bare handler with no help metadata.
    pub fn register_fn<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&[&str]) -> Result<String> + 'static,
    {
        self.register(name, Command::new(handler));
    }

    /// Look up a command. A miss is a normal outcome, not an error.
    pub fn resolve(&self, name: &str) -> Option<&Command> {
        self.commands.get(fold(name).as_str())
    }

    /// Registered names, sorted.
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Return a sorted list of (name, description) pairs.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        let mut cmds: Vec<(&str, &str)> = self
            .commands
            .iter()
            .map(|(name, c)| (name.as_str(), c.description()))
            .collect();
        cmds.sort_by_key(|(name, _)| *name);
        cmds
    }

    /// Return completions for a partial command name.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let lower = fold(partial);
        let mut names: Vec<String> = self
            .commands
            .keys()
            .filter(|name| name.starts_with(&lower))
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tokenizer: handles single quotes, double quotes, and backslash escapes.
// ---------------------------------------------------------------------------

/// Tokenize a command line respecting quotes and backslash escapes.
///
/// - Single-quoted strings preserve all characters literally.
/// - Inside double quotes, `\"` and `\\` are escapes.
/// - Backslash escapes the next character outside of quotes.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;
    // Distinguishes `''` (an empty token) from no token at all.
    let mut quoted = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            match ch {
                '"' => in_double = false,
                '\\' => match chars.peek() {
                    Some(&next @ ('"' | '\\')) => {
                        chars.next();
                        current.push(next);
                    },
                    _ => current.push('\\'),
                },
                _ => current.push(ch),
            }
        } else {
            match ch {
                '\'' => {
                    in_single = true;
                    quoted = true;
                },
                '"' => {
                    in_double = true;
                    quoted = true;
                },
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                },
                c if c.is_whitespace() => {
                    if !current.is_empty() || quoted {
                        tokens.push(std::mem::take(&mut current));
                    }
                    quoted = false;
                },
                _ => current.push(ch),
            }
        }
    }

    if in_single {
        return Err(DeskError::Command("unterminated single quote".to_string()));
    }
    if in_double {
        return Err(DeskError::Command("unterminated double quote".to_string()));
    }

    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    Ok(tokens)
}
