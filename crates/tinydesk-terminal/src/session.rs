//! Interactive terminal session.
//!
//! A [`Terminal`] owns only presentation state (prompt, output buffer,
//! history). The registry is passed in on every submit so one registry can
//! serve any number of sessions.

use tinydesk_types::error::DeskError;
use tinydesk_types::key::fold;

use crate::interpreter::CommandRegistry;

/// Maximum number of history entries to retain.
const MAX_HISTORY: usize = 100;

/// Maximum number of output lines kept in the buffer.
pub const MAX_OUTPUT_LINES: usize = 500;

/// Names the session answers itself when the registry has no such command.
const SESSION_BUILTINS: [&str; 3] = ["help", "clear", "history"];

/// Result of submitting one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line: only the prompt was echoed.
    Empty,
    /// Command succeeded with this text.
    Output(String),
    /// No command registered under this name.
    Unknown(String),
    /// The command failed with this message.
    Failed(String),
    /// The output buffer was cleared.
    Clear,
}

/// Terminal session state.
#[derive(Debug, Clone)]
pub struct Terminal {
    prompt: String,
    output: Vec<String>,
    history: Vec<String>,
}

impl Terminal {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            output: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Current output buffer, oldest line first.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Echo, parse and run one input line.
    ///
    /// Every outcome is rendered into the output buffer; nothing escapes the
    /// line that caused it.
    pub fn submit(&mut self, line: &str, registry: &CommandRegistry) -> LineOutcome {
        let line = line.trim();
        self.push_output(format!("{}{line}", self.prompt));
        if line.is_empty() {
            return LineOutcome::Empty;
        }
        self.push_history(line);

        let outcome = self.dispatch(line, registry);
        match &outcome {
            LineOutcome::Output(text) if text.is_empty() => self.push_output(String::new()),
            LineOutcome::Output(text) => {
                for l in text.lines() {
                    self.push_output(l.to_string());
                }
            },
            LineOutcome::Unknown(name) => self.push_output(format!("Unknown command: {name}")),
            LineOutcome::Failed(msg) => self.push_output(format!("Command error: {msg}")),
            LineOutcome::Clear => self.output.clear(),
            LineOutcome::Empty => {},
        }
        outcome
    }

    /// Words are split on whitespace; quotes have no meaning. Registered
    /// commands win over the session builtins of the same name.
    fn dispatch(&self, line: &str, registry: &CommandRegistry) -> LineOutcome {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return LineOutcome::Empty;
        };
        let args: Vec<&str> = words.collect();

        if let Some(cmd) = registry.resolve(name) {
            return match cmd.execute(&args) {
                Ok(text) => LineOutcome::Output(text),
                Err(e) => {
                    log::debug!("command '{name}' failed: {e}");
                    LineOutcome::Failed(error_message(e))
                },
            };
        }

        match fold(name).as_str() {
            "help" => self.help(&args, registry),
            "clear" => LineOutcome::Clear,
            "history" => self.render_history(),
            _ => LineOutcome::Unknown(name.to_string()),
        }
    }

    /// `help` lists the registry; `help <name>` shows its usage.
    fn help(&self, args: &[&str], registry: &CommandRegistry) -> LineOutcome {
        if let Some(&name) = args.first() {
            return match registry.resolve(name) {
                Some(cmd) if !cmd.usage().is_empty() => LineOutcome::Output(format!(
                    "{}\n  {}\n  Usage: {}",
                    fold(name),
                    cmd.description(),
                    cmd.usage()
                )),
                Some(_) => LineOutcome::Output(fold(name)),
                None => LineOutcome::Unknown(name.to_string()),
            };
        }
        let mut names = registry.list_names();
        for builtin in SESSION_BUILTINS {
            if !names.iter().any(|n| n == builtin) {
                names.push(builtin.to_string());
            }
        }
        names.sort();
        LineOutcome::Output(format!("Available commands: {}", names.join(", ")))
    }

    fn render_history(&self) -> LineOutcome {
        let lines: Vec<String> = self
            .history
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{:4}  {entry}", i + 1))
            .collect();
        LineOutcome::Output(lines.join("\n"))
    }

    fn push_history(&mut self, line: &str) {
        // Don't duplicate the last entry.
        if self.history.last().is_none_or(|last| last != line) {
            self.history.push(line.to_string());
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }
    }

    fn push_output(&mut self, line: String) {
        self.output.push(line);
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
    }
}

/// Strip the error-kind prefix; the terminal adds its own.
fn error_message(e: DeskError) -> String {
    match e {
        DeskError::Command(msg) => msg,
        other => other.to_string(),
    }
}
