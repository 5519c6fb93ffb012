//! Terminal window content.

use std::any::Any;

use tinydesk_terminal::{CommandRegistry, LineOutcome, Terminal};
use tinydesk_wm::ContentSurface;

/// A terminal session shown in a window.
#[derive(Debug, Clone)]
pub struct TerminalView {
    session: Terminal,
}

impl TerminalView {
    pub fn new(prompt: &str) -> Self {
        Self {
            session: Terminal::new(prompt),
        }
    }

    pub fn session(&self) -> &Terminal {
        &self.session
    }

    pub fn submit(&mut self, line: &str, registry: &CommandRegistry) -> LineOutcome {
        self.session.submit(line, registry)
    }
}

impl ContentSurface for TerminalView {
    fn summary(&self) -> String {
        match self.session.output().last() {
            Some(last) => format!("{} lines, last: {last}", self.session.output().len()),
            None => "empty".to_string(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
