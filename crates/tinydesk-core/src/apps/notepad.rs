//! Notepad window content.

use std::any::Any;

use tinydesk_wm::ContentSurface;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotepadBuffer {
    text: String,
}

impl NotepadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append text at the end of the buffer.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append a line, starting a new one if the buffer does not end in one.
    pub fn append_line(&mut self, line: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

impl ContentSurface for NotepadBuffer {
    fn summary(&self) -> String {
        format!("{} lines, {} chars", self.line_count(), self.text.chars().count())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
