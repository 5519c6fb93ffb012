//! Built-in applications and their content surfaces.

mod calculator;
mod notepad;
mod page;
mod paint;
mod terminal_view;

pub use calculator::{BUTTON_LABELS, CalculatorPad, evaluate};
pub use notepad::NotepadBuffer;
pub use page::{
    PageView, extract_links, render_error, render_github_user, render_page, render_simple,
    strip_html,
};
pub use paint::{PaintCanvas, Segment};
pub use terminal_view::TerminalView;

use tinydesk_types::error::{DeskError, Result};
use tinydesk_types::geometry::Size;
use tinydesk_types::key::fold;

/// The built-in applications. Each owns one window slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    Terminal,
    Notepad,
    Paint,
    Calculator,
    Internet,
    SimpleBrowser,
    GitHubInfo,
}

impl AppKind {
    pub const ALL: [AppKind; 7] = [
        Self::Terminal,
        Self::Notepad,
        Self::Paint,
        Self::Calculator,
        Self::Internet,
        Self::SimpleBrowser,
        Self::GitHubInfo,
    ];

    /// Window slot key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Notepad => "notepad",
            Self::Paint => "paint",
            Self::Calculator => "calc",
            Self::Internet => "internet",
            Self::SimpleBrowser => "simplebrowser",
            Self::GitHubInfo => "github",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Terminal => "Terminal",
            Self::Notepad => "Notepad",
            Self::Paint => "Paint",
            Self::Calculator => "Calculator",
            Self::Internet => "Internet",
            Self::SimpleBrowser => "Simple Browser",
            Self::GitHubInfo => "GitHub Info",
        }
    }

    pub fn size(self) -> Size {
        match self {
            Self::Terminal => Size::new(450, 300),
            Self::Notepad => Size::new(360, 340),
            Self::Paint => Size::new(400, 300),
            Self::Calculator => Size::new(250, 250),
            Self::Internet => Size::new(700, 500),
            Self::SimpleBrowser => Size::new(650, 450),
            Self::GitHubInfo => Size::new(500, 300),
        }
    }

    /// Look up an application by key or title, ignoring case and spaces.
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted: String = fold(name).chars().filter(|c| !c.is_whitespace()).collect();
        Self::ALL
            .into_iter()
            .find(|kind| {
                let title: String = fold(kind.title()).chars().filter(|c| !c.is_whitespace()).collect();
                kind.key() == wanted || title == wanted
            })
            .ok_or_else(|| DeskError::Wm(format!("no application named '{name}'")))
    }
}

impl std::fmt::Display for AppKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique_and_folded() {
        let keys: HashSet<&str> = AppKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys.len(), AppKind::ALL.len());
        for key in keys {
            assert_eq!(fold(key), key);
        }
    }

    #[test]
    fn from_name_accepts_key_or_title_in_any_case() {
        assert_eq!(AppKind::from_name("TERMINAL").unwrap(), AppKind::Terminal);
        assert_eq!(AppKind::from_name("Terminal").unwrap(), AppKind::Terminal);
        assert_eq!(AppKind::from_name("calc").unwrap(), AppKind::Calculator);
        assert_eq!(AppKind::from_name("calculator").unwrap(), AppKind::Calculator);
        assert_eq!(AppKind::from_name("Simple Browser").unwrap(), AppKind::SimpleBrowser);
        assert!(AppKind::from_name("minesweeper").is_err());
    }

    #[test]
    fn sizes_match_titles() {
        assert_eq!(AppKind::Internet.size(), Size::new(700, 500));
        assert_eq!(AppKind::GitHubInfo.to_string(), "GitHub Info");
    }
}
