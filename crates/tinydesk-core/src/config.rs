//! Desktop configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use tinydesk_types::error::{DeskError, Result};
use tinydesk_types::geometry::Point;
use tinydesk_wm::Cascade;

/// Desktop settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Host window title.
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Where the first mini-window appears.
    pub cascade_origin: Point,
    /// Offset per already-open window, applied to both axes.
    pub cascade_step: i32,
    /// Terminal prompt.
    pub prompt: String,
    /// Ask before closing a window.
    pub confirm_close: bool,
    /// Start page for the Internet window.
    pub home_url: String,
    /// Start page for the Simple Browser window.
    pub simple_browser_url: String,
    /// User looked up by the GitHub Info window.
    pub github_user: String,
    /// Base URL of the user lookup API.
    pub github_api: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            title: "TinyDesk".to_string(),
            width: 1000,
            height: 650,
            cascade_origin: Point::new(50, 70),
            cascade_step: 30,
            prompt: "tinydesk> ".to_string(),
            confirm_close: true,
            home_url: "https://example.com".to_string(),
            simple_browser_url: "example.com".to_string(),
            github_user: "octocat".to_string(),
            github_api: "https://api.github.com".to_string(),
        }
    }
}

impl DesktopConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| DeskError::Config(format!("{}: {e}", path.display())))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DeskError::Config(format!(
                "desktop size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.cascade_step < 0 {
            return Err(DeskError::Config(format!(
                "cascade_step must not be negative, got {}",
                self.cascade_step
            )));
        }
        Ok(())
    }

    pub fn cascade(&self) -> Cascade {
        Cascade {
            origin: self.cascade_origin,
            step: self.cascade_step,
        }
    }
}
