//! TINYDESK core: kernel context, configuration, built-in applications and
//! the shell that launches them.
//!
//! The [`Kernel`] bundles the command registry and the window manager. The
//! [`Shell`] applies the one-window-per-application policy on top of it and
//! hands page fetches to worker threads.

pub mod apps;
pub mod config;
pub mod kernel;
pub mod shell;

pub use apps::AppKind;
pub use config::DesktopConfig;
pub use kernel::Kernel;
pub use shell::{OpenOutcome, Shell};

// Re-export the lower layers so the binary only depends on this crate.
pub use tinydesk_platform as platform;
pub use tinydesk_terminal as terminal;
pub use tinydesk_types::error::{DeskError, Result};
pub use tinydesk_types::geometry::{Point, Size};
pub use tinydesk_types::key::WindowKey;
pub use tinydesk_wm as wm;
