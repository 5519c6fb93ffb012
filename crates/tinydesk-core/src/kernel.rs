//! Kernel context: the command registry and the window manager.
//!
//! Built once at startup and passed explicitly; there is no global kernel.

use tinydesk_platform::{DesktopClock, TimeService};
use tinydesk_terminal::{CommandRegistry, register_builtins};
use tinydesk_wm::WindowManager;

use crate::config::DesktopConfig;

#[derive(Debug)]
pub struct Kernel {
    pub commands: CommandRegistry,
    pub windows: WindowManager,
}

impl Kernel {
    /// Kernel with the default commands and the system clock.
    pub fn new(config: &DesktopConfig) -> Self {
        Self::with_clock(config, DesktopClock)
    }

    /// Kernel whose `time` command reads `clock`.
    pub fn with_clock<T: TimeService + 'static>(config: &DesktopConfig, clock: T) -> Self {
        let mut commands = CommandRegistry::new();
        register_builtins(&mut commands, clock);
        log::debug!("kernel started with {} commands", commands.len());
        Self {
            commands,
            windows: WindowManager::with_cascade(config.cascade()),
        }
    }
}
