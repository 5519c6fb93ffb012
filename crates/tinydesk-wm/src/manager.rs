//! Keyed registry of open mini-windows.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tinydesk_types::error::{DeskError, Result};
use tinydesk_types::geometry::Point;
use tinydesk_types::key::WindowKey;

use crate::window::MiniWindow;

type Slots = RefCell<HashMap<WindowKey, MiniWindow>>;

/// Placement policy for newly shown windows: each one is offset from the
/// origin by `step` pixels per window already open, on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cascade {
    pub origin: Point,
    pub step: i32,
}

impl Cascade {
    pub fn position_for(&self, stack_index: usize) -> Point {
        let offset = i32::try_from(stack_index)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.step);
        self.origin.offset(offset, offset)
    }
}

impl Default for Cascade {
    fn default() -> Self {
        Self {
            origin: Point::new(50, 70),
            step: 30,
        }
    }
}

/// Registry of open windows, at most one per case-folded key.
///
/// The manager owns registration entries only. Windows are handles; the
/// visual node behind each one belongs to the host surface. Whether to
/// reuse an existing window or open a new one is the caller's decision:
/// check [`contains`](Self::contains) first.
#[derive(Debug, Default)]
pub struct WindowManager {
    slots: Rc<Slots>,
    cascade: Cascade,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cascade(cascade: Cascade) -> Self {
        Self {
            slots: Rc::default(),
            cascade,
        }
    }

    pub fn cascade(&self) -> Cascade {
        self.cascade
    }

    /// Non-owning handle for windows to deregister themselves through.
    pub fn handle(&self) -> ManagerHandle {
        ManagerHandle {
            slots: Rc::downgrade(&self.slots),
        }
    }

    /// Register `window` under `key`.
    ///
    /// `key` must fold to the window's own key, since a window deregisters
    /// itself under that key when it closes. Adding the same window again is
    /// a no-op. A different window under an occupied key is rejected with
    /// [`DeskError::DuplicateWindow`]; the existing occupant is left alone.
    pub fn add(&self, key: &str, window: &MiniWindow) -> Result<()> {
        let key = WindowKey::new(key);
        if key != *window.key() {
            return Err(DeskError::Wm(format!(
                "window '{}' cannot be registered as '{key}'",
                window.key()
            )));
        }
        insert(&self.slots, key, window)
    }

    pub fn get(&self, key: &str) -> Option<MiniWindow> {
        self.slots.borrow().get(WindowKey::new(key).as_str()).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(WindowKey::new(key).as_str())
    }

    /// Forget the window under `key`. Returns whether an entry existed;
    /// removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> bool {
        remove(&self.slots, &WindowKey::new(key))
    }

    /// Snapshot of registered windows, ordered by key.
    pub fn all(&self) -> Vec<MiniWindow> {
        let slots = self.slots.borrow();
        let mut entries: Vec<(&WindowKey, &MiniWindow)> = slots.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, w)| w.clone()).collect()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<WindowKey> {
        let mut keys: Vec<WindowKey> = self.slots.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn count(&self) -> usize {
        self.slots.borrow().len()
    }
}

/// Weak back-reference from a window to its manager. Never keeps the
/// manager alive; once the manager is gone every call is a logged no-op.
#[derive(Debug, Clone)]
pub struct ManagerHandle {
    slots: Weak<Slots>,
}

impl ManagerHandle {
    pub(crate) fn add(&self, key: &WindowKey, window: &MiniWindow) -> Result<()> {
        let slots = self
            .slots
            .upgrade()
            .ok_or_else(|| DeskError::Wm(format!("manager for '{key}' no longer exists")))?;
        insert(&slots, key.clone(), window)
    }

    /// Deregister `window`, leaving any other occupant of its key alone.
    pub(crate) fn remove(&self, window: &MiniWindow) {
        let key = window.key();
        match self.slots.upgrade() {
            Some(slots) => {
                remove_if_same(&slots, key, window);
            },
            None => log::warn!("window '{key}' outlived its manager"),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.slots.strong_count() > 0
    }
}

fn insert(slots: &Slots, key: WindowKey, window: &MiniWindow) -> Result<()> {
    let mut slots = slots.borrow_mut();
    if let Some(existing) = slots.get(&key) {
        if existing.same_window(window) {
            return Ok(());
        }
        log::warn!("rejected second window for occupied key '{key}'");
        return Err(DeskError::DuplicateWindow(key.to_string()));
    }
    log::debug!("window '{key}' registered");
    slots.insert(key, window.clone());
    Ok(())
}

fn remove(slots: &Slots, key: &WindowKey) -> bool {
    // Bind the removed handle so it drops after the borrow is released.
    let removed = slots.borrow_mut().remove(key);
    match removed {
        Some(_) => {
            log::debug!("window '{key}' deregistered");
            true
        },
        None => false,
    }
}

fn remove_if_same(slots: &Slots, key: &WindowKey, window: &MiniWindow) -> bool {
    let occupied_by_window = slots
        .borrow()
        .get(key)
        .is_some_and(|existing| existing.same_window(window));
    if !occupied_by_window {
        log::debug!("window '{key}' was already replaced; leaving the entry");
        return false;
    }
    remove(slots, key)
}
