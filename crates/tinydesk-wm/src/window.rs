//! Mini-window handle and lifecycle.
//!
//! ```text
//! Constructed --show_on--> Shown --begin_close--> ClosePending --Yes--> Closed
//!                            ^                        |
//!                            +----------No------------+
//! ```
//!
//! `Closed` is final: a closed window cannot be shown again.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tinydesk_types::error::{DeskError, Result};
use tinydesk_types::geometry::{Point, Size};
use tinydesk_types::key::WindowKey;

use crate::manager::{Cascade, ManagerHandle, WindowManager};
use crate::surface::{Confirmation, ContentSurface, HostSurface, NodeId};

/// Lifecycle state of a mini-window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Built but never shown; not registered, not visible.
    Constructed,
    /// Visible on the host and registered with the manager.
    Shown,
    /// A close confirmation is outstanding. The window stays visible and
    /// registered but refuses other changes until the answer arrives.
    ClosePending,
    /// Removed from host and manager. Final.
    Closed,
}

impl std::fmt::Display for WindowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Constructed => "constructed",
            Self::Shown => "shown",
            Self::ClosePending => "awaiting close confirmation",
            Self::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// How a close attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// The user said no; the window is untouched.
    Declined,
}

struct WindowInner {
    title: String,
    size: Size,
    position: Point,
    state: WindowState,
    node: Option<NodeId>,
    content: Option<Box<dyn ContentSurface>>,
}

/// Handle to one open application instance.
///
/// Cloning the handle does not clone the window; all clones observe the
/// same state.
#[derive(Clone)]
pub struct MiniWindow {
    inner: Rc<RefCell<WindowInner>>,
    key: WindowKey,
    cascade: Cascade,
    owner: ManagerHandle,
}

impl MiniWindow {
    /// Build a window for the slot `key`, owned by `manager`. Nothing is
    /// registered or drawn until [`show_on`](Self::show_on).
    pub fn new(title: &str, width: u32, height: u32, key: &str, manager: &WindowManager) -> Self {
        Self {
            inner: Rc::new(RefCell::new(WindowInner {
                title: title.to_string(),
                size: Size::new(width, height),
                position: Point::default(),
                state: WindowState::Constructed,
                node: None,
                content: None,
            })),
            key: WindowKey::new(key),
            cascade: manager.cascade(),
            owner: manager.handle(),
        }
    }

    pub fn key(&self) -> &WindowKey {
        &self.key
    }

    pub fn title(&self) -> String {
        self.inner.borrow().title.clone()
    }

    pub fn size(&self) -> Size {
        self.inner.borrow().size
    }

    pub fn position(&self) -> Point {
        self.inner.borrow().position
    }

    pub fn state(&self) -> WindowState {
        self.inner.borrow().state
    }

    /// Host node backing this window while it is shown.
    pub fn node(&self) -> Option<NodeId> {
        self.inner.borrow().node
    }

    /// Whether two handles refer to the same window.
    pub fn same_window(&self, other: &MiniWindow) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Install the content surface. Allowed before and while shown.
    pub fn set_content(&self, content: Box<dyn ContentSurface>) -> Result<()> {
        self.expect_state(&[WindowState::Constructed, WindowState::Shown], "set content")?;
        self.inner.borrow_mut().content = Some(content);
        Ok(())
    }

    /// Content summary for scene dumps, if any content is installed.
    pub fn content_summary(&self) -> Option<String> {
        self.inner.borrow().content.as_ref().map(|c| c.summary())
    }

    /// Read the content as its concrete type. `None` when there is no
    /// content or it is some other type.
    pub fn with_content<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let inner = self.inner.borrow();
        let content = inner.content.as_ref()?;
        content.as_any().downcast_ref::<T>().map(f)
    }

    /// Mutate the content as its concrete type.
    ///
    /// Rejected while a close confirmation is pending and after close.
    pub fn with_content_mut<T: 'static, R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        self.expect_state(&[WindowState::Constructed, WindowState::Shown], "edit content")?;
        let mut inner = self.inner.borrow_mut();
        let content: Option<&mut dyn Any> = inner.content.as_mut().map(|c| c.as_any_mut());
        match content.and_then(|c| c.downcast_mut::<T>()) {
            Some(typed) => Ok(f(typed)),
            None => Err(DeskError::Wm(format!(
                "window '{}' has no content of the requested type",
                self.key
            ))),
        }
    }

    /// Show the window on `host`, cascaded by `stack_index`, and register it
    /// with its manager.
    ///
    /// Fails without side effects if the window is not freshly constructed
    /// or another window already holds its key.
    pub fn show_on(&self, host: &mut dyn HostSurface, stack_index: usize) -> Result<()> {
        self.expect_state(&[WindowState::Constructed], "show")?;
        self.owner.add(&self.key, self)?;

        let position = self.cascade.position_for(stack_index);
        let (title, size) = {
            let inner = self.inner.borrow();
            (inner.title.clone(), inner.size)
        };
        let node = host.attach(&title, position, size);
        {
            let mut inner = self.inner.borrow_mut();
            inner.position = position;
            inner.node = Some(node);
            inner.state = WindowState::Shown;
        }
        log::info!("window '{}' shown at {position} as node {node}", self.key);
        Ok(())
    }

    /// Bring the window to the top of the host's stack. Idempotent.
    pub fn focus(&self, host: &mut dyn HostSurface) -> Result<()> {
        let node = self.shown_node("focus")?;
        host.raise(node);
        Ok(())
    }

    /// Move by a relative offset. Positions are not clamped to the host.
    pub fn reposition(&self, host: &mut dyn HostSurface, dx: i32, dy: i32) -> Result<Point> {
        let node = self.shown_node("move")?;
        let position = {
            let mut inner = self.inner.borrow_mut();
            inner.position = inner.position.offset(dx, dy);
            inner.position
        };
        host.set_position(node, position);
        Ok(position)
    }

    /// Ask the host to confirm, then close on "yes".
    pub fn close(&self, host: &mut dyn HostSurface) -> Result<CloseOutcome> {
        let request = self.begin_close()?;
        let answer = host.confirm(request.node, &request.prompt());
        Ok(request.resolve(host, answer))
    }

    /// Start a close whose confirmation arrives later.
    ///
    /// Until the returned request is resolved (or dropped, which counts as
    /// "no") the window rejects focus, move, content edits and further
    /// close attempts.
    pub fn begin_close(&self) -> Result<CloseRequest> {
        let node = self.shown_node("close")?;
        self.inner.borrow_mut().state = WindowState::ClosePending;
        Ok(CloseRequest {
            window: self.clone(),
            node,
        })
    }

    fn shown_node(&self, action: &str) -> Result<NodeId> {
        self.expect_state(&[WindowState::Shown], action)?;
        self.inner
            .borrow()
            .node
            .ok_or_else(|| DeskError::Wm(format!("window '{}' has no host node", self.key)))
    }

    fn expect_state(&self, allowed: &[WindowState], action: &str) -> Result<()> {
        let state = self.state();
        if allowed.contains(&state) {
            Ok(())
        } else {
            log::warn!("cannot {action} window '{}': it is {state}", self.key);
            Err(DeskError::Wm(format!(
                "cannot {action} window '{}': it is {state}",
                self.key
            )))
        }
    }
}

impl std::fmt::Debug for MiniWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MiniWindow")
            .field("key", &self.key)
            .field("title", &inner.title)
            .field("state", &inner.state)
            .field("position", &inner.position)
            .field("size", &inner.size)
            .field("node", &inner.node)
            .finish_non_exhaustive()
    }
}

/// An outstanding close confirmation.
///
/// Dropping the request without resolving it leaves the window shown.
#[must_use = "an unresolved close request keeps its window locked until dropped"]
pub struct CloseRequest {
    window: MiniWindow,
    node: NodeId,
}

impl CloseRequest {
    pub fn window(&self) -> &MiniWindow {
        &self.window
    }

    /// Question to put to the user.
    pub fn prompt(&self) -> String {
        format!("Close '{}'?", self.window.title())
    }

    /// Apply the user's answer.
    pub fn resolve(self, host: &mut dyn HostSurface, answer: Confirmation) -> CloseOutcome {
        let window = &self.window;
        match answer {
            Confirmation::No => {
                window.inner.borrow_mut().state = WindowState::Shown;
                log::debug!("close of '{}' declined", window.key);
                CloseOutcome::Declined
            },
            Confirmation::Yes => {
                host.detach(self.node);
                window.owner.remove(window);
                {
                    let mut inner = window.inner.borrow_mut();
                    inner.node = None;
                    inner.state = WindowState::Closed;
                }
                log::info!("window '{}' closed", window.key);
                CloseOutcome::Closed
            },
        }
    }
}

impl Drop for CloseRequest {
    fn drop(&mut self) {
        let mut inner = self.window.inner.borrow_mut();
        if inner.state == WindowState::ClosePending {
            inner.state = WindowState::Shown;
        }
    }
}

impl std::fmt::Debug for CloseRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloseRequest")
            .field("window", &self.window.key)
            .field("node", &self.node)
            .finish()
    }
}
