//! Window manager for TINYDESK.
//!
//! The [`WindowManager`] is a keyed registry holding at most one
//! [`MiniWindow`] per case-folded key. Each window is a handle to one
//! application instance and walks the `Constructed -> Shown -> Closed`
//! lifecycle against a [`HostSurface`], which owns the visual nodes.
//!
//! All of this state is single-threaded (`Rc`/`RefCell`). Work done on other
//! threads must be handed back to the owning thread before it touches a
//! window.

pub mod manager;
pub mod scene;
pub mod surface;
pub mod window;

pub use manager::{Cascade, ManagerHandle, WindowManager};
pub use scene::{Scene, SceneNode};
pub use surface::{Confirmation, ContentSurface, HostSurface, NodeId};
pub use window::{CloseOutcome, CloseRequest, MiniWindow, WindowState};
