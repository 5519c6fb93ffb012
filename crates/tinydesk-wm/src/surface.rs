//! Collaborator traits: the host display surface and window content.

use std::any::Any;

use tinydesk_types::geometry::{Point, Size};

/// Identifier of a visual node on a host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Answer to a modal yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

impl From<bool> for Confirmation {
    fn from(yes: bool) -> Self {
        if yes { Self::Yes } else { Self::No }
    }
}

/// The display a set of mini-windows lives on.
///
/// The host owns every node it hands out. Nodes are stacked: the most
/// recently attached or raised node is on top.
pub trait HostSurface {
    /// Add a node above all existing content.
    fn attach(&mut self, title: &str, position: Point, size: Size) -> NodeId;

    /// Remove a node. Unknown ids are ignored.
    fn detach(&mut self, node: NodeId);

    fn set_position(&mut self, node: NodeId, position: Point);

    /// Move a node to the top of the stack.
    fn raise(&mut self, node: NodeId);

    /// Ask the user a yes/no question bound to `node`.
    fn confirm(&mut self, node: NodeId, message: &str) -> Confirmation;
}

/// Application content hosted inside a mini-window.
///
/// Opaque to the window manager; applications downcast through
/// [`crate::MiniWindow::with_content`] to reach their own type.
pub trait ContentSurface: Any {
    /// One-line description for scene dumps.
    fn summary(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
