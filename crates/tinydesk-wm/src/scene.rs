//! In-memory host surface.
//!
//! Keeps a bottom-to-top stack of nodes and answers confirmations from a
//! scripted queue. Used by the console binary and by lifecycle tests.

use std::collections::VecDeque;
use std::fmt::Write as _;

use tinydesk_types::geometry::{Point, Size};

use crate::surface::{Confirmation, HostSurface, NodeId};

/// One attached window frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    pub id: NodeId,
    pub title: String,
    pub position: Point,
    pub size: Size,
}

#[derive(Debug)]
pub struct Scene {
    /// Index 0 is the bottom of the stack.
    nodes: Vec<SceneNode>,
    next_id: u64,
    answers: VecDeque<Confirmation>,
    default_answer: Confirmation,
    prompts: Vec<String>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_id: 1,
            answers: VecDeque::new(),
            default_answer: Confirmation::Yes,
            prompts: Vec::new(),
        }
    }

    /// Answer given when the script queue is empty.
    pub fn with_default_answer(mut self, answer: Confirmation) -> Self {
        self.default_answer = answer;
        self
    }

    /// Queue the answer for the next confirmation prompt.
    pub fn queue_answer(&mut self, answer: Confirmation) {
        self.answers.push_back(answer);
    }

    /// Nodes from bottom to top.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn top(&self) -> Option<&SceneNode> {
        self.nodes.last()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every confirmation message asked so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Text dump of the stack, topmost first.
    pub fn render(&self) -> String {
        if self.nodes.is_empty() {
            return "(empty desktop)\n".to_string();
        }
        let mut out = String::new();
        for node in self.nodes.iter().rev() {
            let _ = writeln!(
                out,
                "{} {:<16} at {} size {}",
                node.id, node.title, node.position, node.size
            );
        }
        out
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }
}

impl HostSurface for Scene {
    fn attach(&mut self, title: &str, position: Point, size: Size) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(SceneNode {
            id,
            title: title.to_string(),
            position,
            size,
        });
        id
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(idx) = self.index_of(node) {
            self.nodes.remove(idx);
        }
    }

    fn set_position(&mut self, node: NodeId, position: Point) {
        if let Some(idx) = self.index_of(node) {
            self.nodes[idx].position = position;
        }
    }

    fn raise(&mut self, node: NodeId) {
        if let Some(idx) = self.index_of(node) {
            let n = self.nodes.remove(idx);
            self.nodes.push(n);
        }
    }

    fn confirm(&mut self, _node: NodeId, message: &str) -> Confirmation {
        self.prompts.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach(scene: &mut Scene, title: &str) -> NodeId {
        scene.attach(title, Point::new(0, 0), Size::new(10, 10))
    }

    #[test]
    fn attach_stacks_on_top() {
        let mut scene = Scene::new();
        let a = attach(&mut scene, "a");
        let b = attach(&mut scene, "b");
        assert_ne!(a, b);
        assert_eq!(scene.top().unwrap().id, b);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn raise_reorders() {
        let mut scene = Scene::new();
        let a = attach(&mut scene, "a");
        let _b = attach(&mut scene, "b");
        scene.raise(a);
        assert_eq!(scene.top().unwrap().id, a);
        assert_eq!(scene.nodes()[0].title, "b");
    }

    #[test]
    fn detach_unknown_is_ignored() {
        let mut scene = Scene::new();
        let a = attach(&mut scene, "a");
        scene.detach(NodeId(99));
        scene.detach(a);
        scene.detach(a);
        assert!(scene.is_empty());
    }

    #[test]
    fn scripted_answers_then_default() {
        let mut scene = Scene::new().with_default_answer(Confirmation::No);
        scene.queue_answer(Confirmation::Yes);
        assert_eq!(scene.confirm(NodeId(1), "first?"), Confirmation::Yes);
        assert_eq!(scene.confirm(NodeId(1), "second?"), Confirmation::No);
        assert_eq!(scene.prompts(), ["first?", "second?"]);
    }

    #[test]
    fn render_lists_topmost_first() {
        let mut scene = Scene::new();
        attach(&mut scene, "Terminal");
        let b = attach(&mut scene, "Paint");
        scene.set_position(b, Point::new(80, 100));
        let text = scene.render();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("#2 Paint"));
        assert!(first.contains("at (80, 100) size 10x10"));
        assert_eq!(Scene::new().render(), "(empty desktop)\n");
    }
}
