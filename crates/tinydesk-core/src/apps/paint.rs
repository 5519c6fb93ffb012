//! Paint window content: freehand strokes recorded as line segments.

use std::any::Any;

use tinydesk_types::geometry::{Point, Size};
use tinydesk_wm::ContentSurface;

/// A straight piece of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Drawing surface. Pressing starts a stroke, each drag adds a segment from
/// the previous pointer position, releasing ends the stroke.
#[derive(Debug, Clone)]
pub struct PaintCanvas {
    size: Size,
    segments: Vec<Segment>,
    pen: Option<Point>,
}

impl PaintCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            segments: Vec::new(),
            pen: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_drawing(&self) -> bool {
        self.pen.is_some()
    }

    pub fn press(&mut self, at: Point) {
        self.pen = Some(at);
    }

    /// Returns the new segment, or `None` when no stroke is in progress.
    pub fn drag(&mut self, to: Point) -> Option<Segment> {
        let from = self.pen?;
        let segment = Segment { from, to };
        self.segments.push(segment);
        self.pen = Some(to);
        Some(segment)
    }

    pub fn release(&mut self) {
        self.pen = None;
    }

    /// Draw a whole stroke through `points`.
    pub fn stroke(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.press(*first);
        for p in rest {
            self.drag(*p);
        }
        self.release();
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.pen = None;
    }
}

impl ContentSurface for PaintCanvas {
    fn summary(&self) -> String {
        format!("{} canvas, {} segments", self.size, self.segments.len())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
