//! Line-oriented host surface: an in-memory scene whose close
//! confirmations are asked on the console.

use std::io::{self, BufRead, Write};

use tinydesk_core::Point;
use tinydesk_core::Size;
use tinydesk_core::wm::{Confirmation, HostSurface, NodeId, Scene};

pub struct Console<R, W> {
    input: R,
    output: W,
    scene: Scene,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            scene: Scene::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next input line without its terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.output.write_all(b"\n")?;
        }
        self.output.flush()
    }

    fn ask(&mut self, message: &str) -> io::Result<Confirmation> {
        write!(self.output, "{message} [y/n] ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        let yes = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        Ok(Confirmation::from(yes))
    }
}

impl<R: BufRead, W: Write> HostSurface for Console<R, W> {
    fn attach(&mut self, title: &str, position: Point, size: Size) -> NodeId {
        self.scene.attach(title, position, size)
    }

    fn detach(&mut self, node: NodeId) {
        self.scene.detach(node);
    }

    fn set_position(&mut self, node: NodeId, position: Point) {
        self.scene.set_position(node, position);
    }

    fn raise(&mut self, node: NodeId) {
        self.scene.raise(node);
    }

    fn confirm(&mut self, _node: NodeId, message: &str) -> Confirmation {
        match self.ask(message) {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("confirmation failed, treating as no: {e}");
                Confirmation::No
            },
        }
    }
}
