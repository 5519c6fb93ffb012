//! Console command dispatch.
//!
//! Every line is one desktop action. Failures of the action itself are
//! printed and the loop continues; only console I/O errors are fatal.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;

use tinydesk_core::apps::{CalculatorPad, NotepadBuffer, PageView, PaintCanvas, TerminalView};
use tinydesk_core::terminal::tokenize;
use tinydesk_core::wm::CloseOutcome;
use tinydesk_core::{AppKind, DeskError, Point, Shell};

use crate::console::Console;

/// How long to wait for page fetches before printing the scene.
const FETCH_WAIT: Duration = Duration::from_secs(6);

const HELP: &str = "\
Commands:
  open <app>            open or focus an app (terminal, notepad, paint, calc,
                        internet, simplebrowser, github)
  focus <key>           raise a window
  move <key> <dx> <dy>  move a window
  close <key>           close a window (asks y/n)
  term <line>           run a line in the terminal window
  note <text>           append a line to the notepad
  calc <keys>           press calculator keys, e.g. 12+3=
  draw <x y> <x y>...   draw a stroke on the paint canvas
  go <url>              load a page in the simple browser
  web <url>             load a page in the internet window
  gh <user>             look up a GitHub user
  show <key>            print a window's content
  windows               list open windows
  about                 about this desktop
  quit                  exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Run one console line against the shell.
pub fn run_line<R: BufRead, W: Write>(
    shell: &mut Shell,
    console: &mut Console<R, W>,
    line: &str,
) -> Result<Action> {
    shell.pump();
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let reply = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(Action::Continue),
        "quit" | "exit" => return Ok(Action::Quit),
        "help" => Ok(HELP.to_string()),
        "about" => Ok(shell.about()),
        "windows" => Ok(shell.describe_windows()),
        "show" => show(shell, rest),
        verb => match act(shell, console, verb, rest) {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => Ok(console.scene().render()),
            Err(e) => Err(e),
        },
    };
    match reply {
        Ok(text) => console.print(&text)?,
        Err(e) => console.print(&format!("error: {e}"))?,
    }
    Ok(Action::Continue)
}

/// Actions that change the desktop. `Ok(None)` means "print the scene".
fn act<R: BufRead, W: Write>(
    shell: &mut Shell,
    console: &mut Console<R, W>,
    verb: &str,
    rest: &str,
) -> tinydesk_core::Result<Option<String>> {
    match verb {
        "open" => {
            let kind = AppKind::from_name(rest)?;
            shell.open(kind, console)?;
            if matches!(kind, AppKind::Internet | AppKind::SimpleBrowser) {
                shell.pump_wait(FETCH_WAIT);
            }
        },
        "focus" => shell.focus(rest, console)?,
        "move" => {
            let args = tokenize(rest)?;
            let [key, dx, dy] = args.as_slice() else {
                return Err(usage("move <key> <dx> <dy>"));
            };
            let p = shell.move_window(key, console, number(dx)?, number(dy)?)?;
            log::debug!("moved '{key}' to {p}");
        },
        "close" => {
            if shell.close(rest, console)? == CloseOutcome::Declined {
                return Ok(Some(format!("kept '{rest}' open")));
            }
        },
        "term" => {
            shell.submit_terminal(rest)?;
            return shell.with_content("terminal", |v: &TerminalView| tail(v.session().output(), 10));
        },
        "note" => shell.with_content_mut("notepad", |pad: &mut NotepadBuffer| pad.append_line(rest))?,
        "calc" => {
            shell.with_content_mut("calc", |pad: &mut CalculatorPad| pad.press_all(rest))??;
            return shell.with_content("calc", |pad: &CalculatorPad| Some(pad.display().to_string()));
        },
        "draw" => {
            let points = points(rest)?;
            shell.with_content_mut("paint", |canvas: &mut PaintCanvas| canvas.stroke(&points))?;
        },
        "go" | "web" => {
            let kind = if verb == "go" { AppKind::SimpleBrowser } else { AppKind::Internet };
            shell.navigate(kind, rest)?;
            shell.pump_wait(FETCH_WAIT);
            return shell.with_content(kind.key(), |p: &PageView| Some(p.text().to_string()));
        },
        "gh" => {
            shell.lookup_user(rest)?;
            shell.pump_wait(FETCH_WAIT);
            return shell.with_content("github", |p: &PageView| Some(p.text().to_string()));
        },
        other => return Err(DeskError::UnknownCommand(other.to_string())),
    }
    Ok(None)
}

/// Print the content of one window.
fn show(shell: &Shell, key: &str) -> tinydesk_core::Result<String> {
    let window = shell.window(key)?;
    let text = window
        .with_content(|v: &TerminalView| v.session().output().join("\n"))
        .or_else(|| window.with_content(|p: &NotepadBuffer| p.text().to_string()))
        .or_else(|| window.with_content(|p: &PageView| format!("[{}]\n{}", p.address(), p.text())))
        .or_else(|| window.with_content(|p: &CalculatorPad| p.display().to_string()))
        .or_else(|| {
            window.with_content(|c: &PaintCanvas| {
                c.segments()
                    .iter()
                    .map(|s| format!("{} -> {}", s.from, s.to))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        })
        .unwrap_or_default();
    Ok(text)
}

fn tail(lines: &[String], n: usize) -> Option<String> {
    Some(lines[lines.len().saturating_sub(n)..].join("\n"))
}

fn usage(text: &str) -> DeskError {
    DeskError::Command(format!("usage: {text}"))
}

fn number(arg: &str) -> tinydesk_core::Result<i32> {
    arg.parse()
        .map_err(|_| DeskError::Command(format!("not a number: {arg}")))
}

fn points(args: &str) -> tinydesk_core::Result<Vec<Point>> {
    let nums = args
        .split_whitespace()
        .map(number)
        .collect::<tinydesk_core::Result<Vec<i32>>>()?;
    if nums.len() < 4 || nums.len() % 2 != 0 {
        return Err(usage("draw <x y> <x y> [x y]..."));
    }
    Ok(nums.chunks(2).map(|c| Point::new(c[0], c[1])).collect())
}
