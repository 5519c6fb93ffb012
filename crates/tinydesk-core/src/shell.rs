//! Application launcher and page-fetch plumbing.
//!
//! The shell keeps one window per [`AppKind`]: opening an application that
//! is already open focuses it instead. Page fetches run on worker threads
//! and come back through a channel; [`Shell::pump`] applies them on the
//! thread that owns the windows.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tinydesk_platform::{FetchResponse, Fetcher, HttpFetcher, normalize_url};
use tinydesk_terminal::LineOutcome;
use tinydesk_types::error::{DeskError, Result};
use tinydesk_types::geometry::{Point, Size};
use tinydesk_types::key::WindowKey;
use tinydesk_wm::{CloseOutcome, Confirmation, ContentSurface, HostSurface, MiniWindow, WindowManager};

use crate::apps::{
    AppKind, CalculatorPad, NotepadBuffer, PageView, PaintCanvas, TerminalView, render_error,
    render_github_user, render_page, render_simple,
};
use crate::config::DesktopConfig;
use crate::kernel::Kernel;

const BROWSER_AGENT: &str = "TinyDesk-SimpleBrowser/1.0";
const API_AGENT: &str = "TinyDesk-APIClient";

/// Height taken by the paint window's title bar.
const PAINT_CHROME_HEIGHT: u32 = 40;

type Renderer = fn(&FetchResponse) -> Result<String>;

/// What [`Shell::open`] did.
#[derive(Debug, Clone)]
pub enum OpenOutcome {
    /// A new window was created and shown.
    Opened(MiniWindow),
    /// The application was already open; its window was raised.
    Focused(MiniWindow),
}

impl OpenOutcome {
    pub fn window(&self) -> &MiniWindow {
        match self {
            Self::Opened(w) | Self::Focused(w) => w,
        }
    }
}

/// Text shown when a fetch worker dies before producing a page.
const WORKER_LOST: &str = "Error: fetch worker stopped";

/// A finished fetch on its way back to its window.
struct PageUpdate {
    key: WindowKey,
    request: u64,
    text: String,
}

/// Sends its update when dropped, so a worker that panics still reports
/// back and `in_flight` drains.
struct Reply {
    tx: Sender<PageUpdate>,
    update: Option<PageUpdate>,
}

impl Drop for Reply {
    fn drop(&mut self) {
        if let Some(update) = self.update.take() {
            // The receiver only goes away with the shell.
            let _ = self.tx.send(update);
        }
    }
}

pub struct Shell {
    kernel: Kernel,
    config: DesktopConfig,
    fetcher: Arc<dyn Fetcher>,
    updates_tx: Sender<PageUpdate>,
    updates_rx: Receiver<PageUpdate>,
    in_flight: usize,
    next_request: u64,
}

impl Shell {
    /// Shell with a fresh kernel and the HTTP(S) fetcher.
    pub fn new(config: DesktopConfig) -> Self {
        let kernel = Kernel::new(&config);
        Self::with_parts(kernel, config, Arc::new(HttpFetcher::new()))
    }

    pub fn with_parts(kernel: Kernel, config: DesktopConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let (updates_tx, updates_rx) = mpsc::channel();
        Self {
            kernel,
            config,
            fetcher,
            updates_tx,
            updates_rx,
            in_flight: 0,
            next_request: 0,
        }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Mutable kernel access, e.g. to register extra commands.
    pub fn kernel_mut(&mut self) -> &mut Kernel {
        &mut self.kernel
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn windows(&self) -> &WindowManager {
        &self.kernel.windows
    }

    /// Open `kind`, or focus it if it is already open.
    pub fn open(&mut self, kind: AppKind, host: &mut dyn HostSurface) -> Result<OpenOutcome> {
        let wm = &self.kernel.windows;
        if let Some(existing) = wm.get(kind.key()) {
            existing.focus(host)?;
            log::debug!("{kind} already open, focused");
            return Ok(OpenOutcome::Focused(existing));
        }

        let size = kind.size();
        let window = MiniWindow::new(kind.title(), size.width, size.height, kind.key(), wm);
        window.set_content(self.content_for(kind))?;
        window.show_on(host, wm.count())?;
        log::info!("opened {kind} at {}", window.position());

        match kind {
            AppKind::Internet => {
                let url = self.config.home_url.clone();
                self.navigate(kind, &url)?;
            },
            AppKind::SimpleBrowser => {
                let url = self.config.simple_browser_url.clone();
                self.navigate(kind, &url)?;
            },
            _ => {},
        }
        Ok(OpenOutcome::Opened(window))
    }

    /// The open window under `key`.
    pub fn window(&self, key: &str) -> Result<MiniWindow> {
        self.kernel
            .windows
            .get(key)
            .ok_or_else(|| DeskError::Wm(format!("no open window '{key}'")))
    }

    pub fn focus(&self, key: &str, host: &mut dyn HostSurface) -> Result<()> {
        self.window(key)?.focus(host)
    }

    pub fn move_window(&self, key: &str, host: &mut dyn HostSurface, dx: i32, dy: i32) -> Result<Point> {
        self.window(key)?.reposition(host, dx, dy)
    }

    /// Close the window under `key`, asking the host first unless
    /// confirmation is disabled in the config.
    pub fn close(&self, key: &str, host: &mut dyn HostSurface) -> Result<CloseOutcome> {
        let window = self.window(key)?;
        if self.config.confirm_close {
            window.close(host)
        } else {
            Ok(window.begin_close()?.resolve(host, Confirmation::Yes))
        }
    }

    /// Read the content of the window under `key`.
    pub fn with_content<T: 'static, R>(&self, key: &str, f: impl FnOnce(&T) -> R) -> Result<R> {
        self.window(key)?
            .with_content(f)
            .ok_or_else(|| DeskError::Wm(format!("window '{key}' holds different content")))
    }

    pub fn with_content_mut<T: 'static, R>(&self, key: &str, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        self.window(key)?.with_content_mut(f)
    }

    /// Feed one line to the terminal window.
    pub fn submit_terminal(&self, line: &str) -> Result<LineOutcome> {
        let window = self.window(AppKind::Terminal.key())?;
        let commands = &self.kernel.commands;
        window.with_content_mut(|view: &mut TerminalView| view.submit(line, commands))
    }

    /// Load `address` into a browser window.
    pub fn navigate(&mut self, kind: AppKind, address: &str) -> Result<()> {
        let render: Renderer = match kind {
            AppKind::Internet => full_page,
            AppKind::SimpleBrowser => simple_page,
            other => return Err(DeskError::Wm(format!("{other} is not a browser"))),
        };
        let address = address.trim();
        let request = self.begin_page(kind, address)?;
        self.spawn_fetch(kind, request, normalize_url(address), BROWSER_AGENT, render)
    }

    /// Look up `user` in the GitHub Info window.
    pub fn lookup_user(&mut self, user: &str) -> Result<()> {
        let user = user.trim();
        if user.is_empty() || user.contains('/') {
            return Err(DeskError::Command(format!("invalid user name '{user}'")));
        }
        let kind = AppKind::GitHubInfo;
        let request = self.begin_page(kind, user)?;
        let url = format!("{}/users/{user}", self.config.github_api.trim_end_matches('/'));
        self.spawn_fetch(kind, request, url, API_AGENT, render_github_user)
    }

    /// Number of fetches whose result has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply every fetch result that has already arrived. Returns how many
    /// pages were updated.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates_rx.try_recv() {
            applied += usize::from(self.apply(update));
        }
        applied
    }

    /// Like [`pump`](Self::pump), but first wait up to `timeout` for the
    /// outstanding fetches.
    pub fn pump_wait(&mut self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut applied = 0;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.updates_rx.recv_timeout(remaining) {
                Ok(update) => applied += usize::from(self.apply(update)),
                Err(e) => {
                    log::warn!("{} fetches still outstanding: {e}", self.in_flight);
                    break;
                },
            }
        }
        applied + self.pump()
    }

    /// One line per open window: key, state, position and content.
    pub fn describe_windows(&self) -> String {
        let windows = self.kernel.windows.all();
        if windows.is_empty() {
            return "no windows open\n".to_string();
        }
        let mut out = String::new();
        for w in windows {
            let _ = writeln!(
                out,
                "{:<14} {:<8} at {} [{}]",
                w.key().as_str(),
                w.state().to_string(),
                w.position(),
                w.content_summary().unwrap_or_default()
            );
        }
        out
    }

    pub fn about(&self) -> String {
        format!(
            "{} v{}\nA small desktop of movable mini-windows\n{}",
            self.config.title,
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_REPOSITORY")
        )
    }

    fn content_for(&self, kind: AppKind) -> Box<dyn ContentSurface> {
        match kind {
            AppKind::Terminal => Box::new(TerminalView::new(&self.config.prompt)),
            AppKind::Notepad => Box::new(NotepadBuffer::new()),
            AppKind::Paint => {
                let size = kind.size();
                Box::new(PaintCanvas::new(Size::new(
                    size.width,
                    size.height.saturating_sub(PAINT_CHROME_HEIGHT),
                )))
            },
            AppKind::Calculator => Box::new(CalculatorPad::new()),
            AppKind::Internet => Box::new(PageView::new(&self.config.home_url)),
            AppKind::SimpleBrowser => Box::new(PageView::new(&self.config.simple_browser_url)),
            AppKind::GitHubInfo => Box::new(PageView::new(&self.config.github_user)),
        }
    }

    /// Mark the page under `kind` as loading. Request ids are unique for
    /// the life of the shell, so a reopened window never accepts a page
    /// fetched for its predecessor.
    fn begin_page(&mut self, kind: AppKind, address: &str) -> Result<u64> {
        let window = self.window(kind.key())?;
        let request = self.next_request + 1;
        window.with_content_mut(|page: &mut PageView| page.begin(address, request))?;
        self.next_request = request;
        Ok(request)
    }

    fn spawn_fetch(
        &mut self,
        kind: AppKind,
        request: u64,
        url: String,
        user_agent: &'static str,
        render: Renderer,
    ) -> Result<()> {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.updates_tx.clone();
        let key = WindowKey::new(kind.key());
        log::debug!("fetching {url} for {kind}");
        thread::Builder::new()
            .name(format!("fetch-{}", kind.key()))
            .spawn(move || {
                let mut reply = Reply {
                    tx,
                    update: Some(PageUpdate {
                        key,
                        request,
                        text: WORKER_LOST.to_string(),
                    }),
                };
                let text = match fetcher.fetch(&url, user_agent).and_then(|r| render(&r)) {
                    Ok(text) => text,
                    Err(e) => {
                        log::warn!("fetch of {url} failed: {e}");
                        render_error(&e)
                    },
                };
                if let Some(update) = reply.update.as_mut() {
                    update.text = text;
                }
            })?;
        self.in_flight += 1;
        Ok(())
    }

    fn apply(&mut self, update: PageUpdate) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        let Some(window) = self.kernel.windows.get(update.key.as_str()) else {
            log::debug!("page for '{}' arrived after its window closed", update.key);
            return false;
        };
        let PageUpdate { key, request, text } = update;
        match window.with_content_mut(|page: &mut PageView| page.finish(request, text)) {
            Ok(true) => true,
            Ok(false) => {
                log::debug!("dropped stale page for '{key}'");
                false
            },
            Err(e) => {
                log::debug!("page for '{key}' not applied: {e}");
                false
            },
        }
    }
}

fn full_page(response: &FetchResponse) -> Result<String> {
    Ok(render_page(response))
}

fn simple_page(response: &FetchResponse) -> Result<String> {
    Ok(render_simple(response))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use tinydesk_platform::TimeService;
    use tinydesk_platform::WallTime;
    use tinydesk_wm::{Scene, WindowState};

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    struct FixedClock;

    impl TimeService for FixedClock {
        fn now(&self) -> Result<WallTime> {
            Ok(tinydesk_platform::clock::from_unix_secs(0))
        }
    }

    /// Serves canned responses and records what was asked for.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, (u16, String)>,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl FakeFetcher {
        fn page(mut self, url: &str, status: u16, body: &str) -> Self {
            self.pages.insert(url.to_string(), (status, body.to_string()));
            self
        }
    }

    impl Fetcher for FakeFetcher {
        fn fetch(&self, url: &str, user_agent: &str) -> Result<FetchResponse> {
            if let Ok(mut seen) = self.requests.lock() {
                seen.push((url.to_string(), user_agent.to_string()));
            }
            match self.pages.get(url) {
                Some((status, body)) => Ok(FetchResponse {
                    status: *status,
                    body: body.clone(),
                }),
                None => Err(DeskError::Fetch(format!("connect failed: {url}"))),
            }
        }
    }

    fn shell_with(config: DesktopConfig, fetcher: FakeFetcher) -> Shell {
        let kernel = Kernel::with_clock(&config, FixedClock);
        Shell::with_parts(kernel, config, Arc::new(fetcher))
    }

    /// Holds the first fetch until released; every call answers with its
    /// call number.
    struct GatedFetcher {
        gate: Mutex<Option<Receiver<()>>>,
        started: Mutex<Sender<u32>>,
        calls: Mutex<u32>,
    }

    impl GatedFetcher {
        /// Returns the fetcher, the release handle and the start signal.
        fn new() -> (Self, Sender<()>, Receiver<u32>) {
            let (release, gate) = mpsc::channel();
            let (started_tx, started) = mpsc::channel();
            let fetcher = Self {
                gate: Mutex::new(Some(gate)),
                started: Mutex::new(started_tx),
                calls: Mutex::new(0),
            };
            (fetcher, release, started)
        }
    }

    impl Fetcher for GatedFetcher {
        fn fetch(&self, _url: &str, _user_agent: &str) -> Result<FetchResponse> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            let _ = self.started.lock().unwrap().send(call);
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                let _ = gate.recv();
            }
            Ok(FetchResponse {
                status: 200,
                body: format!("page {call}"),
            })
        }
    }

    struct PanickingFetcher;

    impl Fetcher for PanickingFetcher {
        fn fetch(&self, _url: &str, _user_agent: &str) -> Result<FetchResponse> {
            panic!("fetcher blew up");
        }
    }

    fn shell() -> Shell {
        shell_with(DesktopConfig::default(), FakeFetcher::default())
    }

    fn page_text(shell: &Shell, key: &str) -> String {
        shell
            .with_content(key, |p: &PageView| p.text().to_string())
            .unwrap()
    }

    #[test]
    fn second_open_focuses_existing_window() {
        let mut shell = shell();
        let mut scene = Scene::new();
        let first = shell.open(AppKind::Terminal, &mut scene).unwrap();
        assert!(matches!(first, OpenOutcome::Opened(_)));
        shell.open(AppKind::Notepad, &mut scene).unwrap();

        let again = shell.open(AppKind::Terminal, &mut scene).unwrap();
        assert!(matches!(again, OpenOutcome::Focused(_)));
        assert!(again.window().same_window(first.window()));
        assert_eq!(shell.windows().count(), 2);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.top().unwrap().title, "Terminal");
    }

    #[test]
    fn windows_cascade_by_open_count() {
        let mut shell = shell();
        let mut scene = Scene::new();
        let positions: Vec<Point> = [AppKind::Terminal, AppKind::Paint, AppKind::Calculator]
            .into_iter()
            .map(|k| shell.open(k, &mut scene).unwrap().window().position())
            .collect();
        assert_eq!(positions, [Point::new(50, 70), Point::new(80, 100), Point::new(110, 130)]);
        assert_eq!(shell.window("paint").unwrap().size(), Size::new(400, 300));
    }

    #[test]
    fn close_counts_follow_the_answer() {
        let mut shell = shell();
        let mut scene = Scene::new();
        shell.open(AppKind::Notepad, &mut scene).unwrap();
        shell.open(AppKind::Calculator, &mut scene).unwrap();

        scene.queue_answer(Confirmation::No);
        assert_eq!(shell.close("notepad", &mut scene).unwrap(), CloseOutcome::Declined);
        assert_eq!(shell.windows().count(), 2);

        scene.queue_answer(Confirmation::Yes);
        assert_eq!(shell.close("NOTEPAD", &mut scene).unwrap(), CloseOutcome::Closed);
        assert_eq!(shell.windows().count(), 1);
        assert!(shell.close("notepad", &mut scene).is_err());
    }

    #[test]
    fn reopening_after_close_builds_a_new_window() {
        let mut shell = shell();
        let mut scene = Scene::new();
        let old = shell.open(AppKind::Paint, &mut scene).unwrap();
        shell.close("paint", &mut scene).unwrap();
        assert_eq!(old.window().state(), WindowState::Closed);

        let new = shell.open(AppKind::Paint, &mut scene).unwrap();
        assert!(matches!(new, OpenOutcome::Opened(_)));
        assert!(!new.window().same_window(old.window()));
        assert_eq!(old.window().state(), WindowState::Closed);
    }

    #[test]
    fn close_without_confirmation_skips_the_prompt() {
        let config = DesktopConfig {
            confirm_close: false,
            ..DesktopConfig::default()
        };
        let mut shell = shell_with(config, FakeFetcher::default());
        let mut scene = Scene::new().with_default_answer(Confirmation::No);
        shell.open(AppKind::Terminal, &mut scene).unwrap();
        assert_eq!(shell.close("terminal", &mut scene).unwrap(), CloseOutcome::Closed);
        assert!(scene.prompts().is_empty());
    }

    #[test]
    fn terminal_lines_run_registered_commands() {
        let mut shell = shell();
        let mut scene = Scene::new();
        assert!(shell.submit_terminal("echo hi").is_err());

        shell.open(AppKind::Terminal, &mut scene).unwrap();
        let outcome = shell.submit_terminal("sum 3 4 5").unwrap();
        assert_eq!(outcome, LineOutcome::Output("Sum: 12".into()));
        shell.submit_terminal("sum 3 x").unwrap();
        shell.submit_terminal("time").unwrap();

        let output = shell
            .with_content("terminal", |v: &TerminalView| v.session().output().to_vec())
            .unwrap();
        assert_eq!(output[0], "tinydesk> sum 3 4 5");
        assert!(output.iter().any(|l| l.contains("x") && l.starts_with("Command error")));
        assert!(output.contains(&"Now: 1970-01-01T00:00:00Z".to_string()));
    }

    #[test]
    fn moving_updates_window_and_host() {
        let mut shell = shell();
        let mut scene = Scene::new();
        let opened = shell.open(AppKind::Notepad, &mut scene).unwrap();
        let p = shell.move_window("notepad", &mut scene, 10, -100).unwrap();
        assert_eq!(p, Point::new(60, -30));
        let node = opened.window().node().unwrap();
        assert_eq!(scene.node(node).unwrap().position, p);
        assert!(shell.move_window("paint", &mut scene, 1, 1).is_err());
    }

    #[test]
    fn simple_browser_loads_start_page_on_open() {
        let fetcher = FakeFetcher::default().page(
            "http://example.com",
            200,
            r#"<h1>Example</h1><a href="https://www.iana.org">More</a>"#,
        );
        let mut shell = shell_with(DesktopConfig::default(), fetcher);
        let mut scene = Scene::new();
        shell.open(AppKind::SimpleBrowser, &mut scene).unwrap();
        assert!(page_text(&shell, "simplebrowser").starts_with("Loading: example.com"));

        assert_eq!(shell.pump_wait(WAIT), 1);
        assert_eq!(shell.in_flight(), 0);
        assert_eq!(
            page_text(&shell, "simplebrowser"),
            "HTTP 200\n\nExampleMore\n\nLinks:\nhttps://www.iana.org\n"
        );
    }

    #[test]
    fn fetch_failures_render_as_error_text() {
        let mut shell = shell();
        let mut scene = Scene::new();
        shell.open(AppKind::Internet, &mut scene).unwrap();
        shell.pump_wait(WAIT);
        assert_eq!(
            page_text(&shell, "internet"),
            "Error: fetch error: connect failed: https://example.com"
        );
    }

    #[test]
    fn github_lookup_uses_api_base_and_agent() {
        let config = DesktopConfig {
            github_api: "http://api.test/".to_string(),
            ..DesktopConfig::default()
        };
        let fetcher = FakeFetcher::default().page(
            "http://api.test/users/octocat",
            200,
            r#"{"login":"octocat","name":"The Octocat","public_repos":8,"followers":9}"#,
        );
        let mut shell = shell_with(config, fetcher);
        let mut scene = Scene::new();
        assert!(shell.lookup_user("octocat").is_err());

        shell.open(AppKind::GitHubInfo, &mut scene).unwrap();
        assert_eq!(shell.in_flight(), 0);
        assert!(shell.lookup_user("  ").is_err());
        shell.lookup_user("octocat").unwrap();
        shell.pump_wait(WAIT);
        assert_eq!(
            page_text(&shell, "github"),
            "Login: octocat\nName: The Octocat\nPublic Repos: 8\nFollowers: 9\nHTTP Code: 200\n"
        );
    }

    #[test]
    fn page_for_closed_window_is_dropped() {
        let mut shell = shell();
        let mut scene = Scene::new();
        shell.open(AppKind::SimpleBrowser, &mut scene).unwrap();
        shell.close("simplebrowser", &mut scene).unwrap();
        assert_eq!(shell.pump_wait(WAIT), 0);
        assert_eq!(shell.in_flight(), 0);
        assert!(shell.window("simplebrowser").is_err());
    }

    #[test]
    fn page_for_previous_window_does_not_reach_reopened_one() {
        let (fetcher, release, started) = GatedFetcher::new();
        let kernel = Kernel::with_clock(&DesktopConfig::default(), FixedClock);
        let mut shell = Shell::with_parts(kernel, DesktopConfig::default(), Arc::new(fetcher));
        let mut scene = Scene::new();

        shell.open(AppKind::SimpleBrowser, &mut scene).unwrap();
        assert_eq!(started.recv_timeout(WAIT).unwrap(), 1);
        shell.close("simplebrowser", &mut scene).unwrap();
        shell.open(AppKind::SimpleBrowser, &mut scene).unwrap();
        assert_eq!(shell.in_flight(), 2);

        release.send(()).unwrap();
        assert_eq!(shell.pump_wait(WAIT), 1);
        assert_eq!(shell.in_flight(), 0);
        assert_eq!(page_text(&shell, "simplebrowser"), "HTTP 200\n\npage 2\n\n");
    }

    #[test]
    fn panicking_fetch_still_drains() {
        let kernel = Kernel::with_clock(&DesktopConfig::default(), FixedClock);
        let mut shell = Shell::with_parts(kernel, DesktopConfig::default(), Arc::new(PanickingFetcher));
        let mut scene = Scene::new();
        shell.open(AppKind::SimpleBrowser, &mut scene).unwrap();
        assert_eq!(shell.in_flight(), 1);

        assert_eq!(shell.pump_wait(WAIT), 1);
        assert_eq!(shell.in_flight(), 0);
        assert_eq!(page_text(&shell, "simplebrowser"), WORKER_LOST);
    }

    #[test]
    fn navigate_rejects_non_browsers() {
        let mut shell = shell();
        let mut scene = Scene::new();
        shell.open(AppKind::Notepad, &mut scene).unwrap();
        assert!(shell.navigate(AppKind::Notepad, "example.com").is_err());
        assert!(shell.navigate(AppKind::Internet, "example.com").is_err());
    }

    #[test]
    fn describe_and_about() {
        let mut shell = shell();
        let mut scene = Scene::new();
        assert_eq!(shell.describe_windows(), "no windows open\n");
        shell.open(AppKind::Calculator, &mut scene).unwrap();
        shell
            .with_content_mut("calc", |pad: &mut CalculatorPad| pad.press_all("6*7="))
            .unwrap()
            .unwrap();
        let listing = shell.describe_windows();
        assert!(listing.starts_with("calc"));
        assert!(listing.contains("display: 42"));
        assert!(shell.about().starts_with("TinyDesk v"));
    }
}
