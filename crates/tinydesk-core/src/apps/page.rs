//! Page content shared by the browser windows and the GitHub lookup, plus
//! the text renderers that turn a fetch result into what the page shows.

use std::any::Any;
use std::fmt::Write as _;

use serde_json::Value;

use tinydesk_platform::FetchResponse;
use tinydesk_types::error::{DeskError, Result};
use tinydesk_wm::ContentSurface;

/// Longest stripped page text the simple browser shows, in characters.
pub const MAX_PAGE_CHARS: usize = 5000;

/// Placeholder for a missing JSON field.
const MISSING_FIELD: &str = "(none)";

/// Address field plus rendered text.
///
/// Each request carries an id handed out by the caller; a result for
/// anything but the latest id is ignored, so a slow earlier fetch cannot
/// overwrite a newer page. Ids must be unique across page views, otherwise a
/// fetch started for a closed window could land in its replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    address: String,
    text: String,
    loading: bool,
    request: u64,
}

impl PageView {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            ..Self::default()
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start request `request` for `address`.
    pub fn begin(&mut self, address: &str, request: u64) {
        self.request = request;
        self.address = address.to_string();
        self.text = format!("Loading: {address}...");
        self.loading = true;
    }

    /// Show the result of request `request`. Returns `false` if a newer
    /// request has been started since.
    pub fn finish(&mut self, request: u64, text: String) -> bool {
        if request != self.request {
            return false;
        }
        self.text = text;
        self.loading = false;
        true
    }
}

impl ContentSurface for PageView {
    fn summary(&self) -> String {
        if self.loading {
            return format!("{} (loading)", self.address);
        }
        match self.text.lines().find(|l| !l.trim().is_empty()) {
            Some(first) => format!("{}: {first}", self.address),
            None => self.address.clone(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Remove `script`/`style` blocks and all tags, decode the basic entities
/// and trim.
pub fn strip_html(html: &str) -> String {
    let without_blocks = drop_blocks(html, &["script", "style"]);

    let mut text = String::with_capacity(without_blocks.len());
    let mut rest = without_blocks.as_str();
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            // `<>` is not a tag.
            Some(close) if close > 0 => rest = &after[close + 1..],
            _ => {
                text.push('<');
                rest = after;
            },
        }
    }
    text.push_str(rest);

    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .trim()
        .to_string()
}

/// Cut `<name ...>...</name>` blocks, case-insensitively. An unclosed block
/// is left in place.
fn drop_blocks(html: &str, names: &[&str]) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;
    loop {
        let next = names
            .iter()
            .filter_map(|name| {
                lower[pos..]
                    .find(&format!("<{name}"))
                    .map(|i| (pos + i, *name))
            })
            .min_by_key(|(i, _)| *i);
        let Some((start, name)) = next else { break };
        let closing = format!("</{name}>");
        let Some(end) = lower[start..].find(&closing) else { break };
        out.push_str(&html[pos..start]);
        pos = start + end + closing.len();
    }
    out.push_str(&html[pos..]);
    out
}

/// Every double-quoted `href` value, in document order.
pub fn extract_links(html: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let mut links = Vec::new();
    let mut pos = 0;
    while let Some(i) = lower[pos..].find("href") {
        pos += i + "href".len();
        let rest = html[pos..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else { continue };
        let Some(rest) = rest.trim_start().strip_prefix('"') else { continue };
        match rest.find('"') {
            Some(end) if end > 0 => links.push(rest[..end].to_string()),
            _ => {},
        }
    }
    links
}

/// Simple browser view: status, stripped text (truncated), link list.
pub fn render_simple(response: &FetchResponse) -> String {
    let text = strip_html(&response.body);
    let links = extract_links(&response.body);

    let mut out = format!("HTTP {}\n\n", response.status);
    if text.chars().count() > MAX_PAGE_CHARS {
        out.extend(text.chars().take(MAX_PAGE_CHARS));
        out.push_str("...(truncated)\n\n");
    } else {
        out.push_str(&text);
        out.push_str("\n\n");
    }
    if !links.is_empty() {
        out.push_str("Links:\n");
        for link in links {
            let _ = writeln!(out, "{link}");
        }
    }
    out
}

/// Internet view: status and the full page text.
pub fn render_page(response: &FetchResponse) -> String {
    format!("HTTP {}\n\n{}\n", response.status, strip_html(&response.body))
}

/// GitHub user summary from the users API JSON.
pub fn render_github_user(response: &FetchResponse) -> Result<String> {
    let json: Value = serde_json::from_str(&response.body)?;
    let field = |name: &str| match json.get(name) {
        None | Some(Value::Null) => MISSING_FIELD.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    Ok(format!(
        "Login: {}\nName: {}\nPublic Repos: {}\nFollowers: {}\nHTTP Code: {}\n",
        field("login"),
        field("name"),
        field("public_repos"),
        field("followers"),
        response.status
    ))
}

pub fn render_error(err: &DeskError) -> String {
    format!("Error: {err}")
}
