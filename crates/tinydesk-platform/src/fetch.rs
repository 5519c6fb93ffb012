//! Page fetching.
//!
//! Fetches run on worker threads, so [`Fetcher`] implementations must be
//! `Send + Sync`. [`HttpFetcher`] speaks HTTP/1.0 over `std::net::TcpStream`,
//! upgrading `https://` connections through a [`TlsProvider`], and follows
//! redirects up to [`MAX_REDIRECTS`] hops.

use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use tinydesk_types::error::{DeskError, Result};

use crate::tls::TlsProvider;

/// Connect and read timeout.
const TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum response size (2 MB).
const MAX_RESPONSE: usize = 2 * 1024 * 1024;

/// Maximum number of redirects followed for one fetch.
pub const MAX_REDIRECTS: u8 = 5;

/// A fetched document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Retrieves a document by URL.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str, user_agent: &str) -> Result<FetchResponse>;
}

/// Prefix `http://` when the URL has no scheme.
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

/// HTTP fetcher with optional TLS.
#[derive(Clone)]
pub struct HttpFetcher {
    tls: Option<Arc<dyn TlsProvider>>,
}

impl HttpFetcher {
    /// Fetcher using the default TLS provider when one is compiled in.
    pub fn new() -> Self {
        #[cfg(feature = "tls-rustls")]
        {
            Self::with_tls(Arc::new(crate::tls::RustlsTlsProvider::new()))
        }
        #[cfg(not(feature = "tls-rustls"))]
        {
            Self::plain()
        }
    }

    /// Fetcher that refuses `https://` URLs.
    pub fn plain() -> Self {
        Self { tls: None }
    }

    pub fn with_tls(tls: Arc<dyn TlsProvider>) -> Self {
        Self { tls: Some(tls) }
    }

    /// Issue one GET without following redirects.
    fn request(&self, target: &Target, user_agent: &str) -> Result<RawResponse> {
        let tls = match (target.https, &self.tls) {
            (true, None) => {
                return Err(DeskError::Fetch(format!(
                    "https is not supported without TLS: {target}"
                )));
            },
            (true, Some(tls)) => Some(tls),
            (false, _) => None,
        };
        log::debug!("GET {target}");

        let addr = (target.host.as_str(), target.port)
            .to_socket_addrs()
            .map_err(|e| DeskError::Fetch(format!("DNS resolution failed: {e}")))?
            .next()
            .ok_or_else(|| {
                DeskError::Fetch(format!("no addresses for {}:{}", target.host, target.port))
            })?;
        let stream = TcpStream::connect_timeout(&addr, TIMEOUT)
            .map_err(|e| DeskError::Fetch(format!("connect failed: {e}")))?;
        stream.set_read_timeout(Some(TIMEOUT))?;
        stream.set_write_timeout(Some(TIMEOUT))?;

        let request = format!(
            "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {user_agent}\r\nConnection: close\r\n\r\n",
            target.path,
            target.host_header(),
        );
        match tls {
            Some(tls) => {
                let mut secure = tls.connect_tls(stream, &target.host)?;
                exchange(&mut *secure, &request)
            },
            None => {
                let mut stream = stream;
                exchange(&mut stream, &request)
            },
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("tls", &self.tls.is_some())
            .finish()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, user_agent: &str) -> Result<FetchResponse> {
        let mut target = Target::parse(&normalize_url(url))?;
        for _ in 0..=MAX_REDIRECTS {
            let resp = self.request(&target, user_agent)?;
            if is_redirect(resp.status)
                && let Some(location) = resp.header("location")
            {
                let next = target.resolve(location)?;
                log::debug!("redirect {target} -> {next}");
                target = next;
                continue;
            }
            return Ok(FetchResponse {
                status: resp.status,
                body: String::from_utf8_lossy(&resp.body).into_owned(),
            });
        }
        Err(DeskError::Fetch(format!("too many redirects: {url}")))
    }
}

/// Write the request and read the whole response.
fn exchange<S: Read + Write + ?Sized>(stream: &mut S, request: &str) -> Result<RawResponse> {
    stream.write_all(request.as_bytes())?;
    stream.flush()?;

    let mut raw = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                raw.extend_from_slice(&buf[..n]);
                if raw.len() >= MAX_RESPONSE {
                    raw.truncate(MAX_RESPONSE);
                    break;
                }
            },
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            // Servers often drop the TLS connection without close_notify.
            Err(e) if e.kind() == ErrorKind::UnexpectedEof && !raw.is_empty() => break,
            Err(e) => return Err(e.into()),
        }
    }
    parse_response(&raw)
}

fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// A parsed URL the fetcher can connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    https: bool,
    host: String,
    port: u16,
    path: String,
}

impl Target {
    /// Parse `http[s]://host[:port][/path]`.
    fn parse(url: &str) -> Result<Self> {
        let (https, rest) = if let Some(rest) = url.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            (false, rest)
        } else {
            return Err(DeskError::Fetch(format!("unsupported URL: {url}")));
        };
        let (authority, path) = match rest.find(['/', '?']) {
            Some(i) if rest[i..].starts_with('?') => (&rest[..i], format!("/{}", &rest[i..])),
            Some(i) => (&rest[..i], rest[i..].to_string()),
            None => (rest, "/".to_string()),
        };
        if authority.is_empty() {
            return Err(DeskError::Fetch(format!("missing host: {url}")));
        }
        let default_port = if https { 443 } else { 80 };
        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => {
                let port = p
                    .parse::<u16>()
                    .map_err(|_| DeskError::Fetch(format!("bad port: {p}")))?;
                (h, port)
            },
            None => (authority, default_port),
        };
        Ok(Self {
            https,
            host: host.to_string(),
            port,
            path,
        })
    }

    fn scheme(&self) -> &'static str {
        if self.https { "https" } else { "http" }
    }

    fn default_port(&self) -> u16 {
        if self.https { 443 } else { 80 }
    }

    fn host_header(&self) -> String {
        if self.port == self.default_port() {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Resolve a `Location` header value against this URL.
    fn resolve(&self, location: &str) -> Result<Self> {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::parse(location);
        }
        if let Some(rest) = location.strip_prefix("//") {
            return Self::parse(&format!("{}://{rest}", self.scheme()));
        }
        let path = if location.starts_with('/') {
            location.to_string()
        } else {
            let base = self.path.split('?').next().unwrap_or("/");
            let dir = base.rfind('/').map_or("/", |i| &base[..=i]);
            format!("{dir}{location}")
        };
        Ok(Self {
            path,
            ..self.clone()
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme(), self.host_header(), self.path)
    }
}

/// Status, headers and undecoded body of one response.
#[derive(Debug)]
struct RawResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    /// Case-insensitive header lookup.
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn parse_response(raw: &[u8]) -> Result<RawResponse> {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| DeskError::Fetch("malformed response".to_string()))?;
    let head = String::from_utf8_lossy(&raw[..split]);
    let mut lines = head.lines();
    let status_line = lines.next().unwrap_or_default();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| DeskError::Fetch(format!("bad status line: {status_line}")))?;
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    Ok(RawResponse {
        status,
        headers,
        body: raw[split + 4..].to_vec(),
    })
}
