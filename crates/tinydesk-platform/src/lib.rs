//! Platform service abstractions for TINYDESK.
//!
//! The kernel never reads the system clock or opens sockets directly; it
//! goes through these traits so tests can substitute fixed implementations.

pub mod clock;
pub mod fetch;
pub mod tls;

pub use clock::{DesktopClock, TimeService, WallTime};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher, MAX_REDIRECTS, normalize_url};
#[cfg(feature = "tls-rustls")]
pub use tls::RustlsTlsProvider;
pub use tls::{TlsProvider, TlsStream};
