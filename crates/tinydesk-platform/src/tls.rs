//! TLS stream wrapping for `https://` fetches.
//!
//! [`TlsProvider`] upgrades a connected `TcpStream` into an encrypted
//! stream. The rustls-backed [`RustlsTlsProvider`] is compiled in with the
//! `tls-rustls` feature (on by default).

use std::io::{Read, Write};
use std::net::TcpStream;

use tinydesk_types::error::Result;

/// A bidirectional byte stream that can cross thread boundaries.
pub trait TlsStream: Read + Write + Send {}

impl<T: Read + Write + Send> TlsStream for T {}

/// Upgrades plain TCP connections to TLS.
pub trait TlsProvider: Send + Sync {
    /// Run the handshake against `server_name` and return the encrypted
    /// stream.
    fn connect_tls(&self, stream: TcpStream, server_name: &str) -> Result<Box<dyn TlsStream>>;
}

#[cfg(feature = "tls-rustls")]
pub use rustls_provider::RustlsTlsProvider;

#[cfg(feature = "tls-rustls")]
mod rustls_provider {
    use std::net::TcpStream;
    use std::sync::Arc;

    use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
    use rustls_pki_types::ServerName;
    use tinydesk_types::error::{DeskError, Result};

    use super::{TlsProvider, TlsStream};

    /// TLS provider backed by rustls with the Mozilla root set.
    pub struct RustlsTlsProvider {
        config: Arc<ClientConfig>,
    }

    impl RustlsTlsProvider {
        pub fn new() -> Self {
            let root_store = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            let config = ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();
            Self {
                config: Arc::new(config),
            }
        }
    }

    impl Default for RustlsTlsProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    impl std::fmt::Debug for RustlsTlsProvider {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("RustlsTlsProvider").finish_non_exhaustive()
        }
    }

    impl TlsProvider for RustlsTlsProvider {
        fn connect_tls(
            &self,
            mut stream: TcpStream,
            server_name: &str,
        ) -> Result<Box<dyn TlsStream>> {
            let sni = ServerName::try_from(server_name.to_owned())
                .map_err(|e| DeskError::Fetch(format!("invalid server name {server_name}: {e}")))?;
            let mut conn = ClientConnection::new(Arc::clone(&self.config), sni)
                .map_err(|e| DeskError::Fetch(format!("TLS setup failed: {e}")))?;
            // Finish the handshake here so certificate errors surface as
            // connect failures rather than on the first read.
            while conn.is_handshaking() {
                conn.complete_io(&mut stream).map_err(|e| {
                    DeskError::Fetch(format!("TLS handshake with {server_name} failed: {e}"))
                })?;
            }
            log::debug!("TLS established with {server_name}");
            Ok(Box::new(StreamOwned::new(conn, stream)))
        }
    }
}

#[cfg(all(test, feature = "tls-rustls"))]
mod tests {
    use std::io::Write;
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    use super::*;

    fn loopback_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (server, _) = listener.accept().unwrap();
        (client, server)
    }

    #[test]
    fn rejects_invalid_server_name() {
        let (client, _server) = loopback_pair();
        let err = RustlsTlsProvider::new()
            .connect_tls(client, "not a host name")
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid server name"));
    }

    #[test]
    fn handshake_fails_against_plain_http_peer() {
        let (client, mut server) = loopback_pair();
        let peer = thread::spawn(move || {
            let _ = server.write_all(b"HTTP/1.0 200 OK\r\n\r\nplain");
        });
        let err = RustlsTlsProvider::new()
            .connect_tls(client, "localhost")
            .err()
            .unwrap();
        assert!(err.to_string().contains("handshake"));
        peer.join().unwrap();
    }
}
