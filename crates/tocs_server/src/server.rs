//! The TCP accept loop.
//!
//! Every accepted connection gets its own thread running a session.

use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tocs_foundation::Result;
use tracing::{error, info, warn};

use crate::connection::Connection;
use crate::context::GameContext;
use crate::session::run_session;

/// A listening game server.
pub struct Server {
    context: Arc<GameContext>,
    listener: TcpListener,
}

impl Server {
    /// Listens on all interfaces at the configured port.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the port cannot be bound.
    pub fn bind(context: Arc<GameContext>) -> Result<Self> {
        let port = context.config.port;
        Self::bind_to(context, ("0.0.0.0", port))
    }

    /// Listens on `addr`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the address cannot be bound.
    pub fn bind_to(context: Arc<GameContext>, addr: impl ToSocketAddrs) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        info!(addr = %listener.local_addr()?, "listening");
        Ok(Self { context, listener })
    }

    /// Returns the address the server listens on.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the socket has no local address.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the listener itself fails.
    pub fn serve(&self) -> Result<()> {
        loop {
            if let Err(e) = self.accept_one() {
                warn!(error = %e, "connection rejected");
            }
        }
    }

    /// Accepts one connection and starts its session thread.
    ///
    /// # Errors
    ///
    /// Returns `Io` if accepting fails or the thread cannot start.
    pub fn accept_one(&self) -> Result<JoinHandle<()>> {
        let (stream, peer) = self.listener.accept()?;
        info!(%peer, "connection accepted");
        let context = Arc::clone(&self.context);
        let handle = thread::Builder::new()
            .name(format!("session-{peer}"))
            .spawn(move || handle_connection(&context, stream, peer))?;
        Ok(handle)
    }
}

fn handle_connection(context: &GameContext, stream: TcpStream, peer: SocketAddr) {
    let config = &context.config;
    let connection = Connection::tcp(
        stream,
        config.connection_retries,
        config.retry_pause(),
        config.idle_timeout(),
    );
    let mut connection = match connection {
        Ok(connection) => connection,
        Err(e) => {
            error!(%peer, error = %e, "could not set up connection");
            return;
        }
    };
    match run_session(context, &mut connection) {
        Ok(()) => info!(%peer, "connection closed"),
        Err(e) => warn!(%peer, error = %e, "session aborted"),
    }
}
