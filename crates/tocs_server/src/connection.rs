//! Message framing over byte streams.
//!
//! Every message ends with the separator byte `0x17` (ETB). A separator
//! inside a message travels as the escape sequence `%0x17;`. Incoming
//! messages are limited to [`MAX_FRAME`] bytes.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tocs_engine::Notifier;
use tocs_foundation::{Error, ErrorKind, Result};
use tracing::{debug, info, warn};

use crate::terminal::Terminal;

/// Byte terminating every message.
pub const SEPARATOR: u8 = 0x17;

/// Longest incoming message, separator excluded, in bytes.
pub const MAX_FRAME: usize = 4096;

/// Replacement for a separator byte inside a message.
pub const ESCAPED_SEPARATOR: &str = "%0x17;";

const SEPARATOR_CHAR: char = '\u{17}';

/// Replaces separator bytes in `text` by their escape sequence.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace(SEPARATOR_CHAR, ESCAPED_SEPARATOR)
}

/// Restores separator bytes in `text`.
#[must_use]
pub fn unescape(text: &str) -> String {
    text.replace(ESCAPED_SEPARATOR, &SEPARATOR_CHAR.to_string())
}

/// Writes framed messages, retrying failed deliveries.
///
/// Shared between a session and the threads that notify it, so writes
/// never interleave.
pub struct MessageWriter<W> {
    sink: Mutex<W>,
    retries: u32,
    pause: Duration,
}

impl<W: Write> MessageWriter<W> {
    /// Wraps `sink`. A message is attempted `retries` times (at least
    /// once), sleeping `pause` after each failure.
    pub fn new(sink: W, retries: u32, pause: Duration) -> Self {
        Self {
            sink: Mutex::new(sink),
            retries: retries.max(1),
            pause,
        }
    }

    /// Writes one message followed by the separator.
    ///
    /// # Errors
    ///
    /// Returns the last `Io` error once every attempt has failed.
    pub fn send(&self, text: &str) -> Result<()> {
        let mut frame = escape(text).into_bytes();
        frame.push(SEPARATOR);

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let mut last_error = None;
        for attempt in 1..=self.retries {
            match sink.write_all(&frame).and_then(|()| sink.flush()) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!(attempt, error = %e, "message delivery failed");
                    last_error = Some(e);
                    thread::sleep(self.pause);
                }
            }
        }
        Err(last_error.map_or_else(|| Error::internal("no delivery attempted"), Error::from))
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Notifier for MessageWriter<W> {
    fn notify(&self, message: &str) {
        if let Err(e) = self.send(message) {
            warn!(error = %e, "notification lost");
        }
    }
}

/// A framed, bidirectional message channel.
pub struct Connection<R, W> {
    reader: BufReader<R>,
    writer: Arc<MessageWriter<W>>,
}

impl Connection<TcpStream, TcpStream> {
    /// Wraps an accepted TCP stream.
    ///
    /// A single write gives up after `pause`; reads give up after `idle`,
    /// or never when it is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the stream cannot be configured or cloned for writing.
    pub fn tcp(stream: TcpStream, retries: u32, pause: Duration, idle: Option<Duration>) -> Result<Self> {
        stream.set_write_timeout((!pause.is_zero()).then_some(pause))?;
        stream.set_read_timeout(idle.filter(|idle| !idle.is_zero()))?;
        let writer = stream.try_clone()?;
        Ok(Self::new(stream, writer, retries, pause))
    }
}

impl<R: Read, W: Write> Connection<R, W> {
    /// Creates a connection reading from `reader` and writing to `writer`.
    pub fn new(reader: R, writer: W, retries: u32, pause: Duration) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: Arc::new(MessageWriter::new(writer, retries, pause)),
        }
    }

    /// Reads the next message. Returns `None` at the end of the stream.
    ///
    /// A final message without a separator is still delivered. Carriage
    /// returns and newlines around a message are dropped.
    ///
    /// # Errors
    ///
    /// Returns `Io` if reading fails or the message exceeds [`MAX_FRAME`].
    pub fn receive(&mut self) -> Result<Option<String>> {
        let mut frame = Vec::new();
        let limit = (MAX_FRAME + 1) as u64;
        let read = (&mut self.reader).take(limit).read_until(SEPARATOR, &mut frame)?;
        if read == 0 {
            return Ok(None);
        }
        if frame.last() == Some(&SEPARATOR) {
            frame.pop();
        } else if frame.len() > MAX_FRAME {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("message longer than {MAX_FRAME} bytes"),
            )
            .into());
        }
        let text = String::from_utf8_lossy(&frame);
        Ok(Some(unescape(text.trim_matches(['\r', '\n']))))
    }

    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns `Io` once every delivery attempt has failed.
    pub fn send(&self, text: &str) -> Result<()> {
        self.writer.send(text)
    }
}

impl<R, W> Terminal for Connection<R, W>
where
    R: Read,
    W: Write + Send + 'static,
{
    fn write(&mut self, text: &str) -> Result<()> {
        self.send(text)
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if !prompt.is_empty() {
            self.send(prompt)?;
        }
        match self.receive() {
            Err(Error {
                kind: ErrorKind::Io(e),
                ..
            }) if e.kind() == io::ErrorKind::ConnectionReset => Ok(None),
            Err(Error {
                kind: ErrorKind::Io(e),
                ..
            }) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                info!("player idle; closing the session");
                Ok(None)
            }
            other => other,
        }
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.writer) as Arc<dyn Notifier>
    }
}
