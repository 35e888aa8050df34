// ============================================
// File: crates/freia-client/src/connection.rs
// ============================================
//! # Connection Manager
//!
//! ## Creation Reason
//! Owns the one relay connection of a chat client: credentials, socket,
//! connection state, receive worker and message log. Composes the
//! validator, the chat codec and the TCP connector.
//!
//! ## Main Functionality
//! - `configure`: Validate inputs, derive both keys, commit atomically
//! - `connect` / `disconnect`: Open or tear down the stream and worker
//! - `send`: Encode, write, echo locally
//! - `get_messages` / `is_connected`: Consumer queries
//!
//! ## State Machine
//! ```text
//!                  connect() ok
//!   Disconnected ────────────────► Connected
//!        ▲                             │
//!        └─────────────────────────────┘
//!     I/O error | bad frame length | disconnect()
//! ```
//!
//! ## Threading
//! ```text
//! consumer thread                       receive worker ("freia-recv")
//! ───────────────                       ─────────────────────────────
//! send()  ── writer lock ─► TcpStream ◄── FrameReader(try_clone)
//! disconnect() ── shutdown(Both) ──────► read fails ─► teardown, exit
//!              └─ join ◄───────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `disconnect()` must SHUT DOWN the socket; closing one clone does not
//!   wake a thread blocked in `read`
//! - `running` is the cancellation token, `state` is the connection
//!   state; they are cleared together in `Shared::teardown`
//! - The public surface returns booleans and log lines; details go to
//!   tracing
//!
//! ## Last Modified
//! v0.1.0 - Initial connection manager

use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use freia_common::{DefaultValidator, Endpoint, Validator};
use freia_core::{ChatCodec, CryptoProvider, Pbkdf2AesCrypto, SymmetricKey};
use freia_transport::{write_frame, TcpConnector, TransportError, DEFAULT_CONNECT_TIMEOUT};

use crate::credentials::Credentials;
use crate::error::{ClientError, Result};
use crate::log::{MessageLog, NOTICE_CONNECTED, NOTICE_SEND_FAILED};
use crate::receiver::{ReceiveWorker, WORKER_THREAD_NAME};

// ============================================
// ConnectionState / ConnectOptions
// ============================================

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No socket is open.
    #[default]
    Disconnected,
    /// A socket is open and the receive worker is running.
    Connected,
}

/// Tunables for opening the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Bound on the TCP connect attempt. Cleared once connected.
    pub connect_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

// ============================================
// Shared
// ============================================

/// State shared between the manager and its receive worker.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    state: Mutex<ConnectionState>,
    running: AtomicBool,
    writer: Mutex<Option<TcpStream>>,
    control: Mutex<Option<TcpStream>>,
    pub(crate) log: MessageLog,
}

impl Shared {
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    fn install(&self, writer: TcpStream, control: TcpStream) {
        *self.writer.lock() = Some(writer);
        *self.control.lock() = Some(control);
        self.running.store(true, Ordering::Release);
        *self.state.lock() = ConnectionState::Connected;
    }

    /// Stops the worker and closes the socket. Idempotent.
    ///
    /// Returns `true` if this call moved the state to `Disconnected`.
    pub(crate) fn teardown(&self) -> bool {
        self.running.store(false, Ordering::Release);

        // Shut down through the control handle first so a send blocked
        // in `write` fails and releases the writer lock.
        if let Some(control) = self.control.lock().take() {
            if let Err(e) = control.shutdown(Shutdown::Both) {
                debug!(error = %e, "Socket shutdown failed");
            }
        }
        drop(self.writer.lock().take());

        let mut state = self.state.lock();
        let was_connected = *state == ConnectionState::Connected;
        *state = ConnectionState::Disconnected;
        if was_connected {
            info!("Connection closed");
        }
        was_connected
    }
}

// ============================================
// ConnectionManager
// ============================================

/// Client for one encrypted chat relay connection.
///
/// All methods take `&self`; the manager can be shared behind an `Arc`
/// between an input task and a display task.
///
/// # Example
/// ```no_run
/// use freia_client::ConnectionManager;
///
/// let client = ConnectionManager::new();
/// if client.configure("127.0.0.1", "9000", "alice", "chat-pw", "relay-pw")
///     && client.connect()
/// {
///     client.send("hello");
///     for line in client.get_messages() {
///         println!("{line}");
///     }
///     client.disconnect();
/// }
/// ```
pub struct ConnectionManager {
    validator: Arc<dyn Validator>,
    codec: ChatCodec,
    connector: TcpConnector,
    credentials: Arc<RwLock<Credentials>>,
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectionManager {
    /// Creates a manager with the default validator, PBKDF2/AES crypto
    /// and a 3 second connect timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ConnectOptions::default())
    }

    /// Creates a manager with default collaborators and custom options.
    #[must_use]
    pub fn with_options(options: ConnectOptions) -> Self {
        Self::with_parts(
            Arc::new(DefaultValidator::new()),
            Arc::new(Pbkdf2AesCrypto::new()),
            options,
        )
    }

    /// Creates a manager from explicit collaborators.
    #[must_use]
    pub fn with_parts(
        validator: Arc<dyn Validator>,
        crypto: Arc<dyn CryptoProvider>,
        options: ConnectOptions,
    ) -> Self {
        Self {
            validator,
            codec: ChatCodec::new(crypto),
            connector: TcpConnector::new(options.connect_timeout),
            credentials: Arc::new(RwLock::new(Credentials::default())),
            shared: Arc::new(Shared::default()),
            worker: Mutex::new(None),
        }
    }

    // ========================================
    // Configuration
    // ========================================

    /// Validates the inputs and derives both keys.
    ///
    /// Nothing is stored unless every field validates and both keys
    /// derive; a later successful call replaces everything.
    ///
    /// # Returns
    /// `true` if the client now holds a complete set of credentials.
    pub fn configure(
        &self,
        address: &str,
        port: &str,
        username: &str,
        chat_password: &str,
        transport_password: &str,
    ) -> bool {
        if let Err(field) =
            self.check_fields(address, port, username, chat_password, transport_password)
        {
            warn!(field, "Configuration rejected by validator");
            return false;
        }

        let endpoint = match Endpoint::parse(address, port) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!(error = %e, "Configuration rejected");
                return false;
            }
        };

        let (chat_key, transport_key) = match self.derive_keys(chat_password, transport_password)
        {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Key derivation failed; keeping previous credentials");
                return false;
            }
        };

        *self.credentials.write() = Credentials::new(endpoint, username, chat_key, transport_key);
        info!(address, port, username, "Client configured");
        true
    }

    fn check_fields(
        &self,
        address: &str,
        port: &str,
        username: &str,
        chat_password: &str,
        transport_password: &str,
    ) -> std::result::Result<(), &'static str> {
        let v = &self.validator;
        if !v.is_valid_address(address) {
            return Err("address");
        }
        if !v.is_valid_port(port) {
            return Err("port");
        }
        if !v.is_valid_username(username) {
            return Err("username");
        }
        if !v.is_valid_password(chat_password) {
            return Err("chat_password");
        }
        if !v.is_valid_password(transport_password) {
            return Err("transport_password");
        }
        Ok(())
    }

    fn derive_keys(
        &self,
        chat_password: &str,
        transport_password: &str,
    ) -> Result<(SymmetricKey, SymmetricKey)> {
        let crypto = self.codec.crypto();
        let chat_key = crypto.derive_key(chat_password)?;
        let transport_key = crypto.derive_key(transport_password)?;
        Ok((chat_key, transport_key))
    }

    // ========================================
    // Connection Lifecycle
    // ========================================

    /// Opens the connection and starts the receive worker.
    ///
    /// # Returns
    /// `false` if already connected, not configured, or any connect step
    /// fails; the state is unchanged in that case.
    pub fn connect(&self) -> bool {
        match self.try_connect() {
            Ok(()) => true,
            Err(e) => {
                warn!(step = e.step(), error = %e, "Connect failed");
                false
            }
        }
    }

    fn try_connect(&self) -> Result<()> {
        if self.shared.state() == ConnectionState::Connected {
            return Err(ClientError::AlreadyConnected);
        }

        // A worker that ended on its own may not have been joined yet.
        self.join_worker();

        let endpoint = {
            let credentials = self.credentials.read();
            match credentials.endpoint() {
                Some(endpoint) if credentials.is_complete() => endpoint.clone(),
                _ => return Err(ClientError::NotConfigured),
            }
        };

        let stream = self.connector.connect(&endpoint)?;
        let reader = stream
            .try_clone()
            .map_err(|e| TransportError::io("cloning stream for reader", e))?;
        let control = stream
            .try_clone()
            .map_err(|e| TransportError::io("cloning stream for shutdown", e))?;

        self.shared.install(stream, control);
        self.shared.log.push(NOTICE_CONNECTED);

        let worker = ReceiveWorker::new(
            reader,
            Arc::clone(&self.shared),
            Arc::clone(&self.credentials),
            self.codec.clone(),
        );
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || worker.run())
            .map_err(|e| {
                self.shared.teardown();
                ClientError::WorkerSpawn(e)
            })?;
        *self.worker.lock() = Some(handle);

        info!(%endpoint, "Connected to relay");
        Ok(())
    }

    /// Closes the connection and waits for the receive worker to exit.
    ///
    /// Safe to call at any time, any number of times.
    pub fn disconnect(&self) {
        if self.shared.teardown() {
            debug!("Disconnect requested");
        }
        self.join_worker();
    }

    fn join_worker(&self) {
        let Some(handle) = self.worker.lock().take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            warn!("Receive worker panicked");
        }
    }

    // ========================================
    // Messaging
    // ========================================

    /// Encrypts and sends `text`, then echoes it into the log.
    ///
    /// Does nothing if not connected or `text` is empty. Encryption
    /// failures and write failures are reported as log lines; a write
    /// failure also tears the connection down.
    pub fn send(&self, text: &str) {
        if text.is_empty() || !self.is_connected() {
            return;
        }

        let (frame, echo) = {
            let credentials = self.credentials.read();
            match self.codec.encode_outbound(
                text,
                credentials.username(),
                credentials.chat_key(),
                credentials.transport_key(),
            ) {
                Ok(frame) => (frame, format!("{}: {text}", credentials.username())),
                Err(e) => {
                    debug!(error = ?e, "Outbound message not sent");
                    self.shared.log.push(e.to_string());
                    return;
                }
            }
        };

        let written = {
            let mut writer = self.shared.writer.lock();
            match writer.as_mut() {
                Some(stream) => write_frame(stream, &frame),
                None => return,
            }
        };

        match written {
            Ok(()) => self.shared.log.push(echo),
            Err(e) => {
                warn!(error = %e, "Failed to write frame");
                self.shared.log.push(NOTICE_SEND_FAILED);
                self.shared.teardown();
            }
        }
    }

    /// Returns a copy of the message log.
    #[must_use]
    pub fn get_messages(&self) -> Vec<String> {
        self.shared.log.snapshot()
    }

    /// Returns the log lines after the first `offset`.
    #[must_use]
    pub fn messages_since(&self, offset: usize) -> Vec<String> {
        self.shared.log.since(offset)
    }

    /// Returns `true` while connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.shared.state() == ConnectionState::Connected
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    /// Returns the configured username, empty until configured.
    #[must_use]
    pub fn username(&self) -> String {
        self.credentials.read().username().to_owned()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("state", &self.state())
            .field("messages", &self.shared.log.len())
            .finish_non_exhaustive()
    }
}

// ============================================
// Tests
// ============================================
