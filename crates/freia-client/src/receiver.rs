// ============================================
// File: crates/freia-client/src/receiver.rs
// ============================================
//! # Receive Worker
//!
//! ## Creation Reason
//! The only reader of the socket. Pulls frames, decodes them and appends
//! one log line per frame until the stream ends or goes out of sync.
//!
//! ## Loop
//! ```text
//! ┌─► read 4-byte prefix ── fail ──► "[Disconnected from server]" ─┐
//! │        │                                                       │
//! │   length in 1..=10 MiB? ── no ──► "[Error] Invalid message…" ──┤
//! │        │                                                       │
//! │   read payload ── fail ──► "[Disconnected from server]" ───────┤
//! │        │                                                       │
//! │   transport key? ── no ──► "[Error] Received encrypted…"       │
//! │        │                                                       │
//! │   decode_inbound ──► "sender: text" or error line              │
//! └────────┘                                              teardown ◄┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Decode failures never stop the loop; only I/O and a bad length do
//! - The worker tears the connection down itself on exit, so the state
//!   is `Disconnected` by the time it can be joined
//!
//! ## Last Modified
//! v0.1.0 - Initial receive worker

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, trace, warn};

use freia_core::protocol::validate_frame_len;
use freia_core::ChatCodec;
use freia_transport::FrameReader;

use crate::connection::Shared;
use crate::credentials::Credentials;
use crate::log::{NOTICE_DISCONNECTED, NOTICE_INVALID_LENGTH, NOTICE_NO_TRANSPORT_KEY};

/// Name given to the receive thread.
pub(crate) const WORKER_THREAD_NAME: &str = "freia-recv";

/// Background reader owned by one connection.
pub(crate) struct ReceiveWorker {
    reader: FrameReader<TcpStream>,
    shared: Arc<Shared>,
    credentials: Arc<RwLock<Credentials>>,
    codec: ChatCodec,
}

impl ReceiveWorker {
    pub(crate) fn new(
        stream: TcpStream,
        shared: Arc<Shared>,
        credentials: Arc<RwLock<Credentials>>,
        codec: ChatCodec,
    ) -> Self {
        Self {
            reader: FrameReader::new(stream),
            shared,
            credentials,
            codec,
        }
    }

    /// Runs until the stream fails or the connection is torn down.
    pub(crate) fn run(mut self) {
        debug!("Receive worker started");

        while self.shared.is_running() {
            let length = match self.reader.read_length_prefix() {
                Ok(length) => length,
                Err(e) => {
                    if e.is_peer_closed() || !self.shared.is_running() {
                        debug!(error = %e, "Stream ended");
                    } else {
                        warn!(error = %e, "Length prefix read failed");
                    }
                    self.shared.log.push(NOTICE_DISCONNECTED);
                    break;
                }
            };

            let length = match validate_frame_len(length) {
                Ok(length) => length,
                Err(e) => {
                    warn!(error = %e, "Dropping connection on bad frame length");
                    self.shared.log.push(NOTICE_INVALID_LENGTH);
                    break;
                }
            };

            let payload = match self.reader.read_payload(length) {
                Ok(payload) => payload,
                Err(e) => {
                    debug!(error = %e, length, "Payload read failed");
                    self.shared.log.push(NOTICE_DISCONNECTED);
                    break;
                }
            };

            trace!(length, "Received frame");
            let line = self.decode(&payload);
            self.shared.log.push(line);
        }

        self.shared.teardown();
        info!("Receive worker stopped");
    }

    fn decode(&self, payload: &[u8]) -> String {
        let credentials = self.credentials.read();
        let Some(transport_key) = credentials.transport_key() else {
            return NOTICE_NO_TRANSPORT_KEY.to_owned();
        };

        match self
            .codec
            .decode_inbound(payload, transport_key, credentials.chat_key())
        {
            Ok(line) => line,
            Err(e) => {
                debug!(error = ?e, "Inbound frame rejected");
                e.to_string()
            }
        }
    }
}
