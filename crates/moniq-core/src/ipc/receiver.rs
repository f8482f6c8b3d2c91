//! Queue receiver threads
//!
//! One dedicated thread per queue. Each blocks on the queue with a short
//! timeout so it can observe its shutdown flag, hands every full-size message
//! to a handler and stops on the first hard receive error.

use super::queue::{MessageQueue, QueueAccess, Received};
use super::{IpcError, QueueSpec, Result, CONTROL_QUEUE, RECEIVE_TIMEOUT, SAMPLE_QUEUE};
use crate::protocol::{wire, ControlMessage, DecodeError};
use crate::scope::SoundScope;
use flume::Sender;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Receiver thread handle
///
/// Owns the thread join handle and a shutdown flag.
/// When dropped, signals the thread to stop and waits for it.
pub struct QueueReceiver {
    /// Shutdown signal
    shutdown: Arc<AtomicBool>,
    /// Thread join handle
    handle: Option<thread::JoinHandle<()>>,
    /// Log prefix
    label: &'static str,
    /// Whether the receive loop is still running (set to false on exit)
    alive: Arc<AtomicBool>,
}

impl QueueReceiver {
    /// Spawn a receiver thread for `spec`
    ///
    /// - `label`: log prefix, e.g. `IPC control`
    /// - `handler`: called with each full-size message; `Break` stops the loop
    ///
    /// The queue is opened on the new thread. If that fails the thread logs the
    /// error and exits; the rest of the display carries on without this source.
    pub fn spawn<F>(spec: QueueSpec, label: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(&[u8]) -> ControlFlow<()> + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let alive = Arc::new(AtomicBool::new(true));
        let alive_clone = alive.clone();

        let handle = thread::Builder::new()
            .name(format!("ipc-{}", spec.name.trim_start_matches('/')))
            .spawn(move || {
                Self::receive_loop(spec, label, handler, shutdown_clone);
                alive_clone.store(false, Ordering::Relaxed);
            })
            .map_err(|source| IpcError::Spawn { name: label.to_string(), source })?;

        Ok(Self {
            shutdown,
            handle: Some(handle),
            label,
            alive,
        })
    }

    /// Check if the receive loop is still running
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    fn receive_loop<F>(spec: QueueSpec, label: &str, mut handler: F, shutdown: Arc<AtomicBool>)
    where
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        let queue = match MessageQueue::open(spec, QueueAccess::Duplex) {
            Ok(queue) => queue,
            Err(e) => {
                log::error!("[{}] {}", label, e);
                return;
            }
        };
        log::info!("[{}] Receiving on {}", label, spec.name);

        let mut buf = vec![0u8; spec.message_size];
        while !shutdown.load(Ordering::Relaxed) {
            match queue.receive_timeout(&mut buf, RECEIVE_TIMEOUT) {
                Ok(Received::Message(n)) if n == spec.message_size => {
                    if handler(&buf).is_break() {
                        break;
                    }
                }
                Ok(Received::Message(n)) => {
                    log::debug!("[{}] Ignoring short message ({} of {} bytes)", label, n, spec.message_size);
                }
                Ok(Received::TimedOut) => {}
                Err(e) => {
                    log::error!("[{}] {}", label, e);
                    break;
                }
            }
        }

        log::info!("[{}] Receiver stopped", label);
    }
}

impl Drop for QueueReceiver {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            log::debug!("[{}] Waiting for receiver thread to stop...", self.label);
            let _ = handle.join();
        }
    }
}

/// Decodes control messages and forwards them, in order, to the UI
pub struct ControlReceiver(QueueReceiver);

impl ControlReceiver {
    pub fn spawn(event_tx: Sender<ControlMessage>) -> Result<Self> {
        QueueReceiver::spawn(CONTROL_QUEUE, "IPC control", move |bytes| {
            forward_control(bytes, &event_tx)
        })
        .map(Self)
    }

    pub fn is_alive(&self) -> bool {
        self.0.is_alive()
    }
}

fn forward_control(bytes: &[u8], event_tx: &Sender<ControlMessage>) -> ControlFlow<()> {
    match ControlMessage::decode(bytes) {
        Ok(msg) => {
            log::trace!("[IPC control] {:?}", msg.kind());
            // Blocking send keeps FIFO order; the UI drains every tick
            if event_tx.send(msg).is_err() {
                log::info!("[IPC control] UI channel closed");
                return ControlFlow::Break(());
            }
        }
        Err(DecodeError::UnknownKind(kind)) => {
            log::debug!("[IPC control] Ignoring unknown message kind {}", kind);
        }
        Err(e) => {
            log::debug!("[IPC control] {}", e);
        }
    }
    ControlFlow::Continue(())
}

/// Feeds sample frames straight into the scope pipeline
pub struct SampleReceiver(QueueReceiver);

impl SampleReceiver {
    pub fn spawn(scope: SoundScope) -> Result<Self> {
        QueueReceiver::spawn(SAMPLE_QUEUE, "IPC samples", move |bytes| {
            if let Some(frame) = wire::read_sample_frame(bytes) {
                scope.update(&frame);
            }
            ControlFlow::Continue(())
        })
        .map(Self)
    }

    pub fn is_alive(&self) -> bool {
        self.0.is_alive()
    }
}
