//! POSIX message-queue plumbing
//!
//! The sound engine talks to the display over two named queues. Both persist
//! across runs: receivers create them if absent and never unlink them.
//!
//! ```text
//! sound engine ──► /delia_msg_queue ─────────► ControlReceiver ──► flume ──► UI tick
//!              └─► /delia_samples_msg_queue ─► SampleReceiver ───► SoundScope::update
//! ```

mod queue;
mod receiver;

pub use queue::{MessageQueue, QueueAccess, Received};
pub use receiver::{ControlReceiver, QueueReceiver, SampleReceiver};

use crate::protocol::{CONTROL_MSG_SIZE, SAMPLE_MSG_SIZE};
use std::time::Duration;
use thiserror::Error;

/// Name, depth and message size of one queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSpec {
    pub name: &'static str,
    pub max_messages: usize,
    pub message_size: usize,
}

/// Control messages from the sound engine
pub const CONTROL_QUEUE: QueueSpec = QueueSpec {
    name: "/delia_msg_queue",
    max_messages: 50,
    message_size: CONTROL_MSG_SIZE,
};

/// Scope sample frames; depth 1 so only the newest frame is ever pending
pub const SAMPLE_QUEUE: QueueSpec = QueueSpec {
    name: "/delia_samples_msg_queue",
    max_messages: 1,
    message_size: SAMPLE_MSG_SIZE,
};

/// How long a receive blocks before the worker rechecks its shutdown flag
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(1);

/// Errors from the message-queue layer
#[derive(Error, Debug)]
pub enum IpcError {
    /// Queue name contains an interior NUL
    #[error("Invalid queue name '{0}'")]
    InvalidName(String),

    /// mq_open failed
    #[error("Failed to open queue '{name}': {source}")]
    Open {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Receive failed with something other than a timeout
    #[error("Receive on '{name}' failed: {source}")]
    Receive {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// mq_send failed
    #[error("Send on '{name}' failed: {source}")]
    Send {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Worker thread could not be started
    #[error("Failed to spawn {name} thread: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, IpcError>;
