//! RAII wrapper around a POSIX message queue descriptor

use super::{IpcError, QueueSpec, Result};
use std::ffi::CString;
use std::io;
use std::time::Duration;

/// Direction a queue is opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAccess {
    /// Receivers open read/write, matching the engine side
    Duplex,
    SendOnly,
}

/// Outcome of a timed receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Received {
    /// A message of this many bytes was copied into the buffer
    Message(usize),
    /// Nothing arrived before the deadline
    TimedOut,
}

/// An open message queue, closed (never unlinked) on drop
pub struct MessageQueue {
    mqd: libc::mqd_t,
    spec: QueueSpec,
}

impl MessageQueue {
    /// Open the queue, creating it with `spec`'s attributes if it doesn't exist
    pub fn open(spec: QueueSpec, access: QueueAccess) -> Result<Self> {
        let name = CString::new(spec.name).map_err(|_| IpcError::InvalidName(spec.name.to_string()))?;

        // SAFETY: mq_attr is plain old data; all-zero is a valid value
        let mut attr: libc::mq_attr = unsafe { std::mem::zeroed() };
        attr.mq_maxmsg = spec.max_messages as libc::c_long;
        attr.mq_msgsize = spec.message_size as libc::c_long;

        let flags = libc::O_CREAT
            | match access {
                QueueAccess::Duplex => libc::O_RDWR,
                QueueAccess::SendOnly => libc::O_WRONLY,
            };
        let mode: libc::mode_t = 0o666;

        // SAFETY: name is NUL-terminated and attr outlives the call
        let mqd = unsafe {
            libc::mq_open(
                name.as_ptr(),
                flags,
                mode as libc::c_uint,
                &mut attr as *mut libc::mq_attr,
            )
        };
        if mqd == -1 as libc::mqd_t {
            return Err(IpcError::Open {
                name: spec.name.to_string(),
                source: io::Error::last_os_error(),
            });
        }

        Ok(Self { mqd, spec })
    }

    pub fn spec(&self) -> QueueSpec {
        self.spec
    }

    /// Block up to `timeout` for the next message
    ///
    /// `buf` must be at least the queue's message size. An interrupted wait is
    /// reported as a timeout so the caller simply loops.
    pub fn receive_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<Received> {
        let deadline = deadline_after(timeout);

        // SAFETY: buf is valid for buf.len() bytes, deadline is a valid timespec
        let n = unsafe {
            libc::mq_timedreceive(
                self.mqd,
                buf.as_mut_ptr() as *mut libc::c_char,
                buf.len(),
                std::ptr::null_mut(),
                &deadline,
            )
        };
        if n >= 0 {
            return Ok(Received::Message(n as usize));
        }

        let err = io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::ETIMEDOUT) | Some(libc::EINTR) => Ok(Received::TimedOut),
            _ => Err(IpcError::Receive { name: self.spec.name.to_string(), source: err }),
        }
    }

    /// Send one message at priority 0, blocking while the queue is full
    pub fn send(&self, msg: &[u8]) -> Result<()> {
        // SAFETY: msg is valid for msg.len() bytes
        let rc = unsafe { libc::mq_send(self.mqd, msg.as_ptr() as *const libc::c_char, msg.len(), 0) };
        if rc == -1 {
            return Err(IpcError::Send {
                name: self.spec.name.to_string(),
                source: io::Error::last_os_error(),
            });
        }
        Ok(())
    }
}

impl Drop for MessageQueue {
    fn drop(&mut self) {
        // SAFETY: mqd came from a successful mq_open and is closed once
        unsafe {
            libc::mq_close(self.mqd);
        }
    }
}

/// Absolute CLOCK_REALTIME deadline, as mq_timedreceive expects
fn deadline_after(timeout: Duration) -> libc::timespec {
    // SAFETY: timespec is plain old data
    let mut now: libc::timespec = unsafe { std::mem::zeroed() };
    // SAFETY: now is a valid out-pointer
    unsafe {
        libc::clock_gettime(libc::CLOCK_REALTIME, &mut now);
    }

    let mut nanos = now.tv_nsec as i64 + i64::from(timeout.subsec_nanos());
    let mut secs = now.tv_sec as i64 + timeout.as_secs() as i64;
    if nanos >= 1_000_000_000 {
        secs += 1;
        nanos -= 1_000_000_000;
    }
    now.tv_sec = secs as libc::time_t;
    now.tv_nsec = nanos as _;
    now
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_is_normalised() {
        let deadline = deadline_after(Duration::from_millis(1999));
        assert!(deadline.tv_nsec >= 0);
        assert!((deadline.tv_nsec as i64) < 1_000_000_000);
    }

    #[test]
    fn test_invalid_name() {
        let spec = QueueSpec { name: "/bad\0name", max_messages: 1, message_size: 4 };
        assert!(matches!(
            MessageQueue::open(spec, QueueAccess::Duplex),
            Err(IpcError::InvalidName(_))
        ));
    }

    #[test]
    fn test_send_and_receive() {
        let name: &'static str =
            Box::leak(format!("/moniq_test_queue_{}", std::process::id()).into_boxed_str());
        let spec = QueueSpec { name, max_messages: 1, message_size: 8 };

        let rx = match MessageQueue::open(spec, QueueAccess::Duplex) {
            Ok(q) => q,
            // mqueue may be unavailable in sandboxed test environments
            Err(e) => {
                eprintln!("skipping: {}", e);
                return;
            }
        };
        let tx = MessageQueue::open(spec, QueueAccess::SendOnly).unwrap();

        tx.send(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(
            rx.receive_timeout(&mut buf, Duration::from_millis(100)).unwrap(),
            Received::Message(8)
        );
        assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            rx.receive_timeout(&mut buf, Duration::from_millis(10)).unwrap(),
            Received::TimedOut
        );

        let c_name = CString::new(name).unwrap();
        // SAFETY: test cleanup of a queue this test created
        unsafe {
            libc::mq_unlink(c_name.as_ptr());
        }
    }
}
