//! Per-call cancellation and deadlines.
//!
//! A [`CallContext`] travels with a single RPC call. The call races the
//! transport future against the context and gives up as soon as the
//! context is cancelled or its deadline passes.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::bridge::error::NetworkError;

/// Cancellation signal and optional deadline for one call.
#[derive(Debug, Clone)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Cancels every [`CallContext`] derived from it.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. Calls already in flight return promptly.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self {
            deadline: None,
            cancel: None,
        }
    }

    /// A context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancel: None,
        }
    }

    /// A context plus the handle that cancels it.
    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancel: Some(rx),
        };
        (ctx, CancelHandle { tx })
    }

    /// Tighten the deadline to at most `timeout` from now.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < candidate => existing,
            _ => candidate,
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether cancellation has already been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map(|rx| *rx.borrow()).unwrap_or(false)
    }

    /// Drive `fut` until it completes or the context ends, whichever is first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, NetworkError>
    where
        F: Future<Output = T>,
    {
        if self.is_cancelled() {
            return Err(NetworkError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = Self::cancelled(self.cancel.clone()) => Err(NetworkError::Cancelled),
            _ = Self::expired(self.deadline) => Err(NetworkError::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }

    async fn cancelled(rx: Option<watch::Receiver<bool>>) {
        match rx {
            Some(mut rx) => {
                let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                // A dropped CancelHandle can never fire.
                if closed {
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending::<()>().await,
        }
    }

    async fn expired(deadline: Option<Instant>) {
        match deadline {
            Some(at) => tokio::time::sleep_until(at).await,
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}
