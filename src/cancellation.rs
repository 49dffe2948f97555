use crate::error::Interruption;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cloneable flag that lets another thread ask a running factorization to stop.
/// The factorization checks it once per iteration.
///
/// # Examples
/// ```
///use symnmf::CancellationToken;
///
///let token = CancellationToken::new();
///let handle = token.clone();
///handle.cancel();
///assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Combines an optional token and an optional deadline into the per-iteration check.
#[derive(Debug)]
pub(crate) struct Watchdog<'a> {
    token: Option<&'a CancellationToken>,
    deadline: Option<Instant>,
}

impl<'a> Watchdog<'a> {
    pub(crate) fn start(
        token: Option<&'a CancellationToken>,
        time_limit: Option<Duration>,
    ) -> Self {
        let deadline = time_limit.and_then(|limit| Instant::now().checked_add(limit));
        Self { token, deadline }
    }

    pub(crate) fn check(&self, iterations: usize) -> Result<(), Interruption> {
        if self.token.is_some_and(CancellationToken::is_cancelled) {
            return Err(Interruption::Cancelled { iterations });
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Err(Interruption::DeadlineExceeded { iterations })
            }
            _ => Ok(()),
        }
    }
}
