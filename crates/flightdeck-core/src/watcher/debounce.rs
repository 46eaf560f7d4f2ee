//! Single-slot delayed action

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::trace;

struct PendingAction {
    deadline: Instant,
    cancel: CancellationToken,
}

/// Runs at most one action, `delay` after the most recent `schedule` call.
///
/// Scheduling while an action is waiting cancels it and restarts the delay.
/// An action whose delay has elapsed runs to completion even if another one
/// is scheduled meanwhile.
pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingAction>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any waiting action; returns the new deadline
    pub fn schedule<F>(&mut self, action: F) -> Instant
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancel() {
            trace!("Debounce timer restarted");
        }

        let deadline = Instant::now() + self.delay;
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep_until(deadline) => {}
            }
            action.await;
        });

        self.pending = Some(PendingAction { deadline, cancel });
        deadline
    }

    /// Cancel the waiting action, if any; returns whether one was waiting
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) if pending.deadline > Instant::now() => {
                pending.cancel.cancel();
                true
            }
            _ => false,
        }
    }

    /// Whether an action is still waiting for its deadline
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| p.deadline > Instant::now() && !p.cancel.is_cancelled())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
