//! Ctrl+C handling
//!
//! SIGINT cancels the process-wide token; every long-running unit selects on
//! it and winds down on its own.

use futures::stream::StreamExt;
use signal_hook::consts::SIGINT;
use signal_hook_tokio::Signals;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Signal handler that turns Ctrl+C into cancellation
pub struct SignalHandler {
    cancel: CancellationToken,
    task_handle: Option<JoinHandle<()>>,
}

impl SignalHandler {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            task_handle: None,
        }
    }

    /// Start signal handling
    pub fn start(&mut self) -> std::io::Result<()> {
        if self.task_handle.is_some() {
            return Ok(());
        }

        let mut signals = Signals::new([SIGINT])?;
        let cancel = self.cancel.clone();

        let handle = tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                if signal == SIGINT {
                    if cancel.is_cancelled() {
                        // Second Ctrl+C: stop waiting for a graceful exit
                        std::process::exit(130);
                    }
                    info!("Interrupted, shutting down");
                    cancel.cancel();
                }
            }
        });

        self.task_handle = Some(handle);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
