//! Status surface state shared between the poll loop and the UI

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// What the status surface shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusView {
    /// No data has arrived yet
    #[default]
    Hidden,
    Waiting {
        rows: usize,
    },
    Failure,
    Success {
        formula: String,
    },
}

impl StatusView {
    /// Failure and success are final for a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Failure | Self::Success { .. })
    }
}

/// Write side of the status mailbox.
///
/// Only the latest view is kept. Transitions out of a terminal view are
/// ignored, and the surface appears at most once.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    tx: Arc<watch::Sender<StatusView>>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StatusView::Hidden);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<StatusView> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> StatusView {
        self.tx.borrow().clone()
    }

    /// Record received data; shows the waiting surface on first call
    pub fn show_waiting(&self, rows: usize) -> bool {
        self.tx.send_if_modified(|view| match view {
            StatusView::Hidden => {
                info!("Data received ({} rows), showing status surface", rows);
                *view = StatusView::Waiting { rows };
                true
            }
            StatusView::Waiting { rows: shown } if *shown != rows => {
                *shown = rows;
                true
            }
            _ => false,
        })
    }

    pub fn fail(&self) -> bool {
        self.finish(StatusView::Failure)
    }

    pub fn succeed(&self, formula: impl Into<String>) -> bool {
        self.finish(StatusView::Success {
            formula: formula.into(),
        })
    }

    fn finish(&self, terminal: StatusView) -> bool {
        self.tx.send_if_modified(|view| {
            if view.is_terminal() {
                return false;
            }
            *view = terminal;
            true
        })
    }
}
