//! Watcher behaviour against a scripted snapshot producer and service

use async_trait::async_trait;
use flightdeck_core::watcher::{SnapshotWatcher, StatusBoard, StatusView, WatcherContext, WatcherSettings};
use flightdeck_core::{AnalysisService, AnalysisStatus, FlightdeckError, FlightdeckResult};
use flightdeck_snapshot::{
    ModificationMarker, Pair, Snapshot, SnapshotStore, StorageError, StorageResult,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// In-memory artifact whose marker changes on every publish
#[derive(Default)]
struct MemoryStore {
    state: Mutex<(u64, Snapshot)>,
    path: PathBuf,
}

impl MemoryStore {
    fn publish(&self, rows: usize) {
        let mut state = self.state.lock().unwrap();
        let mut snapshot = Snapshot::new();
        for i in 0..rows {
            snapshot.push(Pair(i as f64, 0.0), Pair(0.0, 0.0));
        }
        state.0 += 1;
        state.1 = snapshot;
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        self.publish(snapshot.rows());
        Ok(())
    }

    async fn load(&self) -> StorageResult<Snapshot> {
        let state = self.state.lock().unwrap();
        if state.0 == 0 {
            return Err(StorageError::NotFound("memory".into()));
        }
        Ok(state.1.clone())
    }

    async fn marker(&self) -> StorageResult<Option<ModificationMarker>> {
        let state = self.state.lock().unwrap();
        Ok((state.0 > 0).then(|| ModificationMarker {
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(state.0),
            len: state.1.rows() as u64,
        }))
    }

    async fn clear(&self) -> StorageResult<bool> {
        Ok(false)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Counts status queries and answers with a scripted verdict
struct ScriptedService {
    queries: AtomicUsize,
    verdict: Mutex<FlightdeckResult<AnalysisStatus>>,
}

impl ScriptedService {
    fn new() -> Self {
        Self {
            queries: AtomicUsize::new(0),
            verdict: Mutex::new(Ok(AnalysisStatus::Pending)),
        }
    }

    fn answer(&self, verdict: FlightdeckResult<AnalysisStatus>) {
        *self.verdict.lock().unwrap() = verdict;
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for ScriptedService {
    async fn status(&self) -> FlightdeckResult<AnalysisStatus> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.verdict.lock().unwrap().clone()
    }

    async fn formula(&self) -> FlightdeckResult<String> {
        Ok(r"V = 2 \cdot e^2 + 1 \cdot \dot{e}^2".to_string())
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    service: Arc<ScriptedService>,
    board: StatusBoard,
    formula_path: PathBuf,
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<FlightdeckResult<()>>,
    _dir: TempDir,
}

fn start() -> Harness {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(ScriptedService::new());
    let board = StatusBoard::new();
    let formula_path = dir.path().join("formula_from_srv.txt");

    let context = WatcherContext::new(store.clone(), service.clone(), board.clone(), &formula_path);
    let settings = WatcherSettings {
        poll_period: Duration::from_millis(100),
        debounce_delay: Duration::from_secs(1),
        min_rows: 1,
    };
    let cancel = CancellationToken::new();
    let task = tokio::spawn(SnapshotWatcher::new(context, settings).run(cancel.clone()));

    Harness {
        store,
        service,
        board,
        formula_path,
        cancel,
        task,
        _dir: dir,
    }
}

/// Publish `rows` 300ms apart; returns the time of the last publish
async fn burst(store: &MemoryStore, rows: std::ops::RangeInclusive<usize>) -> Instant {
    let mut last = Instant::now();
    for n in rows {
        last = Instant::now();
        store.publish(n);
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    last
}

#[tokio::test(start_paused = true)]
async fn test_one_query_per_burst() {
    let h = start();
    assert_eq!(h.board.current(), StatusView::Hidden);

    let last = burst(&h.store, 1..=5).await;
    assert_eq!(h.board.current(), StatusView::Waiting { rows: 5 });

    // Detection lags by at most one poll period
    tokio::time::sleep_until(last + Duration::from_millis(950)).await;
    assert_eq!(h.service.queries(), 0);
    tokio::time::sleep_until(last + Duration::from_millis(1200)).await;
    assert_eq!(h.service.queries(), 1);

    // Quiet: no more queries
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(h.service.queries(), 1);

    // A second burst re-arms the timer once
    burst(&h.store, 6..=8).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(h.service.queries(), 2);
    assert_eq!(h.board.current(), StatusView::Waiting { rows: 8 });

    h.cancel.cancel();
    h.task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_network_error_keeps_waiting_and_polling() {
    let h = start();
    h.service
        .answer(Err(FlightdeckError::network("connection refused")));

    burst(&h.store, 1..=2).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(h.service.queries(), 1);
    assert_eq!(h.board.current(), StatusView::Waiting { rows: 2 });

    h.service.answer(Ok(AnalysisStatus::Fail));
    burst(&h.store, 3..=3).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(h.service.queries(), 2);
    assert_eq!(h.board.current(), StatusView::Failure);

    h.cancel.cancel();
    h.task.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_success_is_terminal_and_stores_formula() {
    let h = start();
    h.service.answer(Ok(AnalysisStatus::Success));

    burst(&h.store, 1..=3).await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    let formula = r"V = 2 \cdot e^2 + 1 \cdot \dot{e}^2";
    assert_eq!(
        h.board.current(),
        StatusView::Success {
            formula: formula.to_string()
        }
    );
    assert_eq!(std::fs::read_to_string(&h.formula_path).unwrap(), formula);

    // Later verdicts and data do not leave the success view
    h.service.answer(Ok(AnalysisStatus::Fail));
    burst(&h.store, 4..=4).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(h.service.queries(), 2);
    assert!(matches!(h.board.current(), StatusView::Success { .. }));

    h.cancel.cancel();
    h.task.await.unwrap().unwrap();
}
