use eyre::{eyre, Result};
use rapid_chart::data_types::{ChartConfig, ResponseRecord, Snapshot, SnapshotPatch};
use rapid_chart::polling::{PollOutcome, PollingCoordinator, ResponseSource};
use rapid_chart::ResponseAside;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Replays canned responses; an exhausted script fails the fetch.
#[derive(Default)]
struct ScriptedSource {
    snapshots: RefCell<VecDeque<Result<SnapshotPatch>>>,
    toggles: RefCell<VecDeque<Result<SnapshotPatch>>>,
    fetches: Cell<usize>,
}

impl ScriptedSource {
    fn with_snapshots(snapshots: Vec<Result<SnapshotPatch>>) -> Self {
        Self {
            snapshots: RefCell::new(snapshots.into()),
            ..Default::default()
        }
    }
}

impl ResponseSource for ScriptedSource {
    async fn fetch_snapshot(&self) -> Result<SnapshotPatch> {
        self.fetches.set(self.fetches.get() + 1);
        self.snapshots
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(eyre!("no more snapshots")))
    }

    async fn fetch_toggle(&self) -> Result<SnapshotPatch> {
        self.toggles
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(eyre!("toggle endpoint unavailable")))
    }
}

fn open_with(ids: &[&str]) -> Result<SnapshotPatch> {
    Ok(SnapshotPatch {
        is_open: Some(true),
        is_staff: None,
        responses: Some(ids.iter().map(|id| ResponseRecord::new(*id, *id)).collect()),
    })
}

fn closed() -> Result<SnapshotPatch> {
    Ok(SnapshotPatch {
        is_open: Some(false),
        ..Default::default()
    })
}

fn staff_aside(is_open: bool) -> ResponseAside {
    ResponseAside::new(
        Snapshot {
            is_open,
            is_staff: true,
            responses: Vec::new(),
        },
        ChartConfig::default(),
    )
}

#[tokio::test(flavor = "current_thread")]
async fn test_polls_until_closed() {
    let source = ScriptedSource::with_snapshots(vec![
        open_with(&["a"]),
        open_with(&["a", "b"]),
        closed(),
        open_with(&["never"]),
    ]);
    let mut aside = staff_aside(true);
    let sleeps = Cell::new(0);

    let coordinator = PollingCoordinator::new(Duration::from_millis(3000));
    let outcome = coordinator
        .run(
            &source,
            |patch| {
                aside.apply(patch, Instant::now());
                aside.state().should_poll()
            },
            |interval| {
                assert_eq!(interval, Duration::from_millis(3000));
                sleeps.set(sleeps.get() + 1);
                std::future::ready(())
            },
        )
        .await;

    assert_eq!(outcome, PollOutcome::Closed);
    assert_eq!(source.fetches.get(), 3);
    assert_eq!(sleeps.get(), 2);
    // The closing payload carried no responses, so the last list is kept.
    assert_eq!(aside.state().responses.len(), 2);
    assert_eq!(aside.chart().bar_count(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn test_fetch_failure_stops_without_retry() {
    let source = ScriptedSource::with_snapshots(vec![
        open_with(&["a"]),
        Err(eyre!("connection reset")),
        open_with(&["a", "b"]),
    ]);
    let mut aside = staff_aside(true);

    let coordinator = PollingCoordinator::new(Duration::from_millis(10));
    let outcome = coordinator
        .run(
            &source,
            |patch| {
                aside.apply(patch, Instant::now());
                aside.state().should_poll()
            },
            |_| std::future::ready(()),
        )
        .await;

    assert_eq!(outcome, PollOutcome::Failed);
    assert_eq!(source.fetches.get(), 2);
    assert_eq!(aside.chart().bar_count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn test_stop_handle_ends_loop() {
    let source = ScriptedSource::with_snapshots(vec![
        open_with(&["a"]),
        open_with(&["a"]),
        open_with(&["a"]),
    ]);
    let coordinator = PollingCoordinator::new(Duration::from_millis(10));
    let handle = coordinator.handle();
    let applied = Cell::new(0);

    let outcome = coordinator
        .run(
            &source,
            |_| {
                applied.set(applied.get() + 1);
                true
            },
            |_| {
                handle.stop();
                std::future::ready(())
            },
        )
        .await;

    assert_eq!(outcome, PollOutcome::Stopped);
    assert_eq!(applied.get(), 1);
    assert_eq!(source.fetches.get(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn test_stopped_before_start() {
    let source = ScriptedSource::default();
    let coordinator = PollingCoordinator::new(Duration::from_millis(10));
    coordinator.handle().stop();

    let outcome = coordinator
        .run(&source, |_| true, |_| std::future::ready(()))
        .await;
    assert_eq!(outcome, PollOutcome::Stopped);
    assert_eq!(source.fetches.get(), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn test_real_sleep_between_polls() {
    let source = ScriptedSource::with_snapshots(vec![open_with(&["a"]), closed()]);
    let coordinator = PollingCoordinator::new(Duration::from_millis(3000));
    let started = tokio::time::Instant::now();

    let outcome = coordinator
        .run(&source, |patch| patch.is_open == Some(true), tokio::time::sleep)
        .await;

    assert_eq!(outcome, PollOutcome::Closed);
    assert!(started.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(flavor = "current_thread")]
async fn test_toggle_opens_and_requests_polling() {
    let source = ScriptedSource::default();
    source.toggles.borrow_mut().push_back(open_with(&["a", "b", "b"]));
    let mut aside = staff_aside(false);

    assert!(aside.toggle(&source).await);
    assert!(aside.state().is_open);
    assert_eq!(aside.chart().bar_count(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn test_toggle_failure_keeps_state() {
    let source = ScriptedSource::default();
    let mut aside = staff_aside(true);
    aside.apply(open_with(&["a"]).unwrap(), Instant::now());

    assert!(!aside.toggle(&source).await);
    assert!(aside.state().is_open);
    assert_eq!(aside.chart().bar_count(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn test_toggle_closed_does_not_poll() {
    let source = ScriptedSource::default();
    source.toggles.borrow_mut().push_back(closed());
    let mut aside = staff_aside(true);

    assert!(!aside.toggle(&source).await);
    assert!(!aside.state().is_open);
}

#[tokio::test(flavor = "current_thread")]
async fn test_full_snapshot_replaces_every_field() {
    let replacement = Snapshot {
        is_open: false,
        is_staff: true,
        responses: vec![ResponseRecord::new("c", "c")],
    };
    let source = ScriptedSource::with_snapshots(vec![
        open_with(&["a", "b"]),
        Ok(replacement.clone().into()),
    ]);
    let mut aside = staff_aside(true);

    let coordinator = PollingCoordinator::new(Duration::from_millis(3000));
    let outcome = coordinator
        .run(
            &source,
            |patch| {
                aside.apply(patch, Instant::now());
                aside.state().should_poll()
            },
            |_| std::future::ready(()),
        )
        .await;

    assert_eq!(outcome, PollOutcome::Closed);
    assert_eq!(aside.state(), &replacement);
    assert_eq!(aside.chart().bar_count(), 1);
}
