use eyre::{eyre, Result};
use gpui::{AppContext, TestAppContext};
use rapid_chart::data_types::{ChartConfig, ResponseRecord, Snapshot, SnapshotPatch};
use rapid_chart::polling::ResponseSource;
use rapid_chart::ResponseAsideView;
use std::rc::Rc;

/// Source for views that never poll.
struct OfflineSource;

impl ResponseSource for OfflineSource {
    async fn fetch_snapshot(&self) -> Result<SnapshotPatch> {
        Err(eyre!("offline"))
    }

    async fn fetch_toggle(&self) -> Result<SnapshotPatch> {
        Err(eyre!("offline"))
    }
}

fn learner_state() -> Snapshot {
    Snapshot::from_block_attributes("True", "False")
}

#[gpui::test]
fn test_view_starts_empty(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        ResponseAsideView::new(
            learner_state(),
            ChartConfig::default(),
            Rc::new(OfflineSource),
            cx,
        )
    });

    window
        .update(cx, |view, _window, _cx| {
            assert!(!view.is_polling());
            assert_eq!(view.aside().chart().bar_count(), 0);
            assert_eq!(view.aside().chart().message(), Some("No data available"));
        })
        .unwrap();
}

#[gpui::test]
fn test_view_applies_snapshot(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        ResponseAsideView::new(
            learner_state(),
            ChartConfig::default(),
            Rc::new(OfflineSource),
            cx,
        )
    });

    let keep_polling = window
        .update(cx, |view, _window, cx| {
            view.apply_snapshot(
                SnapshotPatch {
                    responses: Some(vec![
                        ResponseRecord::new("a", "Option A"),
                        ResponseRecord::new("b", "Option B"),
                        ResponseRecord::new("a", "Option A"),
                    ]),
                    ..Default::default()
                },
                cx,
            )
        })
        .unwrap();
    cx.run_until_parked();

    // Not staff: the loop must not continue.
    assert!(!keep_polling);
    window
        .update(cx, |view, _window, _cx| {
            let chart = view.aside().chart();
            assert_eq!(chart.bar_count(), 2);
            assert_eq!(chart.message(), None);
            assert_eq!(chart.color_domain().len(), 2);
        })
        .unwrap();
}

#[gpui::test]
fn test_staff_view_stops_polling_on_failure(cx: &mut TestAppContext) {
    let window = cx.add_window(|_window, cx| {
        ResponseAsideView::new(
            Snapshot::from_block_attributes("True", "True"),
            ChartConfig::default(),
            Rc::new(OfflineSource),
            cx,
        )
    });

    window
        .update(cx, |view, _window, _cx| assert!(view.is_polling()))
        .unwrap();

    cx.run_until_parked();

    window
        .update(cx, |view, _window, _cx| {
            assert!(!view.is_polling());
            assert_eq!(view.aside().chart().bar_count(), 0);
        })
        .unwrap();
}

#[gpui::test]
fn test_failed_toggle_keeps_state(cx: &mut TestAppContext) {
    let entity = cx.update(|cx| {
        cx.new(|cx| {
            ResponseAsideView::new(
                learner_state(),
                ChartConfig::default(),
                Rc::new(OfflineSource),
                cx,
            )
        })
    });

    entity.update(cx, |view, cx| view.toggle(cx));
    cx.run_until_parked();

    entity.read_with(cx, |view, _| {
        assert!(view.aside().state().is_open);
        assert!(!view.is_polling());
    });
}
