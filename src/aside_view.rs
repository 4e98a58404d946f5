//! GPUI view hosting the rapid-response chart, its toggle and the poll loop.

use crate::aside::ResponseAside;
use crate::data_types::{ChartConfig, Snapshot, SnapshotPatch};
use crate::polling::{PollHandle, PollingCoordinator, ResponseSource};
use crate::rendering::{paint_chart, ChartFrame};
use crate::theme::ChartTheme;
use gpui::prelude::*;
use gpui::*;
use std::rc::Rc;
use std::time::Instant;
use tracing::debug;

struct ActivePoll {
    handle: PollHandle,
    task: Task<()>,
}

pub struct ResponseAsideView<S: ResponseSource + 'static> {
    aside: ResponseAside,
    source: Rc<S>,
    pub theme: ChartTheme,
    poll: Option<ActivePoll>,
}

impl<S: ResponseSource + 'static> ResponseAsideView<S> {
    pub fn new(
        initial: Snapshot,
        config: ChartConfig,
        source: Rc<S>,
        cx: &mut Context<Self>,
    ) -> Self {
        let mut view = Self {
            aside: ResponseAside::new(initial, config),
            source,
            theme: ChartTheme::default(),
            poll: None,
        };
        if view.aside.polls_on_load() {
            view.start_polling(cx);
        }
        view
    }

    /// Merges a snapshot, re-renders and reports whether polling may go on.
    pub fn apply_snapshot(&mut self, patch: SnapshotPatch, cx: &mut Context<Self>) -> bool {
        self.aside.apply(patch, Instant::now());
        cx.notify();
        self.aside.state().should_poll()
    }

    pub fn start_polling(&mut self, cx: &mut Context<Self>) {
        if self.poll.is_some() {
            return;
        }

        let source = self.source.clone();
        let coordinator = PollingCoordinator::new(self.aside.config().poll_interval());
        let handle = coordinator.handle();
        let loop_handle = handle.clone();

        let task = cx.spawn(async move |this, cx| {
            let executor = cx.background_executor().clone();
            let outcome = coordinator
                .run(
                    source.as_ref(),
                    |patch| {
                        this.update(cx, |view, cx| view.apply_snapshot(patch, cx))
                            .unwrap_or(false)
                    },
                    |interval| executor.timer(interval),
                )
                .await;
            debug!(?outcome, "poll loop ended");

            this.update(cx, |view, _| {
                if view
                    .poll
                    .as_ref()
                    .is_some_and(|poll| poll.handle.same_loop(&loop_handle))
                {
                    view.poll = None;
                }
            })
            .ok();
        });

        self.poll = Some(ActivePoll {
            handle,
            task,
        });
    }

    /// Stops the poll loop at its next suspension point.
    pub fn stop_polling(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.handle.stop();
            poll.task.detach();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll.is_some()
    }

    pub fn toggle(&mut self, cx: &mut Context<Self>) {
        let source = self.source.clone();
        cx.spawn(async move |this, cx| {
            let result = source.fetch_toggle().await;
            this.update(cx, |view, cx| {
                if view.aside.apply_toggle(result, Instant::now()) {
                    view.start_polling(cx);
                }
                cx.notify();
            })
            .ok();
        })
        .detach();
    }

    pub fn aside(&self) -> &ResponseAside {
        &self.aside
    }

    fn render_toggle(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let label = if self.aside.state().is_open {
            "Close problem"
        } else {
            "Open problem"
        };
        div()
            .id("problem-status-toggle")
            .px_2()
            .py_1()
            .bg(self.theme.toggle_background)
            .text_color(self.theme.toggle_text)
            .cursor(CursorStyle::PointingHand)
            .on_click(cx.listener(|view, _event: &ClickEvent, _window, cx| view.toggle(cx)))
            .child(label)
    }
}

impl<S: ResponseSource + 'static> Render for ResponseAsideView<S> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let now = Instant::now();
        if self.aside.chart().is_animating(now) {
            window.request_animation_frame();
        }

        let frame = ChartFrame::capture(self.aside.chart(), now);
        let theme = self.theme.clone();
        let (width, height) = self.aside.config().outer_size();
        let is_staff = self.aside.state().is_staff;

        div()
            .flex()
            .flex_col()
            .gap_2()
            .bg(self.theme.background)
            .when(is_staff, |d| d.child(self.render_toggle(cx)))
            .child(
                div().w(px(width)).h(px(height)).child(
                    canvas(
                        |_, _, _| {},
                        move |bounds, (), window: &mut Window, cx| {
                            paint_chart(&frame, &theme, bounds, window, cx);
                        },
                    )
                    .size_full(),
                ),
            )
    }
}
