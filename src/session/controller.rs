//! Capture session controller
//!
//! One `CaptureSession` owns one capture attempt end to end. Every signal —
//! host UI gestures, monitor callbacks, the preview timer — is sent as a
//! [`SessionMsg`] over one channel and applied to the state machine in
//! delivery order, so session state has exactly one writer. The future
//! returned by [`CaptureSession::run`] is the session's completion: it
//! resolves exactly once, with `None` meaning cancelled or failed.

use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::monitor::{EventMonitorManager, EventSource};
use super::state::{Outcome, SelectionStateMachine};
use crate::capture::{CaptureSequencer, OverlayVisibility, ScreenCapture, SequencerConfig};
use crate::domain::{Point, Rect, Screen};
use crate::memory::{LastSelection, SelectionMemory};

/// Signals marshaled onto the session's serial execution context
#[derive(Clone, Copy, Debug)]
pub enum SessionMsg {
    BeginDrag(Point),
    UpdateDrag(Point),
    EndDrag,
    CancelKey,
    /// Pointer moved somewhere; informational only
    Activity,
    /// The armed preview delay ran out
    PreviewElapsed,
}

/// Timing configuration for one session
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub sequencer: SequencerConfig,
    /// Grace period between arming a preview and the automatic capture
    pub preview_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sequencer: SequencerConfig::default(),
            preview_delay: Duration::from_secs(1),
        }
    }
}

/// Cheap cloneable sender for feeding signals into a running session.
///
/// Sends are fire-and-forget; signals arriving after the session completed
/// are dropped, which is exactly the at-most-once behavior callers rely on.
#[derive(Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<SessionMsg>,
}

impl SessionHandle {
    pub fn begin_drag(&self, point: Point) {
        self.send(SessionMsg::BeginDrag(point));
    }

    pub fn update_drag(&self, point: Point) {
        self.send(SessionMsg::UpdateDrag(point));
    }

    pub fn end_drag(&self) {
        self.send(SessionMsg::EndDrag);
    }

    pub fn cancel(&self) {
        self.send(SessionMsg::CancelKey);
    }

    fn send(&self, msg: SessionMsg) {
        let _ = self.tx.send(msg);
    }
}

struct ArmedPreview {
    rect: Rect,
    timer: JoinHandle<()>,
}

/// One drag-select-and-capture attempt
pub struct CaptureSession {
    machine: SelectionStateMachine,
    monitors: EventMonitorManager,
    sequencer: CaptureSequencer,
    memory: Arc<dyn SelectionMemory>,
    config: SessionConfig,
    on_rect_changed: Option<Box<dyn FnMut(Rect) + Send>>,
    preview: Option<ArmedPreview>,
    tx: UnboundedSender<SessionMsg>,
    rx: UnboundedReceiver<SessionMsg>,
}

impl CaptureSession {
    pub fn new(
        screen: Screen,
        events: Arc<dyn EventSource>,
        capture: Arc<dyn ScreenCapture>,
        overlay: Arc<dyn OverlayVisibility>,
        memory: Arc<dyn SelectionMemory>,
        config: SessionConfig,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            machine: SelectionStateMachine::new(screen),
            monitors: EventMonitorManager::new(events),
            sequencer: CaptureSequencer::new(capture, overlay, memory.clone(), config.sequencer),
            memory,
            config,
            on_rect_changed: None,
            preview: None,
            tx,
            rx,
        }
    }

    /// Sender for the host UI's gesture callbacks
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            tx: self.tx.clone(),
        }
    }

    /// Redraw hook, fired with the screen-space rect on every drag update
    pub fn on_rect_changed(&mut self, callback: impl FnMut(Rect) + Send + 'static) {
        self.on_rect_changed = Some(Box::new(callback));
    }

    /// Last committed selection, for the "repeat last area" hint
    pub fn last_selection(&self) -> Option<LastSelection> {
        self.memory.load()
    }

    /// Arm the repeat-last-area preview: after the preview delay elapses with
    /// no manual drag, the remembered rect is captured automatically.
    ///
    /// Returns false when there is nothing to repeat (no record, or the
    /// record belongs to another screen).
    pub fn arm_preview(&mut self) -> bool {
        let Some(last) = self.memory.load() else {
            log::debug!("no last selection to arm a preview with");
            return false;
        };
        if last.screen.name != self.machine.screen().name {
            log::debug!(
                "last selection was on {}, session targets {}; not arming preview",
                last.screen.name,
                self.machine.screen().name
            );
            return false;
        }

        self.cancel_preview();
        let tx = self.tx.clone();
        let delay = self.config.preview_delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SessionMsg::PreviewElapsed);
        });
        self.preview = Some(ArmedPreview {
            rect: last.rect,
            timer,
        });
        true
    }

    /// Drive the session to completion.
    ///
    /// Registers input monitors, applies signals in delivery order, and
    /// resolves once: with the captured image on commit, with `None` on
    /// cancellation (escape, too-small selection) or capture failure.
    /// Monitors are released on every path out, including cancellation of
    /// this future (the manager unsubscribes on drop).
    pub async fn run(mut self) -> Option<RgbaImage> {
        let activity_tx = self.tx.clone();
        let cancel_tx = self.tx.clone();
        self.monitors.start(
            Arc::new(move || {
                let _ = activity_tx.send(SessionMsg::Activity);
            }),
            Arc::new(move || {
                let _ = cancel_tx.send(SessionMsg::CancelKey);
            }),
        );

        let result = self.drive().await;
        self.cancel_preview();
        self.monitors.stop();
        result
    }

    async fn drive(&mut self) -> Option<RgbaImage> {
        while let Some(msg) = self.rx.recv().await {
            let outcome = match msg {
                SessionMsg::BeginDrag(point) => {
                    // A manual drag takes priority over a pending auto-capture.
                    self.cancel_preview();
                    self.machine.begin_drag(point)
                }
                SessionMsg::UpdateDrag(point) => self.machine.update_drag(point),
                SessionMsg::EndDrag => self.machine.end_drag(),
                SessionMsg::CancelKey => {
                    self.cancel_preview();
                    self.machine.cancel()
                }
                SessionMsg::Activity => {
                    log::trace!("input activity");
                    Outcome::Ignored
                }
                SessionMsg::PreviewElapsed => match self.preview.take() {
                    Some(armed) => self.machine.commit_armed(armed.rect),
                    // Already cancelled; the queued timer message is stale.
                    None => Outcome::Ignored,
                },
            };

            match outcome {
                Outcome::Ignored => {}
                Outcome::RectChanged(rect) => {
                    if let Some(callback) = &mut self.on_rect_changed {
                        callback(rect);
                    }
                }
                Outcome::Committed(request) => return self.sequencer.run(&request).await,
                Outcome::Cancelled => return None,
            }
        }
        // Channel closed without a terminal signal; treat as cancellation.
        None
    }

    fn cancel_preview(&mut self) {
        if let Some(armed) = self.preview.take() {
            armed.timer.abort();
            log::debug!("pending preview capture cancelled");
        }
    }
}
