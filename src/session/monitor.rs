//! Input monitor lifecycle
//!
//! Wraps the host's pointer/keyboard signal source. Subscriptions are scoped
//! acquisitions: `start` acquires, `stop` releases, and `Drop` releases again
//! so no exit path of the owning session can leak an OS-level registration.
//!
//! Callbacks run on the source's delivery context, which may be any thread.
//! They must only forward into the session's channel, never touch session
//! state directly.

use std::sync::Arc;

use thiserror::Error;

/// Kinds of input signals a session subscribes to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    PointerDrag,
    KeyPress,
}

/// Scope of a subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorScope {
    /// Fires even when the overlay is not focused
    Global,
    /// Fires only while the overlay has input focus
    Local,
}

/// Key identity; only escape is meaningful to a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Escape,
    Other,
}

/// One input event delivered by the source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerDrag,
    KeyPress(KeyCode),
}

/// Opaque handle identifying one subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonitorHandle(pub u64);

/// Callback invoked on the source's delivery context
pub type EventCallback = Arc<dyn Fn(InputEvent) + Send + Sync>;

/// Registration failure reported by the signal source
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("event source refused {scope:?} {kind:?} registration: {reason}")]
    Refused {
        scope: MonitorScope,
        kind: EventKind,
        reason: String,
    },
}

/// Pointer/keyboard signal source provided by the host
pub trait EventSource: Send + Sync {
    fn subscribe_global(
        &self,
        kind: EventKind,
        callback: EventCallback,
    ) -> Result<MonitorHandle, MonitorError>;

    fn subscribe_local(
        &self,
        kind: EventKind,
        callback: EventCallback,
    ) -> Result<MonitorHandle, MonitorError>;

    fn unsubscribe(&self, handle: MonitorHandle);
}

/// Owns every monitor subscription of one session
pub struct EventMonitorManager {
    source: Arc<dyn EventSource>,
    handles: Vec<MonitorHandle>,
}

impl EventMonitorManager {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            handles: Vec::new(),
        }
    }

    /// Register pointer-drag and key-press monitors at both scopes.
    ///
    /// Idempotent: an already started manager tears its subscriptions down
    /// first, so duplicate registrations cannot accumulate. A source refusing
    /// a registration degrades that scope (logged); the session continues
    /// with whatever did register.
    pub fn start(
        &mut self,
        on_activity: Arc<dyn Fn() + Send + Sync>,
        on_cancel_key: Arc<dyn Fn() + Send + Sync>,
    ) {
        self.stop();

        let dispatch: EventCallback = Arc::new(move |event| match event {
            InputEvent::PointerDrag => on_activity(),
            InputEvent::KeyPress(KeyCode::Escape) => on_cancel_key(),
            InputEvent::KeyPress(KeyCode::Other) => {}
        });

        for scope in [MonitorScope::Global, MonitorScope::Local] {
            for kind in [EventKind::PointerDrag, EventKind::KeyPress] {
                let result = match scope {
                    MonitorScope::Global => self.source.subscribe_global(kind, dispatch.clone()),
                    MonitorScope::Local => self.source.subscribe_local(kind, dispatch.clone()),
                };
                match result {
                    Ok(handle) => self.handles.push(handle),
                    Err(err) => log::warn!("monitoring degraded: {}", err),
                }
            }
        }

        if self.handles.is_empty() {
            log::warn!("no input monitors registered; only direct signals will reach the session");
        }
    }

    /// Release every held subscription; safe to call repeatedly
    pub fn stop(&mut self) {
        for handle in self.handles.drain(..) {
            self.source.unsubscribe(handle);
        }
    }

    /// Number of live subscriptions held by this manager
    pub fn active_monitors(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for EventMonitorManager {
    fn drop(&mut self) {
        self.stop();
    }
}
