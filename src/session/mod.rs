//! Selection session management
//!
//! This module contains:
//! - The per-session selection state machine
//! - Input monitor subscription lifecycle
//! - The controller serializing all signals onto one execution context

pub mod controller;
pub mod monitor;
pub mod state;

pub use controller::{CaptureSession, SessionConfig, SessionHandle, SessionMsg};
pub use monitor::{
    EventCallback, EventKind, EventMonitorManager, EventSource, InputEvent, KeyCode, MonitorError,
    MonitorHandle, MonitorScope,
};
pub use state::{CaptureRequest, MIN_SELECTION_SIZE, Outcome, Phase, SelectionStateMachine};
