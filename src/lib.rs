//! Region selection and capture coordination for screenshot tools.
//!
//! A host application brings the rendering overlay, the pixel-capture
//! primitive and an input signal source; this crate coordinates the rest:
//! tracking a drag-selection through its state machine, converting gesture
//! coordinates into screen space, sequencing hide-overlay-then-capture so the
//! overlay never appears in the result, handling cancellation, and
//! remembering the last selection for quick repeat use.
//!
//! The central type is [`session::CaptureSession`]; its `run` future resolves
//! exactly once per session with the captured image, or `None` on
//! cancellation or failure.

pub mod capture;
pub mod domain;
pub mod memory;
pub mod session;

pub use capture::{CaptureSequencer, OverlayVisibility, ScreenCapture, SequencerConfig};
pub use domain::{OriginConvention, Point, Rect, Screen};
pub use memory::{FileSelectionMemory, InMemorySelectionMemory, LastSelection, SelectionMemory};
pub use session::{CaptureSession, EventSource, SessionConfig, SessionHandle};
