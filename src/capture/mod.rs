//! Capture collaborator seams and the capture sequencer
//!
//! The pixel-capture primitive and the overlay renderer live in the host
//! application; this module only defines the traits the sequencer drives.

use anyhow::Result;
use image::RgbaImage;

use crate::domain::{Rect, Screen};

pub mod sequencer;

pub use sequencer::{CaptureSequencer, SequencerConfig};

/// Pixel-capture primitive provided by the host.
pub trait ScreenCapture: Send + Sync {
    /// Capture `screen`, restricted to `rect` in the screen's native space.
    /// `None` captures the full screen.
    fn capture(&self, screen: &Screen, rect: Option<Rect>) -> Result<RgbaImage>;
}

/// Hook into the overlay renderer to hide selection visuals while sampling.
pub trait OverlayVisibility: Send + Sync {
    /// Suppress (or restore) the overlay's selection visuals.
    fn set_suppressed(&self, suppressed: bool);
}
