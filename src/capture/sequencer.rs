//! Hide-then-capture sequencing
//!
//! The one ordering that matters here: overlay visuals are suppressed and
//! given a settle interval to actually leave the framebuffer before the
//! pixels are sampled. Sampling first would leak the selection chrome into
//! the result.

use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;

use super::{OverlayVisibility, ScreenCapture};
use crate::memory::{LastSelection, SelectionMemory};
use crate::session::state::CaptureRequest;

/// Timing knobs for the sequencer
#[derive(Clone, Copy, Debug)]
pub struct SequencerConfig {
    /// Wait between suppressing the overlay and sampling pixels
    pub settle_delay: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            // Long enough to outrun compositor redraw latency.
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// Runs one committed capture request to completion
pub struct CaptureSequencer {
    capture: Arc<dyn ScreenCapture>,
    overlay: Arc<dyn OverlayVisibility>,
    memory: Arc<dyn SelectionMemory>,
    config: SequencerConfig,
}

impl CaptureSequencer {
    pub fn new(
        capture: Arc<dyn ScreenCapture>,
        overlay: Arc<dyn OverlayVisibility>,
        memory: Arc<dyn SelectionMemory>,
        config: SequencerConfig,
    ) -> Self {
        Self {
            capture,
            overlay,
            memory,
            config,
        }
    }

    /// Suppress the overlay, settle, sample, restore, persist.
    ///
    /// Returns `None` when the capture primitive fails; the failure is logged
    /// and the previous last-selection record is left intact. On success the
    /// record is saved before this future resolves, so a caller observing the
    /// image can immediately read a consistent [`SelectionMemory`].
    pub async fn run(&self, request: &CaptureRequest) -> Option<RgbaImage> {
        self.overlay.set_suppressed(true);
        tokio::time::sleep(self.config.settle_delay).await;

        let image = match self.capture.capture(&request.screen, Some(request.rect)) {
            Ok(image) => {
                log::debug!(
                    "captured {}x{} region of {}",
                    image.width(),
                    image.height(),
                    request.screen.name
                );
                Some(image)
            }
            Err(err) => {
                log::warn!("capture primitive failed: {:#}", err);
                None
            }
        };

        self.overlay.set_suppressed(false);

        if image.is_some() {
            self.memory.save(LastSelection {
                rect: request.rect,
                screen: request.screen.clone(),
            });
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OriginConvention, Rect, Screen};
    use crate::memory::InMemorySelectionMemory;
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// Shared journal recording the order of collaborator calls
    type Journal = Arc<Mutex<Vec<&'static str>>>;

    struct JournalingOverlay(Journal);

    impl OverlayVisibility for JournalingOverlay {
        fn set_suppressed(&self, suppressed: bool) {
            self.0
                .lock()
                .unwrap()
                .push(if suppressed { "hide" } else { "show" });
        }
    }

    struct JournalingCapture {
        journal: Journal,
        fail: bool,
    }

    impl ScreenCapture for JournalingCapture {
        fn capture(&self, _screen: &Screen, rect: Option<Rect>) -> anyhow::Result<RgbaImage> {
            self.journal.lock().unwrap().push("capture");
            if self.fail {
                return Err(anyhow!("compositor rejected the request"));
            }
            let rect = rect.expect("sequencer always restricts to the committed rect");
            Ok(RgbaImage::new(rect.width as u32, rect.height as u32))
        }
    }

    fn request() -> CaptureRequest {
        CaptureRequest {
            screen: Screen::new(
                "DP-1",
                Rect::new(0.0, 0.0, 1920.0, 1080.0),
                OriginConvention::TopLeft,
            ),
            rect: Rect::new(100.0, 100.0, 50.0, 50.0),
        }
    }

    fn sequencer(fail: bool) -> (CaptureSequencer, Journal, Arc<InMemorySelectionMemory>) {
        let journal: Journal = Journal::default();
        let memory = Arc::new(InMemorySelectionMemory::default());
        let sequencer = CaptureSequencer::new(
            Arc::new(JournalingCapture {
                journal: journal.clone(),
                fail,
            }),
            Arc::new(JournalingOverlay(journal.clone())),
            memory.clone(),
            SequencerConfig {
                settle_delay: Duration::from_millis(1),
            },
        );
        (sequencer, journal, memory)
    }

    #[tokio::test]
    async fn test_overlay_hidden_before_sampling() {
        let (sequencer, journal, _) = sequencer(false);
        let image = sequencer.run(&request()).await;
        assert!(image.is_some());
        assert_eq!(*journal.lock().unwrap(), vec!["hide", "capture", "show"]);
    }

    #[tokio::test]
    async fn test_success_persists_last_selection() {
        let (sequencer, _, memory) = sequencer(false);
        let req = request();
        let image = sequencer.run(&req).await.expect("capture succeeds");
        assert_eq!(image.width(), 50);
        let last = memory.load().expect("record saved");
        assert_eq!(last.rect, req.rect);
        assert_eq!(last.screen, req.screen);
    }

    #[tokio::test]
    async fn test_primitive_failure_yields_none_and_keeps_old_record() {
        let (sequencer, journal, memory) = sequencer(true);
        let previous = LastSelection {
            rect: Rect::new(1.0, 2.0, 30.0, 40.0),
            screen: request().screen,
        };
        memory.save(previous.clone());

        assert!(sequencer.run(&request()).await.is_none());
        assert_eq!(memory.load(), Some(previous));
        // Overlay is restored even when the primitive fails.
        assert_eq!(*journal.lock().unwrap(), vec!["hide", "capture", "show"]);
    }
}
