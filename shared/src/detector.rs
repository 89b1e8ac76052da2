use derive_more::Display;

use crate::analytics::{AnalyticsEvent, AnalyticsReporter};
use crate::gallery::GalleryImage;
use crate::verdict::{Overlay, Sound, Verdict};

/// Handed out when a detection starts. Carries the selection generation it
/// was issued for so late responses can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "detection#{}", _0)]
pub struct DetectionTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Selected,
    Loading,
    Resolved,
    Failed,
}

/// What the view should do after a verdict changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictFeedback {
    pub verdict: Verdict,
    pub overlay: Option<Overlay>,
    pub sound: Option<Sound>,
}

/// UI state of the detector page. `I` is whatever the view uses to hold the
/// picked image (a browser file plus its preview URL in the frontend).
#[derive(Debug, Clone)]
pub struct DetectorState<I> {
    selected: Option<I>,
    verdict: Option<String>,
    loading: bool,
    failed: bool,
    generation: u64,
}

impl<I> Default for DetectorState<I> {
    fn default() -> Self {
        Self {
            selected: None,
            verdict: None,
            loading: false,
            failed: false,
            generation: 0,
        }
    }
}

impl<I> DetectorState<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&I> {
        self.selected.as_ref()
    }

    pub fn verdict(&self) -> Option<&str> {
        self.verdict.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.selected.is_none() {
            Phase::Empty
        } else if self.verdict.is_some() {
            Phase::Resolved
        } else if self.failed {
            Phase::Failed
        } else {
            Phase::Selected
        }
    }

    /// Replaces the current image and clears any verdict. An in-flight
    /// request keeps `loading` set until it finishes.
    pub fn select(&mut self, image: I) {
        self.selected = Some(image);
        self.verdict = None;
        self.failed = false;
        self.generation += 1;
    }

    pub fn begin(&mut self) -> Option<DetectionTicket> {
        self.selected.as_ref()?;
        self.loading = true;
        self.failed = false;
        Some(DetectionTicket(self.generation))
    }

    pub fn is_current(&self, ticket: DetectionTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Stores the verdict for `ticket`. Returns true when the stored value
    /// actually changed. Responses for an older selection are dropped.
    pub fn resolve(&mut self, ticket: DetectionTicket, verdict: String) -> bool {
        self.loading = false;
        if !self.is_current(ticket) {
            return false;
        }
        let changed = self.verdict.as_deref() != Some(verdict.as_str());
        self.verdict = Some(verdict);
        changed
    }

    pub fn fail(&mut self, ticket: DetectionTicket) {
        self.loading = false;
        if self.is_current(ticket) {
            self.failed = true;
        }
    }
}

/// Detector page logic with its analytics side effects.
pub struct Detector<I, R> {
    state: DetectorState<I>,
    reporter: R,
}

impl<I, R: AnalyticsReporter> Detector<I, R> {
    pub fn new(reporter: R) -> Self {
        Self {
            state: DetectorState::new(),
            reporter,
        }
    }

    pub fn state(&self) -> &DetectorState<I> {
        &self.state
    }

    pub fn page_loaded(&self) {
        self.reporter.report(&AnalyticsEvent::PageLoad);
    }

    pub fn select_from_gallery(&mut self, image: GalleryImage, handle: I) {
        self.state.select(handle);
        self.reporter
            .report(&AnalyticsEvent::ThumbnailClick(image.path().to_string()));
    }

    pub fn select_from_device(&mut self, handle: I) {
        self.state.select(handle);
    }

    /// `None` when nothing is selected.
    pub fn begin_detection(&mut self) -> Option<DetectionTicket> {
        let ticket = self.state.begin()?;
        self.reporter.report(&AnalyticsEvent::DetectClick);
        Some(ticket)
    }

    /// Applies the outcome of a request. `loading` is cleared whatever the
    /// outcome; errors are handed back for the caller to log.
    pub fn finish_detection<E>(
        &mut self,
        ticket: DetectionTicket,
        outcome: Result<String, E>,
    ) -> Result<Option<VerdictFeedback>, E> {
        let verdict = match outcome {
            Ok(verdict) => verdict,
            Err(err) => {
                self.state.fail(ticket);
                return Err(err);
            }
        };

        if !self.state.resolve(ticket, verdict) {
            return Ok(None);
        }

        let Some(raw) = self.state.verdict().filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        let kind = Verdict::classify(raw);
        self.reporter
            .report(&AnalyticsEvent::DetectionResult(raw.to_string()));

        Ok(Some(VerdictFeedback {
            verdict: kind,
            overlay: kind.overlay(),
            sound: kind.sound(),
        }))
    }
}
