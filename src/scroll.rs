//! Scroll progress indicator.
//!
//! Every `.progress-bar` / `.progress-bar-ds` element is scaled horizontally
//! by how far the page has been scrolled.
//!
//! PERFORMANCE
//! ===========
//! Scroll and resize fire far more often than the screen repaints, so updates
//! are coalesced: the first request in a frame schedules one animation-frame
//! render and later requests are dropped until that render runs. The render
//! at setup bypasses this so bars are positioned before any event fires.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::ScrollProgressConfig;
use crate::dom::{DocumentContext, DomEvent, EventKind, ListenOptions, ScrollMetrics, Target};
use crate::subscription::Teardown;

/// Fraction of the scrollable distance already scrolled, in `[0, 1]`.
///
/// Pages that do not overflow the viewport report `0`.
#[must_use]
pub fn scroll_ratio(metrics: ScrollMetrics) -> f64 {
    let max = metrics.scroll_height - metrics.viewport_height;
    if max > 0.0 {
        (metrics.scroll_top / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Progress bars plus the pending-frame flag.
pub struct ScrollProgress<D: DocumentContext> {
    doc: Rc<D>,
    bars: Vec<D::Element>,
    frame_pending: Cell<bool>,
}

impl<D: DocumentContext + 'static> ScrollProgress<D> {
    /// `None` when the page has no progress bar.
    pub fn attach(doc: &Rc<D>, config: &ScrollProgressConfig) -> Option<Rc<Self>> {
        let bars = doc.query_all(&config.bar_selector);
        if bars.is_empty() {
            return None;
        }
        Some(Rc::new(Self { doc: Rc::clone(doc), bars, frame_pending: Cell::new(false) }))
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        scroll_ratio(self.doc.scroll_metrics())
    }

    /// Apply the current ratio to every bar.
    pub fn render(&self) {
        let transform = format!("scaleX({})", self.ratio());
        for bar in &self.bars {
            self.doc.set_style(bar, "transform", &transform);
        }
    }

    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.frame_pending.get()
    }

    /// Schedule a render for the next frame unless one is already scheduled.
    pub fn request_update(self: &Rc<Self>) {
        if self.frame_pending.replace(true) {
            return;
        }
        let this = Rc::clone(self);
        self.doc.request_animation_frame(Box::new(move || {
            this.render();
            this.frame_pending.set(false);
        }));
    }

    /// Register the passive scroll listener and the resize listener.
    pub fn listen(self: &Rc<Self>) -> Teardown {
        [(EventKind::Scroll, ListenOptions::passive()), (EventKind::Resize, ListenOptions::default())]
            .into_iter()
            .map(|(kind, options)| {
                let this = Rc::clone(self);
                self.doc.listen(Target::Window, kind, options, Box::new(move |_: &DomEvent| this.request_update()))
            })
            .collect()
    }
}

/// Render once immediately, then keep the bars in sync with scrolling.
pub fn mount_scroll_progress<D: DocumentContext + 'static>(doc: &Rc<D>, config: &ScrollProgressConfig) -> Teardown {
    let Some(progress) = ScrollProgress::attach(doc, config) else {
        return Teardown::inert();
    };
    progress.render();
    progress.listen()
}
