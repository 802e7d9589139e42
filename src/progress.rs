//! Progress-callback trait for per-slide generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::GenerationConfigBuilder::progress_callback`] to receive
//! events as the orchestrator works through the deck.
//!
//! # Why callbacks instead of channels?
//!
//! The host decides where events go (a terminal progress bar, a log, a job
//! table) without the library knowing how it communicates. The trait is
//! `Send + Sync` because slides are generated concurrently.
//!
//! # Example
//!
//! ```rust
//! use edgequake_deck::{CodeSource, ContentSource, GenerationConfig, GenerationProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl GenerationProgressCallback for CountingCallback {
//!     fn on_slide_complete(&self, position: usize, total: usize, _: ContentSource, _: CodeSource) {
//!         let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("slide {position} done ({done}/{total})");
//!     }
//! }
//!
//! let config = GenerationConfig::builder()
//!     .offline(true)
//!     .progress_callback(Arc::new(CountingCallback { completed: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::{CodeSource, ContentSource};
use std::sync::Arc;

/// Called by the orchestrator as it processes each slide.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `on_slide_start` and `on_slide_complete` may be
/// called concurrently from different tasks, in any slide order.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called once before the first slide is started.
    fn on_generation_start(&self, topic: &str, total_slides: usize) {
        let _ = (topic, total_slides);
    }

    /// Called just before the content request for a slide is sent.
    fn on_slide_start(&self, position: usize, total_slides: usize) {
        let _ = (position, total_slides);
    }

    /// Called when a slide has both content and code.
    ///
    /// The sources tell whether the model or the fallback path produced them.
    fn on_slide_complete(
        &self,
        position: usize,
        total_slides: usize,
        content: ContentSource,
        code: CodeSource,
    ) {
        let _ = (position, total_slides, content, code);
    }

    /// Called once after every slide is done.
    ///
    /// `degraded_slides` counts slides where at least one stage fell back.
    fn on_generation_complete(&self, total_slides: usize, degraded_slides: usize) {
        let _ = (total_slides, degraded_slides);
    }
}

/// A no-op implementation; the default when no callback is configured.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::GenerationConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        fallbacks: AtomicUsize,
        degraded_total: AtomicUsize,
    }

    impl GenerationProgressCallback for TrackingCallback {
        fn on_slide_start(&self, _position: usize, _total: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_slide_complete(&self, _: usize, _: usize, content: ContentSource, code: CodeSource) {
            if content == ContentSource::Fallback || code == CodeSource::Template {
                self.fallbacks.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn on_generation_complete(&self, _total: usize, degraded: usize) {
            self.degraded_total.store(degraded, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_generation_start("topic", 3);
        cb.on_slide_start(1, 3);
        cb.on_slide_complete(1, 3, ContentSource::Generated, CodeSource::Generated);
        cb.on_generation_complete(3, 0);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_slide_start(1, 2);
        tracker.on_slide_complete(1, 2, ContentSource::Generated, CodeSource::Generated);
        tracker.on_slide_start(2, 2);
        tracker.on_slide_complete(2, 2, ContentSource::Generated, CodeSource::Template);
        tracker.on_generation_complete(2, 1);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.fallbacks.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.degraded_total.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GenerationProgressCallback>();
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_generation_start("t", 1);
    }
}
