//! Fixed-rate inference thread.
//!
//! Owns the landmark source and the [`GesturePipeline`] and is the only
//! holder of the [`GesturePublisher`].  Runs independently of the render
//! loop; readers see at most one cycle of staleness.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, trace};

use gesture_core::{Clock, GesturePipeline, GesturePublisher, GestureSnapshot};

use crate::source::LandmarkSource;

/// One cycle: pull landmarks, run the pipeline, publish.
pub fn run_cycle(
    source:    &mut dyn LandmarkSource,
    pipeline:  &mut GesturePipeline,
    publisher: &GesturePublisher,
    now:       f64,
) -> GestureSnapshot {
    let frame = source.next_frame(now);
    let snapshot = pipeline.process(frame.as_ref(), now);
    publisher.publish(snapshot);
    trace!("cycle {} gesture {}", snapshot.sequence, snapshot.gesture);
    snapshot
}

// ════════════════════════════════════════════════════════════════════════════
// Thread handle
// ════════════════════════════════════════════════════════════════════════════

pub struct InferenceHandle {
    stop:   Arc<AtomicBool>,
    thread: Option<JoinHandle<u64>>,
}

impl InferenceHandle {
    /// Raise the stop flag and wait for the thread; returns cycles run.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.stop.store(true, Ordering::Relaxed);
        self.thread.take().and_then(|t| t.join().ok()).unwrap_or(0)
    }
}

impl Drop for InferenceHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start the inference loop at `hz` cycles per second.
///
/// The loop ends when the handle is stopped or dropped, or when the source
/// reports it is closed.
pub fn spawn_inference<S: LandmarkSource>(
    mut source:   S,
    mut pipeline: GesturePipeline,
    publisher:    GesturePublisher,
    clock:        Arc<dyn Clock>,
    hz:           f64,
) -> InferenceHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let period = Duration::from_secs_f64(1.0 / hz.max(1.0));

    let thread = thread::spawn(move || {
        info!("inference thread started at {:.1} Hz", 1.0 / period.as_secs_f64());
        let mut cycles = 0u64;
        while !flag.load(Ordering::Relaxed) {
            let start = clock.now();
            run_cycle(&mut source, &mut pipeline, &publisher, start);
            cycles += 1;
            if source.is_closed() {
                debug!("landmark source closed");
                break;
            }
            let spent = Duration::from_secs_f64((clock.now() - start).max(0.0));
            if let Some(rest) = period.checked_sub(spent) {
                thread::sleep(rest);
            }
        }
        info!("inference thread stopped after {} cycles", cycles);
        cycles
    });

    InferenceHandle { stop, thread: Some(thread) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
