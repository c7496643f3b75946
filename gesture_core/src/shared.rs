//! Latest gesture snapshot shared between the inference thread and readers.
//!
//! Single writer, many readers.  [`GesturePublisher`] is deliberately not
//! `Clone`: whoever holds it is the only code that can change the shared
//! snapshot.  [`GestureReader`]s copy the snapshot out under a short read
//! lock and must tolerate it being one cycle stale.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::pipeline::GestureSnapshot;

/// Build a linked publisher/reader pair holding a default snapshot.
pub fn shared_gesture_state() -> (GesturePublisher, GestureReader) {
    let inner = Arc::new(RwLock::new(GestureSnapshot::default()));
    (GesturePublisher { inner: Arc::clone(&inner) }, GestureReader { inner })
}

pub struct GesturePublisher {
    inner: Arc<RwLock<GestureSnapshot>>,
}

impl GesturePublisher {
    pub fn publish(&self, snapshot: GestureSnapshot) {
        *self.inner.write() = snapshot;
    }

    /// A new reader attached to this publisher.
    pub fn reader(&self) -> GestureReader {
        GestureReader { inner: Arc::clone(&self.inner) }
    }
}

#[derive(Clone)]
pub struct GestureReader {
    inner: Arc<RwLock<GestureSnapshot>>,
}

impl GestureReader {
    /// Copy of the latest published snapshot.
    pub fn snapshot(&self) -> GestureSnapshot {
        *self.inner.read()
    }

    /// Borrow the snapshot under the read lock without copying.
    pub fn with<R>(&self, f: impl FnOnce(&GestureSnapshot) -> R) -> R {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::GestureLabel;
    use std::thread;

    #[test]
    fn readers_see_published_snapshot() {
        let (publisher, reader) = shared_gesture_state();
        let other = reader.clone();
        assert_eq!(reader.snapshot(), GestureSnapshot::default());

        let snap = GestureSnapshot { sequence: 7, gesture: GestureLabel::Fist, ..Default::default() };
        publisher.publish(snap);
        assert_eq!(reader.snapshot().sequence, 7);
        assert_eq!(other.with(|s| s.gesture), GestureLabel::Fist);
        assert_eq!(publisher.reader().snapshot(), snap);
    }

    #[test]
    fn publisher_on_another_thread() {
        let (publisher, reader) = shared_gesture_state();
        let handle = thread::spawn(move || {
            for seq in 1..=100 {
                publisher.publish(GestureSnapshot { sequence: seq, ..Default::default() });
            }
        });
        handle.join().unwrap();
        assert_eq!(reader.snapshot().sequence, 100);
    }
}
