//! Search-input debouncing.
//!
//! Keystrokes are coalesced before they mutate `QueryState`, so the pipeline
//! reruns once per pause in typing rather than once per key. This only
//! changes *when* a recomputation happens, never its result.
//!
//! `Debouncer` is clock-injected and has no timers. `spawn_debouncer` wraps
//! it in a tokio task for async front ends.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Lower bound of the recommended debounce window
pub const MIN_DEBOUNCE: Duration = Duration::from_millis(150);

/// Upper bound of the recommended debounce window
pub const MAX_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default debounce window
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Clamp a configured delay into the recommended window
pub fn clamp_delay(delay: Duration) -> Duration {
    delay.clamp(MIN_DEBOUNCE, MAX_DEBOUNCE)
}

/// Latest-value debouncer driven by caller-supplied instants
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value; restarts the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(
            self.pending,
            Some((_, since)) if now.saturating_duration_since(since) >= self.delay
        );
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// When the pending value becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, since)| *since + self.delay)
    }

    /// Take the pending value immediately (e.g. on Enter)
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value without emitting it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Spawn a task that forwards the last value of each burst on `input`
/// once `delay` passes without a newer one.
///
/// A value still pending when `input` closes is flushed. The task ends when
/// either side closes.
pub fn spawn_debouncer<T: Send + 'static>(
    mut input: mpsc::Receiver<T>,
    output: mpsc::Sender<T>,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(delay);

        loop {
            let Some(deadline) = debouncer.deadline() else {
                match input.recv().await {
                    Some(value) => debouncer.push(value, Instant::now()),
                    None => break,
                }
                continue;
            };

            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => debouncer.push(value, Instant::now()),
                    None => {
                        if let Some(value) = debouncer.flush() {
                            let _ = output.send(value).await;
                        }
                        break;
                    }
                },
                _ = tokio::time::sleep_until(deadline.into()) => {
                    if let Some(value) = debouncer.poll(Instant::now()) {
                        if output.send(value).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    })
}
