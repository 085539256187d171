use std::time::Duration;

use tokio::time::Instant;

/// Time source used by [`Pacer`].
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// The tokio runtime clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Keeps consecutive requests at least `interval` apart.
///
/// The first [`Pacer::wait`] returns immediately; every following call
/// returns no earlier than `interval` after the previous one returned. A zero
/// interval never sleeps.
pub struct Pacer<C = SystemClock> {
    interval: Duration,
    last: Option<Instant>,
    clock: C,
}

impl Pacer<SystemClock> {
    pub fn new(interval: Duration) -> Self {
        Pacer::with_clock(interval, SystemClock)
    }

    pub fn from_millis(millis: u64) -> Self {
        Pacer::new(Duration::from_millis(millis))
    }

    /// A pacer that never waits.
    pub fn unpaced() -> Self {
        Pacer::new(Duration::ZERO)
    }
}

impl<C: Clock> Pacer<C> {
    pub fn with_clock(interval: Duration, clock: C) -> Self {
        Pacer {
            interval,
            last: None,
            clock,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = self.clock.now().saturating_duration_since(last);
            if elapsed < self.interval {
                self.clock.sleep(self.interval - elapsed).await;
            }
        }
        self.last = Some(self.clock.now());
    }
}
