//! Carousel — featured-project rotation.
//!
//! DESIGN
//! ======
//! `Carousel` is the bare index: `current ∈ [0, len)` with wraparound.
//! `CarouselState` wraps it with a transition clock. Manual navigation
//! starts a transition; autoplay ticks that land inside a transition are
//! skipped so a timer advance never overlaps a user's move.
//!
//! The autoplay timer is a tokio task owned by an [`Autoplay`] guard and is
//! aborted when the guard drops, whichever way its owner goes away.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel needs at least one item")]
    Empty,
}

// =============================================================================
// INDEX
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

// Never empty, so no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl Carousel {
    /// # Errors
    ///
    /// Returns [`CarouselError::Empty`] when `len` is zero.
    pub fn new(len: usize) -> Result<Self, CarouselError> {
        if len == 0 {
            return Err(CarouselError::Empty);
        }
        Ok(Self { len, current: 0 })
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }

    pub fn prev(&mut self) -> usize {
        self.current = (self.current + self.len - 1) % self.len;
        self.current
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        self.current = index % self.len;
        self.current
    }
}

// =============================================================================
// SHARED STATE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Prev,
    GoTo(usize),
}

#[derive(Debug)]
struct Inner {
    carousel: Carousel,
    /// End of the manual transition currently animating, if any.
    in_flight_until: Option<Instant>,
}

/// Carousel shared by the autoplay task and request handlers.
#[derive(Debug, Clone)]
pub struct CarouselState {
    inner: Arc<Mutex<Inner>>,
    transition: Duration,
}

#[allow(clippy::len_without_is_empty)]
impl CarouselState {
    /// # Errors
    ///
    /// Returns [`CarouselError::Empty`] when `len` is zero.
    pub fn new(len: usize, transition: Duration) -> Result<Self, CarouselError> {
        let carousel = Carousel::new(len)?;
        Ok(Self { inner: Arc::new(Mutex::new(Inner { carousel, in_flight_until: None })), transition })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.lock().carousel.current()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().carousel.len()
    }

    /// Manual navigation. Starts a transition that suspends autoplay.
    pub fn navigate(&self, nav: Navigation) -> usize {
        self.navigate_at(nav, Instant::now())
    }

    fn navigate_at(&self, nav: Navigation, now: Instant) -> usize {
        let mut inner = self.lock();
        let index = match nav {
            Navigation::Next => inner.carousel.next(),
            Navigation::Prev => inner.carousel.prev(),
            Navigation::GoTo(i) => inner.carousel.go_to(i),
        };
        inner.in_flight_until = Some(now + self.transition);
        index
    }

    /// Autoplay step. Returns the new index, or `None` when a manual
    /// transition is still in flight and the tick was skipped.
    pub fn tick(&self) -> Option<usize> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&self, now: Instant) -> Option<usize> {
        let mut inner = self.lock();
        if let Some(until) = inner.in_flight_until {
            if now < until {
                return None;
            }
            inner.in_flight_until = None;
        }
        Some(inner.carousel.next())
    }
}

// =============================================================================
// AUTOPLAY
// =============================================================================

/// Owns the autoplay timer task; dropping it cancels the timer.
pub struct Autoplay {
    handle: JoinHandle<()>,
}

impl Autoplay {
    /// Start advancing `state` every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero (see [`tokio::time::interval`]).
    #[must_use]
    pub fn spawn(state: CarouselState, interval: Duration) -> Self {
        info!(interval_ms = interval.as_millis(), items = state.len(), "carousel autoplay started");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; the first advance waits a full interval.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match state.tick() {
                    Some(index) => debug!(index, "carousel advanced"),
                    None => debug!("carousel tick skipped during manual transition"),
                }
            }
        });
        Self { handle }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[path = "carousel_test.rs"]
mod tests;
