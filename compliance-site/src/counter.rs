/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Animated hero counters.
//!
//! [`CounterAnimation`] is the pure curve; [`AnimatedCounter`] drives it with
//! an explicit frame loop and stops that loop when dropped.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Roughly one display frame at 60 Hz.
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    pub start: u64,
    pub target: u64,
    pub duration: Duration,
}

impl CounterAnimation {
    pub fn new(start: u64, target: u64, duration: Duration) -> Self {
        Self {
            start,
            target,
            duration,
        }
    }

    /// Count up from zero over [`DEFAULT_DURATION`].
    pub fn to(target: u64) -> Self {
        Self::new(0, target, DEFAULT_DURATION)
    }

    /// Ease-out cubic between `start` and `target`; exactly `target` from
    /// `duration` on.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.target;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        let start = self.start as f64;
        let target = self.target as f64;
        (start + (target - start) * eased).round() as u64
    }

    /// Start the frame loop.
    ///
    /// **Important:** must be called from within a tokio runtime.
    pub fn spawn(self, frame: Duration) -> AnimatedCounter {
        let (tx, rx) = watch::channel(self.start);
        let frame = frame.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(frame);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let elapsed = started.elapsed();
                let value = self.value_at(elapsed);
                tx.send_if_modified(|current| {
                    if *current == value {
                        return false;
                    }
                    *current = value;
                    true
                });
                if elapsed >= self.duration || tx.is_closed() {
                    break;
                }
            }
        });

        AnimatedCounter {
            animation: self,
            value: rx,
            task: Some(task),
        }
    }
}

/// A running counter. Dropping it cancels the frame loop.
pub struct AnimatedCounter {
    animation: CounterAnimation,
    value: watch::Receiver<u64>,
    task: Option<JoinHandle<()>>,
}

impl AnimatedCounter {
    pub fn animation(&self) -> CounterAnimation {
        self.animation
    }

    /// The most recently rendered value.
    pub fn value(&self) -> u64 {
        *self.value.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.value.clone()
    }

    /// Wait until the counter shows its target.
    pub async fn finished(&mut self) -> u64 {
        let target = self.animation.target;
        let reached = self.value.wait_for(|value| *value == target).await.is_ok();
        if reached {
            target
        } else {
            *self.value.borrow()
        }
    }
}

impl Drop for AnimatedCounter {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_hits_both_ends() {
        let animation = CounterAnimation::new(0, 500, Duration::from_secs(2));
        assert_eq!(animation.value_at(Duration::ZERO), 0);
        assert_eq!(animation.value_at(Duration::from_secs(2)), 500);
        assert_eq!(animation.value_at(Duration::from_secs(10)), 500);
    }

    #[test]
    fn curve_is_monotonic_and_front_loaded() {
        let animation = CounterAnimation::new(0, 1000, Duration::from_secs(1));
        let samples: Vec<u64> = (0..=100)
            .map(|ms| animation.value_at(Duration::from_millis(ms * 10)))
            .collect();
        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
        // Ease-out: past the halfway value at the halfway time.
        assert!(animation.value_at(Duration::from_millis(500)) > 500);
    }

    #[test]
    fn counts_down_when_target_is_lower() {
        let animation = CounterAnimation::new(100, 40, Duration::from_secs(1));
        let mid = animation.value_at(Duration::from_millis(500));
        assert!(mid < 100 && mid > 40, "mid was {mid}");
        assert_eq!(animation.value_at(Duration::from_secs(1)), 40);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let animation = CounterAnimation::new(3, 9, Duration::ZERO);
        assert_eq!(animation.value_at(Duration::ZERO), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn frame_loop_reaches_target() {
        let mut counter = CounterAnimation::to(1200).spawn(DEFAULT_FRAME);
        assert_eq!(counter.value(), 0);
        assert_eq!(counter.finished().await, 1200);
        assert_eq!(counter.value(), 1200);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_counter_stops_the_loop() {
        let counter =
            CounterAnimation::new(0, 1000, Duration::from_secs(2)).spawn(DEFAULT_FRAME);
        let mut rx = counter.subscribe();

        tokio::time::sleep(Duration::from_millis(500)).await;
        let seen = *rx.borrow_and_update();
        assert!(seen > 0 && seen < 1000, "seen {seen}");

        drop(counter);
        while rx.changed().await.is_ok() {}
        assert!(*rx.borrow() < 1000);
    }
}
