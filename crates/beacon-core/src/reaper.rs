// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reaper - periodic sweep that demotes stale devices to offline
//!
//! Runs on its own thread for the life of the process. Every sweep period it
//! asks the tracker for entries whose heartbeat has gone stale, flips them
//! offline, and mirrors the demotion into the durable registry through the
//! `StatusSink` seam. A sink failure is logged and the loop moves on; no
//! single sweep's failure may stop the reaper.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{error, info};

use crate::{DeviceId, LivenessTracker};

/// Default sweep period.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Default staleness threshold: twice the sweep period, so a device is never
/// demoted before missing at least one full heartbeat cycle.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(60);

/// Durable collaborator notified when the reaper demotes a device.
///
/// Keeps the core decoupled from the storage backend; the registry adapter
/// lives with the storage code.
pub trait StatusSink: Send + Sync {
    fn mark_offline(&self, id: &DeviceId) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Periodic liveness sweep task
pub struct Reaper {
    running: Arc<RwLock<bool>>,
    thread_handle: Option<thread::JoinHandle<()>>,
    sweep_interval: Duration,
    stale_after: Duration,
}

impl Reaper {
    pub fn new() -> Self {
        Self {
            running: Arc::new(RwLock::new(false)),
            thread_handle: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            stale_after: DEFAULT_STALE_AFTER,
        }
    }

    /// Override the sweep period (useful for tests).
    pub fn set_sweep_interval(&mut self, interval: Duration) {
        self.sweep_interval = interval;
    }

    /// Override the staleness threshold (useful for tests).
    pub fn set_stale_after(&mut self, stale_after: Duration) {
        self.stale_after = stale_after;
    }

    /// Start sweeping. Idempotent while already running.
    pub fn start(&mut self, tracker: Arc<LivenessTracker>, sink: Arc<dyn StatusSink>) {
        if *self.running.read() {
            return;
        }

        *self.running.write() = true;
        let running = Arc::clone(&self.running);
        let sweep_interval = self.sweep_interval;
        let stale_after = self.stale_after;

        let handle = thread::spawn(move || {
            info!(
                "Reaper started (sweep every {:?}, stale after {:?})",
                sweep_interval, stale_after
            );

            while *running.read() {
                thread::sleep(sweep_interval);

                if !*running.read() {
                    break;
                }

                for id in tracker.sweep(stale_after) {
                    info!("Device marked offline: {}", id);
                    if let Err(e) = sink.mark_offline(&id) {
                        error!("Failed to record offline status for {}: {}", id, e);
                    }
                }
            }

            info!("Reaper stopped");
        });

        self.thread_handle = Some(handle);
    }

    /// Signal the sweep loop to stop and wait for it to exit.
    pub fn stop(&mut self) {
        *self.running.write() = false;

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Default for Reaper {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct RecordingSink {
        demoted: Mutex<Vec<DeviceId>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new(fail: bool) -> Self {
            Self {
                demoted: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl StatusSink for RecordingSink {
        fn mark_offline(
            &self,
            id: &DeviceId,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.demoted.lock().push(*id);
            if self.fail {
                Err("registry unavailable".into())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_reaper_demotes_stale_device_and_notifies_sink() {
        let tracker = Arc::new(LivenessTracker::new());
        let sink = Arc::new(RecordingSink::new(false));
        let id = DeviceId::generate();

        tracker.mark_alive(&id);

        let mut reaper = Reaper::new();
        reaper.set_sweep_interval(Duration::from_millis(10));
        reaper.set_stale_after(Duration::from_millis(20));
        reaper.start(Arc::clone(&tracker), sink.clone());

        std::thread::sleep(Duration::from_millis(100));
        reaper.stop();

        assert!(!tracker.is_online(&id));
        assert_eq!(sink.demoted.lock().as_slice(), &[id]);
    }

    #[test]
    fn test_reaper_spares_device_with_fresh_heartbeats() {
        let tracker = Arc::new(LivenessTracker::new());
        let sink = Arc::new(RecordingSink::new(false));
        let id = DeviceId::generate();

        let mut reaper = Reaper::new();
        reaper.set_sweep_interval(Duration::from_millis(10));
        reaper.set_stale_after(Duration::from_millis(200));
        reaper.start(Arc::clone(&tracker), sink.clone());

        for _ in 0..10 {
            tracker.mark_alive(&id);
            std::thread::sleep(Duration::from_millis(10));
        }
        reaper.stop();

        assert!(tracker.is_online(&id));
        assert!(sink.demoted.lock().is_empty());
    }

    #[test]
    fn test_reaper_survives_sink_failures() {
        let tracker = Arc::new(LivenessTracker::new());
        let sink = Arc::new(RecordingSink::new(true));
        let a = DeviceId::generate();

        tracker.mark_alive(&a);

        let mut reaper = Reaper::new();
        reaper.set_sweep_interval(Duration::from_millis(10));
        reaper.set_stale_after(Duration::from_millis(20));
        reaper.start(Arc::clone(&tracker), sink.clone());

        std::thread::sleep(Duration::from_millis(60));

        // First sweep failed at the sink, but the loop keeps going and a
        // freshly revived-then-stale device is still demoted.
        let b = DeviceId::generate();
        tracker.mark_alive(&b);
        std::thread::sleep(Duration::from_millis(60));
        reaper.stop();

        let demoted = sink.demoted.lock();
        assert!(demoted.contains(&a));
        assert!(demoted.contains(&b));
    }
}
