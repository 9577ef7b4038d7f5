// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Liveness tracker - in-memory table of currently reachable devices
//!
//! The tracker answers "can we deliver a command to this device right now"
//! and owns the per-device backlog of pending commands. State is deliberately
//! not durable: an entry exists if and only if the device has been seen since
//! this process started, and absence must be read as offline.
//!
//! Locking discipline: the outer `RwLock` guards insertion and removal of
//! entries only. Each entry carries its own `Mutex` guarding the online flag,
//! heartbeat timestamp, and command queue together, so a drain and a
//! concurrent enqueue on the same device serialize correctly while unrelated
//! devices never contend.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::sanitize::sanitize_command;
use crate::{CoreError, DeviceId};

/// Transient per-device liveness state
struct LivenessEntry {
    online: bool,
    last_heartbeat: Instant,
    commands: VecDeque<String>,
}

impl LivenessEntry {
    fn new() -> Self {
        Self {
            online: true,
            last_heartbeat: Instant::now(),
            commands: VecDeque::new(),
        }
    }
}

/// In-memory liveness table, keyed by device identity
#[derive(Default)]
pub struct LivenessTracker {
    entries: RwLock<HashMap<DeviceId, Mutex<LivenessEntry>>>,
}

impl LivenessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a device was just heard from.
    ///
    /// Creates the entry if absent. Pending commands queued while the device
    /// was offline are preserved; a reaped entry is revived in place.
    pub fn mark_alive(&self, id: &DeviceId) {
        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(id) {
                let mut entry = entry.lock();
                entry.online = true;
                entry.last_heartbeat = Instant::now();
                return;
            }
        }

        let mut entries = self.entries.write();
        // Re-check: another caller may have inserted between the locks.
        entries
            .entry(*id)
            .and_modify(|e| {
                let mut e = e.lock();
                e.online = true;
                e.last_heartbeat = Instant::now();
            })
            .or_insert_with(|| {
                debug!("Tracking new device: {}", id);
                Mutex::new(LivenessEntry::new())
            });
    }

    /// Atomically take every pending command for a device, oldest first.
    ///
    /// Draining implies the device is alive, so the heartbeat is refreshed.
    /// An unknown identity yields an empty list; that is not an error.
    pub fn drain_commands(&self, id: &DeviceId) -> Vec<String> {
        let entries = self.entries.read();
        match entries.get(id) {
            Some(entry) => {
                let mut entry = entry.lock();
                entry.online = true;
                entry.last_heartbeat = Instant::now();
                std::mem::take(&mut entry.commands).into()
            }
            None => Vec::new(),
        }
    }

    /// Queue a command for a device.
    ///
    /// Fails with `DeviceNotActive` when the device has no entry this process
    /// lifetime; commands are never buffered for devices that may never
    /// return, since that backlog would grow without bound.
    pub fn enqueue(&self, id: &DeviceId, command: &str) -> crate::Result<()> {
        let entries = self.entries.read();
        match entries.get(id) {
            Some(entry) => {
                let sanitized = sanitize_command(command);
                entry.lock().commands.push_back(sanitized);
                Ok(())
            }
            None => Err(CoreError::DeviceNotActive(id.to_string())),
        }
    }

    /// Whether a device is currently believed reachable.
    pub fn is_online(&self, id: &DeviceId) -> bool {
        let entries = self.entries.read();
        entries.get(id).map(|e| e.lock().online).unwrap_or(false)
    }

    /// Count of devices currently flagged online.
    pub fn online_count(&self) -> usize {
        let entries = self.entries.read();
        entries.values().filter(|e| e.lock().online).count()
    }

    /// Count of devices seen this process lifetime.
    pub fn tracked_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Forget a device entirely, dropping any pending commands.
    pub fn remove(&self, id: &DeviceId) {
        self.entries.write().remove(id);
    }

    /// Forget every device (fleet wipe).
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Demote every entry whose heartbeat is older than `stale_after`.
    ///
    /// Entries are flipped offline but retained along with their queues; a
    /// revived device still receives everything queued while it was dark.
    /// Returns the identities demoted in this pass.
    pub fn sweep(&self, stale_after: Duration) -> Vec<DeviceId> {
        let entries = self.entries.read();
        let mut demoted = Vec::new();

        for (id, entry) in entries.iter() {
            let mut entry = entry.lock();
            if entry.online && entry.last_heartbeat.elapsed() > stale_after {
                entry.online = false;
                demoted.push(*id);
            }
        }

        if !demoted.is_empty() {
            info!("Swept {} stale device(s) offline", demoted.len());
        }
        demoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_device_is_offline_with_empty_queue() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        assert!(!tracker.is_online(&id));
        assert!(tracker.drain_commands(&id).is_empty());
    }

    #[test]
    fn test_mark_alive_flips_online() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        tracker.mark_alive(&id);
        assert!(tracker.is_online(&id));
        assert_eq!(tracker.tracked_count(), 1);
    }

    #[test]
    fn test_drain_preserves_fifo_order_and_empties_queue() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        tracker.mark_alive(&id);
        tracker.enqueue(&id, "c1").unwrap();
        tracker.enqueue(&id, "c2").unwrap();

        assert_eq!(tracker.drain_commands(&id), vec!["c1", "c2"]);
        assert!(tracker.drain_commands(&id).is_empty());
    }

    #[test]
    fn test_enqueue_unknown_device_fails_without_side_effect() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        let result = tracker.enqueue(&id, "capture");
        assert!(matches!(result, Err(CoreError::DeviceNotActive(_))));
        assert_eq!(tracker.tracked_count(), 0);
        assert!(tracker.drain_commands(&id).is_empty());
    }

    #[test]
    fn test_enqueue_sanitizes_command() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        tracker.mark_alive(&id);
        tracker.enqueue(&id, "run\r\nthis").unwrap();
        assert_eq!(tracker.drain_commands(&id), vec!["runthis"]);
    }

    #[test]
    fn test_sweep_demotes_stale_entry_but_keeps_queue() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        tracker.mark_alive(&id);
        tracker.enqueue(&id, "pending").unwrap();

        let demoted = tracker.sweep(Duration::ZERO);
        assert_eq!(demoted, vec![id]);
        assert!(!tracker.is_online(&id));

        // Queued work survives the demotion and a later revival.
        tracker.mark_alive(&id);
        assert!(tracker.is_online(&id));
        assert_eq!(tracker.drain_commands(&id), vec!["pending"]);
    }

    #[test]
    fn test_sweep_skips_fresh_entries() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        tracker.mark_alive(&id);
        assert!(tracker.sweep(Duration::from_secs(60)).is_empty());
        assert!(tracker.is_online(&id));
    }

    #[test]
    fn test_reaped_entry_still_accepts_commands() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        tracker.mark_alive(&id);
        tracker.sweep(Duration::ZERO);

        // The entry exists (merely offline), so the backlog stays bounded by
        // the device's own history and enqueue is allowed.
        tracker.enqueue(&id, "wake").unwrap();
        assert_eq!(tracker.drain_commands(&id), vec!["wake"]);
    }

    #[test]
    fn test_online_count() {
        let tracker = LivenessTracker::new();
        let a = DeviceId::generate();
        let b = DeviceId::generate();

        tracker.mark_alive(&a);
        tracker.mark_alive(&b);
        assert_eq!(tracker.online_count(), 2);

        tracker.sweep(Duration::ZERO);
        assert_eq!(tracker.online_count(), 0);
        assert_eq!(tracker.tracked_count(), 2);
    }

    #[test]
    fn test_remove_drops_entry_and_queue() {
        let tracker = LivenessTracker::new();
        let id = DeviceId::generate();

        tracker.mark_alive(&id);
        tracker.enqueue(&id, "c1").unwrap();
        tracker.remove(&id);

        assert!(!tracker.is_online(&id));
        assert!(tracker.drain_commands(&id).is_empty());
        assert!(tracker.enqueue(&id, "c2").is_err());
    }

    #[test]
    fn test_concurrent_enqueue_and_drain_lose_nothing() {
        use std::sync::Arc;
        use std::thread;

        let tracker = Arc::new(LivenessTracker::new());
        let id = DeviceId::generate();
        tracker.mark_alive(&id);

        let producer = {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for i in 0..500 {
                    tracker.enqueue(&id, &format!("cmd_{}", i)).unwrap();
                }
            })
        };

        let consumer = {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                let mut seen = Vec::new();
                while seen.len() < 500 {
                    seen.extend(tracker.drain_commands(&id));
                }
                seen
            })
        };

        producer.join().unwrap();
        let seen = consumer.join().unwrap();

        // Every command arrives exactly once, in order.
        assert_eq!(seen.len(), 500);
        for (i, cmd) in seen.iter().enumerate() {
            assert_eq!(cmd, &format!("cmd_{}", i));
        }
    }

    #[test]
    fn test_concurrent_mark_alive_many_devices() {
        use std::sync::Arc;
        use std::thread;

        let tracker = Arc::new(LivenessTracker::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let tracker = Arc::clone(&tracker);
            handles.push(thread::spawn(move || {
                for _ in 0..25 {
                    tracker.mark_alive(&DeviceId::generate());
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.tracked_count(), 200);
        assert_eq!(tracker.online_count(), 200);
    }
}
